use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::config::ServerConfig;
use crate::repository::StaticRepository;
use crate::routes::{base_context, not_found_page, render_template};
use crate::seo::{Breadcrumb, PageKind, SeoMetadata, blog_posting_schema, breadcrumb_schema};
use crate::services::{ServiceError, blog};

#[get("/blog")]
pub async fn show_blog(
    repo: web::Data<StaticRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match blog::list_posts(repo.get_ref()) {
        Ok(posts) => {
            let seo = SeoMetadata::new("Blog")
                .description("Read our latest reviews, buying guides, and tips.")
                .url(server_config.site.url("/blog"));
            let mut context = base_context(
                repo.get_ref(),
                &flash_messages,
                &server_config,
                "blog",
                &seo,
                &[],
            );
            context.insert("posts", &posts);
            render_template(&tera, "blog/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list blog posts: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/blog/{slug}")]
pub async fn show_post(
    slug: web::Path<String>,
    repo: web::Data<StaticRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match blog::load_post_page(repo.get_ref(), &slug) {
        Ok(data) => {
            let site = &server_config.site;
            let trail = [
                Breadcrumb::link("Blog", "/blog"),
                Breadcrumb::current(data.post.title.clone()),
            ];

            let seo = SeoMetadata::new(data.post.title.clone())
                .description(data.post.excerpt.clone())
                .image(data.post.image.clone())
                .url(site.url(&format!("/blog/{}", data.post.slug)))
                .kind(PageKind::Article)
                .schema(&blog_posting_schema(&data.post))
                .schema(&breadcrumb_schema(site, &trail));

            let mut context = base_context(
                repo.get_ref(),
                &flash_messages,
                &server_config,
                "blog",
                &seo,
                &trail,
            );
            context.insert("post", &data.post);
            context.insert("recommended", &data.recommended);
            render_template(&tera, "blog/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            not_found_page(repo.get_ref(), &flash_messages, &server_config, &tera)
        }
        Err(err) => {
            log::error!("Failed to load blog post {slug}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
