use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::config::ServerConfig;
use crate::repository::StaticRepository;
use crate::routes::{base_context, render_template};
use crate::seo::SeoMetadata;
use crate::services::main as main_service;

#[get("/")]
pub async fn show_index(
    repo: web::Data<StaticRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match main_service::load_index_page(repo.get_ref()) {
        Ok(data) => {
            let seo = SeoMetadata::new("Home")
                .description(format!(
                    "Discover curated products and expert reviews at {}.",
                    server_config.site.name
                ))
                .url(server_config.site.url("/"));
            let mut context = base_context(
                repo.get_ref(),
                &flash_messages,
                &server_config,
                "index",
                &seo,
                &[],
            );
            context.insert("featured", &data.featured);
            context.insert("categories", &data.categories);
            context.insert("posts", &data.posts);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the home page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
