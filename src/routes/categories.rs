use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::config::ServerConfig;
use crate::repository::StaticRepository;
use crate::routes::{base_context, not_found_page, render_template};
use crate::seo::{Breadcrumb, SeoMetadata, breadcrumb_schema, item_list_schema};
use crate::services::{ServiceError, categories};

#[get("/category/{slug}")]
pub async fn show_category(
    slug: web::Path<String>,
    repo: web::Data<StaticRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match categories::load_category_page(repo.get_ref(), &slug) {
        Ok(data) => {
            let site = &server_config.site;
            let trail = [Breadcrumb::current(data.category.name.clone())];
            let products: Vec<_> = data.products.iter().map(|view| view.product.clone()).collect();

            let seo = SeoMetadata::new(data.category.name.clone())
                .description(data.category.description.clone())
                .image(data.category.image.clone())
                .url(site.url(&format!("/category/{}", data.category.slug)))
                .schema(&item_list_schema(site, &products))
                .schema(&breadcrumb_schema(site, &trail));

            let mut context = base_context(
                repo.get_ref(),
                &flash_messages,
                &server_config,
                "category",
                &seo,
                &trail,
            );
            context.insert("category", &data.category);
            context.insert("products", &data.products);
            render_template(&tera, "categories/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            not_found_page(repo.get_ref(), &flash_messages, &server_config, &tera)
        }
        Err(err) => {
            log::error!("Failed to load category {slug}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
