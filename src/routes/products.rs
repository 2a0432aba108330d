use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Local;
use tera::Tera;

use crate::config::ServerConfig;
use crate::repository::StaticRepository;
use crate::routes::{base_context, not_found_page, render_template};
use crate::seo::{Breadcrumb, PageKind, SeoMetadata, breadcrumb_schema, product_schema};
use crate::services::{ServiceError, products};

#[get("/product/{id}")]
pub async fn show_product(
    id: web::Path<String>,
    repo: web::Data<StaticRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products::load_product_page(repo.get_ref(), &id) {
        Ok(data) => {
            let site = &server_config.site;
            let product = &data.product.product;
            let trail = [
                Breadcrumb::link(data.category_name(), format!("/category/{}", product.category)),
                Breadcrumb::current(product.title.clone()),
            ];

            let seo = SeoMetadata::new(product.title.clone())
                .description(product.short_description.clone())
                .image(product.image.clone())
                .url(site.url(&format!("/product/{}", product.id)))
                .kind(PageKind::Product)
                .schema(&product_schema(product, Local::now().date_naive()))
                .schema(&breadcrumb_schema(site, &trail));

            let mut context = base_context(
                repo.get_ref(),
                &flash_messages,
                &server_config,
                "product",
                &seo,
                &trail,
            );
            context.insert("product", &data.product);
            context.insert("related", &data.related);
            render_template(&tera, "products/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            not_found_page(repo.get_ref(), &flash_messages, &server_config, &tera)
        }
        Err(err) => {
            log::error!("Failed to load product {id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
