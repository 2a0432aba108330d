use std::collections::HashMap;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use reqwest::Url;
use serde::Serialize;
use tera::{Context, Tera, Value};

use crate::config::ServerConfig;
use crate::repository::{CategoryReader, StaticRepository};
use crate::seo::{Breadcrumb, SeoMetadata};

pub mod api;
pub mod blog;
pub mod categories;
pub mod contact;
pub mod main;
pub mod pages;
pub mod products;
pub mod search;

/// Card width requested when a template does not pass one.
const DEFAULT_IMAGE_WIDTH: u64 = 500;

/// Register every storefront route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main::show_index)
        .service(categories::show_category)
        .service(products::show_product)
        .service(blog::show_blog)
        .service(blog::show_post)
        .service(search::show_search)
        .service(contact::show_contact)
        .service(contact::submit_contact)
        .service(pages::show_about)
        .service(pages::show_privacy)
        .service(pages::show_connect)
        .service(pages::subscribe)
        .service(
            web::scope("/api")
                .service(api::api_v1_search)
                .service(api::api_v1_product),
        );
}

/// Parse the templates matched by `glob` and register the custom filters.
pub fn load_templates(glob: &str) -> tera::Result<Tera> {
    let mut tera = Tera::new(glob)?;
    tera.register_filter("sized_image", sized_image);
    Ok(tera)
}

/// Render `template` with status 200.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_with_status(tera, template, context, StatusCode::OK)
}

pub fn render_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// `303 See Other` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[derive(Serialize)]
struct Alert<'a> {
    level: &'static str,
    content: &'a str,
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: site identity, category navigation,
/// flash alerts, breadcrumbs and the `<head>` tags.
pub fn base_context<R>(
    repo: &R,
    flash_messages: &IncomingFlashMessages,
    config: &ServerConfig,
    current_page: &str,
    seo: &SeoMetadata,
    breadcrumbs: &[Breadcrumb],
) -> Context
where
    R: CategoryReader + ?Sized,
{
    let nav_categories = repo.list_categories().unwrap_or_else(|err| {
        log::error!("Failed to load navigation categories: {err}");
        Vec::new()
    });

    let alerts: Vec<Alert<'_>> = flash_messages
        .iter()
        .map(|message| Alert {
            level: level_name(message.level()),
            content: message.content(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("site", &config.site);
    context.insert("nav_categories", &nav_categories);
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("head", &seo.head(&config.site));
    context.insert("breadcrumbs", breadcrumbs);
    context
}

/// Not-found view with status 404.
pub fn not_found_page(
    repo: &StaticRepository,
    flash_messages: &IncomingFlashMessages,
    config: &ServerConfig,
    tera: &Tera,
) -> HttpResponse {
    let seo = SeoMetadata::new("Page Not Found")
        .description("The page you are looking for does not exist.");
    let context = base_context(repo, flash_messages, config, "not_found", &seo, &[]);
    render_with_status(tera, "errors/not_found.html", &context, StatusCode::NOT_FOUND)
}

/// Fallback handler for unmatched routes.
pub async fn not_found(
    repo: web::Data<StaticRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    not_found_page(repo.get_ref(), &flash_messages, &server_config, &tera)
}

/// Rewrite an `images.unsplash.com` URL to request `width` pixels; any
/// other URL is returned unchanged.
pub fn sized_image_url(raw: &str, width: u64) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_string();
    };
    if url.host_str() != Some("images.unsplash.com") {
        return raw.to_string();
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !matches!(key.as_ref(), "w" | "auto" | "fit" | "q"))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("w", &width.to_string())
        .append_pair("auto", "format")
        .append_pair("fit", "crop")
        .append_pair("q", "80");

    url.to_string()
}

/// Tera filter: `{{ product.image | sized_image(width=600) }}`.
fn sized_image(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("sized_image expects a string"))?;
    let width = args
        .get("width")
        .and_then(Value::as_u64)
        .unwrap_or(DEFAULT_IMAGE_WIDTH);
    Ok(Value::String(sized_image_url(raw, width)))
}
