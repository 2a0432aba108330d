//! Mostly static pages: about, privacy and the community page with its
//! newsletter form.

use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::config::ServerConfig;
use crate::forms::newsletter::{INTERESTS, NewsletterForm};
use crate::repository::StaticRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::seo::SeoMetadata;
use crate::services::{ServiceError, contact};

fn render_static(
    repo: &StaticRepository,
    flash_messages: &IncomingFlashMessages,
    server_config: &ServerConfig,
    tera: &Tera,
    page: &str,
    seo: SeoMetadata,
) -> actix_web::HttpResponse {
    let seo = seo.url(server_config.site.url(&format!("/{page}")));
    let mut context = base_context(repo, flash_messages, server_config, page, &seo, &[]);
    context.insert("interests", &INTERESTS);
    render_template(tera, &format!("pages/{page}.html"), &context)
}

#[get("/about")]
pub async fn show_about(
    repo: web::Data<StaticRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let seo = SeoMetadata::new("About Us").description(format!(
        "Learn about {} and our mission to provide honest product reviews.",
        server_config.site.name
    ));
    render_static(&repo, &flash_messages, &server_config, &tera, "about", seo)
}

#[get("/privacy")]
pub async fn show_privacy(
    repo: web::Data<StaticRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let seo = SeoMetadata::new("Privacy Policy").description(format!(
        "Privacy Policy and Affiliate Disclosure for {}.",
        server_config.site.name
    ));
    render_static(&repo, &flash_messages, &server_config, &tera, "privacy", seo)
}

#[get("/connect")]
pub async fn show_connect(
    repo: web::Data<StaticRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let seo = SeoMetadata::new("Connect With Us").description(format!(
        "Follow {} on social media and join our newsletter.",
        server_config.site.name
    ));
    render_static(&repo, &flash_messages, &server_config, &tera, "connect", seo)
}

#[post("/connect/newsletter")]
pub async fn subscribe(server_config: web::Data<ServerConfig>, body: web::Bytes) -> impl Responder {
    let form = match NewsletterForm::from_body(&body) {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Rejected newsletter payload: {err}");
            FlashMessage::error("Please enter a valid email address.").send();
            return redirect("/connect");
        }
    };

    match contact::subscribe_newsletter(form, server_config.submit_delay).await {
        Ok(outcome) => {
            FlashMessage::success(outcome.message).send();
            redirect(&outcome.redirect_to)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(format!("Please check the form: {message}")).send();
            redirect("/connect")
        }
        Err(err) => {
            log::error!("Failed to accept a newsletter sign-up: {err}");
            FlashMessage::error("Subscription failed. Please try again.").send();
            redirect("/connect")
        }
    }
}
