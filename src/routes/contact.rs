use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::config::ServerConfig;
use crate::forms::contact::{ContactForm, SUBJECTS};
use crate::repository::StaticRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::seo::SeoMetadata;
use crate::services::{ServiceError, contact};

#[get("/contact")]
pub async fn show_contact(
    repo: web::Data<StaticRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let seo = SeoMetadata::new("Contact Us")
        .description(format!("Get in touch with the {} team.", server_config.site.name))
        .url(server_config.site.url("/contact"));
    let mut context = base_context(
        repo.get_ref(),
        &flash_messages,
        &server_config,
        "contact",
        &seo,
        &[],
    );
    context.insert("subjects", &SUBJECTS);
    render_template(&tera, "contact/index.html", &context)
}

#[post("/contact")]
pub async fn submit_contact(server_config: web::Data<ServerConfig>, body: web::Bytes) -> impl Responder {
    let form = match ContactForm::from_body(&body) {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Rejected contact payload: {err}");
            FlashMessage::error("Please fill in every field of the form.").send();
            return redirect("/contact");
        }
    };

    match contact::submit_contact(form, server_config.submit_delay).await {
        Ok(outcome) => {
            FlashMessage::success(outcome.message).send();
            redirect(&outcome.redirect_to)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(format!("Please check the form: {message}")).send();
            redirect("/contact")
        }
        Err(err) => {
            log::error!("Failed to accept a contact message: {err}");
            FlashMessage::error("Your message could not be sent. Please try again.").send();
            redirect("/contact")
        }
    }
}
