use std::sync::Arc;

use actix_files::Files;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;

use zenith_finds::config::ServerConfig;
use zenith_finds::recommender::{GeminiRecommender, Recommender};
use zenith_finds::repository::StaticRepository;
use zenith_finds::routes::{self, load_templates, not_found};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = match server_config.secret.as_deref().map(str::as_bytes) {
        Some(bytes) if bytes.len() >= 64 => Key::from(bytes),
        Some(bytes) if bytes.len() >= 32 => Key::derive_from(bytes),
        Some(_) => {
            log::warn!("SECRET_KEY is shorter than 32 bytes; using a generated key");
            Key::generate()
        }
        None => {
            log::warn!("SECRET_KEY not set; flash cookies will not survive a restart");
            Key::generate()
        }
    };

    let repo = match &server_config.catalog_path {
        Some(path) => StaticRepository::from_path(path),
        None => StaticRepository::bundled(),
    };
    let repo = match repo {
        Ok(repo) => repo,
        Err(e) => {
            log::error!("Failed to load the catalog: {e}");
            std::process::exit(1);
        }
    };

    let recommender = match GeminiRecommender::new(server_config.gemini.clone()) {
        Ok(recommender) => recommender,
        Err(e) => {
            log::error!("Failed to build the recommendation client: {e}");
            std::process::exit(1);
        }
    };
    let recommender: web::Data<dyn Recommender> =
        web::Data::from(Arc::new(recommender) as Arc<dyn Recommender>);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match load_templates("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    let address = server_config.address.clone();
    let port = server_config.port;
    let domain = server_config.domain.clone();
    log::info!("Serving {} on {address}:{port}", server_config.site.name);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(routes::configure)
            .default_service(web::to(not_found))
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(recommender.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
