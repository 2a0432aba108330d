use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::config::ServerConfig;
use crate::recommender::Recommender;
use crate::repository::StaticRepository;
use crate::routes::{base_context, render_template};
use crate::seo::SeoMetadata;
use crate::services::products::ProductView;
use crate::services::search::{SearchQuery, resolve_search};

#[get("/search")]
pub async fn show_search(
    params: web::Query<SearchQuery>,
    repo: web::Data<StaticRepository>,
    recommender: web::Data<dyn Recommender>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = params.into_inner().q.unwrap_or_default();

    let outcome = match resolve_search(
        repo.get_ref(),
        recommender.get_ref(),
        &query,
        server_config.search_deadline,
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(err) => {
            log::error!("Search for {query:?} failed: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let seo = SeoMetadata::new(format!("Search Results for \"{}\"", query.trim()))
        .description("AI-powered product search results.");
    let mut context = base_context(
        repo.get_ref(),
        &flash_messages,
        &server_config,
        "search",
        &seo,
        &[],
    );

    let products: Vec<ProductView> = outcome
        .products
        .iter()
        .cloned()
        .map(ProductView::from)
        .collect();
    context.insert("query", &outcome.query);
    context.insert("products", &products);
    context.insert("source", &outcome.source);
    // The empty state suggests browsing the categories from the nav bar.
    context.insert("show_suggestions", &outcome.is_empty());

    render_template(&tera, "search/index.html", &context)
}
