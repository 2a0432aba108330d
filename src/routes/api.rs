use actix_web::{HttpResponse, Responder, get, web};
use serde::Serialize;

use crate::config::ServerConfig;
use crate::domain::product::Product;
use crate::recommender::Recommender;
use crate::repository::StaticRepository;
use crate::services::search::{ResultSource, SearchQuery, resolve_search};
use crate::services::{ServiceError, products};

/// Body of `GET /api/v1/search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Sequence number supplied by the caller; clients drop replies whose
    /// `seq` is older than their latest request.
    pub seq: Option<u64>,
    pub query: String,
    pub source: ResultSource,
    pub products: Vec<Product>,
}

#[get("/v1/search")]
/// Resolve a free-text query into catalog products.
pub async fn api_v1_search(
    params: web::Query<SearchQuery>,
    repo: web::Data<StaticRepository>,
    recommender: web::Data<dyn Recommender>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let SearchQuery { q, seq } = params.into_inner();
    let query = q.unwrap_or_default();

    match resolve_search(
        repo.get_ref(),
        recommender.get_ref(),
        &query,
        server_config.search_deadline,
    )
    .await
    {
        Ok(outcome) => HttpResponse::Ok().json(SearchResponse {
            seq,
            query: outcome.query,
            source: outcome.source,
            products: outcome.products,
        }),
        Err(err) => {
            log::error!("Search for {query:?} failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/products/{id}")]
/// Return one product as JSON, or `404 Not Found`.
pub async fn api_v1_product(
    id: web::Path<String>,
    repo: web::Data<StaticRepository>,
) -> impl Responder {
    match products::get_product(repo.get_ref(), &id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load product {id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
