//! Helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::web;
use tera::Tera;

use zenith_finds::config::ServerConfig;
use zenith_finds::recommender::{GeminiConfig, GeminiRecommender, Recommender};
use zenith_finds::routes::load_templates;

/// Configuration with no API key and no artificial form delay.
pub fn test_config() -> ServerConfig {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("SITE_NAME", "ZenithFinds"),
        ("SITE_URL", "https://zenithfinds.test"),
        ("CONTACT_DELAY_MS", "0"),
    ]);
    ServerConfig::from_lookup(|name| vars.get(name).map(|value| value.to_string()))
        .expect("test configuration is valid")
}

/// Gemini client without a credential; every call short-circuits.
pub fn offline_recommender() -> GeminiRecommender {
    GeminiRecommender::new(GeminiConfig::default()).expect("client builds")
}

pub fn recommender_data(recommender: impl Recommender + 'static) -> web::Data<dyn Recommender> {
    web::Data::from(Arc::new(recommender) as Arc<dyn Recommender>)
}

pub fn templates() -> Tera {
    load_templates(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"))
        .expect("templates parse")
}

/// Recommender that always answers with the same identifiers.
pub struct FixedRecommender(pub Vec<&'static str>);

#[async_trait::async_trait]
impl Recommender for FixedRecommender {
    async fn recommend(
        &self,
        _query: &str,
        _products: &[zenith_finds::domain::product::Product],
    ) -> zenith_finds::recommender::RecommendResult<Vec<String>> {
        Ok(self.0.iter().map(|id| id.to_string()).collect())
    }
}
