use async_trait::async_trait;
use mockall::mock;

use super::{RecommendResult, Recommender};
use crate::domain::product::Product;

mock! {
    pub Recommender {}

    #[async_trait]
    impl Recommender for Recommender {
        async fn recommend(&self, query: &str, products: &[Product]) -> RecommendResult<Vec<String>>;
    }
}
