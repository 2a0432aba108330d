use serde::Deserialize;

use super::{blog_post::BlogPost, category::Category, product::Product};

/// Catalog file bundled with the binary.
pub const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Top-level layout of a catalog file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub blog_posts: Vec<BlogPost>,
}

impl CatalogFile {
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }
}
