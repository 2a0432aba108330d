use serde::Deserialize;

use crate::domain::product::Product as DomainProduct;

/// Product record as stored in the bundled catalog file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    pub rating: f64,
    pub review_count: u32,
    pub image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub short_description: String,
    pub full_description: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub affiliate_link: String,
    #[serde(default)]
    pub is_featured: Option<bool>,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            title: value.title,
            category: value.category,
            price: value.price,
            original_price: value.original_price,
            rating: value.rating,
            review_count: value.review_count,
            image: value.image,
            gallery: value.gallery,
            short_description: value.short_description,
            full_description: value.full_description,
            pros: value.pros,
            cons: value.cons,
            features: value.features,
            affiliate_link: value.affiliate_link,
            is_featured: value.is_featured.unwrap_or(false),
        }
    }
}
