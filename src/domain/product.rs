use serde::{Deserialize, Serialize};

/// Domain representation of a product promoted through an affiliate link.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Unique, stable identifier used in URLs and recommendation replies.
    pub id: String,
    /// Human-readable product title.
    pub title: String,
    /// Slug of the category the product belongs to.
    pub category: String,
    /// Current price in US dollars.
    pub price: f64,
    /// Price before the discount, used to render the savings badge.
    pub original_price: Option<f64>,
    /// Average rating between 0 and 5.
    pub rating: f64,
    /// Number of reviews the rating is based on.
    pub review_count: u32,
    /// Primary image URL.
    pub image: String,
    /// Additional image URLs shown in the gallery.
    pub gallery: Vec<String>,
    /// One-sentence summary shown on cards.
    pub short_description: String,
    /// Long description shown on the product page.
    pub full_description: String,
    /// Ordered list of advantages.
    pub pros: Vec<String>,
    /// Ordered list of drawbacks.
    pub cons: Vec<String>,
    /// Ordered list of highlighted features.
    pub features: Vec<String>,
    /// Outbound affiliate URL.
    pub affiliate_link: String,
    /// Whether the product is promoted on the home page.
    pub is_featured: bool,
}

impl Product {
    /// Percentage saved compared to the original price, rounded to the
    /// nearest whole number.
    ///
    /// Returns `None` when the product has no positive original price or
    /// is not actually cheaper than it.
    pub fn discount_percent(&self) -> Option<i64> {
        let original = self.original_price.filter(|value| *value > 0.0)?;
        let percent = (((original - self.price) / original) * 100.0).round() as i64;
        (percent > 0).then_some(percent)
    }

    /// Primary image followed by the gallery images.
    pub fn images(&self) -> Vec<String> {
        let mut images = Vec::with_capacity(self.gallery.len() + 1);
        images.push(self.image.clone());
        images.extend(self.gallery.iter().cloned());
        images
    }

    /// Brand name inferred from the first word of the title.
    pub fn brand(&self) -> &str {
        self.title.split_whitespace().next().unwrap_or_default()
    }

    /// Category slug with its first letter upper-cased, used in breadcrumbs.
    pub fn category_label(&self) -> String {
        let mut chars = self.category.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Query definition used to list products from the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListQuery {
    /// Optional category slug filter.
    pub category: Option<String>,
    /// Restrict the results to featured products.
    pub featured_only: bool,
    /// Optional product identifier to leave out of the results.
    pub exclude_id: Option<String>,
    /// Maximum number of products to return.
    pub limit: Option<usize>,
}

impl ProductListQuery {
    /// Construct a query that targets the whole catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results to products in the given category.
    pub fn category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    /// Keep only featured products.
    pub fn featured(mut self) -> Self {
        self.featured_only = true;
        self
    }

    /// Leave the product with `id` out of the results.
    pub fn exclude(mut self, id: impl Into<String>) -> Self {
        self.exclude_id = Some(id.into());
        self
    }

    /// Cap the number of returned products.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `product` satisfies every filter of the query.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category.as_deref() {
            if product.category != category {
                return false;
            }
        }
        if self.featured_only && !product.is_featured {
            return false;
        }
        if let Some(excluded) = self.exclude_id.as_deref() {
            if product.id == excluded {
                return false;
            }
        }
        true
    }
}
