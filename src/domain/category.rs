use serde::{Deserialize, Serialize};

/// Domain representation of a product category used for navigation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: String,
    /// Display name shown in navigation and headings.
    pub name: String,
    /// Unique URL slug; products reference categories through it.
    pub slug: String,
    /// Short description shown on the category page.
    pub description: String,
    /// Representative image URL.
    pub image: String,
}
