use serde::Deserialize;

use crate::domain::category::Category as DomainCategory;

/// Category record as stored in the bundled catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
}

impl From<Category> for DomainCategory {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            name: value.name,
            slug: value.slug,
            description: value.description,
            image: value.image,
        }
    }
}
