use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{
    blog_post::BlogPost,
    category::Category,
    product::{Product, ProductListQuery},
};
use crate::models::catalog::{BUNDLED_CATALOG, CatalogFile};

pub mod blog_post;
pub mod category;
pub mod errors;
pub mod product;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};

/// Immutable collections backing the storefront.
#[derive(Debug, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub blog_posts: Vec<BlogPost>,
}

impl Catalog {
    /// Convert a parsed catalog file, rejecting duplicate identifiers and slugs.
    pub fn from_file(file: CatalogFile) -> RepositoryResult<Self> {
        let catalog = Self {
            categories: file.categories.into_iter().map(Into::into).collect(),
            products: file.products.into_iter().map(Into::into).collect(),
            blog_posts: file.blog_posts.into_iter().map(Into::into).collect(),
        };

        ensure_unique("category id", catalog.categories.iter().map(|c| c.id.as_str()))?;
        ensure_unique("category slug", catalog.categories.iter().map(|c| c.slug.as_str()))?;
        ensure_unique("product id", catalog.products.iter().map(|p| p.id.as_str()))?;
        ensure_unique("blog post id", catalog.blog_posts.iter().map(|p| p.id.as_str()))?;
        ensure_unique("blog post slug", catalog.blog_posts.iter().map(|p| p.slug.as_str()))?;

        Ok(catalog)
    }
}

fn ensure_unique<'a>(
    collection: &'static str,
    keys: impl Iterator<Item = &'a str>,
) -> RepositoryResult<()> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(RepositoryError::Duplicate {
                collection,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

#[derive(Clone)]
/// In-memory repository over the static catalog.
pub struct StaticRepository {
    catalog: Arc<Catalog>, // shared by every worker, never mutated
}

impl StaticRepository {
    /// Wrap an already validated catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Load the catalog embedded in the binary.
    pub fn bundled() -> RepositoryResult<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Parse and validate a catalog from its JSON representation.
    pub fn from_json(input: &str) -> RepositoryResult<Self> {
        let file = CatalogFile::from_json(input)?;
        Ok(Self::new(Catalog::from_file(file)?))
    }

    /// Read, parse and validate a catalog file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }

    fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Read-only operations over blog posts.
pub trait BlogPostReader {
    fn get_blog_post_by_slug(&self, slug: &str) -> RepositoryResult<Option<BlogPost>>;
    fn list_blog_posts(&self, limit: Option<usize>) -> RepositoryResult<Vec<BlogPost>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_loads() {
        let repo = StaticRepository::bundled().expect("bundled catalog loads");

        assert_eq!(repo.catalog().categories.len(), 4);
        assert_eq!(repo.catalog().blog_posts.len(), 2);
    }

    #[test]
    fn duplicate_product_ids_are_rejected() {
        let json = r#"{
            "products": [
                {"id": "p1", "title": "A", "category": "books", "price": 1.0, "rating": 4.0,
                 "reviewCount": 1, "image": "a.jpg", "shortDescription": "a",
                 "fullDescription": "a", "affiliateLink": "https://a"},
                {"id": "p1", "title": "B", "category": "books", "price": 2.0, "rating": 4.0,
                 "reviewCount": 1, "image": "b.jpg", "shortDescription": "b",
                 "fullDescription": "b", "affiliateLink": "https://b"}
            ]
        }"#;

        match StaticRepository::from_json(json) {
            Err(RepositoryError::Duplicate { collection, key }) => {
                assert_eq!(collection, "product id");
                assert_eq!(key, "p1");
            }
            Err(other) => panic!("expected duplicate error, got {other}"),
            Ok(_) => panic!("expected duplicate error"),
        }
    }

    #[test]
    fn duplicate_category_slugs_are_rejected() {
        let json = r#"{
            "categories": [
                {"id": "c1", "name": "Books", "slug": "books", "description": "", "image": ""},
                {"id": "c2", "name": "More books", "slug": "books", "description": "", "image": ""}
            ]
        }"#;

        assert!(matches!(
            StaticRepository::from_json(json),
            Err(RepositoryError::Duplicate { collection: "category slug", .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            StaticRepository::from_json("{not json"),
            Err(RepositoryError::Parse(_))
        ));
    }
}
