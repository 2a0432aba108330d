use serde::Serialize;

use crate::domain::{
    category::Category,
    product::{Product, ProductListQuery},
};
use crate::repository::{CategoryReader, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Related products listed under a product page.
pub const RELATED_LIMIT: usize = 3;

/// View model exposed to product cards and the product page.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub price_formatted: String,
    pub original_price_formatted: Option<String>,
    pub discount_percent: Option<i64>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let price_formatted = format!("{:.2}", product.price);
        let original_price_formatted = product
            .original_price
            .map(|value| format!("{value:.2}"));
        let discount_percent = product.discount_percent();

        Self {
            product,
            price_formatted,
            original_price_formatted,
            discount_percent,
        }
    }
}

/// Data required to render the product detail template.
pub struct ProductPageData {
    pub product: ProductView,
    /// Up to [`RELATED_LIMIT`] other products from the same category.
    pub related: Vec<ProductView>,
    /// Category record, when the product's slug is known.
    pub category: Option<Category>,
}

impl ProductPageData {
    /// Category name for breadcrumbs, falling back to the capitalized slug.
    pub fn category_name(&self) -> String {
        match &self.category {
            Some(category) => category.name.clone(),
            None => self.product.product.category_label(),
        }
    }
}

/// Fetch one product by identifier.
pub fn get_product<R>(repo: &R, id: &str) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(id)?.ok_or(ServiceError::NotFound)
}

/// Loads the product detail page.
pub fn load_product_page<R>(repo: &R, id: &str) -> ServiceResult<ProductPageData>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let product = get_product(repo, id)?;

    let related = repo
        .list_products(
            ProductListQuery::new()
                .category(product.category.clone())
                .exclude(product.id.clone())
                .limit(RELATED_LIMIT),
        )?
        .into_iter()
        .map(ProductView::from)
        .collect();

    let category = repo.get_category_by_slug(&product.category)?;

    Ok(ProductPageData {
        product: product.into(),
        related,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    use crate::domain::product::fixtures::product;
    use crate::repository::RepositoryError;
    use crate::repository::mock::MockCatalog;

    #[test]
    fn product_view_formats_prices_and_discount() {
        let mut item = product("jbl", "JBL Tune Flex", "electronics");
        item.price = 39.95;
        item.original_price = Some(99.95);

        let view = ProductView::from(item);
        let serialized = serde_json::to_value(&view).expect("serialization");

        assert_eq!(
            serialized.get("price_formatted").and_then(Value::as_str),
            Some("39.95")
        );
        assert_eq!(
            serialized.get("original_price_formatted").and_then(Value::as_str),
            Some("99.95")
        );
        assert_eq!(
            serialized.get("discount_percent").and_then(Value::as_i64),
            Some(60)
        );
        // Product fields are flattened next to the view fields.
        assert_eq!(serialized.get("id").and_then(Value::as_str), Some("jbl"));
    }

    #[test]
    fn load_product_page_returns_not_found_for_unknown_id() {
        let mut repo = MockCatalog::new();
        repo.products
            .expect_get_product_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = load_product_page(&repo, "missing");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn load_product_page_lists_related_products_from_same_category() {
        let mut repo = MockCatalog::new();
        repo.products
            .expect_get_product_by_id()
            .withf(|id| id == "a")
            .returning(|_| Ok(Some(product("a", "Alpha Speaker", "electronics"))));
        repo.products
            .expect_list_products()
            .times(1)
            .withf(|query| {
                assert_eq!(query.category.as_deref(), Some("electronics"));
                assert_eq!(query.exclude_id.as_deref(), Some("a"));
                assert_eq!(query.limit, Some(RELATED_LIMIT));
                true
            })
            .returning(|_| Ok(vec![product("b", "Beta Earbuds", "electronics")]));
        repo.categories
            .expect_get_category_by_slug()
            .returning(|_| Ok(None));

        let data = load_product_page(&repo, "a").expect("expected success");

        assert_eq!(data.product.product.id, "a");
        assert_eq!(data.related.len(), 1);
        assert_eq!(data.related[0].product.id, "b");
        assert_eq!(data.category_name(), "Electronics");
    }

    #[test]
    fn repository_errors_propagate() {
        let mut repo = MockCatalog::new();
        repo.products.expect_get_product_by_id().returning(|_| {
            Err(RepositoryError::Duplicate {
                collection: "product id",
                key: "a".to_string(),
            })
        });

        let result = get_product(&repo, "a");

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }
}
