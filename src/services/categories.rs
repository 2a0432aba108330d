use crate::domain::{category::Category, product::ProductListQuery};
use crate::repository::{CategoryReader, ProductReader};
use crate::services::products::ProductView;
use crate::services::{ServiceError, ServiceResult};

/// Data required to render a category page.
pub struct CategoryPageData {
    pub category: Category,
    /// Products filed under the category, in catalog order.
    pub products: Vec<ProductView>,
}

/// Loads the category page for `slug`.
pub fn load_category_page<R>(repo: &R, slug: &str) -> ServiceResult<CategoryPageData>
where
    R: CategoryReader + ProductReader + ?Sized,
{
    let category = repo
        .get_category_by_slug(slug)?
        .ok_or(ServiceError::NotFound)?;

    let products = repo
        .list_products(ProductListQuery::new().category(category.slug.clone()))?
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(CategoryPageData { category, products })
}

/// Every category, used for navigation and empty-search suggestions.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    Ok(repo.list_categories()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::product::fixtures::product;
    use crate::repository::mock::MockCatalog;

    fn category(slug: &str) -> Category {
        Category {
            id: "c1".to_string(),
            name: "Fitness".to_string(),
            slug: slug.to_string(),
            description: "Move more".to_string(),
            image: "https://img.example.com/fitness.jpg".to_string(),
        }
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let mut repo = MockCatalog::new();
        repo.categories
            .expect_get_category_by_slug()
            .times(1)
            .returning(|_| Ok(None));
        repo.products.expect_list_products().never();

        let result = load_category_page(&repo, "garden");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn category_page_lists_products_by_slug() {
        let mut repo = MockCatalog::new();
        repo.categories
            .expect_get_category_by_slug()
            .withf(|slug| slug == "fitness")
            .returning(|slug| Ok(Some(category(slug))));
        repo.products
            .expect_list_products()
            .times(1)
            .withf(|query| query.category.as_deref() == Some("fitness") && query.limit.is_none())
            .returning(|_| Ok(vec![product("mat", "Yoga Mat", "fitness")]));

        let data = load_category_page(&repo, "fitness").expect("expected success");

        assert_eq!(data.category.name, "Fitness");
        assert_eq!(data.products.len(), 1);
        assert_eq!(data.products[0].product.id, "mat");
    }
}
