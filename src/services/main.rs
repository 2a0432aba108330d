use crate::domain::{blog_post::BlogPost, category::Category, product::ProductListQuery};
use crate::repository::{BlogPostReader, CategoryReader, ProductReader};
use crate::services::ServiceResult;
use crate::services::products::ProductView;

/// Featured products shown in the home page hero grid.
pub const FEATURED_LIMIT: usize = 3;
/// Posts teased at the bottom of the home page.
pub const RECENT_POSTS_LIMIT: usize = 2;

/// Data required to render the home page.
pub struct IndexPageData {
    /// Featured products in catalog order.
    pub featured: Vec<ProductView>,
    /// Every category, for the browse grid.
    pub categories: Vec<Category>,
    /// Most recent posts.
    pub posts: Vec<BlogPost>,
}

/// Loads the home page.
pub fn load_index_page<R>(repo: &R) -> ServiceResult<IndexPageData>
where
    R: ProductReader + CategoryReader + BlogPostReader + ?Sized,
{
    let featured = repo
        .list_products(ProductListQuery::new().featured().limit(FEATURED_LIMIT))?
        .into_iter()
        .map(ProductView::from)
        .collect();
    let categories = repo.list_categories()?;
    let posts = repo.list_blog_posts(Some(RECENT_POSTS_LIMIT))?;

    Ok(IndexPageData {
        featured,
        categories,
        posts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::product::fixtures::product;
    use crate::repository::mock::MockCatalog;

    #[test]
    fn load_index_page_requests_featured_products_and_recent_posts() {
        let mut repo = MockCatalog::new();

        repo.products
            .expect_list_products()
            .times(1)
            .withf(|query| {
                assert!(query.featured_only);
                assert_eq!(query.limit, Some(FEATURED_LIMIT));
                true
            })
            .returning(|_| Ok(vec![product("a", "Alpha Speaker", "electronics")]));
        repo.categories
            .expect_list_categories()
            .times(1)
            .returning(|| Ok(Vec::new()));
        repo.posts
            .expect_list_blog_posts()
            .times(1)
            .withf(|limit| *limit == Some(RECENT_POSTS_LIMIT))
            .returning(|_| Ok(Vec::new()));

        let data = load_index_page(&repo).expect("expected success");

        assert_eq!(data.featured.len(), 1);
        assert_eq!(data.featured[0].product.id, "a");
        assert!(data.categories.is_empty());
        assert!(data.posts.is_empty());
    }
}
