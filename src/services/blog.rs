use crate::domain::{blog_post::BlogPost, product::ProductListQuery};
use crate::repository::{BlogPostReader, ProductReader};
use crate::services::products::ProductView;
use crate::services::{ServiceError, ServiceResult};

/// Products recommended alongside every post.
pub const POST_RECOMMENDATIONS: usize = 2;

/// Every post, in catalog order.
pub fn list_posts<R>(repo: &R) -> ServiceResult<Vec<BlogPost>>
where
    R: BlogPostReader + ?Sized,
{
    Ok(repo.list_blog_posts(None)?)
}

/// Data required to render a single post.
pub struct BlogPostPageData {
    pub post: BlogPost,
    pub recommended: Vec<ProductView>,
}

/// Loads the post identified by `slug` with the leading catalog products
/// as recommendations.
pub fn load_post_page<R>(repo: &R, slug: &str) -> ServiceResult<BlogPostPageData>
where
    R: BlogPostReader + ProductReader + ?Sized,
{
    let post = repo
        .get_blog_post_by_slug(slug)?
        .ok_or(ServiceError::NotFound)?;

    let recommended = repo
        .list_products(ProductListQuery::new().limit(POST_RECOMMENDATIONS))?
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(BlogPostPageData { post, recommended })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::product::fixtures::product;
    use crate::repository::mock::MockCatalog;

    fn post(slug: &str) -> BlogPost {
        BlogPost {
            id: "b1".to_string(),
            title: "Desk Setup".to_string(),
            slug: slug.to_string(),
            excerpt: "Upgrade your desk".to_string(),
            content: "<p>Body</p>".to_string(),
            author: "Sam".to_string(),
            date: "Sep 28, 2025".to_string(),
            image: "https://img.example.com/b1.jpg".to_string(),
            tags: vec!["Office".to_string()],
        }
    }

    #[test]
    fn missing_post_is_not_found() {
        let mut repo = MockCatalog::new();
        repo.posts
            .expect_get_blog_post_by_slug()
            .returning(|_| Ok(None));

        assert!(matches!(
            load_post_page(&repo, "nope"),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn post_page_recommends_first_two_products() {
        let mut repo = MockCatalog::new();
        repo.posts
            .expect_get_blog_post_by_slug()
            .returning(|slug| Ok(Some(post(slug))));
        repo.products
            .expect_list_products()
            .times(1)
            .withf(|query| *query == ProductListQuery::new().limit(POST_RECOMMENDATIONS))
            .returning(|_| {
                Ok(vec![
                    product("a", "Alpha", "electronics"),
                    product("b", "Beta", "books"),
                ])
            });

        let data = load_post_page(&repo, "desk-setup").expect("expected success");

        assert_eq!(data.post.slug, "desk-setup");
        let ids: Vec<_> = data.recommended.iter().map(|v| v.product.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn list_posts_is_unbounded() {
        let mut repo = MockCatalog::new();
        repo.posts
            .expect_list_blog_posts()
            .withf(|limit| limit.is_none())
            .returning(|_| Ok(vec![post("a"), post("b")]));

        assert_eq!(list_posts(&repo).expect("expected success").len(), 2);
    }
}
