use mockall::mock;

use super::{BlogPostReader, CategoryReader, ProductReader};
use crate::domain::{
    blog_post::BlogPost,
    category::Category,
    product::{Product, ProductListQuery},
};
use crate::repository::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    }
}

mock! {
    pub BlogPostReader {}

    impl BlogPostReader for BlogPostReader {
        fn get_blog_post_by_slug(&self, slug: &str) -> RepositoryResult<Option<BlogPost>>;
        fn list_blog_posts(&self, limit: Option<usize>) -> RepositoryResult<Vec<BlogPost>>;
    }
}

/// Storefront repository assembled from the individual reader mocks.
pub struct MockCatalog {
    pub products: MockProductReader,
    pub categories: MockCategoryReader,
    pub posts: MockBlogPostReader,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self {
            products: MockProductReader::new(),
            categories: MockCategoryReader::new(),
            posts: MockBlogPostReader::new(),
        }
    }
}

impl ProductReader for MockCatalog {
    fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>> {
        self.products.get_product_by_id(id)
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
        self.products.list_products(query)
    }
}

impl CategoryReader for MockCatalog {
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
        self.categories.get_category_by_slug(slug)
    }

    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        self.categories.list_categories()
    }
}

impl BlogPostReader for MockCatalog {
    fn get_blog_post_by_slug(&self, slug: &str) -> RepositoryResult<Option<BlogPost>> {
        self.posts.get_blog_post_by_slug(slug)
    }

    fn list_blog_posts(&self, limit: Option<usize>) -> RepositoryResult<Vec<BlogPost>> {
        self.posts.list_blog_posts(limit)
    }
}
