use crate::{
    domain::blog_post::BlogPost,
    repository::{BlogPostReader, RepositoryResult, StaticRepository},
};

impl BlogPostReader for StaticRepository {
    fn get_blog_post_by_slug(&self, slug: &str) -> RepositoryResult<Option<BlogPost>> {
        Ok(self
            .catalog()
            .blog_posts
            .iter()
            .find(|post| post.slug == slug)
            .cloned())
    }

    fn list_blog_posts(&self, limit: Option<usize>) -> RepositoryResult<Vec<BlogPost>> {
        let posts = self.catalog().blog_posts.iter().cloned();
        Ok(match limit {
            Some(limit) => posts.take(limit).collect(),
            None => posts.collect(),
        })
    }
}
