use serde::Deserialize;

use crate::domain::blog_post::BlogPost as DomainBlogPost;

/// Blog post record as stored in the bundled catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub date: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<BlogPost> for DomainBlogPost {
    fn from(value: BlogPost) -> Self {
        Self {
            id: value.id,
            title: value.title,
            slug: value.slug,
            excerpt: value.excerpt,
            content: value.content.trim().to_string(),
            author: value.author,
            date: value.date,
            image: value.image,
            tags: value.tags,
        }
    }
}
