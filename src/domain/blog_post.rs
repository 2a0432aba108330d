use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format of the human-readable post dates, for example `Oct 12, 2025`.
const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y";

/// Domain representation of an editorial blog post.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BlogPost {
    /// Unique identifier of the post.
    pub id: String,
    /// Headline of the post.
    pub title: String,
    /// Unique URL slug.
    pub slug: String,
    /// Teaser shown in listings.
    pub excerpt: String,
    /// Body markup rendered verbatim.
    pub content: String,
    /// Author display name.
    pub author: String,
    /// Free-text display date.
    pub date: String,
    /// Cover image URL.
    pub image: String,
    /// Topic tags.
    pub tags: Vec<String>,
}

impl BlogPost {
    /// Parses the display date, returning `None` for free-form values.
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DISPLAY_DATE_FORMAT).ok()
    }
}
