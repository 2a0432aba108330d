//! Per-page search-engine metadata.
//!
//! Every page handler builds a [`SeoMetadata`] value describing itself; the
//! layout template turns it into the `<title>`, meta tags and JSON-LD blocks
//! of exactly one response. Nothing here touches shared state.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{blog_post::BlogPost, product::Product};

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Site-wide values every page needs to build absolute URLs and titles.
#[derive(Debug, Clone, Serialize)]
pub struct Site {
    /// Display name appended to every document title.
    pub name: String,
    /// Public origin without a trailing slash, e.g. `https://zenithfinds.com`.
    pub base_url: String,
}

impl Site {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for a site-relative `path`.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

/// Open Graph object type of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageKind {
    #[default]
    Website,
    Article,
    Product,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Website => "website",
            PageKind::Article => "article",
            PageKind::Product => "product",
        }
    }
}

/// A single `<meta>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    /// Attribute naming the tag: `name` or `property`.
    pub attr: &'static str,
    /// Value of that attribute, e.g. `og:title`.
    pub key: String,
    pub content: String,
}

impl MetaTag {
    fn name(key: &str, content: impl Into<String>) -> Self {
        Self {
            attr: "name",
            key: key.to_string(),
            content: content.into(),
        }
    }

    fn property(key: &str, content: impl Into<String>) -> Self {
        Self {
            attr: "property",
            key: key.to_string(),
            content: content.into(),
        }
    }
}

/// Everything the layout renders into `<head>`.
#[derive(Debug, Clone, Serialize)]
pub struct HeadTags {
    pub title: String,
    pub meta: Vec<MetaTag>,
    /// Serialized JSON-LD documents, safe to embed in a `<script>` element.
    pub structured_data: Vec<String>,
}

/// Metadata describing one page.
#[derive(Debug, Clone, Default)]
pub struct SeoMetadata {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub kind: PageKind,
    pub schema: Vec<serde_json::Value>,
}

impl SeoMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn kind(mut self, kind: PageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attach a structured-data document.
    pub fn schema<T: Serialize>(mut self, schema: &T) -> Self {
        match serde_json::to_value(schema) {
            Ok(value) => self.schema.push(value),
            Err(err) => log::error!("Failed to serialize structured data: {err}"),
        }
        self
    }

    /// `"{title} | {site name}"`.
    pub fn document_title(&self, site: &Site) -> String {
        format!("{} | {}", self.title, site.name)
    }

    /// Description, Open Graph and Twitter card tags; absent values are
    /// left out.
    pub fn meta_tags(&self, site: &Site) -> Vec<MetaTag> {
        let mut tags = Vec::with_capacity(12);

        if let Some(description) = &self.description {
            tags.push(MetaTag::name("description", description));
        }

        tags.push(MetaTag::property("og:title", &self.title));
        if let Some(description) = &self.description {
            tags.push(MetaTag::property("og:description", description));
        }
        tags.push(MetaTag::property("og:type", self.kind.as_str()));
        if let Some(url) = &self.url {
            tags.push(MetaTag::property("og:url", url));
        }
        if let Some(image) = &self.image {
            tags.push(MetaTag::property("og:image", image));
        }
        tags.push(MetaTag::property("og:site_name", &site.name));

        let card = if self.image.is_some() {
            "summary_large_image"
        } else {
            "summary"
        };
        tags.push(MetaTag::name("twitter:card", card));
        tags.push(MetaTag::name("twitter:title", &self.title));
        if let Some(description) = &self.description {
            tags.push(MetaTag::name("twitter:description", description));
        }
        if let Some(image) = &self.image {
            tags.push(MetaTag::name("twitter:image", image));
        }

        tags
    }

    /// Project the metadata into the values the layout renders.
    pub fn head(&self, site: &Site) -> HeadTags {
        HeadTags {
            title: self.document_title(site),
            meta: self.meta_tags(site),
            structured_data: self.schema.iter().map(embed_json_ld).collect(),
        }
    }
}

/// Serialize a JSON-LD value with no literal `<`, so the HTML parser cannot
/// leave or comment out its `<script>` element. `<` only occurs inside JSON
/// strings, where `\u003c` decodes to the same character.
fn embed_json_ld(value: &serde_json::Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

/// One step of a breadcrumb trail after "Home".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    /// Site-relative link; the current page has none.
    pub path: Option<String>,
}

impl Breadcrumb {
    pub fn link(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: Some(path.into()),
        }
    }

    pub fn current(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSchema {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub image: Vec<String>,
    pub description: String,
    pub sku: String,
    pub brand: NamedThing,
    pub aggregate_rating: AggregateRating,
    pub offers: Offer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedThing {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
}

impl NamedThing {
    fn new(kind: &str, name: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    #[serde(rename = "@type")]
    pub kind: String,
    pub rating_value: f64,
    pub review_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "@type")]
    pub kind: String,
    pub url: String,
    pub price_currency: String,
    pub price: f64,
    pub price_valid_until: String,
    pub item_condition: String,
    pub availability: String,
    pub seller: NamedThing,
}

/// Product structured data; offers stay valid for one year from `today`.
pub fn product_schema(product: &Product, today: NaiveDate) -> ProductSchema {
    let valid_until = today
        .checked_add_months(Months::new(12))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string();

    ProductSchema {
        context: format!("{SCHEMA_CONTEXT}/"),
        kind: "Product".to_string(),
        name: product.title.clone(),
        image: product.images(),
        description: product.full_description.clone(),
        sku: product.id.clone(),
        brand: NamedThing::new("Brand", product.brand()),
        aggregate_rating: AggregateRating {
            kind: "AggregateRating".to_string(),
            rating_value: product.rating,
            review_count: product.review_count,
        },
        offers: Offer {
            kind: "Offer".to_string(),
            url: product.affiliate_link.clone(),
            price_currency: "USD".to_string(),
            price: product.price,
            price_valid_until: valid_until,
            item_condition: format!("{SCHEMA_CONTEXT}/NewCondition"),
            availability: format!("{SCHEMA_CONTEXT}/InStock"),
            seller: NamedThing::new("Organization", "Amazon"),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostingSchema {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub headline: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    pub author: NamedThing,
    pub description: String,
}

pub fn blog_posting_schema(post: &BlogPost) -> BlogPostingSchema {
    BlogPostingSchema {
        context: SCHEMA_CONTEXT.to_string(),
        kind: "BlogPosting".to_string(),
        headline: post.title.clone(),
        image: post.image.clone(),
        date_published: post
            .published_on()
            .map(|date| date.format("%Y-%m-%d").to_string()),
        author: NamedThing::new("Person", post.author.clone()),
        description: post.excerpt.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListSchema {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub item_list_element: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: String,
    pub position: usize,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Breadcrumb trail starting at the site root.
pub fn breadcrumb_schema(site: &Site, trail: &[Breadcrumb]) -> ItemListSchema {
    let home = ListItem {
        kind: "ListItem".to_string(),
        position: 1,
        name: "Home".to_string(),
        item: Some(site.base_url.clone()),
        url: None,
    };

    let steps = trail.iter().enumerate().map(|(index, crumb)| ListItem {
        kind: "ListItem".to_string(),
        position: index + 2,
        name: crumb.label.clone(),
        item: crumb.path.as_deref().map(|path| site.url(path)),
        url: None,
    });

    ItemListSchema {
        context: SCHEMA_CONTEXT.to_string(),
        kind: "BreadcrumbList".to_string(),
        item_list_element: std::iter::once(home).chain(steps).collect(),
    }
}

/// Product listing of a category page.
pub fn item_list_schema(site: &Site, products: &[Product]) -> ItemListSchema {
    ItemListSchema {
        context: SCHEMA_CONTEXT.to_string(),
        kind: "ItemList".to_string(),
        item_list_element: products
            .iter()
            .enumerate()
            .map(|(index, product)| ListItem {
                kind: "ListItem".to_string(),
                position: index + 1,
                name: product.title.clone(),
                item: None,
                url: Some(site.url(&format!("/product/{}", product.id))),
            })
            .collect(),
    }
}
