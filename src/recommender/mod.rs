//! Product recommendations from a hosted language model.
//!
//! A [`Recommender`] receives the visitor's free-text query together with
//! the catalog and answers with the identifiers of matching products. Every
//! failure is reported through [`RecommendError`] so callers can log the
//! cause before falling back to local matching.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::product::Product;

pub mod gemini;

#[cfg(test)]
pub mod mock;

pub use gemini::{GeminiConfig, GeminiRecommender};

/// Result alias returned by recommenders.
pub type RecommendResult<T> = Result<T, RecommendError>;

/// Reasons a recommendation request produced no usable answer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecommendError {
    /// No API credential is configured; no request was sent.
    #[error("recommendation API key is not configured")]
    MissingCredential,
    /// The request could not be delivered or the connection failed.
    #[error("recommendation request failed: {0}")]
    Transport(String),
    /// The service answered with a non-success status code.
    #[error("recommendation service returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The reply was not a JSON array of identifiers.
    #[error("malformed recommendation response: {0}")]
    MalformedResponse(String),
    /// The prompt could not be serialized.
    #[error("failed to encode recommendation prompt: {0}")]
    Encode(String),
}

impl RecommendError {
    /// Stable machine-readable tag for logs and API payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            RecommendError::MissingCredential => "missing_credential",
            RecommendError::Transport(_) => "transport",
            RecommendError::Status { .. } => "status",
            RecommendError::MalformedResponse(_) => "malformed_response",
            RecommendError::Encode(_) => "encode",
        }
    }
}

/// Selects catalog products matching a free-text query.
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Return the identifiers of the products in `products` that best match
    /// `query`, most relevant first. Identifiers may be unknown to the
    /// catalog; callers drop those.
    async fn recommend(&self, query: &str, products: &[Product]) -> RecommendResult<Vec<String>>;
}

/// Reduced product projection sent to the model.
#[derive(Debug, Serialize)]
struct ProductDigest<'a> {
    id: &'a str,
    title: &'a str,
    category: &'a str,
    desc: &'a str,
}

impl<'a> From<&'a Product> for ProductDigest<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: &product.id,
            title: &product.title,
            category: &product.category,
            desc: &product.short_description,
        }
    }
}

/// Build the single text prompt sent for `query`.
pub fn build_prompt(store_name: &str, query: &str, products: &[Product]) -> RecommendResult<String> {
    let digests: Vec<ProductDigest<'_>> = products.iter().map(ProductDigest::from).collect();
    let catalog =
        serde_json::to_string(&digests).map_err(|err| RecommendError::Encode(err.to_string()))?;

    Ok(format!(
        "You are the shopping assistant of \"{store_name}\".\n\
         Visitor query: \"{query}\"\n\
         Products (JSON): {catalog}\n\n\
         Reply with a JSON array holding the string ids of the products that best match \
         the query, for example [\"p1\", \"p3\"]. Reply with [] when nothing fits. \
         Return only the JSON array, without explanations."
    ))
}

/// Parse the model's reply into a list of product identifiers.
///
/// Empty replies yield an empty list; replies wrapped in Markdown code
/// fences are unwrapped; array members that are not strings are skipped.
pub fn parse_id_list(text: &str) -> RecommendResult<Vec<String>> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|err| RecommendError::MalformedResponse(err.to_string()))?;

    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(id) => Some(id),
                _ => None,
            })
            .collect()),
        other => Err(RecommendError::MalformedResponse(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Language tag, if any: `json`, `JSON`, `js`...
    let rest = rest.trim_start_matches(|ch: char| ch.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
