use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{RecommendError, RecommendResult, Recommender, build_prompt, parse_id_list};
use crate::domain::product::Product;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`GeminiRecommender`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` disables outbound calls.
    pub api_key: Option<String>,
    /// Model name, for example `gemini-2.5-flash`.
    pub model: String,
    /// API root without a trailing `/models` segment.
    pub base_url: String,
    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
    /// Store name quoted in the prompt.
    pub store_name: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            store_name: "ZenithFinds".to_string(),
        }
    }
}

/// Recommender backed by the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiRecommender {
    api_key: Option<String>,
    model: String,
    base_url: String,
    store_name: String,
    client: Client, // reqwest::Client is an Arc internally
}

impl GeminiRecommender {
    pub fn new(config: GeminiConfig) -> RecommendResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| RecommendError::Transport(err.to_string()))?;

        let api_key = config.api_key.filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            log::warn!("Gemini API key not configured; AI search falls back to text matching");
        }

        Ok(Self {
            api_key,
            model: config.model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store_name: config.store_name,
            client,
        })
    }

    /// Whether outbound requests can be made at all.
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl Recommender for GeminiRecommender {
    async fn recommend(&self, query: &str, products: &[Product]) -> RecommendResult<Vec<String>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(RecommendError::MissingCredential);
        };

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_prompt(&self.store_name, query, products)?),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        log::debug!("Requesting recommendations from {} for {query:?}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| RecommendError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecommendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| RecommendError::MalformedResponse(err.to_string()))?;

        parse_id_list(&payload.text())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
