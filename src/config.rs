use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::recommender::GeminiConfig;
use crate::seo::Site;
use crate::services::contact::DEFAULT_SUBMIT_DELAY;
use crate::services::search::DEFAULT_SEARCH_DEADLINE;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Runtime settings read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub site: Site,
    /// Session and flash cookie signing key; generated per process when unset.
    pub secret: Option<String>,
    /// Cookie domain.
    pub domain: String,
    /// Catalog file to load instead of the bundled one.
    pub catalog_path: Option<PathBuf>,
    pub gemini: GeminiConfig,
    pub search_deadline: Duration,
    pub submit_delay: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let site_name = var("SITE_NAME").unwrap_or_else(|| "ZenithFinds".to_string());
        let site_url = var("SITE_URL").unwrap_or_else(|| "http://localhost:8080".to_string());

        let defaults = GeminiConfig::default();
        let gemini = GeminiConfig {
            api_key: var("GEMINI_API_KEY").or_else(|| var("API_KEY")),
            model: var("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            timeout: parse_number(&var, "RECOMMENDER_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            store_name: site_name.clone(),
        };

        Ok(Self {
            address: var("ADDRESS").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_number(&var, "PORT")?.unwrap_or(8080),
            site: Site::new(site_name, site_url),
            secret: var("SECRET_KEY"),
            domain: var("DOMAIN").unwrap_or_else(|| "localhost".to_string()),
            catalog_path: var("CATALOG_PATH").map(PathBuf::from),
            gemini,
            search_deadline: parse_number(&var, "SEARCH_DEADLINE_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_SEARCH_DEADLINE),
            submit_delay: parse_number(&var, "CONTACT_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_SUBMIT_DELAY),
        })
    }
}

fn parse_number<T, F>(var: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(None),
    }
}
