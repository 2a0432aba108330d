use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::product::{Product, ProductListQuery};
use crate::recommender::{RecommendError, Recommender};
use crate::repository::ProductReader;
use crate::services::ServiceResult;

/// Upper bound on how long a search waits for the recommender.
pub const DEFAULT_SEARCH_DEADLINE: Duration = Duration::from_secs(15);

/// Query terms shorter than this are ignored by the per-term fallback.
const MIN_TERM_CHARS: usize = 2;

/// Query parameters accepted by the search page and API.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Free-text query entered by the visitor.
    pub q: Option<String>,
    /// Client-side sequence number echoed back by the JSON API. Values that
    /// are not unsigned integers are treated as absent.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub seq: Option<u64>,
}

fn lenient_seq<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

/// Where the products of a settled search came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// Nothing matched, or the query was blank.
    Empty,
    /// Identifiers returned by the recommender.
    Recommended,
    /// Local match against title, description, category and features.
    TextMatch,
    /// Title-only match used when the search deadline elapsed.
    TitleMatch,
}

/// Final result of one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Query as entered by the visitor.
    pub query: String,
    /// Matching products in catalog order.
    pub products: Vec<Product>,
    /// Which stage produced `products`.
    pub source: ResultSource,
    /// Why the recommender produced nothing, when it failed.
    #[serde(skip)]
    pub recommender_error: Option<RecommendError>,
}

impl SearchOutcome {
    fn settled(query: &str, products: Vec<Product>, source: ResultSource) -> Self {
        let source = if products.is_empty() {
            ResultSource::Empty
        } else {
            source
        };
        Self {
            query: query.to_string(),
            products,
            source,
            recommender_error: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Resolve `query` into catalog products.
///
/// Blank queries settle immediately without contacting the recommender.
/// Otherwise the recommender's identifiers are mapped onto the catalog;
/// when that yields nothing, the local text match decides. If the
/// recommender does not answer within `deadline`, only titles are matched.
pub async fn resolve_search<C, R>(
    catalog: &C,
    recommender: &R,
    query: &str,
    deadline: Duration,
) -> ServiceResult<SearchOutcome>
where
    C: ProductReader + ?Sized,
    R: Recommender + ?Sized,
{
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Ok(SearchOutcome::settled(query, Vec::new(), ResultSource::Empty));
    }

    let products = catalog.list_products(ProductListQuery::new())?;

    let reply = match tokio::time::timeout(deadline, recommender.recommend(trimmed, &products)).await
    {
        Ok(reply) => reply,
        Err(_) => {
            log::warn!("Search for {trimmed:?} exceeded {deadline:?}; matching titles only");
            let found = match_titles(&products, trimmed);
            return Ok(SearchOutcome::settled(query, found, ResultSource::TitleMatch));
        }
    };

    let (ids, recommender_error) = match reply {
        Ok(ids) => (ids, None),
        Err(err) => {
            log::warn!("AI search unavailable ({}): {err}", err.kind());
            (Vec::new(), Some(err))
        }
    };

    let recommended = select_by_ids(&products, &ids);
    let mut outcome = if recommended.is_empty() {
        SearchOutcome::settled(
            query,
            match_text(&products, trimmed),
            ResultSource::TextMatch,
        )
    } else {
        SearchOutcome::settled(query, recommended, ResultSource::Recommended)
    };
    outcome.recommender_error = recommender_error;

    Ok(outcome)
}

/// Products whose identifier appears in `ids`, in catalog order.
pub fn select_by_ids(products: &[Product], ids: &[String]) -> Vec<Product> {
    if ids.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|product| ids.iter().any(|id| *id == product.id))
        .cloned()
        .collect()
}

/// Case-insensitive match against title, short description, category and
/// features.
///
/// The whole query is tried as one phrase first. When the phrase matches
/// nothing and the query has several words, a product matches if any word
/// occurs in any of those fields.
pub fn match_text(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let phrase: Vec<Product> = products
        .iter()
        .filter(|product| searchable_fields(product).any(|field| contains_ci(field, &needle)))
        .cloned()
        .collect();

    let terms: Vec<&str> = needle
        .split_whitespace()
        .filter(|term| term.chars().count() >= MIN_TERM_CHARS)
        .collect();
    if !phrase.is_empty() || terms.len() < 2 {
        return phrase;
    }

    products
        .iter()
        .filter(|product| {
            searchable_fields(product).any(|field| {
                let field = field.to_lowercase();
                terms.iter().any(|term| field.contains(term))
            })
        })
        .cloned()
        .collect()
}

/// Case-insensitive phrase match against product titles only.
pub fn match_titles(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|product| contains_ci(&product.title, &needle))
        .cloned()
        .collect()
}

fn searchable_fields(product: &Product) -> impl Iterator<Item = &str> {
    [
        product.title.as_str(),
        product.short_description.as_str(),
        product.category.as_str(),
    ]
    .into_iter()
    .chain(product.features.iter().map(String::as_str))
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// View state of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    Idle,
    Searching { generation: u64, query: String },
    Settled { generation: u64, outcome: SearchOutcome },
}

#[derive(Debug)]
struct ControllerInner {
    latest: u64,
    state: SearchState,
}

/// Tracks the latest search so that only its result is ever shown.
///
/// Every search is tagged with a monotonically increasing generation.
/// Outcomes carrying an older generation than the latest started search
/// are discarded; the superseded request itself is left to finish.
#[derive(Debug)]
pub struct SearchController {
    inner: Mutex<ControllerInner>,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ControllerInner {
                latest: 0,
                state: SearchState::Idle,
            }),
        }
    }

    /// Current view state.
    pub fn state(&self) -> SearchState {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// Start a search for `query` and return its generation.
    pub fn begin(&self, query: &str) -> u64 {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.latest += 1;
        inner.state = SearchState::Searching {
            generation: inner.latest,
            query: query.to_string(),
        };
        inner.latest
    }

    /// Record `outcome` unless a newer search has started since `generation`.
    ///
    /// Returns whether the outcome was accepted.
    pub fn settle(&self, generation: u64, outcome: SearchOutcome) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if generation != inner.latest {
            log::debug!(
                "Discarding stale search result for {:?} (generation {generation}, latest {})",
                outcome.query,
                inner.latest
            );
            return false;
        }
        inner.state = SearchState::Settled {
            generation,
            outcome,
        };
        true
    }

    /// Run a full search and publish it if it is still the latest one.
    ///
    /// Returns `None` when a newer search superseded this one.
    pub async fn search<C, R>(
        &self,
        catalog: &C,
        recommender: &R,
        query: &str,
        deadline: Duration,
    ) -> ServiceResult<Option<SearchOutcome>>
    where
        C: ProductReader + ?Sized,
        R: Recommender + ?Sized,
    {
        let generation = self.begin(query);
        let outcome = resolve_search(catalog, recommender, query, deadline).await?;

        if self.settle(generation, outcome.clone()) {
            Ok(Some(outcome))
        } else {
            Ok(None)
        }
    }
}
