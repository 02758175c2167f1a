//! # Search Suggestions
//!
//! Debounced search-as-you-type against the catalog.
//!
//! ```text
//! keystroke "s"    ─► generation 1 ─► too short, no request
//! keystroke "so"   ─► generation 2 ─► sleep 300ms ─► superseded, dropped
//! keystroke "sofa" ─► generation 3 ─► sleep 300ms ─► GET suggestions?q=sofa
//! ```
//!
//! Each call takes a new generation number; a call that is no longer the
//! latest when its quiet period (or its request) ends returns `None`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use woodnest_core::validation::validate_search_query;
use woodnest_core::ProductSuggestion;

use crate::api::StorefrontApi;
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Debounces suggestion lookups for one search box.
#[derive(Clone)]
pub struct SuggestionDebouncer {
    api: Arc<dyn StorefrontApi>,
    delay: Duration,
    min_query_len: usize,
    generation: Arc<AtomicU64>,
}

impl SuggestionDebouncer {
    pub fn new(api: Arc<dyn StorefrontApi>, delay: Duration, min_query_len: usize) -> Self {
        Self {
            api,
            delay,
            min_query_len,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_config(api: Arc<dyn StorefrontApi>, config: &ClientConfig) -> Self {
        Self::new(api, config.debounce(), config.search.min_query_len)
    }

    /// Looks up suggestions for the latest query.
    ///
    /// ## Returns
    /// - `Some(vec![])` for queries shorter than the minimum (no request)
    /// - `None` when a newer call superseded this one
    /// - `Some(hits)` otherwise
    pub async fn suggest(&self, query: &str) -> ClientResult<Option<Vec<ProductSuggestion>>> {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let query = validate_search_query(query)?;

        if query.chars().count() < self.min_query_len {
            return Ok(Some(Vec::new()));
        }

        tokio::time::sleep(self.delay).await;
        if !self.is_current(generation) {
            debug!(%query, "Suggestion query superseded before sending");
            return Ok(None);
        }

        let hits = self.api.search_suggestions(&query).await?;
        if !self.is_current(generation) {
            debug!(%query, "Suggestion response superseded");
            return Ok(None);
        }

        Ok(Some(hits))
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::Acquire) == generation
    }
}
