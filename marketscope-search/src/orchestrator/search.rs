//! Core search orchestrator: provider call, classify, score, filter.
//!
//! The orchestrator owns the mode → threshold mapping and holds the trust
//! registry by shared reference. It keeps no per-request state, so one
//! instance can serve any number of concurrent searches.

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::provider::{ProviderRequest, SearchProvider};
use crate::trust::TrustRegistry;
use crate::types::{SearchDepth, SearchMode, SearchOutcome, TrustTier};

use super::filter::filter_by_reliability;
use super::scoring::score_results;

/// Runs trust-scored searches against a [`SearchProvider`].
pub struct SearchOrchestrator<P> {
    provider: P,
    registry: Arc<TrustRegistry>,
    config: SearchConfig,
}

impl<P: SearchProvider> SearchOrchestrator<P> {
    /// Create an orchestrator.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` fails validation.
    pub fn new(
        provider: P,
        registry: Arc<TrustRegistry>,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            provider,
            registry,
            config,
        })
    }

    /// Returns the provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the trust registry.
    pub fn registry(&self) -> &TrustRegistry {
        &self.registry
    }

    /// Returns the search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search, then keep only results that clear the threshold for `mode`.
    ///
    /// # Pipeline
    ///
    /// 1. Reject a blank query or a zero `max_results` before any provider call
    /// 2. Build the provider request for `mode`
    /// 3. Call the provider once (no retry)
    /// 4. Classify and score every result in provider order; malformed URLs
    ///    degrade to the `Other` tier
    /// 5. Filter with the mode threshold, preserving order
    ///
    /// `max_results` defaults to [`SearchConfig::default_max_results`].
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidQuery`] for a blank query or zero `max_results`
    /// - [`SearchError::Provider`] if the provider call fails; no partial
    ///   results are returned
    pub async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        max_results: Option<usize>,
    ) -> Result<SearchOutcome, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery("please provide a query".into()));
        }
        let max_results = max_results.unwrap_or(self.config.default_max_results);
        if max_results == 0 {
            return Err(SearchError::InvalidQuery(
                "max_results must be greater than 0".into(),
            ));
        }

        let request = self.provider_request(query, mode, max_results);
        tracing::trace!(query = %request.query, %mode, max_results, "dispatching search");

        let raw = self.provider.search(&request).await.map_err(|err| {
            tracing::warn!(
                provider = self.provider.name(),
                %mode,
                error = %err,
                "search provider failed"
            );
            match err {
                SearchError::Provider(_) => err,
                other => SearchError::Provider(other.to_string()),
            }
        })?;

        let total_before_filter = raw.len();
        let scored = score_results(raw, &self.registry);
        let results = filter_by_reliability(scored, self.config.thresholds.for_mode(mode));

        tracing::debug!(
            provider = self.provider.name(),
            %mode,
            total_before_filter,
            kept = results.len(),
            "search completed"
        );

        Ok(SearchOutcome {
            results,
            total_before_filter,
            mode,
        })
    }

    /// Build the provider request for `mode`.
    ///
    /// Data searches use the advanced depth, expand the query, and restrict
    /// the provider to government and research-firm domains.
    pub fn provider_request(
        &self,
        query: &str,
        mode: SearchMode,
        max_results: usize,
    ) -> ProviderRequest {
        let mut request =
            ProviderRequest::new(self.config.provider_query(query, mode), max_results);
        if mode == SearchMode::Data {
            request.depth = SearchDepth::Advanced;
            request.include_domains = [TrustTier::Government, TrustTier::ResearchFirm]
                .into_iter()
                .flat_map(|tier| self.registry.domains(tier).iter().cloned())
                .collect();
        }
        request
    }
}
