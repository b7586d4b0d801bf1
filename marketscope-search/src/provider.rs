//! Trait definition for pluggable search providers.
//!
//! The orchestrator treats the provider as a black box that returns
//! relevance-ordered raw results. [`TavilyProvider`](crate::providers::TavilyProvider)
//! is the production implementation; tests substitute in-process mocks.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::{SearchDepth, SearchResult};

/// One call to a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// Query text, already trimmed and expanded for the search mode.
    pub query: String,
    /// Maximum number of results to request.
    pub max_results: usize,
    /// Crawl depth hint.
    pub depth: SearchDepth,
    /// Restrict results to these domain suffixes. Empty means no restriction.
    #[serde(default)]
    pub include_domains: Vec<String>,
}

impl ProviderRequest {
    /// A basic-depth request with no domain restriction.
    pub fn new(query: impl Into<String>, max_results: usize) -> Self {
        Self {
            query: query.into(),
            max_results,
            depth: SearchDepth::Basic,
            include_domains: Vec::new(),
        }
    }
}

/// A pluggable search provider backend.
///
/// Implementors translate a [`ProviderRequest`] into whatever the
/// underlying service expects and return results in the provider's
/// relevance order. Any transport, quota, or payload failure must be
/// reported as [`SearchError::Provider`].
///
/// All implementations must be `Send + Sync` so one provider can serve
/// concurrent searches.
pub trait SearchProvider: Send + Sync {
    /// Perform a search and return raw, relevance-ordered results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Provider`] if the provider cannot be reached,
    /// rejects the request, or returns an unreadable payload.
    fn search(
        &self,
        request: &ProviderRequest,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Whether the provider has the credentials it needs. Defaults to `true`.
    fn is_configured(&self) -> bool {
        true
    }
}
