//! # marketscope-search
//!
//! Trust-scored web search for market research.
//!
//! Every result returned by the search provider is classified by its host
//! into a trust tier (government, research firm, economic media, other),
//! given that tier's fixed reliability score, and dropped if the score is
//! below the threshold of the requested search mode.
//!
//! ## Design
//!
//! - [`TrustRegistry`] holds the domain allow-lists and score table. It is
//!   built once and never mutated; share it behind an `Arc`.
//! - [`SearchOrchestrator`] owns the mode → threshold mapping and calls a
//!   pluggable [`SearchProvider`] once per search.
//! - A malformed result URL degrades that one result to the `Other` tier.
//!   Blank queries, unknown modes, and provider failures fail the request.
//! - Provider order is preserved end to end; there is no re-ranking.
//!
//! ## Security
//!
//! - Queries are logged only at trace level
//! - API keys never appear in error messages

pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod trust;
pub mod types;

pub use config::{ModeThresholds, SearchConfig};
pub use context::format_context_for_llm;
pub use error::{Result, SearchError};
pub use orchestrator::SearchOrchestrator;
pub use provider::{ProviderRequest, SearchProvider};
pub use providers::{TavilyConfig, TavilyProvider};
pub use trust::{TierScores, TrustConfig, TrustRegistry};
pub use types::{ScoredResult, SearchDepth, SearchMode, SearchOutcome, SearchResult, TrustTier};

use std::sync::LazyLock;

static DEFAULT_REGISTRY: LazyLock<TrustRegistry> = LazyLock::new(TrustRegistry::default);

/// The registry built from the built-in trust lists, constructed on first use.
pub fn default_registry() -> &'static TrustRegistry {
    &DEFAULT_REGISTRY
}

/// Classify `url` with the built-in trust lists.
///
/// Convenience wrapper around [`TrustRegistry::classify`] on the shared
/// [`default_registry`].
///
/// # Errors
///
/// Returns [`SearchError::MalformedUrl`] if `url` has no parseable host.
///
/// # Examples
///
/// ```
/// use marketscope_search::{classify, TrustTier};
///
/// let tier = classify("https://www.economie.gouv.fr/").unwrap();
/// assert_eq!(tier, TrustTier::Government);
/// ```
pub fn classify(url: &str) -> Result<TrustTier> {
    DEFAULT_REGISTRY.classify(url)
}
