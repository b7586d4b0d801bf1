//! Core types for search results, trust tiers, and search modes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// A single raw result returned by the search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Absolute URL of the result page.
    pub url: String,
    /// Page title. Empty when the provider omits it.
    #[serde(default)]
    pub title: String,
    /// Text snippet summarising the page. Empty when the provider omits it.
    #[serde(default)]
    pub snippet: String,
    /// Publication timestamp, when the provider reports a parseable one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl SearchResult {
    /// Build a result with only a URL; title and snippet default to empty.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            snippet: String::new(),
            published_at: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }
}

/// Source-credibility category of a result's host.
///
/// Variants are declared in match precedence order: when a host could
/// belong to several tiers, the earlier one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustTier {
    /// Government and intergovernmental statistics bodies.
    Government,
    /// Consulting and market-research firms.
    ResearchFirm,
    /// Recognised economic and financial press.
    EconomicMedia,
    /// Anything not on an allow-list.
    Other,
}

impl TrustTier {
    /// Returns the wire name of this tier.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Government => "government",
            Self::ResearchFirm => "research_firm",
            Self::EconomicMedia => "economic_media",
            Self::Other => "other",
        }
    }

    /// Returns all tiers in match precedence order.
    pub fn all() -> &'static [TrustTier] {
        &[
            Self::Government,
            Self::ResearchFirm,
            Self::EconomicMedia,
            Self::Other,
        ]
    }
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A [`SearchResult`] annotated with its trust tier and reliability score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// The provider result, unchanged.
    #[serde(flatten)]
    pub result: SearchResult,
    /// Tier the result's host was classified into.
    pub trust_tier: TrustTier,
    /// Reliability score (0–100), determined solely by `trust_tier`.
    pub reliability_score: u8,
}

/// Named search intent selecting the minimum acceptable reliability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Context, trends, and key players.
    General,
    /// Figures and statistics; demands stronger sourcing.
    Data,
}

impl SearchMode {
    /// Returns the wire name of this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "data" => Ok(Self::Data),
            _ => Err(SearchError::UnsupportedMode(s.to_owned())),
        }
    }
}

/// Provider search depth. Data searches ask for the deeper crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    /// Fast, shallow search.
    Basic,
    /// Slower search that digs into more pages per query.
    Advanced,
}

/// Final output of one orchestrated search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Results that cleared the mode threshold, in provider order.
    pub results: Vec<ScoredResult>,
    /// Number of provider results before filtering.
    pub total_before_filter: usize,
    /// The mode the search ran in.
    pub mode: SearchMode,
}
