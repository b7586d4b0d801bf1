//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the default result count, the per-mode
//! reliability thresholds, and how data-mode queries are expanded.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::SearchMode;

/// Minimum reliability score per search mode.
///
/// These are thresholds, not scores: a result passes when its assigned
/// score is at least the threshold of the mode it was searched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeThresholds {
    /// Threshold for [`SearchMode::General`].
    pub general: i32,
    /// Threshold for [`SearchMode::Data`].
    pub data: i32,
}

impl Default for ModeThresholds {
    fn default() -> Self {
        Self {
            general: 70,
            data: 80,
        }
    }
}

impl ModeThresholds {
    /// Returns the threshold bound to `mode`.
    pub fn for_mode(&self, mode: SearchMode) -> i32 {
        match mode {
            SearchMode::General => self.general,
            SearchMode::Data => self.data,
        }
    }
}

/// Configuration for the search orchestrator.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result count requested from the provider when the caller gives none.
    pub default_max_results: usize,
    /// Words appended to data-mode queries to steer the provider toward
    /// figures and statistics. `None` sends the query unchanged.
    pub data_query_suffix: Option<String>,
    /// Per-mode reliability thresholds.
    pub thresholds: ModeThresholds,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_results: 10,
            data_query_suffix: Some("statistiques chiffres données marché".into()),
            thresholds: ModeThresholds::default(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `default_max_results` must be greater than 0
    /// - the general threshold must not exceed the data threshold
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.default_max_results == 0 {
            return Err(SearchError::Config(
                "default_max_results must be greater than 0".into(),
            ));
        }
        if self.thresholds.general > self.thresholds.data {
            return Err(SearchError::Config(format!(
                "general threshold ({}) must be <= data threshold ({})",
                self.thresholds.general, self.thresholds.data
            )));
        }
        Ok(())
    }

    /// Build the query text sent to the provider for `mode`.
    pub fn provider_query(&self, query: &str, mode: SearchMode) -> String {
        match (mode, self.data_query_suffix.as_deref()) {
            (SearchMode::Data, Some(suffix)) if !suffix.trim().is_empty() => {
                format!("{query} {}", suffix.trim())
            }
            _ => query.to_owned(),
        }
    }
}
