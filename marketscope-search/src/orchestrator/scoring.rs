//! Reliability scoring from trust tiers.
//!
//! A result's score depends only on its tier:
//!
//! | Tier            | Score |
//! |-----------------|-------|
//! | Government      | 95    |
//! | Research firm   | 90    |
//! | Economic media  | 85    |
//! | Other           | 60    |

use crate::trust::TrustRegistry;
use crate::types::{ScoredResult, SearchResult, TrustTier};

/// Fixed reliability score for a trust tier.
pub const fn score_for(tier: TrustTier) -> u8 {
    match tier {
        TrustTier::Government => 95,
        TrustTier::ResearchFirm => 90,
        TrustTier::EconomicMedia => 85,
        TrustTier::Other => 60,
    }
}

/// Classify and score a single result.
///
/// Malformed URLs are classified as [`TrustTier::Other`].
pub fn score_result(result: SearchResult, registry: &TrustRegistry) -> ScoredResult {
    let trust_tier = registry.classify_or_other(&result.url);
    ScoredResult {
        reliability_score: registry.score_for(trust_tier),
        trust_tier,
        result,
    }
}

/// Classify and score a list of results, preserving their order.
pub fn score_results(results: Vec<SearchResult>, registry: &TrustRegistry) -> Vec<ScoredResult> {
    results
        .into_iter()
        .map(|result| score_result(result, registry))
        .collect()
}
