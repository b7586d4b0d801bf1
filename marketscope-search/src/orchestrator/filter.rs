//! Reliability filter: keep results whose score clears a threshold.

use crate::types::ScoredResult;

/// Below this many survivors the filter logs the full score list.
const FEW_RESULTS_WARNING: usize = 3;

/// Keep results with `reliability_score >= min_score`, in input order.
///
/// The boundary is inclusive. `min_score` is not range-checked: a
/// threshold above 100 yields an empty list and a negative one keeps
/// everything. Filtering twice with the same threshold is a no-op.
pub fn filter_by_reliability(results: Vec<ScoredResult>, min_score: i32) -> Vec<ScoredResult> {
    let before = results.len();
    let scores: Vec<u8> = results.iter().map(|r| r.reliability_score).collect();

    let kept: Vec<ScoredResult> = results
        .into_iter()
        .filter(|r| i32::from(r.reliability_score) >= min_score)
        .collect();

    tracing::debug!(before, after = kept.len(), min_score, "reliability filter applied");
    if before > 0 && kept.len() < FEW_RESULTS_WARNING {
        tracing::warn!(
            after = kept.len(),
            min_score,
            ?scores,
            "few results cleared the reliability threshold"
        );
    }

    kept
}
