//! Render scored results as plain-text context for a language model.

use crate::types::ScoredResult;

/// Format results as a numbered source list with reliability scores.
///
/// Returns an empty string when there are no results, so callers can
/// skip the context block entirely.
pub fn format_context_for_llm(results: &[ScoredResult]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut context = String::from("Context from web research:\n\n");
    for (i, scored) in results.iter().enumerate() {
        let r = &scored.result;
        context.push_str(&format!("{}. {}\n", i + 1, r.title));
        context.push_str(&format!(
            "   Source: {} (reliability: {}/100)\n",
            r.url, scored.reliability_score
        ));
        context.push_str(&format!("   {}\n\n", r.snippet));
    }
    context
}
