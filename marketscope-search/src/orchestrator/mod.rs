//! Search orchestrator: provider fan-in, trust scoring, reliability filter.
//!
//! This module calls the configured provider, classifies each result's
//! host into a trust tier, assigns the tier's reliability score, and
//! drops results below the threshold of the requested mode.

pub mod filter;
pub mod scoring;
pub mod search;

pub use search::SearchOrchestrator;
