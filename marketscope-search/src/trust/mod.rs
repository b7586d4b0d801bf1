//! Source-trust registry and domain classification.
//!
//! A [`TrustRegistry`] is built once from [`TrustConfig`] and is read-only
//! afterwards. It maps hosts to a [`TrustTier`](crate::types::TrustTier)
//! by suffix allow-lists and tiers to fixed reliability scores.

pub mod classifier;
pub mod registry;

pub use registry::{TierScores, TrustConfig, TrustRegistry};
