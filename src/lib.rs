//! Market research backend.
//!
//! Serves trust-scored web search and composed market analyses over HTTP.
//! The search pipeline itself lives in [`marketscope_search`]; this crate
//! adds configuration, the analysis composer, and the API server.

pub mod analysis;
pub mod config;
pub mod datasets;
pub mod error;
pub mod server;

pub use analysis::{Analysis, ChatReply, LlmService, QualitativeAnalysis, Section};
pub use config::{LlmConfig, ServerConfig, ServiceConfig};
pub use datasets::{Dataset, PriceSeries, QuantitativeData, attach_sources, validate_dataset};
pub use error::{MarketError, Result};
pub use server::{ApiError, ApiServer, AppState};
