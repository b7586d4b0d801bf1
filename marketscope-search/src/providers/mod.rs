//! Search provider implementations.

pub mod tavily;

pub use tavily::{TavilyConfig, TavilyProvider};
