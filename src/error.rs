//! Error types for the marketscope service.

use marketscope_search::SearchError;

/// Top-level error type for the market research service.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    /// Search, classification, or provider error.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Request body could not be read as the expected JSON.
    #[error("invalid request: {0}")]
    Request(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Analysis composition error.
    #[error("analysis error: {0}")]
    Analysis(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarketError {
    /// Returns a stable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Search(e) => e.code(),
            Self::Request(_) => "INVALID_REQUEST",
            Self::Config(_) => "CONFIG_INVALID",
            Self::Analysis(_) => "ANALYSIS_FAILED",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Whether the caller may retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Search(e) if e.is_retryable())
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, MarketError>;
