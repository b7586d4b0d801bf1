//! Error types for the marketscope-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. No API keys or sensitive data appear in
//! error messages.

/// Stable error codes, one per [`SearchError`] variant.
pub mod error_codes {
    /// Query was empty or the request parameters were out of range.
    pub const INVALID_QUERY: &str = "INVALID_QUERY";
    /// Mode name outside the supported set.
    pub const UNSUPPORTED_MODE: &str = "UNSUPPORTED_MODE";
    /// A result URL had no parseable host.
    pub const MALFORMED_URL: &str = "MALFORMED_URL";
    /// The external search provider failed.
    pub const PROVIDER_FAILED: &str = "PROVIDER_FAILED";
    /// Invalid search or trust configuration.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";
}

/// Errors that can occur while searching and scoring results.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query was empty after trimming, or `max_results` was zero.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A mode name that is neither `general` nor `data`.
    #[error("unsupported search mode: {0}")]
    UnsupportedMode(String),

    /// A result URL could not be parsed or has no host.
    ///
    /// Raised by the classifier only; the orchestrator degrades the
    /// affected result to the `Other` tier instead of propagating.
    #[error("malformed URL: {0}")]
    MalformedUrl(String),

    /// Transport, quota, or payload failure from the search provider.
    #[error("search provider error: {0}")]
    Provider(String),

    /// Invalid search or trust configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidQuery(_) => error_codes::INVALID_QUERY,
            Self::UnsupportedMode(_) => error_codes::UNSUPPORTED_MODE,
            Self::MalformedUrl(_) => error_codes::MALFORMED_URL,
            Self::Provider(_) => error_codes::PROVIDER_FAILED,
            Self::Config(_) => error_codes::CONFIG_INVALID,
        }
    }

    /// Whether the caller may retry the same request.
    ///
    /// Only provider failures are retryable. No retry happens inside
    /// this crate.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider(_))
    }
}

/// Convenience type alias for marketscope-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
