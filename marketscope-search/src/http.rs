//! Shared HTTP client construction for provider requests.

use crate::error::SearchError;
use std::time::Duration;

/// User-Agent sent when the caller does not configure one.
pub const DEFAULT_USER_AGENT: &str = concat!("marketscope/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] for calling a search provider API.
///
/// The timeout applies to the whole request; it is the only timeout in
/// the search path.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `timeout_seconds` is zero, or
/// [`SearchError::Provider`] if the client cannot be constructed.
pub fn build_client(
    timeout_seconds: u64,
    user_agent: Option<&str>,
) -> Result<reqwest::Client, SearchError> {
    if timeout_seconds == 0 {
        return Err(SearchError::Config(
            "timeout_seconds must be greater than 0".into(),
        ));
    }

    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Provider(format!("failed to build HTTP client: {e}")))
}
