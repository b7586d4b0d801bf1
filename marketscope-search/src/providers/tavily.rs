//! Tavily search API provider.
//!
//! Sends one `POST {base_url}/search` per call with the API key in the
//! JSON body. Requests are never retried here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SearchError;
use crate::http::build_client;
use crate::provider::{ProviderRequest, SearchProvider};
use crate::types::{SearchDepth, SearchResult};

/// Default Tavily API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Placeholder value shipped in sample environment files.
const PLACEHOLDER_API_KEY: &str = "your_tavily_api_key_here";

/// Snippets longer than this many characters are cut.
const MAX_SNIPPET_CHARS: usize = 300;

/// Configuration for [`TavilyProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TavilyConfig {
    /// API base URL, without trailing `/search`.
    pub base_url: String,
    /// API key. `None` leaves the provider unconfigured.
    pub api_key: Option<String>,
    /// Whole-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for TavilyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            timeout_seconds: 30,
        }
    }
}

impl TavilyConfig {
    /// Create a config with the given API key and default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Whether a usable API key is present.
    ///
    /// Blank keys and the sample placeholder count as missing.
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .map(str::trim)
            .is_some_and(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY)
    }
}

/// Tavily API request body.
#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    search_depth: SearchDepth,
    #[serde(skip_serializing_if = "no_domains")]
    include_domains: &'a [String],
}

fn no_domains(domains: &&[String]) -> bool {
    domains.is_empty()
}

/// Tavily API response. Older payloads used `data` or `items`.
#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default, alias = "data", alias = "items")]
    results: Vec<TavilyResult>,
}

/// One Tavily result. Fields that are missing, null, or not strings read
/// as `None`, so one bad item cannot fail the whole response.
#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default, deserialize_with = "lenient_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    content: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    published_date: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

impl From<TavilyResult> for SearchResult {
    fn from(item: TavilyResult) -> Self {
        Self {
            // An empty URL classifies as the other tier downstream.
            url: item.url.unwrap_or_default(),
            title: item.title.unwrap_or_default(),
            snippet: truncate_chars(
                item.content.as_deref().unwrap_or_default(),
                MAX_SNIPPET_CHARS,
            ),
            published_at: item.published_date.as_deref().and_then(parse_published_date),
        }
    }
}

/// Tavily web search provider.
pub struct TavilyProvider {
    config: TavilyConfig,
    client: reqwest::Client,
}

impl TavilyProvider {
    /// Create a provider, building its HTTP client.
    ///
    /// An unconfigured provider can be constructed; its searches fail
    /// with [`SearchError::Provider`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the timeout
    /// is zero.
    pub fn new(config: TavilyConfig) -> Result<Self, SearchError> {
        let client = build_client(config.timeout_seconds, None)?;
        Ok(Self { config, client })
    }

    /// Returns the provider configuration.
    pub fn config(&self) -> &TavilyConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.config.base_url.trim_end_matches('/'))
    }
}

impl SearchProvider for TavilyProvider {
    async fn search(&self, request: &ProviderRequest) -> Result<Vec<SearchResult>, SearchError> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if self.config.is_configured() => key.trim(),
            _ => {
                return Err(SearchError::Provider(
                    "Tavily API key is not configured".into(),
                ));
            }
        };

        let body = TavilyRequest {
            api_key,
            query: &request.query,
            max_results: request.max_results,
            search_depth: request.depth,
            include_domains: &request.include_domains,
        };

        tracing::trace!(query = %request.query, depth = ?request.depth, "sending Tavily search");

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Provider(format!("Tavily request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            tracing::debug!(%status, body = %body_text, "Tavily returned an error status");
            return Err(SearchError::Provider(format!(
                "Tavily API returned HTTP {}",
                status.as_u16()
            )));
        }

        let payload: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Provider(format!("failed to parse Tavily response: {e}")))?;

        tracing::debug!(count = payload.results.len(), "Tavily returned results");
        Ok(payload.results.into_iter().map(SearchResult::from).collect())
    }

    fn name(&self) -> &'static str {
        "tavily"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
fn parse_published_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
