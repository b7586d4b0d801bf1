//! Route handlers.

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use marketscope_search::{
    ScoredResult, SearchError, SearchMode, SearchOutcome, SearchProvider, format_context_for_llm,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AppState;
use super::extract::ApiJson;
use super::response::ApiError;
use crate::analysis::{ChatReply, QualitativeAnalysis};
use crate::datasets::QuantitativeData;

/// Service name reported by `GET /`.
const SERVICE_NAME: &str = "Market Analysis API";

/// Results fetched for an analysis.
const ANALYSIS_SOURCES: usize = 5;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /api/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    /// Free-text query.
    #[serde(default)]
    pub query: String,
    /// `general` or `data`.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Result count to request; the configured default when absent.
    #[serde(default)]
    pub max_results: Option<i64>,
}

fn default_mode() -> String {
    SearchMode::General.name().to_owned()
}

/// Body of `POST /api/search/general` and `POST /api/search/data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModeSearchRequest {
    /// Free-text query.
    #[serde(default)]
    pub query: String,
    /// Result count to request; the configured default when absent.
    #[serde(default)]
    pub max_results: Option<i64>,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The user's chat message.
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /api/analysis`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    /// Market to analyse.
    #[serde(default)]
    pub query: String,
    /// Run a general search for sources first.
    #[serde(default = "default_true")]
    pub include_web_search: bool,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response of `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Always `"online"`.
    pub status: &'static str,
    /// Service display name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the server answers.
    pub status: &'static str,
    /// When the check ran.
    pub timestamp: DateTime<Utc>,
    /// Per-collaborator credential status.
    pub services: ServiceHealth,
}

/// Whether each external collaborator has credentials.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    /// A Tavily API key is set.
    pub tavily: bool,
    /// A language model API key is set.
    pub llm: bool,
}

/// Response of the search endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// Filtered results, mode, and pre-filter count, inlined.
    #[serde(flatten)]
    pub outcome: SearchOutcome,
}

/// Response of `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// How to research the message.
    pub response: ChatReply,
    /// When the reply was produced.
    pub generated_at: DateTime<Utc>,
}

/// Response of `POST /api/analysis`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    /// Always `true`; failures use the error envelope.
    pub success: bool,
    /// The composed analysis.
    pub analysis: AnalysisBody,
}

/// A composed analysis with the sources it cites.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisBody {
    /// Random v4 UUID identifying this analysis.
    pub id: String,
    /// Narrative sections and cited URLs.
    pub qualitative: QualitativeAnalysis,
    /// Illustrative datasets with their sources attached.
    pub quantitative: QuantitativeData,
    /// Trusted search results the analysis was built from.
    pub sources: Vec<ScoredResult>,
    /// When the analysis was composed.
    pub generated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub(super) async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        services: ServiceHealth {
            tavily: state.orchestrator.provider().is_configured(),
            llm: state.llm.is_configured(),
        },
    })
}

pub(super) async fn search(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let mode: SearchMode = body.mode.parse()?;
    run_search(&state, &body.query, mode, body.max_results).await
}

pub(super) async fn search_general(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ModeSearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    run_search(&state, &body.query, SearchMode::General, body.max_results).await
}

pub(super) async fn search_data(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ModeSearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    run_search(&state, &body.query, SearchMode::Data, body.max_results).await
}

pub(super) async fn chat(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = state.llm.analyze_user_input(&body.message)?;
    Ok(Json(ChatResponse {
        success: true,
        response,
        generated_at: Utc::now(),
    }))
}

pub(super) async fn analysis(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let (sources, web_context) = if body.include_web_search {
        let outcome = state
            .orchestrator
            .search(&body.query, SearchMode::General, Some(ANALYSIS_SOURCES))
            .await?;
        let context = format_context_for_llm(&outcome.results);
        (outcome.results, context)
    } else {
        (Vec::new(), String::new())
    };

    let analysis = state
        .llm
        .generate_analysis(&body.query, &web_context, &sources)?;

    Ok(Json(AnalysisResponse {
        success: true,
        analysis: AnalysisBody {
            id: Uuid::new_v4().to_string(),
            qualitative: analysis.qualitative,
            quantitative: analysis.quantitative,
            sources,
            generated_at: Utc::now(),
        },
    }))
}

async fn run_search(
    state: &AppState,
    query: &str,
    mode: SearchMode,
    max_results: Option<i64>,
) -> Result<Json<SearchResponse>, ApiError> {
    let max_results = max_results.map(to_result_count).transpose()?;
    let outcome = state.orchestrator.search(query, mode, max_results).await?;
    Ok(Json(SearchResponse {
        success: true,
        outcome,
    }))
}

/// Negative counts are rejected here; zero is left to the orchestrator.
fn to_result_count(raw: i64) -> Result<usize, SearchError> {
    usize::try_from(raw).map_err(|_| {
        SearchError::InvalidQuery(format!("max_results must be greater than 0, got {raw}"))
    })
}
