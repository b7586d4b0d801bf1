//! HTTP API for the market research front end.
//!
//! ## Endpoints
//!
//! - `GET /` and `GET /health` report service status
//! - `POST /api/search` runs a trust-scored search in the requested mode
//! - `POST /api/search/general` and `POST /api/search/data` fix the mode
//! - `POST /api/chat` suggests how to research a chat message
//! - `POST /api/analysis` searches, then composes a market analysis
//!
//! Failures use one envelope: `{success: false, error: {code, message,
//! retryable}}`.

mod extract;
mod handlers;
mod response;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use marketscope_search::{SearchOrchestrator, TavilyProvider, TrustRegistry};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use crate::analysis::LlmService;
use crate::config::ServiceConfig;
use crate::error::{MarketError, Result};

pub use response::ApiError;

/// Origin of the local development front end, always allowed by CORS.
const LOCAL_FRONTEND_ORIGIN: &str = "http://localhost:3000";

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<SearchOrchestrator<TavilyProvider>>,
    llm: Arc<LlmService>,
}

impl AppState {
    /// Build the search orchestrator and analysis composer from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the trust tables, search section, or provider
    /// client are invalid.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let registry = Arc::new(TrustRegistry::from_config(&config.trust)?);
        let provider = TavilyProvider::new(config.provider.clone())?;
        let orchestrator = SearchOrchestrator::new(provider, registry, config.search.clone())?;
        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            llm: Arc::new(LlmService::new(config.llm.clone())),
        })
    }

    /// Returns the search orchestrator.
    pub fn orchestrator(&self) -> &SearchOrchestrator<TavilyProvider> {
        &self.orchestrator
    }

    /// Returns the analysis composer.
    pub fn llm(&self) -> &LlmService {
        &self.llm
    }
}

/// Build the API router with CORS for `frontend_url`.
///
/// # Errors
///
/// Returns [`MarketError::Config`] if `frontend_url` is not a URL.
pub fn router(state: AppState, frontend_url: &str) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/search", post(handlers::search))
        .route("/api/search/general", post(handlers::search_general))
        .route("/api/search/data", post(handlers::search_data))
        .route("/api/chat", post(handlers::chat))
        .route("/api/analysis", post(handlers::analysis))
        .layer(cors_layer(frontend_url)?)
        .with_state(state))
}

fn cors_layer(frontend_url: &str) -> Result<CorsLayer> {
    let origins = allowed_origins(frontend_url)?
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(&origin)
                .map_err(|e| MarketError::Config(format!("bad CORS origin {origin}: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]))
}

/// The configured front-end origin plus the local development origin.
fn allowed_origins(frontend_url: &str) -> Result<Vec<String>> {
    let url = url::Url::parse(frontend_url.trim())
        .map_err(|e| MarketError::Config(format!("frontend_url {frontend_url}: {e}")))?;
    let origin = url.origin().ascii_serialization();
    let mut origins = vec![origin];
    if origins[0] != LOCAL_FRONTEND_ORIGIN {
        origins.push(LOCAL_FRONTEND_ORIGIN.to_owned());
    }
    Ok(origins)
}

/// The market research HTTP server.
pub struct ApiServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl ApiServer {
    /// Start the API server.
    ///
    /// Binds to `{server.host}:{server.port}` (use port `0` for auto-assign)
    /// and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be built or the TCP listener
    /// cannot bind.
    pub async fn start(config: &ServiceConfig) -> Result<Self> {
        let state = AppState::from_config(config)?;
        let app = router(state, &config.server.frontend_url)?;

        let bind_addr = config.server.bind_addr();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| MarketError::Config(format!("API server bind {bind_addr} failed: {e}")))?;
        let addr = listener.local_addr()?;

        info!("API server listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("API server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
