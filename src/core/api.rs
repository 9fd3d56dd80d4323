//! HTTP API for MindMate
//!
//! Endpoints:
//! - GET /         - Readiness marker
//! - GET /health   - Health check
//! - POST /analyze - Sentiment + short support message
//! - POST /support - Structured support + walker results

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::core::Orchestrator;
use crate::types::{ApiError, ComposedResponse, MoodRequest};

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub generation_enabled: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
        }
    }
}

/// Create the API router
pub fn create_router(orchestrator: Orchestrator) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .route("/support", post(support))
        .layer(cors)
        .with_state(Arc::new(orchestrator))
}

/// Static readiness marker
async fn root() -> Json<Value> {
    Json(json!({ "status": "backend running" }))
}

/// Health check endpoint
async fn health(State(orch): State<Arc<Orchestrator>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        generation_enabled: orch.generation_enabled(),
    })
}

/// Basic check-in
async fn analyze(
    State(orch): State<Arc<Orchestrator>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ComposedResponse>, ApiError> {
    let (request, _) = parse_request(payload)?;
    Ok(Json(orch.analyze(&request).await))
}

/// Full check-in with walker calls
async fn support(
    State(orch): State<Arc<Orchestrator>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ComposedResponse>, ApiError> {
    let (request, raw) = parse_request(payload)?;
    Ok(Json(orch.support(&request, &raw).await))
}

/// Decode the body, keeping the raw payload for the log walker
fn parse_request(payload: Result<Json<Value>, JsonRejection>) -> Result<(MoodRequest, Value), ApiError> {
    let Json(raw) = payload.map_err(|e| {
        warn!(error = %e, "rejected request body");
        ApiError::BadRequest(e.body_text())
    })?;

    let request = serde_json::from_value::<MoodRequest>(raw.clone()).map_err(|e| {
        warn!(error = %e, "rejected check-in payload");
        ApiError::BadRequest(format!("invalid check-in: {}", e))
    })?;

    Ok((request, raw))
}

/// Run the API server
pub async fn run_server(addr: &str, orchestrator: Orchestrator) -> anyhow::Result<()> {
    let router = create_router(orchestrator);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("MindMate API running on {}", listener.local_addr()?);
    info!("  GET  /        - Readiness");
    info!("  GET  /health  - Health check");
    info!("  POST /analyze - Mood analysis + support");
    info!("  POST /support - Support + walker results");
    axum::serve(listener, router).await?;
    Ok(())
}
