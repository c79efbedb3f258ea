//! Argus HTTP REST API
//!
//! Axum-based HTTP server exposing the knowledge-graph and analysis
//! operations to the dashboard. Runs alongside the Unix socket IPC server.
//!
//! Architecture: each endpoint has a thin axum handler that delegates to a
//! pure inner function. The inner functions are directly testable without
//! axum dispatch machinery.
//!
//! Endpoints:
//! - GET  /health                 — health check with graph counts
//! - GET  /version                — server version info
//! - POST /get-path-between-nodes — pathways between two nodes
//! - POST /retrieve-subgraph      — bounded neighborhood of a node
//! - POST /api/topic-overview     — LLM-backed topic analysis
//! - POST /api/whatif             — LLM-backed scenario analysis

use crate::router::{self, AppState};
use anyhow::Result;
use argus_core::ipc::{ArgusRequest, ArgusResponse};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

/// Build the Axum router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .route("/get-path-between-nodes", post(path_handler))
        .route("/retrieve-subgraph", post(subgraph_handler))
        .route("/api/topic-overview", post(topic_overview_handler))
        .route("/api/whatif", post(what_if_handler))
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    state: AppState,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = format!("{}:{}", state.config.http.host, state.config.http.port);
    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Argus HTTP API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PathRequest {
    pub node_from: Option<String>,
    pub node_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubgraphRequest {
    pub node_start: Option<String>,
    #[serde(default)]
    pub depth: u32,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub query: Option<String>,
}

fn bad_request(msg: &str) -> (StatusCode, serde_json::Value) {
    (
        StatusCode::BAD_REQUEST,
        serde_json::json!({
            "error": msg,
            "status": "error",
        }),
    )
}

// ============================================================================
// Inner (directly testable) business logic functions
// ============================================================================

/// Inner health check — reports graph counts (pure, no IO).
pub fn health_inner(state: &AppState) -> (StatusCode, serde_json::Value) {
    (
        StatusCode::OK,
        serde_json::json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "nodes": state.store.node_count(),
            "edges": state.store.edge_count(),
            "llm_backend": state.llm.name(),
            "socket": state.config.service.socket_path,
        }),
    )
}

/// Inner version — returns version info (pure, no IO).
pub fn version_inner() -> serde_json::Value {
    serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "argus/1",
    })
}

/// Inner pathway lookup — validates endpoints and calls the router.
/// An empty pathway set is a 200 with `count: 0`, never an error.
pub async fn path_inner(
    state: &AppState,
    req: PathRequest,
) -> (StatusCode, serde_json::Value) {
    let node_from = req.node_from.unwrap_or_default();
    let node_to = req.node_to.unwrap_or_default();

    if node_from.trim().is_empty() || node_to.trim().is_empty() {
        return bad_request("node_from and node_to are required");
    }
    if node_from.trim().to_uppercase() == node_to.trim().to_uppercase() {
        return bad_request("node_from and node_to must differ");
    }

    let request = ArgusRequest::PathBetweenNodes { node_from, node_to };
    let response = router::handle_request(request, state).await;
    envelope_to_http(response)
}

/// Inner subgraph retrieval.
pub async fn subgraph_inner(
    state: &AppState,
    req: SubgraphRequest,
) -> (StatusCode, serde_json::Value) {
    let node_start = req.node_start.unwrap_or_default();
    if node_start.trim().is_empty() {
        return bad_request("node_start is required");
    }

    let request = ArgusRequest::RetrieveSubgraph {
        node_start,
        depth: req.depth,
    };
    let response = router::handle_request(request, state).await;
    envelope_to_http(response)
}

/// Inner topic overview — validates the query and calls the router.
pub async fn topic_overview_inner(
    state: &AppState,
    req: AnalysisRequest,
) -> (StatusCode, serde_json::Value) {
    let query = match req.query {
        Some(q) if !q.trim().is_empty() => q,
        _ => return bad_request("query field is required"),
    };

    let request = ArgusRequest::TopicOverview { query };
    let response = router::handle_request(request, state).await;
    envelope_to_http(response)
}

/// Inner what-if analysis — validates the query and calls the router.
pub async fn what_if_inner(
    state: &AppState,
    req: AnalysisRequest,
) -> (StatusCode, serde_json::Value) {
    let query = match req.query {
        Some(q) if !q.trim().is_empty() => q,
        _ => return bad_request("query field is required"),
    };

    let request = ArgusRequest::WhatIf { query };
    let response = router::handle_request(request, state).await;
    envelope_to_http(response)
}

// ============================================================================
// Axum handler wrappers (thin — delegate to inner functions)
// ============================================================================

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (status, body) = health_inner(&state);
    (status, Json(body))
}

pub async fn version_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(version_inner()))
}

pub async fn path_handler(
    State(state): State<AppState>,
    Json(req): Json<PathRequest>,
) -> impl IntoResponse {
    let (status, body) = path_inner(&state, req).await;
    (status, Json(body))
}

pub async fn subgraph_handler(
    State(state): State<AppState>,
    Json(req): Json<SubgraphRequest>,
) -> impl IntoResponse {
    let (status, body) = subgraph_inner(&state, req).await;
    (status, Json(body))
}

pub async fn topic_overview_handler(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> impl IntoResponse {
    let (status, body) = topic_overview_inner(&state, req).await;
    (status, Json(body))
}

pub async fn what_if_handler(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> impl IntoResponse {
    let (status, body) = what_if_inner(&state, req).await;
    (status, Json(body))
}

// ============================================================================
// Helpers
// ============================================================================

/// Map an `ArgusResponse` envelope onto an HTTP status and body.
pub fn envelope_to_http(response: ArgusResponse) -> (StatusCode, serde_json::Value) {
    if response.status == "ok" {
        (
            StatusCode::OK,
            response.data.unwrap_or(serde_json::json!({})),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({
                "error": response.error.unwrap_or_else(|| "unknown error".to_string()),
                "status": "error",
            }),
        )
    }
}

// ============================================================================
// Unit Tests — call inner functions directly, plus router dispatch checks
// ============================================================================
