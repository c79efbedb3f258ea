use crate::subsystems::{analysis, explorer, pathways};
use argus_core::ipc::{ArgusRequest, ArgusResponse};
use argus_core::llm::LlmBackend;
use argus_core::store::GraphStore;
use argus_core::ArgusConfig;
use std::sync::Arc;

/// Shared state for the IPC and HTTP surfaces. The graph store is built
/// once at startup and never mutated afterwards, so it is shared without
/// locking.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<GraphStore>,
    pub config: ArgusConfig,
    pub llm: Arc<dyn LlmBackend>,
}

pub async fn handle_request(request: ArgusRequest, state: &AppState) -> ArgusResponse {
    match request {
        ArgusRequest::Ping => ArgusResponse::pong(),
        ArgusRequest::Health => ArgusResponse::ok(serde_json::json!({
            "status": "healthy",
            "nodes": state.store.node_count(),
            "edges": state.store.edge_count(),
            "llm_backend": state.llm.name(),
        })),
        ArgusRequest::PathBetweenNodes { node_from, node_to } => {
            handle_path_request(&node_from, &node_to, state)
        }
        ArgusRequest::RetrieveSubgraph { node_start, depth } => {
            let start = pathways::normalize_endpoint(&node_start);
            if start.is_empty() {
                return ArgusResponse::err("node_start is required");
            }
            let view = explorer::explore(
                &state.store,
                &start,
                depth,
                state.config.graph.max_depth,
            );
            match serde_json::to_value(&view) {
                Ok(data) => ArgusResponse::ok(data),
                Err(e) => ArgusResponse::err(e.to_string()),
            }
        }
        ArgusRequest::TopicOverview { query } => {
            if query.trim().is_empty() {
                return ArgusResponse::err("query is required");
            }
            match analysis::topic_overview(state.llm.as_ref(), &query).await {
                Ok(overview) => match serde_json::to_value(&overview) {
                    Ok(data) => ArgusResponse::ok(data),
                    Err(e) => ArgusResponse::err(e.to_string()),
                },
                Err(e) => ArgusResponse::err(e.to_string()),
            }
        }
        ArgusRequest::WhatIf { query } => {
            if query.trim().is_empty() {
                return ArgusResponse::err("query is required");
            }
            match analysis::what_if(state.llm.as_ref(), &state.store, &query).await {
                Ok(report) => match serde_json::to_value(&report) {
                    Ok(data) => ArgusResponse::ok(data),
                    Err(e) => ArgusResponse::err(e.to_string()),
                },
                Err(e) => ArgusResponse::err(e.to_string()),
            }
        }
    }
}

/// Pathway lookup. Missing or identical endpoints are validation errors;
/// an empty pathway set is a well-defined ok result, not an error.
fn handle_path_request(node_from: &str, node_to: &str, state: &AppState) -> ArgusResponse {
    let from = pathways::normalize_endpoint(node_from);
    let to = pathways::normalize_endpoint(node_to);

    if from.is_empty() || to.is_empty() {
        return ArgusResponse::err("node_from and node_to are required");
    }
    if from == to {
        return ArgusResponse::err("node_from and node_to must differ");
    }

    let found = pathways::find_pathways(&state.store, &from, &to, state.config.graph.max_paths);
    ArgusResponse::ok(serde_json::json!({
        "node_from": from,
        "node_to": to,
        "count": found.len(),
        "paths": found,
    }))
}
