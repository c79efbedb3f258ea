//! Analysis LLM client
//!
//! The dashboard's analysis panels are backed by an external LLM service
//! exposing `POST /execute-query` with `{ query, prompt }` and replying
//! `{ "result": "<analysis text>" }`. This module provides the
//! `LlmBackend` trait seam plus the HTTP implementation with retry, and
//! the prompt contracts for the two analysis flows.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::Retry;

use crate::config::LlmServiceConfig;

/// Prompt for the topic-overview panel. The model must reply with a JSON
/// object keyed by the four analysis sections.
pub const TOPIC_OVERVIEW_PROMPT: &str = r#"---Role---

You are a helpful assistant providing structured threat intelligence analysis about a Topic for National Security professionals.

---Goal---

Analyse the topic according to the listed sections and output the response in JSON format with the descriptions attached to each section.

{
    "Visibility": Explain how easily the threat can be detected, who can see it, and the challenges in monitoring it.
    "Impact": Assess the potential consequences of the threat, including national security risks, economic disruption, and public safety concerns.
    "Prioritization": Describe how intelligence agencies determine the urgency of the threat and allocate resources accordingly.
    "Overview": Provide a high-level summary of the threat landscape, including its historical context, known actors, and current intelligence gaps.
}
"#;

/// Prompt for the what-if scenario panel. The model must reply with a JSON
/// object matching `WhatIfReport`: summary, timeline, key individuals and
/// facets with mention counts, an outlook with a 1-10 threat score, and
/// unique insights. Fabricating unsupported details is forbidden.
pub const WHAT_IF_PROMPT: &str = r#"-Role-
You are a Threat Intelligence Professional specializing in national security scenarios. You analyze data provided in tables, respond to user queries, and evaluate scenarios for their potential impact on sovereignty and security.

-Goal-
Generate a structured and professional JSON response analyzing the user-provided scenario with the following fields:

{
    "summary": Concise summary of the scenario's context and national-security relevance.
    "timeline": Chronological list of { "timestamp", "event" } extracted from the knowledge graph.
    "key_individuals": List of { "kind": "person", "name", "role", "mentions" } involved in the scenario.
    "key_facets": List of { "kind": "facet", "facet", "mentions" } for critical entities or topics.
    "outlook": { "narrative", "threat_score" } where threat_score is 1 (minimal) to 10 (critical).
    "unique_insights": Additional trends or emerging patterns that could inform national security strategy.
}

Do not include information where the supporting evidence is unavailable, and never fabricate details.
"#;

// ============================================================================
// LlmBackend trait
// ============================================================================

/// Abstraction over the analysis LLM service.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Execute an analysis query under the given prompt; returns the raw
    /// analysis text.
    async fn execute(&self, query: &str, prompt: &str) -> Result<String, LlmError>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

// ============================================================================
// Error types
// ============================================================================

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Missing result field in response")]
    MissingResult,

    #[error("Malformed analysis reply: {0}")]
    MalformedReply(String),

    #[error("All {attempts} retry attempts failed")]
    RetryExhausted { attempts: usize },
}

// ============================================================================
// Wire structs (private)
// ============================================================================

#[derive(Debug, Serialize)]
struct ExecuteQueryRequest {
    query: String,
    prompt: String,
}

#[derive(Debug, Deserialize)]
struct ExecuteQueryResponse {
    result: Option<String>,
}

// ============================================================================
// HttpLlmClient
// ============================================================================

/// HTTP client for the analysis LLM service's `execute-query` endpoint.
#[derive(Debug, Clone)]
pub struct HttpLlmClient {
    client: Client,
    config: LlmServiceConfig,
}

impl HttpLlmClient {
    pub fn new(config: LlmServiceConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client, config })
    }

    async fn execute_once(&self, query: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/execute-query", self.config.base_url.trim_end_matches('/'));

        let request = ExecuteQueryRequest {
            query: query.to_string(),
            prompt: prompt.to_string(),
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(code = status.as_u16(), message = %message, "LLM service error");
            return Err(LlmError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let reply: ExecuteQueryResponse = response.json().await?;
        reply.result.ok_or(LlmError::MissingResult)
    }
}

#[async_trait]
impl LlmBackend for HttpLlmClient {
    async fn execute(&self, query: &str, prompt: &str) -> Result<String, LlmError> {
        let retry_strategy = ExponentialBackoff::from_millis(self.config.retry_delay_ms)
            .max_delay(Duration::from_secs(10))
            .map(jitter)
            .take(self.config.max_retries);

        let result = Retry::spawn(retry_strategy, || self.execute_once(query, prompt)).await;

        match result {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::error!(
                    attempts = self.config.max_retries,
                    error = %e,
                    "All LLM retry attempts failed"
                );
                Err(LlmError::RetryExhausted {
                    attempts: self.config.max_retries,
                })
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Extract the JSON object embedded in an analysis reply. Models often
/// wrap the object in code fences or preamble text; everything outside the
/// outermost braces is discarded.
pub fn extract_json_object(reply: &str) -> Result<serde_json::Value, LlmError> {
    let start = reply
        .find('{')
        .ok_or_else(|| LlmError::MalformedReply("no JSON object in reply".to_string()))?;
    let end = reply
        .rfind('}')
        .ok_or_else(|| LlmError::MalformedReply("unterminated JSON object".to_string()))?;
    if end < start {
        return Err(LlmError::MalformedReply("unterminated JSON object".to_string()));
    }
    serde_json::from_str(&reply[start..=end])
        .map_err(|e| LlmError::MalformedReply(e.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
