use serde::{Deserialize, Serialize};

/// Structured topic analysis, parsed from the LLM's JSON reply. Section
/// names match the topic-overview prompt contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicOverview {
    #[serde(rename = "Visibility")]
    pub visibility: String,
    #[serde(rename = "Impact")]
    pub impact: String,
    #[serde(rename = "Prioritization")]
    pub prioritization: String,
    #[serde(rename = "Overview")]
    pub overview: String,
}
