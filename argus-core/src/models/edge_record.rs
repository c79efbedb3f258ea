use serde::{Deserialize, Serialize};

/// Wire shape of a graph edge as the dashboard consumes it: both endpoint
/// entities inlined with their group and description, plus the
/// relationship label and its description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from_label: String,
    pub from_group: String,
    #[serde(default)]
    pub from_description: String,
    pub to_label: String,
    pub to_group: String,
    #[serde(default)]
    pub to_description: String,
    pub label: String,
    #[serde(default)]
    pub relationship_description: String,
}
