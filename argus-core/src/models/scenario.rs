use crate::display::EntityDisplay;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub timestamp: String,
    pub event: String,
}

/// Threat outlook for a scenario. `threat_score` ranges 1 (minimal) to
/// 10 (critical).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outlook {
    pub narrative: String,
    pub threat_score: u8,
}

/// A structured "what-if" scenario analysis, parsed from the LLM's JSON
/// reply. All sections default to empty so a partial reply still renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfReport {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    pub key_individuals: Vec<EntityDisplay>,
    #[serde(default)]
    pub key_facets: Vec<EntityDisplay>,
    pub outlook: Option<Outlook>,
    #[serde(default)]
    pub unique_insights: Vec<String>,
}
