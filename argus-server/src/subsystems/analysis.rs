//! LLM-backed analysis flows for the topic-overview and what-if panels
//!
//! Both flows forward the analyst's query to the configured LLM backend
//! under a fixed prompt contract, then parse the JSON object out of the
//! reply. What-if reports get their entity mention counts backfilled from
//! the knowledge graph when the model omits them.

use argus_core::error::ArgusError;
use argus_core::llm::{extract_json_object, LlmBackend, TOPIC_OVERVIEW_PROMPT, WHAT_IF_PROMPT};
use argus_core::models::{TopicOverview, WhatIfReport};
use argus_core::store::GraphStore;

/// Structured topic analysis for the overview panel.
pub async fn topic_overview(
    llm: &dyn LlmBackend,
    query: &str,
) -> Result<TopicOverview, ArgusError> {
    tracing::info!(backend = llm.name(), query, "Topic overview requested");
    let reply = llm.execute(query, TOPIC_OVERVIEW_PROMPT).await?;
    let value = extract_json_object(&reply)?;
    let overview: TopicOverview = serde_json::from_value(value)?;
    Ok(overview)
}

/// Structured what-if scenario analysis.
pub async fn what_if(
    llm: &dyn LlmBackend,
    store: &GraphStore,
    query: &str,
) -> Result<WhatIfReport, ArgusError> {
    tracing::info!(backend = llm.name(), query, "What-if scenario requested");
    let reply = llm.execute(query, WHAT_IF_PROMPT).await?;
    let value = extract_json_object(&reply)?;
    let mut report: WhatIfReport = serde_json::from_value(value)?;
    backfill_mentions(&mut report, store);
    Ok(report)
}

/// Fill in zero mention counts from the graph: an entity's mentions are
/// the number of relationships touching its node.
fn backfill_mentions(report: &mut WhatIfReport, store: &GraphStore) {
    for entity in report
        .key_individuals
        .iter_mut()
        .chain(report.key_facets.iter_mut())
    {
        if entity.mentions() == 0 {
            let id = entity.display_name().trim().to_uppercase();
            let degree = store.degree(&id);
            if degree > 0 {
                entity.set_mentions(degree);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
