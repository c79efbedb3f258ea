//! Knowledge-graph ingestion
//!
//! Extraction output files are a JSON array of records whose `response`
//! field is itself a JSON document:
//!
//! ```json
//! [{"response": "{\"nodes\": [{\"id\": \"TIKTOK\", \"type\": \"organization\",
//!   \"detailed_type\": \"social media platform\"}],
//!   \"edges\": [{\"from\": \"BYTEDANCE\", \"to\": \"TIKTOK\", \"label\": \"owns\"}]}"}]
//! ```
//!
//! Extraction runs produce the occasional truncated record; those are
//! skipped with a warning rather than failing the whole load, matching
//! the tolerance of the original loader.

use argus_core::store::GraphStore;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed extraction file: {0}")]
    MalformedFile(#[from] serde_json::Error),
}

/// One element of the extraction output array.
#[derive(Debug, Deserialize)]
struct ExtractionRecord {
    response: String,
}

/// The inner document carried by each record.
#[derive(Debug, Deserialize)]
struct ExtractedGraph {
    #[serde(default)]
    nodes: Vec<ExtractedNode>,
    #[serde(default)]
    edges: Vec<ExtractedEdge>,
}

#[derive(Debug, Deserialize)]
struct ExtractedNode {
    id: String,
    #[serde(rename = "type", default)]
    node_type: String,
    #[serde(default)]
    detailed_type: String,
}

#[derive(Debug, Deserialize)]
struct ExtractedEdge {
    from: String,
    to: String,
    label: String,
}

/// Counters from one load pass.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: usize,
    pub parsed: usize,
    pub skipped: usize,
    pub nodes: usize,
    pub edges: usize,
}

/// Merge one record's inner document into the store. Returns false when
/// the inner JSON does not parse (truncated extraction output).
fn merge_record(store: &mut GraphStore, record: &ExtractionRecord) -> bool {
    let graph: ExtractedGraph = match serde_json::from_str(&record.response) {
        Ok(g) => g,
        Err(e) => {
            tracing::warn!(error = %e, "Skipping unparseable extraction record");
            return false;
        }
    };

    for node in &graph.nodes {
        store.insert_node(node.id.clone(), &node.node_type, &node.detailed_type);
    }
    for edge in &graph.edges {
        store.insert_edge(edge.from.clone(), edge.to.clone(), &edge.label);
    }
    true
}

/// Fold a parsed extraction array into a fresh store.
pub fn build_store(records: &[serde_json::Value]) -> (GraphStore, LoadReport) {
    let mut store = GraphStore::new();
    let mut report = LoadReport {
        records: records.len(),
        ..LoadReport::default()
    };

    for value in records {
        let record: ExtractionRecord = match serde_json::from_value(value.clone()) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping record without response field");
                report.skipped += 1;
                continue;
            }
        };
        if merge_record(&mut store, &record) {
            report.parsed += 1;
        } else {
            report.skipped += 1;
        }
    }

    report.nodes = store.node_count();
    report.edges = store.edge_count();
    (store, report)
}

/// Load a knowledge-graph extraction output file into an in-memory store.
pub fn load_graph(path: impl AsRef<Path>) -> Result<(GraphStore, LoadReport), IngestError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let records: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
    let (store, report) = build_store(&records);

    tracing::info!(
        records = report.records,
        parsed = report.parsed,
        skipped = report.skipped,
        nodes = report.nodes,
        edges = report.edges,
        "Knowledge graph loaded"
    );

    Ok((store, report))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(inner: &str) -> serde_json::Value {
        serde_json::json!({ "response": inner })
    }

    // ========================================================================
    // TEST 1: a well-formed record populates nodes and edges
    // ========================================================================
    #[test]
    fn test_build_store_well_formed() {
        let records = vec![record(
            r#"{"nodes": [{"id": "TIKTOK", "type": "organization", "detailed_type": "social media platform"},
                          {"id": "BYTEDANCE", "type": "organization", "detailed_type": "tech company"}],
                "edges": [{"from": "BYTEDANCE", "to": "TIKTOK", "label": "owns"}]}"#,
        )];

        let (store, report) = build_store(&records);
        assert_eq!(report.parsed, 1);
        assert_eq!(report.skipped, 0);
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.node("TIKTOK").unwrap().group, "organization");
        assert_eq!(store.edges()[0].label, "OWNS");
    }

    // ========================================================================
    // TEST 2: truncated inner JSON is skipped, not fatal
    // ========================================================================
    #[test]
    fn test_build_store_skips_truncated() {
        let records = vec![
            record(r#"{"nodes": [{"id": "A"}], "edges": []}"#),
            record(r#"{"nodes": [{"id": "B"}, {"id"#), // truncated mid-record
        ];

        let (store, report) = build_store(&records);
        assert_eq!(report.parsed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(store.node_count(), 1);
    }

    // ========================================================================
    // TEST 3: records without a response field are skipped
    // ========================================================================
    #[test]
    fn test_build_store_skips_missing_response() {
        let records = vec![serde_json::json!({"other": 1})];
        let (store, report) = build_store(&records);
        assert_eq!(report.skipped, 1);
        assert_eq!(store.node_count(), 0);
    }

    // ========================================================================
    // TEST 4: nodes and edges merge across records
    // ========================================================================
    #[test]
    fn test_build_store_merges_across_records() {
        let records = vec![
            record(r#"{"nodes": [{"id": "FBI", "type": "organization", "detailed_type": "federal agency"}],
                       "edges": [{"from": "FBI", "to": "TIKTOK", "label": "investigates"}]}"#),
            record(r#"{"nodes": [{"id": "FBI", "type": "agency", "detailed_type": "law enforcement"}],
                       "edges": [{"from": "FBI", "to": "TIKTOK", "label": "investigates"}]}"#),
        ];

        let (store, report) = build_store(&records);
        assert_eq!(report.parsed, 2);
        // FBI merged; TIKTOK auto-created by the edge
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 1);
        let fbi = store.node("FBI").unwrap();
        assert_eq!(fbi.group, "organization");
        assert!(fbi.description.contains("law enforcement"));
    }

    // ========================================================================
    // TEST 5: load_graph reads a file end to end
    // ========================================================================
    #[test]
    fn test_load_graph_from_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("argus-ingest-test-kg.json");
        let contents = serde_json::json!([
            { "response": r#"{"nodes": [{"id": "X", "type": "concept", "detailed_type": ""}],
                              "edges": [{"from": "X", "to": "Y", "label": "relates to"}]}"# }
        ]);
        std::fs::write(&path, serde_json::to_string(&contents).unwrap()).unwrap();

        let (store, report) = load_graph(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(report.parsed, 1);
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.edges()[0].label, "RELATES_TO");
    }

    // ========================================================================
    // TEST 6: missing file reports the path
    // ========================================================================
    #[test]
    fn test_load_graph_missing_file() {
        let err = load_graph("/nonexistent/kg.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/kg.json"));
    }
}
