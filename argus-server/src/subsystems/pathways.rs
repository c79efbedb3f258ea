//! Pathway discovery between two analyst-selected nodes
//!
//! Enumerates every simple path through the knowledge graph, attaches the
//! relationship label to each hop, and returns them shortest first so the
//! first pathway is always the BFS-minimal route. The result set is
//! capped; the dashboard renders at most a handful of pathways.

use argus_core::graph;
use argus_core::store::GraphStore;
use serde::{Deserialize, Serialize};

/// One discovered pathway in the dashboard's wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pathway {
    pub path_nodes: Vec<String>,
    pub path_labels: Vec<String>,
}

/// Node endpoints arrive from free-text form fields; the graph keys
/// entities by upper-cased name.
pub fn normalize_endpoint(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// All simple pathways from `from` to `to`, shortest first, at most
/// `max_paths` of them. Unknown endpoints yield an empty set.
pub fn find_pathways(store: &GraphStore, from: &str, to: &str, max_paths: usize) -> Vec<Pathway> {
    let mut node_paths = store.all_simple_paths(from, to);
    node_paths.sort_by_key(|p| p.len());
    node_paths.truncate(max_paths);

    node_paths
        .into_iter()
        .filter_map(|nodes| {
            let labels = graph::labels_for_path(store.edges(), &nodes)?;
            Some(Pathway {
                path_nodes: nodes,
                path_labels: labels,
            })
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_store() -> GraphStore {
        let mut store = GraphStore::new();
        store.insert_edge("1", "8", "includes");
        store.insert_edge("8", "9", "prevents");
        store.insert_edge("8", "11", "developed by");
        store.insert_edge("11", "10", "employs");
        store.insert_edge("10", "9", "investigates");
        store
    }

    // ========================================================================
    // TEST 1: both pathways found, shortest first, labels attached
    // ========================================================================
    #[test]
    fn test_find_pathways_ordering_and_labels() {
        let store = demo_store();
        let pathways = find_pathways(&store, "1", "9", 5);

        assert_eq!(pathways.len(), 2);
        assert_eq!(pathways[0].path_nodes, vec!["1", "8", "9"]);
        assert_eq!(pathways[0].path_labels, vec!["INCLUDES", "PREVENTS"]);
        assert_eq!(pathways[1].path_nodes, vec!["1", "8", "11", "10", "9"]);
        assert_eq!(
            pathways[1].path_labels,
            vec!["INCLUDES", "DEVELOPED_BY", "EMPLOYS", "INVESTIGATES"]
        );
    }

    // ========================================================================
    // TEST 2: the cap bounds the result set
    // ========================================================================
    #[test]
    fn test_find_pathways_cap() {
        let store = demo_store();
        let pathways = find_pathways(&store, "1", "9", 1);
        assert_eq!(pathways.len(), 1);
        assert_eq!(pathways[0].path_nodes, vec!["1", "8", "9"]);
    }

    // ========================================================================
    // TEST 3: unreachable or unknown endpoints yield an empty set
    // ========================================================================
    #[test]
    fn test_find_pathways_empty_cases() {
        let store = demo_store();
        assert!(find_pathways(&store, "9", "1", 5).is_empty());
        assert!(find_pathways(&store, "GHOST", "9", 5).is_empty());
    }

    // ========================================================================
    // TEST 4: endpoint normalization matches the form input handling
    // ========================================================================
    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(normalize_endpoint("  tiktok "), "TIKTOK");
        assert_eq!(normalize_endpoint("ByteDance"), "BYTEDANCE");
    }
}
