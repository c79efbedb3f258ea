//! Node explorer: bounded subgraph retrieval
//!
//! Wraps `GraphStore::subgraph` and shapes the result for the dashboard:
//! title-cased labels, sanitized descriptions, group colors, and edges in
//! the `EdgeRecord` wire shape with both endpoints inlined.

use argus_core::display::{group_color, humanize_label, sanitize_description, to_title_case, GroupColor};
use argus_core::models::EdgeRecord;
use argus_core::store::{GraphStore, StoredNode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeView {
    pub label: String,
    pub group: String,
    pub description: String,
    pub color: GroupColor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubgraphView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeRecord>,
}

fn node_view(node: &StoredNode) -> NodeView {
    NodeView {
        label: to_title_case(&node.label),
        group: node.group.clone(),
        description: sanitize_description(&node.description),
        color: group_color(&node.group),
    }
}

/// Retrieve the neighborhood around `start`. The requested depth is
/// clamped to `max_depth`; depth 0 is the node plus direct neighbors.
pub fn explore(store: &GraphStore, start: &str, depth: u32, max_depth: u32) -> SubgraphView {
    let depth = depth.min(max_depth);
    let sub = store.subgraph(start, depth);

    let edges = sub
        .edges
        .iter()
        .filter_map(|edge| {
            let from = sub.nodes.iter().find(|n| n.id == edge.from)?;
            let to = sub.nodes.iter().find(|n| n.id == edge.to)?;
            Some(EdgeRecord {
                from_label: to_title_case(&from.label),
                from_group: from.group.clone(),
                from_description: sanitize_description(&from.description),
                to_label: to_title_case(&to.label),
                to_group: to.group.clone(),
                to_description: sanitize_description(&to.description),
                label: humanize_label(&edge.label),
                relationship_description: String::new(),
            })
        })
        .collect();

    SubgraphView {
        nodes: sub.nodes.iter().map(node_view).collect(),
        edges,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> GraphStore {
        let mut store = GraphStore::new();
        store.insert_node("TIKTOK", "organization", "Short-video platform<SEP>Owned by ByteDance");
        store.insert_node("BYTEDANCE", "organization", "Tech company");
        store.insert_edge("BYTEDANCE", "TIKTOK", "owns");
        store.insert_edge("TIKTOK", "USER DATA", "collects");
        store
    }

    // ========================================================================
    // TEST 1: explore shapes nodes for display
    // ========================================================================
    #[test]
    fn test_explore_node_shaping() {
        let store = sample_store();
        let view = explore(&store, "TIKTOK", 0, 3);

        let tiktok = view.nodes.iter().find(|n| n.label == "Tiktok").unwrap();
        assert_eq!(tiktok.group, "organization");
        assert_eq!(
            tiktok.description,
            "Short-video platform. Owned by ByteDance."
        );
        assert!(tiktok.color.border.starts_with("hsl("));
    }

    // ========================================================================
    // TEST 2: edges carry both endpoints and a humanized label
    // ========================================================================
    #[test]
    fn test_explore_edge_records() {
        let store = sample_store();
        let view = explore(&store, "TIKTOK", 0, 3);

        assert_eq!(view.edges.len(), 2);
        let owns = view.edges.iter().find(|e| e.label == "Owns").unwrap();
        assert_eq!(owns.from_label, "Bytedance");
        assert_eq!(owns.to_label, "Tiktok");
    }

    // ========================================================================
    // TEST 3: requested depth is clamped to the configured maximum
    // ========================================================================
    #[test]
    fn test_explore_depth_clamped() {
        let mut store = GraphStore::new();
        store.insert_edge("A", "B", "r1");
        store.insert_edge("B", "C", "r2");
        store.insert_edge("C", "D", "r3");

        let clamped = explore(&store, "A", 10, 0);
        assert_eq!(clamped.nodes.len(), 2); // depth 0: A and B only
    }

    // ========================================================================
    // TEST 4: unknown start node yields an empty view
    // ========================================================================
    #[test]
    fn test_explore_unknown_node() {
        let store = sample_store();
        let view = explore(&store, "NOBODY", 1, 3);
        assert!(view.nodes.is_empty());
        assert!(view.edges.is_empty());
    }
}
