//! In-memory knowledge-graph store
//!
//! Built once at startup from ingested extraction output and shared
//! immutably afterwards. Node and relationship inserts follow MERGE
//! semantics: duplicate node ids fold into one record, duplicate
//! (from, to, label) triples are dropped.

use crate::graph::{self, GraphEdge, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Separator used between merged description fragments. Display layers
/// collapse it via `display::sanitize_description`.
pub const DESCRIPTION_SEP: &str = "<SEP>";

/// A stored entity. `group` is the entity type from extraction
/// (e.g. `"organization"`), `description` accumulates across merges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredNode {
    pub id: NodeId,
    pub label: String,
    pub group: String,
    pub description: String,
}

#[derive(Debug, Default)]
pub struct GraphStore {
    nodes: HashMap<NodeId, StoredNode>,
    edges: Vec<GraphEdge>,
    edge_keys: HashSet<(NodeId, NodeId, String)>,
}

/// A bounded neighborhood around a start node. Edges keep their original
/// orientation even though traversal treats the graph as undirected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subgraph {
    pub nodes: Vec<StoredNode>,
    pub edges: Vec<GraphEdge>,
}

/// Relationship labels are normalized the way the graph loader writes
/// them: spaces become underscores, upper-cased.
pub fn normalize_label(label: &str) -> String {
    label.trim().replace(' ', "_").to_uppercase()
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a node into the store. The first label and group win;
    /// new descriptions are appended.
    pub fn insert_node(&mut self, id: impl Into<NodeId>, group: &str, description: &str) {
        let id = id.into();
        match self.nodes.get_mut(&id) {
            Some(existing) => {
                if !description.is_empty() && !existing.description.contains(description) {
                    if existing.description.is_empty() {
                        existing.description = description.to_string();
                    } else {
                        existing.description =
                            format!("{}{}{}", existing.description, DESCRIPTION_SEP, description);
                    }
                }
            }
            None => {
                self.nodes.insert(
                    id.clone(),
                    StoredNode {
                        label: id.clone(),
                        id,
                        group: group.trim_matches('"').to_string(),
                        description: description.to_string(),
                    },
                );
            }
        }
    }

    /// Merge a directed relationship. Endpoints missing from the node set
    /// are created as bare nodes so the edge is never dangling.
    pub fn insert_edge(&mut self, from: impl Into<NodeId>, to: impl Into<NodeId>, label: &str) {
        let from = from.into();
        let to = to.into();
        let label = normalize_label(label);

        if !self.nodes.contains_key(&from) {
            self.insert_node(from.clone(), "", "");
        }
        if !self.nodes.contains_key(&to) {
            self.insert_node(to.clone(), "", "");
        }

        let key = (from.clone(), to.clone(), label.clone());
        if self.edge_keys.insert(key) {
            self.edges.push(GraphEdge { from, to, label });
        }
    }

    pub fn node(&self, id: &str) -> Option<&StoredNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Outgoing neighbors of a node, with the relationship label.
    pub fn neighbors(&self, id: &str) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .filter(|e| e.from == id)
            .map(|e| (e.to.as_str(), e.label.as_str()))
            .collect()
    }

    /// Number of edges touching a node in either direction. Used as the
    /// mention count for analysis entities.
    pub fn degree(&self, id: &str) -> usize {
        self.edges.iter().filter(|e| e.from == id || e.to == id).count()
    }

    pub fn shortest_path(&self, start: &str, end: &str) -> Vec<NodeId> {
        graph::shortest_path(&self.edges, start, end)
    }

    pub fn all_simple_paths(&self, start: &str, end: &str) -> Vec<Vec<NodeId>> {
        graph::all_simple_paths(&self.edges, start, end)
    }

    /// Neighborhood around `start`, following edges in both directions.
    /// Depth 0 returns the node and its direct neighbors; each extra depth
    /// level expands one hop further. Unknown start ids yield an empty
    /// subgraph.
    pub fn subgraph(&self, start: &str, depth: u32) -> Subgraph {
        if !self.nodes.contains_key(start) {
            return Subgraph {
                nodes: Vec::new(),
                edges: Vec::new(),
            };
        }

        let max_hops = depth as usize + 1;
        let mut undirected: HashMap<&str, Vec<&str>> = HashMap::new();
        for e in &self.edges {
            undirected.entry(e.from.as_str()).or_default().push(e.to.as_str());
            undirected.entry(e.to.as_str()).or_default().push(e.from.as_str());
        }

        let mut reached: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
        reached.insert(start);
        queue.push_back((start, 0));

        while let Some((current, hops)) = queue.pop_front() {
            if hops == max_hops {
                continue;
            }
            if let Some(neighbors) = undirected.get(current) {
                for &next in neighbors {
                    if reached.insert(next) {
                        queue.push_back((next, hops + 1));
                    }
                }
            }
        }

        let mut nodes: Vec<StoredNode> = reached
            .iter()
            .filter_map(|id| self.nodes.get(*id).cloned())
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let edges: Vec<GraphEdge> = self
            .edges
            .iter()
            .filter(|e| reached.contains(e.from.as_str()) && reached.contains(e.to.as_str()))
            .cloned()
            .collect();

        Subgraph { nodes, edges }
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
        store.insert_node("TIKTOK", "organization", "Short-video platform.");
        store.insert_node("BYTEDANCE", "organization", "Parent company.");
        store.insert_node("FBI", "organization", "Federal agency.");
        store.insert_edge("BYTEDANCE", "TIKTOK", "owns");
        store.insert_edge("FBI", "TIKTOK", "investigates");
        store
    }

    // ========================================================================
    // TEST 1: node merge keeps first group and appends descriptions
    // ========================================================================
    #[test]
    fn test_node_merge_semantics() {
        let mut store = GraphStore::new();
        store.insert_node("TIKTOK", "organization", "First sighting.");
        store.insert_node("TIKTOK", "company", "Second sighting.");

        assert_eq!(store.node_count(), 1);
        let node = store.node("TIKTOK").unwrap();
        assert_eq!(node.group, "organization");
        assert!(node.description.contains("First sighting."));
        assert!(node.description.contains("Second sighting."));
        assert!(node.description.contains(DESCRIPTION_SEP));
    }

    // ========================================================================
    // TEST 2: duplicate description fragments are not appended twice
    // ========================================================================
    #[test]
    fn test_node_merge_dedups_description() {
        let mut store = GraphStore::new();
        store.insert_node("FBI", "organization", "Federal agency.");
        store.insert_node("FBI", "organization", "Federal agency.");
        assert_eq!(store.node("FBI").unwrap().description, "Federal agency.");
    }

    // ========================================================================
    // TEST 3: edge dedup by (from, to, label) after normalization
    // ========================================================================
    #[test]
    fn test_edge_dedup_and_normalization() {
        let mut store = GraphStore::new();
        store.insert_edge("A", "B", "developed by");
        store.insert_edge("A", "B", "DEVELOPED_BY");
        store.insert_edge("A", "B", "funds");

        assert_eq!(store.edge_count(), 2);
        assert_eq!(store.edges()[0].label, "DEVELOPED_BY");
    }

    // ========================================================================
    // TEST 4: inserting an edge creates missing endpoint nodes
    // ========================================================================
    #[test]
    fn test_edge_creates_endpoints() {
        let mut store = GraphStore::new();
        store.insert_edge("X", "Y", "links");
        assert!(store.contains("X"));
        assert!(store.contains("Y"));
        assert_eq!(store.node_count(), 2);
    }

    // ========================================================================
    // TEST 5: subgraph depth 0 is the node plus direct neighbors
    // ========================================================================
    #[test]
    fn test_subgraph_depth_zero() {
        let store = sample_store();
        let sub = store.subgraph("TIKTOK", 0);

        let ids: Vec<&str> = sub.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["BYTEDANCE", "FBI", "TIKTOK"]);
        assert_eq!(sub.edges.len(), 2);
    }

    // ========================================================================
    // TEST 6: subgraph of an unknown node is empty
    // ========================================================================
    #[test]
    fn test_subgraph_unknown_node_empty() {
        let store = sample_store();
        let sub = store.subgraph("NOBODY", 2);
        assert!(sub.nodes.is_empty());
        assert!(sub.edges.is_empty());
    }

    // ========================================================================
    // TEST 7: subgraph depth expands hop by hop
    // ========================================================================
    #[test]
    fn test_subgraph_depth_expansion() {
        let mut store = GraphStore::new();
        store.insert_edge("A", "B", "r1");
        store.insert_edge("B", "C", "r2");
        store.insert_edge("C", "D", "r3");

        let depth0 = store.subgraph("A", 0);
        assert_eq!(depth0.nodes.len(), 2); // A, B

        let depth1 = store.subgraph("A", 1);
        assert_eq!(depth1.nodes.len(), 3); // A, B, C

        let depth2 = store.subgraph("A", 2);
        assert_eq!(depth2.nodes.len(), 4);
    }

    // ========================================================================
    // TEST 8: degree counts edges in both directions
    // ========================================================================
    #[test]
    fn test_degree_counts_both_directions() {
        let store = sample_store();
        assert_eq!(store.degree("TIKTOK"), 2);
        assert_eq!(store.degree("BYTEDANCE"), 1);
        assert_eq!(store.degree("NOBODY"), 0);
    }

    // ========================================================================
    // TEST 9: pathfinding delegates over the stored edge set
    // ========================================================================
    #[test]
    fn test_store_pathfinding() {
        let mut store = GraphStore::new();
        store.insert_edge("1", "8", "includes");
        store.insert_edge("8", "9", "prevents");
        assert_eq!(store.shortest_path("1", "9"), vec!["1", "8", "9"]);
        assert!(store.all_simple_paths("9", "1").is_empty());
    }
}
