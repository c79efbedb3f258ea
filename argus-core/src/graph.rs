//! Pathway discovery over the in-memory knowledge graph
//!
//! Pure functions over a borrowed edge slice — callers own the graph, the
//! algorithms never mutate it and hold no state between calls. Two
//! operations are exposed because the dashboard needs both views:
//! - `shortest_path` — BFS, minimum hop count in an unweighted digraph
//! - `all_simple_paths` — DFS with backtracking, every cycle-free route
//!
//! A node id that appears in no edge is treated as having no outgoing
//! edges; lookups of unknown ids are not errors. Endpoint validation
//! (missing or identical endpoints) belongs to the calling layer.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Node identifier. The knowledge graph keys entities by their upper-cased
/// name (e.g. `"STARBUCKS"`), so ids are plain strings.
pub type NodeId = String;

/// A labeled directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub label: String,
}

impl GraphEdge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        }
    }
}

/// Directed adjacency list: from-id -> ordered list of to-ids.
fn adjacency(edges: &[GraphEdge]) -> HashMap<&str, Vec<&str>> {
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        adj.entry(edge.from.as_str()).or_default().push(edge.to.as_str());
    }
    adj
}

/// Shortest path from `start` to `end` by hop count (BFS).
///
/// Returns the node sequence including both endpoints, or an empty vec when
/// `end` is unreachable. `start == end` is a valid length-zero path and
/// returns `[start]`.
pub fn shortest_path(edges: &[GraphEdge], start: &str, end: &str) -> Vec<NodeId> {
    if start == end {
        return vec![start.to_string()];
    }

    let adj = adjacency(edges);
    let mut visited: HashSet<&str> = HashSet::new();
    let mut parent: HashMap<&str, &str> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let Some(neighbors) = adj.get(current) else {
            continue;
        };
        for &next in neighbors {
            if !visited.insert(next) {
                continue;
            }
            parent.insert(next, current);
            if next == end {
                // Walk the parent chain back to start
                let mut path = vec![end.to_string()];
                let mut node = end;
                while let Some(&prev) = parent.get(node) {
                    path.push(prev.to_string());
                    node = prev;
                }
                path.reverse();
                return path;
            }
            queue.push_back(next);
        }
    }

    Vec::new()
}

/// Every simple path from `start` to `end` (DFS with backtracking).
///
/// The visited set is scoped to the current path, so a node may appear on
/// different branches but never twice within one path. Enumeration is
/// exhaustive; there is no early exit on the first hit. Returns an empty
/// vec when no path exists.
pub fn all_simple_paths(edges: &[GraphEdge], start: &str, end: &str) -> Vec<Vec<NodeId>> {
    let adj = adjacency(edges);
    let mut results: Vec<Vec<NodeId>> = Vec::new();
    let mut path: Vec<&str> = vec![start];
    let mut on_path: HashSet<&str> = HashSet::new();
    on_path.insert(start);

    dfs_collect(&adj, start, end, &mut path, &mut on_path, &mut results);
    results
}

fn dfs_collect<'a>(
    adj: &HashMap<&'a str, Vec<&'a str>>,
    current: &str,
    end: &str,
    path: &mut Vec<&'a str>,
    on_path: &mut HashSet<&'a str>,
    results: &mut Vec<Vec<NodeId>>,
) {
    if current == end {
        results.push(path.iter().map(|n| n.to_string()).collect());
        return;
    }
    let Some(neighbors) = adj.get(current) else {
        return;
    };
    for &next in neighbors {
        if on_path.contains(next) {
            continue;
        }
        path.push(next);
        on_path.insert(next);
        dfs_collect(adj, next, end, path, on_path, results);
        path.pop();
        on_path.remove(next);
    }
}

/// Recover the relationship label of each hop along a node sequence.
///
/// Returns `None` if some consecutive pair is not an edge (the sequence is
/// not a valid path over `edges`). When parallel edges exist between a
/// pair, the first one wins.
pub fn labels_for_path(edges: &[GraphEdge], path: &[NodeId]) -> Option<Vec<String>> {
    let mut labels = Vec::with_capacity(path.len().saturating_sub(1));
    for pair in path.windows(2) {
        let label = edges
            .iter()
            .find(|e| e.from == pair[0] && e.to == pair[1])
            .map(|e| e.label.clone())?;
        labels.push(label);
    }
    Some(labels)
}

/// Check the path-validity invariant: every consecutive pair is an edge.
pub fn is_valid_path(edges: &[GraphEdge], path: &[NodeId]) -> bool {
    path.windows(2)
        .all(|pair| edges.iter().any(|e| e.from == pair[0] && e.to == pair[1]))
}

// ============================================================================
// TESTS
// ============================================================================
