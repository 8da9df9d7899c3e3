use std::collections::{HashMap, HashSet, VecDeque};

use crate::graph::{GraphEdge, GraphNode};

/// Result of a connectivity highlight: node/edge copies flagged as
/// highlighted or dimmed, plus the raw reachable id sets.
#[derive(Debug, Clone)]
pub struct HighlightedGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub node_ids: HashSet<String>,
    pub edge_ids: HashSet<String>,
}

/// Breadth-first traversal from `node_id`, treating edges as undirected.
/// Everything reachable is highlighted, everything else dimmed. Input is
/// never mutated.
pub fn highlight_path(node_id: &str, nodes: &[GraphNode], edges: &[GraphEdge]) -> HighlightedGraph {
    let mut adjacency: HashMap<&str, Vec<(&str, &str)>> = HashMap::new();
    for edge in edges {
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .push((edge.target.as_str(), edge.id.as_str()));
        adjacency
            .entry(edge.target.as_str())
            .or_default()
            .push((edge.source.as_str(), edge.id.as_str()));
    }

    let mut reachable: HashSet<&str> = HashSet::new();
    let mut reachable_edges: HashSet<&str> = HashSet::new();
    if nodes.iter().any(|node| node.id == node_id) {
        reachable.insert(node_id);
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(node_id);
        while let Some(current) = queue.pop_front() {
            if let Some(neighbors) = adjacency.get(current) {
                for &(next, edge_id) in neighbors {
                    reachable_edges.insert(edge_id);
                    if reachable.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
    }

    let nodes = nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            node.highlighted = reachable.contains(node.id.as_str());
            node.dimmed = !node.highlighted;
            node
        })
        .collect();
    let edges = edges
        .iter()
        .map(|edge| {
            let mut edge = edge.clone();
            edge.highlighted = reachable_edges.contains(edge.id.as_str());
            edge.dimmed = !edge.highlighted;
            edge
        })
        .collect();

    HighlightedGraph {
        nodes,
        edges,
        node_ids: reachable.into_iter().map(str::to_string).collect(),
        edge_ids: reachable_edges.into_iter().map(str::to_string).collect(),
    }
}

/// Case-insensitive substring search over name, slug, description, and
/// version. A blank query matches nothing.
pub fn search_nodes(nodes: &[GraphNode], query: &str) -> Vec<GraphNode> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    nodes
        .iter()
        .filter(|node| {
            node.name.to_lowercase().contains(&needle)
                || node.slug.to_lowercase().contains(&needle)
                || node.version.to_lowercase().contains(&needle)
                || node
                    .description
                    .as_ref()
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// An empty filter means no filter: every node is returned.
pub fn filter_by_pack(nodes: &[GraphNode], pack_slugs: &[String]) -> Vec<GraphNode> {
    if pack_slugs.is_empty() {
        return nodes.to_vec();
    }
    nodes
        .iter()
        .filter(|node| pack_slugs.iter().any(|slug| *slug == node.slug))
        .cloned()
        .collect()
}

/// Keeps only edges whose source and target are both visible.
pub fn filter_edges(edges: &[GraphEdge], visible_node_ids: &HashSet<String>) -> Vec<GraphEdge> {
    edges
        .iter()
        .filter(|edge| {
            visible_node_ids.contains(&edge.source) && visible_node_ids.contains(&edge.target)
        })
        .cloned()
        .collect()
}
