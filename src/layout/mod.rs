use std::collections::{HashMap, HashSet, VecDeque};

use crate::graph::{GraphEdge, GraphNode, Position};

pub mod dagre;
pub mod force;
pub mod radial;
pub mod tree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Dagre,
    Tree,
    Radial,
    Force,
}

pub fn parse_layout_kind(input: &str) -> Option<LayoutKind> {
    match input.to_ascii_lowercase().as_str() {
        "dagre" | "hierarchical" => Some(LayoutKind::Dagre),
        "tree" => Some(LayoutKind::Tree),
        "radial" => Some(LayoutKind::Radial),
        "force" => Some(LayoutKind::Force),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TopToBottom,
    LeftToRight,
}

pub fn parse_direction(input: &str) -> Option<Direction> {
    match input.to_ascii_lowercase().as_str() {
        "tb" | "down" | "vertical" => Some(Direction::TopToBottom),
        "lr" | "right" | "horizontal" => Some(Direction::LeftToRight),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    pub node_width: f64,
    pub node_height: f64,
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub direction: Direction,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            node_width: 220.0,
            node_height: 120.0,
            spacing_x: 80.0,
            spacing_y: 120.0,
            direction: Direction::TopToBottom,
        }
    }
}

/// Returns positioned copies of the input nodes; never mutates them. Every
/// input node appears exactly once in the output, in input order, with a
/// finite position, for all four kinds and any (cyclic, disconnected,
/// empty) input.
pub fn layout_graph(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    kind: LayoutKind,
    options: &LayoutOptions,
) -> Vec<GraphNode> {
    match kind {
        LayoutKind::Dagre => dagre::layout(nodes, edges, options),
        LayoutKind::Tree => tree::layout(nodes, edges, options),
        LayoutKind::Radial => radial::layout(nodes, edges, options),
        LayoutKind::Force => force::layout(nodes, edges, options),
    }
}

pub(crate) fn positioned(
    nodes: &[GraphNode],
    positions: &HashMap<&str, Position>,
) -> Vec<GraphNode> {
    nodes
        .iter()
        .map(|node| {
            let mut node = node.clone();
            node.position = positions
                .get(node.id.as_str())
                .copied()
                .unwrap_or_default();
            node
        })
        .collect()
}

/// Level assignment shared by the hierarchical and radial layouts.
///
/// Roots are nodes with zero outgoing edges: an edge points from a
/// dependent to its dependency, so the most-depended-upon packs sit at
/// level 0. Falls back to zero-incoming nodes, then to every node. BFS
/// expands to dependents, keeping the deepest level required so a node
/// never lands above one of its dependencies.
pub(crate) fn assign_levels<'a>(
    nodes: &'a [GraphNode],
    edges: &'a [GraphEdge],
) -> HashMap<&'a str, usize> {
    let mut outgoing: HashSet<&str> = HashSet::new();
    let mut incoming: HashSet<&str> = HashSet::new();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        outgoing.insert(edge.source.as_str());
        incoming.insert(edge.target.as_str());
        dependents
            .entry(edge.target.as_str())
            .or_default()
            .push(edge.source.as_str());
    }

    let mut roots: Vec<&str> = nodes
        .iter()
        .map(|node| node.id.as_str())
        .filter(|id| !outgoing.contains(id))
        .collect();
    if roots.is_empty() {
        roots = nodes
            .iter()
            .map(|node| node.id.as_str())
            .filter(|id| !incoming.contains(id))
            .collect();
    }
    if roots.is_empty() {
        roots = nodes.iter().map(|node| node.id.as_str()).collect();
    }

    let max_level = nodes.len().saturating_sub(1);
    let mut levels: HashMap<&str, usize> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    for root in roots {
        levels.insert(root, 0);
        queue.push_back(root);
    }
    while let Some(current) = queue.pop_front() {
        let next_level = levels.get(current).copied().unwrap_or(0) + 1;
        // A simple path cannot exceed the node count, so the cap keeps
        // cyclic graphs from relaxing levels forever.
        if next_level > max_level {
            continue;
        }
        if let Some(deps) = dependents.get(current) {
            for &dependent in deps {
                let shallower = levels
                    .get(dependent)
                    .map_or(true, |&level| level < next_level);
                if shallower {
                    levels.insert(dependent, next_level);
                    queue.push_back(dependent);
                }
            }
        }
    }

    // Nodes unreachable from any root (cyclic islands) still need a level.
    for node in nodes {
        levels.entry(node.id.as_str()).or_insert(0);
    }
    levels
}

/// Groups node ids by level, ordered by level, preserving input order
/// within a level.
pub(crate) fn group_by_level<'a>(
    nodes: &'a [GraphNode],
    levels: &HashMap<&'a str, usize>,
) -> Vec<(usize, Vec<&'a str>)> {
    let mut grouped: std::collections::BTreeMap<usize, Vec<&str>> =
        std::collections::BTreeMap::new();
    for node in nodes {
        let level = levels.get(node.id.as_str()).copied().unwrap_or(0);
        grouped.entry(level).or_default().push(node.id.as_str());
    }
    grouped.into_iter().collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;

    use crate::core::pack::{LifecycleStatus, Pack, PackDependency};
    use crate::graph::builder::build_dependency_graph;
    use crate::layout::{
        assign_levels, layout_graph, parse_direction, parse_layout_kind, Direction, LayoutKind,
        LayoutOptions,
    };

    pub(crate) fn mk_pack(id: &str, slug: &str, deps: Vec<&str>) -> Pack {
        Pack {
            id: id.to_string(),
            name: slug.to_string(),
            slug: slug.to_string(),
            version: "1.0.0".to_string(),
            status: LifecycleStatus::Active,
            description: None,
            agents: Vec::new(),
            dependencies: deps
                .into_iter()
                .map(|target| PackDependency {
                    pack_id: target.to_string(),
                    version: None,
                    required: true,
                })
                .collect(),
            optional_dependencies: Vec::new(),
        }
    }

    #[test]
    fn parser_helpers_accept_expected_values() {
        assert_eq!(parse_layout_kind("DAGRE"), Some(LayoutKind::Dagre));
        assert_eq!(parse_layout_kind("force"), Some(LayoutKind::Force));
        assert_eq!(parse_layout_kind("spiral"), None);
        assert_eq!(parse_direction("lr"), Some(Direction::LeftToRight));
        assert_eq!(parse_direction("down"), Some(Direction::TopToBottom));
        assert_eq!(parse_direction("up"), None);
    }

    #[test]
    fn levels_put_most_depended_upon_packs_at_zero() {
        // c -> b -> a: a has no outgoing edges, so it roots the hierarchy.
        let graph = build_dependency_graph(&[
            mk_pack("p1", "a", vec![]),
            mk_pack("p2", "b", vec!["p1"]),
            mk_pack("p3", "c", vec!["p2"]),
        ]);
        let levels = assign_levels(&graph.nodes, &graph.edges);
        assert_eq!(levels["pack-a"], 0);
        assert_eq!(levels["pack-b"], 1);
        assert_eq!(levels["pack-c"], 2);
    }

    #[test]
    fn multi_parent_node_takes_the_deepest_level() {
        // d depends on a directly and through b; it must sit below b.
        let graph = build_dependency_graph(&[
            mk_pack("p1", "a", vec![]),
            mk_pack("p2", "b", vec!["p1"]),
            mk_pack("p3", "d", vec!["p1", "p2"]),
        ]);
        let levels = assign_levels(&graph.nodes, &graph.edges);
        assert_eq!(levels["pack-a"], 0);
        assert_eq!(levels["pack-b"], 1);
        assert_eq!(levels["pack-d"], 2);
    }

    #[test]
    fn cyclic_graph_levels_terminate() {
        let graph = build_dependency_graph(&[
            mk_pack("p1", "a", vec!["p2"]),
            mk_pack("p2", "b", vec!["p1"]),
        ]);
        let levels = assign_levels(&graph.nodes, &graph.edges);
        assert_eq!(levels.len(), 2);
        assert!(levels.values().all(|&level| level < 2));
    }

    #[test]
    fn every_layout_positions_every_node_finitely() {
        let graph = build_dependency_graph(&[
            mk_pack("p1", "a", vec![]),
            mk_pack("p2", "b", vec!["p1"]),
            mk_pack("p3", "c", vec!["p1"]),
            mk_pack("p4", "isolated", vec![]),
            mk_pack("p5", "x", vec!["p6"]),
            mk_pack("p6", "y", vec!["p5"]),
        ]);
        let options = LayoutOptions::default();

        for kind in [
            LayoutKind::Dagre,
            LayoutKind::Tree,
            LayoutKind::Radial,
            LayoutKind::Force,
        ] {
            let placed = layout_graph(&graph.nodes, &graph.edges, kind, &options);
            assert_eq!(placed.len(), graph.nodes.len());
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for node in &placed {
                *counts.entry(node.id.as_str()).or_insert(0) += 1;
                assert!(node.position.x.is_finite(), "{kind:?} x finite");
                assert!(node.position.y.is_finite(), "{kind:?} y finite");
            }
            assert!(counts.values().all(|&count| count == 1), "{kind:?} unique");
        }
    }

    #[test]
    fn layouts_handle_empty_input() {
        let options = LayoutOptions::default();
        for kind in [
            LayoutKind::Dagre,
            LayoutKind::Tree,
            LayoutKind::Radial,
            LayoutKind::Force,
        ] {
            assert!(layout_graph(&[], &[], kind, &options).is_empty());
        }
    }
}
