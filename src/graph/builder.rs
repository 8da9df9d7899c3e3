use std::collections::{HashMap, HashSet};

use crate::core::pack::Pack;
use crate::graph::conflict::detect_conflicts;
use crate::graph::{
    node_id_for, AgentSummary, Conflict, DependencyGraph, EdgeKind, GraphEdge, GraphNode,
    GraphStats, PackIndex, Position,
};

/// Builds the full dependency graph for a pack catalogue: nodes, edges,
/// conflicts, stats. Total over adversarial input; cycles are reported via
/// conflicts, never rejected.
pub fn build_dependency_graph(packs: &[Pack]) -> DependencyGraph {
    let index = PackIndex::new(packs);

    let mut nodes: Vec<GraphNode> = packs.iter().map(node_for_pack).collect();

    let mut edges = Vec::new();
    for pack in packs {
        for dep in pack.required_deps() {
            if let Some(target) = index.resolve(&dep.pack_id) {
                edges.push(edge_between(pack, target, EdgeKind::Dependency));
            }
        }
        for dep in pack.optional_deps() {
            if let Some(target) = index.resolve(&dep.pack_id) {
                edges.push(edge_between(pack, target, EdgeKind::Optional));
            }
        }
    }

    let conflicts = detect_conflicts(packs);
    apply_conflicts(&conflicts, &index, &mut nodes, &mut edges);

    let stats = GraphStats {
        pack_count: packs.len(),
        agent_count: packs.iter().map(|pack| pack.agents.len()).sum(),
        dependency_count: edges.len(),
        conflict_count: conflicts.len(),
        max_depth: max_depth(&nodes, &edges),
    };

    DependencyGraph {
        nodes,
        edges,
        conflicts,
        stats,
    }
}

fn node_for_pack(pack: &Pack) -> GraphNode {
    GraphNode {
        id: node_id_for(&pack.slug),
        position: Position::default(),
        name: pack.name.clone(),
        slug: pack.slug.clone(),
        version: pack.version.clone(),
        status: pack.status,
        description: pack.description.clone(),
        agents: pack
            .agents
            .iter()
            .map(|agent| AgentSummary {
                id: agent.id.clone(),
                name: agent.name.clone(),
                status: agent.status,
            })
            .collect(),
        dependency_count: pack.dependency_count(),
        has_conflict: false,
        conflict_reason: None,
        highlighted: false,
        dimmed: false,
    }
}

fn edge_between(source: &Pack, target: &Pack, kind: EdgeKind) -> GraphEdge {
    let id = match kind {
        EdgeKind::Optional => format!("edge-{}-{}-optional", source.slug, target.slug),
        _ => format!("edge-{}-{}", source.slug, target.slug),
    };
    GraphEdge {
        id,
        source: node_id_for(&source.slug),
        target: node_id_for(&target.slug),
        kind,
        has_conflict: false,
        conflict_reason: None,
        highlighted: false,
        dimmed: false,
    }
}

/// Stamps each conflict onto its source node, and retags the matching edge
/// when the conflict names a target pack that an edge actually reaches.
fn apply_conflicts(
    conflicts: &[Conflict],
    index: &PackIndex,
    nodes: &mut [GraphNode],
    edges: &mut [GraphEdge],
) {
    for conflict in conflicts {
        let Some(source_id) = index.node_id(&conflict.source_pack) else {
            continue;
        };
        if let Some(node) = nodes.iter_mut().find(|node| node.id == source_id) {
            node.has_conflict = true;
            node.conflict_reason = Some(conflict.message.clone());
        }

        let Some(target_ref) = conflict.target_pack.as_deref() else {
            continue;
        };
        let Some(target_id) = index.node_id(target_ref) else {
            continue;
        };
        if let Some(edge) = edges
            .iter_mut()
            .find(|edge| edge.source == source_id && edge.target == target_id)
        {
            edge.kind = EdgeKind::Conflict;
            edge.has_conflict = true;
            edge.conflict_reason = Some(conflict.message.clone());
        }
    }
}

/// Longest path length from any in-degree-zero node. First-visit wins: the
/// shared visited set keeps traversal linear and terminates on cycles, at
/// the cost of under-reporting depth when a node is first reached via a
/// shorter path.
fn max_depth(nodes: &[GraphNode], edges: &[GraphEdge]) -> usize {
    let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut has_incoming: HashSet<&str> = HashSet::new();
    for edge in edges {
        outgoing
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
        has_incoming.insert(edge.target.as_str());
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut deepest = 0usize;
    for node in nodes {
        if has_incoming.contains(node.id.as_str()) {
            continue;
        }
        walk_depth(node.id.as_str(), 0, &outgoing, &mut visited, &mut deepest);
    }
    deepest
}

fn walk_depth<'a>(
    node: &'a str,
    depth: usize,
    outgoing: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    deepest: &mut usize,
) {
    if !visited.insert(node) {
        return;
    }
    if depth > *deepest {
        *deepest = depth;
    }
    if let Some(next) = outgoing.get(node) {
        for &target in next {
            walk_depth(target, depth + 1, outgoing, visited, deepest);
        }
    }
}
