use serde::{Deserialize, Serialize};

use crate::core::pack::LifecycleStatus;
use crate::graph::{Conflict, DependencyGraph, EdgeKind, GraphStats, Position};

/// Stable JSON shape for external tooling. No versioning guarantees beyond
/// field presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<NodeExport>,
    pub edges: Vec<EdgeExport>,
    pub conflicts: Vec<Conflict>,
    pub stats: GraphStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeExport {
    pub id: String,
    pub kind: String,
    pub position: Position,
    pub name: String,
    pub pack: String,
    pub version: String,
    pub status: LifecycleStatus,
    pub agent_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeExport {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub has_conflict: bool,
}

pub fn export_json(graph: &DependencyGraph) -> GraphExport {
    let nodes = graph
        .nodes
        .iter()
        .map(|node| NodeExport {
            id: node.id.clone(),
            kind: "pack".to_string(),
            position: node.position,
            name: node.name.clone(),
            pack: node.slug.clone(),
            version: node.version.clone(),
            status: node.status,
            agent_count: node.agents.len(),
        })
        .collect();
    let edges = graph
        .edges
        .iter()
        .map(|edge| EdgeExport {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            kind: edge.kind,
            has_conflict: edge.has_conflict,
        })
        .collect();

    GraphExport {
        nodes,
        edges,
        conflicts: graph.conflicts.clone(),
        stats: graph.stats,
    }
}

pub fn export_json_string(graph: &DependencyGraph) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&export_json(graph))
}

/// Graphviz DOT text: one node statement per pack (label is name plus
/// version, red when conflicted) and one edge statement per dependency
/// (dashed when optional, red when conflicted).
pub fn export_dot(graph: &DependencyGraph) -> String {
    let mut out = String::from("digraph packs {\n");
    for node in &graph.nodes {
        let label = escape_dot_label(&format!("{}\n{}", node.name, node.version));
        let color = if node.has_conflict { "red" } else { "black" };
        out.push_str(&format!(
            "  \"{}\" [label=\"{}\", color={}];\n",
            node.id, label, color
        ));
    }
    for edge in &graph.edges {
        let mut attrs: Vec<&str> = Vec::new();
        if edge.kind == EdgeKind::Optional {
            attrs.push("style=dashed");
        }
        if edge.has_conflict {
            attrs.push("color=red");
        }
        let attr_text = if attrs.is_empty() {
            String::new()
        } else {
            format!(" [{}]", attrs.join(", "))
        };
        out.push_str(&format!(
            "  \"{}\" -> \"{}\"{};\n",
            edge.source, edge.target, attr_text
        ));
    }
    out.push_str("}\n");
    out
}

fn escape_dot_label(label: &str) -> String {
    label.replace('"', "\\\"").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::core::pack::{LifecycleStatus, Pack, PackDependency};
    use crate::graph::builder::build_dependency_graph;
    use crate::graph::export::{export_dot, export_json, export_json_string, GraphExport};

    fn mk_pack(id: &str, slug: &str, version: &str, deps: Vec<PackDependency>) -> Pack {
        Pack {
            id: id.to_string(),
            name: slug.to_string(),
            slug: slug.to_string(),
            version: version.to_string(),
            status: LifecycleStatus::Active,
            description: None,
            agents: Vec::new(),
            dependencies: deps,
            optional_dependencies: Vec::new(),
        }
    }

    fn dep(target: &str, version: Option<&str>, required: bool) -> PackDependency {
        PackDependency {
            pack_id: target.to_string(),
            version: version.map(str::to_string),
            required,
        }
    }

    #[test]
    fn json_round_trip_preserves_counts() {
        let packs = vec![
            mk_pack("p1", "a", "1.0.0", Vec::new()),
            mk_pack("p2", "b", "1.0.0", vec![dep("p1", None, true)]),
        ];
        let graph = build_dependency_graph(&packs);

        let text = export_json_string(&graph).expect("serialize export");
        let parsed: GraphExport = serde_json::from_str(&text).expect("parse export");
        assert_eq!(parsed.nodes.len(), graph.stats.pack_count);
        assert_eq!(parsed.edges.len(), graph.stats.dependency_count);
        assert_eq!(parsed.stats, graph.stats);
    }

    #[test]
    fn json_nodes_carry_pack_metadata() {
        let graph = build_dependency_graph(&[mk_pack("p1", "core", "2.1.0", Vec::new())]);
        let export = export_json(&graph);
        assert_eq!(export.nodes[0].id, "pack-core");
        assert_eq!(export.nodes[0].kind, "pack");
        assert_eq!(export.nodes[0].pack, "core");
        assert_eq!(export.nodes[0].version, "2.1.0");
        assert_eq!(export.nodes[0].agent_count, 0);
    }

    #[test]
    fn dot_marks_conflicts_and_optional_edges() {
        let mut b = mk_pack("p2", "b", "1.0.0", vec![dep("p1", Some("^9.0.0"), true)]);
        b.optional_dependencies = vec![dep("p3", None, false)];
        let packs = vec![
            mk_pack("p1", "a", "1.0.0", Vec::new()),
            b,
            mk_pack("p3", "c", "1.0.0", Vec::new()),
        ];
        let graph = build_dependency_graph(&packs);
        let dot = export_dot(&graph);

        assert!(dot.starts_with("digraph packs {"));
        assert!(dot.contains("\"pack-a\" [label=\"a\\n1.0.0\", color=black];"));
        assert!(dot.contains("\"pack-b\" [label=\"b\\n1.0.0\", color=red];"));
        assert!(dot.contains("\"pack-b\" -> \"pack-a\" [color=red];"));
        assert!(dot.contains("\"pack-b\" -> \"pack-c\" [style=dashed];"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn dot_escapes_quotes_in_labels() {
        let mut pack = mk_pack("p1", "quoted", "1.0.0", Vec::new());
        pack.name = "say \"hi\"".to_string();
        let graph = build_dependency_graph(&[pack]);
        let dot = export_dot(&graph);
        assert!(dot.contains("say \\\"hi\\\""));
    }
}
