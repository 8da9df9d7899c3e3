use packgraph::core::pack::{LifecycleStatus, Pack, PackDependency};
use packgraph::graph::builder::build_dependency_graph;
use packgraph::graph::export::{export_dot, export_json_string, GraphExport};
use packgraph::graph::query::highlight_path;
use packgraph::layout::{layout_graph, LayoutKind, LayoutOptions};

fn mk_pack(id: &str, slug: &str, deps: Vec<&str>) -> Pack {
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

fn sample_catalog() -> Vec<Pack> {
    vec![
        mk_pack("p1", "core", vec![]),
        mk_pack("p2", "api", vec!["p1"]),
        mk_pack("p3", "web", vec!["p2", "p1"]),
        mk_pack("p4", "island-a", vec!["p5"]),
        mk_pack("p5", "island-b", vec![]),
    ]
}

#[test]
fn all_layouts_position_a_full_pipeline_graph() {
    let graph = build_dependency_graph(&sample_catalog());
    let options = LayoutOptions::default();

    for kind in [
        LayoutKind::Dagre,
        LayoutKind::Tree,
        LayoutKind::Radial,
        LayoutKind::Force,
    ] {
        let placed = layout_graph(&graph.nodes, &graph.edges, kind, &options);
        assert_eq!(placed.len(), graph.nodes.len(), "{kind:?}");
        for node in &placed {
            assert!(node.position.x.is_finite(), "{kind:?} {}", node.id);
            assert!(node.position.y.is_finite(), "{kind:?} {}", node.id);
        }
        // Layout must not disturb the build result itself.
        assert!(graph.nodes.iter().all(|n| n.position.x == 0.0));
    }
}

#[test]
fn highlight_splits_the_two_components() {
    let graph = build_dependency_graph(&sample_catalog());
    let highlighted = highlight_path("pack-core", &graph.nodes, &graph.edges);

    for node in &highlighted.nodes {
        let in_pipeline = matches!(node.slug.as_str(), "core" | "api" | "web");
        assert_eq!(node.highlighted, in_pipeline, "{}", node.slug);
        assert_eq!(node.dimmed, !in_pipeline, "{}", node.slug);
    }
    assert_eq!(highlighted.node_ids.len(), 3);
    assert_eq!(highlighted.edge_ids.len(), 3);
}

#[test]
fn json_export_round_trips_counts() {
    let graph = build_dependency_graph(&sample_catalog());
    let text = export_json_string(&graph).expect("serialize graph");
    let parsed: GraphExport = serde_json::from_str(&text).expect("parse graph export");

    assert_eq!(parsed.nodes.len(), graph.stats.pack_count);
    assert_eq!(parsed.edges.len(), graph.stats.dependency_count);
    assert_eq!(parsed.conflicts.len(), graph.stats.conflict_count);
}

#[test]
fn dot_export_names_every_node_and_edge() {
    let graph = build_dependency_graph(&sample_catalog());
    let dot = export_dot(&graph);

    for node in &graph.nodes {
        assert!(dot.contains(&format!("\"{}\"", node.id)), "{}", node.id);
    }
    assert_eq!(dot.matches(" -> ").count(), graph.edges.len());
}
