use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::graph::{GraphEdge, GraphNode, Position};
use crate::layout::{assign_levels, group_by_level, positioned, LayoutOptions};

/// Concentric placement: level 0 at the center, each further level on a
/// ring whose radius grows by a fixed increment, nodes spread at equal
/// angles starting from the top.
pub fn layout(nodes: &[GraphNode], edges: &[GraphEdge], options: &LayoutOptions) -> Vec<GraphNode> {
    let levels = assign_levels(nodes, edges);
    let radius_step = options.node_width + options.spacing_x;
    let mut positions: HashMap<&str, Position> = HashMap::new();

    for (level, ring) in group_by_level(nodes, &levels) {
        let radius = level as f64 * radius_step;
        let count = ring.len() as f64;
        for (index, id) in ring.into_iter().enumerate() {
            let angle = TAU * index as f64 / count - FRAC_PI_2;
            positions.insert(
                id,
                Position {
                    x: radius * angle.cos(),
                    y: radius * angle.sin(),
                },
            );
        }
    }

    positioned(nodes, &positions)
}
