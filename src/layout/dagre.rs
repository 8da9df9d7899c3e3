use std::collections::HashMap;

use crate::graph::{GraphEdge, GraphNode, Position};
use crate::layout::{assign_levels, group_by_level, positioned, Direction, LayoutOptions};

/// Level-based hierarchical placement. Dependencies sit at shallower
/// levels than their dependents; nodes within a level are centered with
/// uniform spacing. Direction swaps which axis encodes level.
pub fn layout(nodes: &[GraphNode], edges: &[GraphEdge], options: &LayoutOptions) -> Vec<GraphNode> {
    let levels = assign_levels(nodes, edges);
    let mut positions: HashMap<&str, Position> = HashMap::new();

    for (level, row) in group_by_level(nodes, &levels) {
        let count = row.len() as f64;
        for (index, id) in row.into_iter().enumerate() {
            let offset = index as f64 - (count - 1.0) / 2.0;
            let position = match options.direction {
                Direction::TopToBottom => Position {
                    x: offset * (options.node_width + options.spacing_x),
                    y: level as f64 * (options.node_height + options.spacing_y),
                },
                Direction::LeftToRight => Position {
                    x: level as f64 * (options.node_width + options.spacing_x),
                    y: offset * (options.node_height + options.spacing_y),
                },
            };
            positions.insert(id, position);
        }
    }

    positioned(nodes, &positions)
}
