use std::collections::{HashMap, HashSet};

use crate::graph::{GraphEdge, GraphNode, Position};
use crate::layout::{positioned, LayoutOptions};

/// Subtree-proportional tree placement. Children are the dependents of a
/// node; each subtree claims a horizontal span equal to the sum of its
/// children's spans, and every parent is centered over that span. Disjoint
/// root trees sit side by side with extra spacing between them.
pub fn layout(nodes: &[GraphNode], edges: &[GraphEdge], options: &LayoutOptions) -> Vec<GraphNode> {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut has_outgoing: HashSet<&str> = HashSet::new();
    for edge in edges {
        children
            .entry(edge.target.as_str())
            .or_default()
            .push(edge.source.as_str());
        has_outgoing.insert(edge.source.as_str());
    }

    let roots: Vec<&str> = nodes
        .iter()
        .map(|node| node.id.as_str())
        .filter(|id| !has_outgoing.contains(id))
        .collect();

    let tree_gap = options.spacing_x * 2.0;
    let mut widths: HashMap<&str, f64> = HashMap::new();
    let mut positions: HashMap<&str, Position> = HashMap::new();
    let mut cursor = 0.0;

    for root in roots {
        let mut visiting = HashSet::new();
        let width = subtree_width(root, &children, options, &mut widths, &mut visiting);
        place(root, cursor, 0, &children, &widths, options, &mut positions);
        cursor += width + tree_gap;
    }

    // Anything not reached from a root (a cyclic island) becomes a root of
    // its own tree so every node still gets a position.
    for node in nodes {
        let id = node.id.as_str();
        if positions.contains_key(id) {
            continue;
        }
        let mut visiting = HashSet::new();
        let width = subtree_width(id, &children, options, &mut widths, &mut visiting);
        place(id, cursor, 0, &children, &widths, options, &mut positions);
        cursor += width + tree_gap;
    }

    positioned(nodes, &positions)
}

fn subtree_width<'a>(
    node: &'a str,
    children: &HashMap<&'a str, Vec<&'a str>>,
    options: &LayoutOptions,
    widths: &mut HashMap<&'a str, f64>,
    visiting: &mut HashSet<&'a str>,
) -> f64 {
    if let Some(&width) = widths.get(node) {
        return width;
    }
    if !visiting.insert(node) {
        // Back-edge: treat the repeated node as a leaf to stop recursion.
        return options.node_width;
    }

    let mut total = 0.0;
    let mut count = 0usize;
    if let Some(kids) = children.get(node) {
        for &kid in kids {
            total += subtree_width(kid, children, options, widths, visiting);
            count += 1;
        }
    }
    visiting.remove(node);

    let width = if count == 0 {
        options.node_width
    } else {
        (total + options.spacing_x * (count - 1) as f64).max(options.node_width)
    };
    widths.insert(node, width);
    width
}

fn place<'a>(
    node: &'a str,
    left: f64,
    depth: usize,
    children: &HashMap<&'a str, Vec<&'a str>>,
    widths: &HashMap<&'a str, f64>,
    options: &LayoutOptions,
    positions: &mut HashMap<&'a str, Position>,
) {
    if positions.contains_key(node) {
        return;
    }
    let width = widths.get(node).copied().unwrap_or(options.node_width);
    positions.insert(
        node,
        Position {
            x: left + width / 2.0,
            y: depth as f64 * (options.node_height + options.spacing_y),
        },
    );

    let mut child_left = left;
    if let Some(kids) = children.get(node) {
        for &kid in kids {
            if positions.contains_key(kid) {
                continue;
            }
            let kid_width = widths.get(kid).copied().unwrap_or(options.node_width);
            place(kid, child_left, depth + 1, children, widths, options, positions);
            child_left += kid_width + options.spacing_x;
        }
    }
}
