use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::graph::{GraphEdge, GraphNode, Position};
use crate::layout::{positioned, LayoutOptions};

const ITERATIONS: usize = 120;
const REPULSION: f64 = 120_000.0;
const SPRING: f64 = 0.02;
const DAMPING: f64 = 0.85;
const MIN_DISTANCE: f64 = 1.0;

/// Force-directed placement: inverse-square repulsion between every node
/// pair, spring attraction along edges toward a rest length of node width
/// plus node height, damped velocity integration over a fixed iteration
/// budget. Pure function of its inputs: initial angles come from array
/// index, no randomness, and the distance floor keeps positions finite.
pub fn layout(nodes: &[GraphNode], edges: &[GraphEdge], options: &LayoutOptions) -> Vec<GraphNode> {
    let count = nodes.len();
    if count == 0 {
        return Vec::new();
    }

    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id.as_str(), idx))
        .collect();
    let springs: Vec<(usize, usize)> = edges
        .iter()
        .filter_map(|edge| {
            let a = *index.get(edge.source.as_str())?;
            let b = *index.get(edge.target.as_str())?;
            (a != b).then_some((a, b))
        })
        .collect();

    let radius = ((count as f64) * (options.node_width + options.spacing_x) / TAU)
        .max(options.node_width);
    let mut xs: Vec<f64> = Vec::with_capacity(count);
    let mut ys: Vec<f64> = Vec::with_capacity(count);
    for idx in 0..count {
        let angle = TAU * idx as f64 / count as f64;
        xs.push(radius * angle.cos());
        ys.push(radius * angle.sin());
    }

    let rest_length = options.node_width + options.node_height;
    let mut vx = vec![0.0f64; count];
    let mut vy = vec![0.0f64; count];

    for _ in 0..ITERATIONS {
        let mut fx = vec![0.0f64; count];
        let mut fy = vec![0.0f64; count];

        for i in 0..count {
            for j in (i + 1)..count {
                let dx = xs[i] - xs[j];
                let dy = ys[i] - ys[j];
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let push = REPULSION / (distance * distance);
                let ux = dx / distance;
                let uy = dy / distance;
                fx[i] += push * ux;
                fy[i] += push * uy;
                fx[j] -= push * ux;
                fy[j] -= push * uy;
            }
        }

        for &(a, b) in &springs {
            let dx = xs[b] - xs[a];
            let dy = ys[b] - ys[a];
            let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let pull = SPRING * (distance - rest_length);
            let ux = dx / distance;
            let uy = dy / distance;
            fx[a] += pull * ux;
            fy[a] += pull * uy;
            fx[b] -= pull * ux;
            fy[b] -= pull * uy;
        }

        for i in 0..count {
            vx[i] = (vx[i] + fx[i]) * DAMPING;
            vy[i] = (vy[i] + fy[i]) * DAMPING;
            xs[i] += vx[i];
            ys[i] += vy[i];
        }
    }

    let positions: HashMap<&str, Position> = nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            (
                node.id.as_str(),
                Position {
                    x: xs[idx],
                    y: ys[idx],
                },
            )
        })
        .collect();
    positioned(nodes, &positions)
}
