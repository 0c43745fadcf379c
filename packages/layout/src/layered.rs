//! Layered layout algorithm.
//!
//! 1. Rank assignment: longest path from sources (Kahn's algorithm).
//! 2. Ordering: each node hangs under its first-registered predecessor;
//!    siblings keep edge registration order, roots keep node order.
//! 3. Coordinates: subtrees are packed left to right against the contour of
//!    everything already placed, parents centred over their children.
//!
//! Output is deterministic: identical input yields identical centers.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{LayoutError, LayoutResult};
use crate::graph::{LayeredGraph, NodeSize, Point, RankDir};

/// Per-rank horizontal extent `(left, right)` of a subtree, relative to the
/// subtree root's center.
type Contour = BTreeMap<usize, (f64, f64)>;

struct Adjacency {
    succ: Vec<Vec<usize>>,
    pred: Vec<Vec<usize>>,
}

pub(crate) fn compute(graph: &LayeredGraph) -> LayoutResult<Vec<Point>> {
    let n = graph.nodes.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let adjacency = build_adjacency(graph)?;
    let ranks = assign_ranks(graph, &adjacency)?;
    let children = tree_children(&adjacency, n);
    let roots: Vec<usize> = (0..n).filter(|&v| adjacency.pred[v].is_empty()).collect();

    let opts = graph.options();
    let breadth = |size: NodeSize| match opts.rankdir {
        RankDir::TB => size.width,
        RankDir::LR => size.height,
    };
    let depth = |size: NodeSize| match opts.rankdir {
        RankDir::TB => size.height,
        RankDir::LR => size.width,
    };

    let breadths: Vec<f64> = graph.nodes.iter().map(|node| breadth(node.size)).collect();
    let order_coords = assign_order_coordinates(&ranks, &children, &roots, &breadths, opts.nodesep);

    let depths: Vec<f64> = graph.nodes.iter().map(|node| depth(node.size)).collect();
    let rank_coords = assign_rank_coordinates(&ranks, &depths, opts.ranksep);

    let (order_margin, rank_margin) = match opts.rankdir {
        RankDir::TB => (opts.marginx, opts.marginy),
        RankDir::LR => (opts.marginy, opts.marginx),
    };

    // Shift so the leftmost extent sits on the margin.
    let min_order = order_coords
        .iter()
        .zip(&breadths)
        .map(|(c, b)| c - b / 2.0)
        .fold(f64::INFINITY, f64::min);
    let order_shift = order_margin - min_order;

    let centers = (0..n)
        .map(|v| {
            let along = order_coords[v] + order_shift;
            let across = rank_coords[v] + rank_margin;
            match opts.rankdir {
                RankDir::TB => Point { x: along, y: across },
                RankDir::LR => Point { x: across, y: along },
            }
        })
        .collect();

    Ok(centers)
}

fn build_adjacency(graph: &LayeredGraph) -> LayoutResult<Adjacency> {
    let n = graph.nodes.len();
    let mut succ = vec![Vec::new(); n];
    let mut pred = vec![Vec::new(); n];

    for (from, to) in &graph.edges {
        let u = graph
            .index_of(from)
            .ok_or_else(|| unknown_node(from, to, from))?;
        let v = graph
            .index_of(to)
            .ok_or_else(|| unknown_node(from, to, to))?;
        succ[u].push(v);
        pred[v].push(u);
    }

    Ok(Adjacency { succ, pred })
}

fn unknown_node(from: &str, to: &str, missing: &str) -> LayoutError {
    LayoutError::UnknownNode {
        from: from.to_string(),
        to: to.to_string(),
        missing: missing.to_string(),
    }
}

// ── Phase 1: ranks ──────────────────────────────────────────────────

fn assign_ranks(graph: &LayeredGraph, adjacency: &Adjacency) -> LayoutResult<Vec<usize>> {
    let n = graph.nodes.len();
    let mut in_degree: Vec<usize> = adjacency.pred.iter().map(Vec::len).collect();
    let mut queue: Vec<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
    let mut ranks = vec![0usize; n];

    let mut head = 0;
    while head < queue.len() {
        let u = queue[head];
        head += 1;

        for &v in &adjacency.succ[u] {
            ranks[v] = ranks[v].max(ranks[u] + 1);
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push(v);
            }
        }
    }

    if queue.len() < n {
        let stuck = (0..n)
            .find(|&v| in_degree[v] > 0)
            .map(|v| graph.nodes[v].id.clone())
            .unwrap_or_default();
        return Err(LayoutError::Cycle(stuck));
    }

    debug!(ranks = ranks.iter().max().map_or(0, |r| r + 1), "Assigned ranks");
    Ok(ranks)
}

// ── Phase 2: ordering ───────────────────────────────────────────────

/// Spanning forest: every node is placed under its first predecessor.
fn tree_children(adjacency: &Adjacency, n: usize) -> Vec<Vec<usize>> {
    let mut children = vec![Vec::new(); n];
    for u in 0..n {
        for &v in &adjacency.succ[u] {
            if adjacency.pred[v].first() == Some(&u) {
                children[u].push(v);
            }
        }
    }
    children
}

// ── Phase 3: coordinates ────────────────────────────────────────────

fn assign_order_coordinates(
    ranks: &[usize],
    children: &[Vec<usize>],
    roots: &[usize],
    breadths: &[f64],
    nodesep: f64,
) -> Vec<f64> {
    let n = ranks.len();
    // Offset of each node's center relative to its tree parent's center.
    let mut relative = vec![0.0; n];

    let contours: Vec<Contour> = roots
        .iter()
        .map(|&root| place_subtree(root, ranks, children, breadths, nodesep, &mut relative))
        .collect();
    let root_offsets = pack_siblings(&contours, nodesep);

    let mut absolute = vec![0.0; n];
    let mut stack: Vec<(usize, f64)> = roots
        .iter()
        .zip(root_offsets)
        .map(|(&root, offset)| (root, offset))
        .collect();

    while let Some((v, center)) = stack.pop() {
        absolute[v] = center;
        for &c in &children[v] {
            stack.push((c, center + relative[c]));
        }
    }

    absolute
}

/// Lay out the subtree under `v`, filling `relative` for its descendants and
/// returning the subtree's contour relative to `v`.
fn place_subtree(
    v: usize,
    ranks: &[usize],
    children: &[Vec<usize>],
    breadths: &[f64],
    nodesep: f64,
    relative: &mut [f64],
) -> Contour {
    let half = breadths[v] / 2.0;
    let mut contour = Contour::new();

    if children[v].is_empty() {
        contour.insert(ranks[v], (-half, half));
        return contour;
    }

    let child_contours: Vec<Contour> = children[v]
        .iter()
        .map(|&c| place_subtree(c, ranks, children, breadths, nodesep, relative))
        .collect();
    let offsets = pack_siblings(&child_contours, nodesep);

    let first = offsets.first().copied().unwrap_or(0.0);
    let last = offsets.last().copied().unwrap_or(0.0);
    let mid = (first + last) / 2.0;

    for ((&c, child_contour), offset) in children[v].iter().zip(&child_contours).zip(&offsets) {
        let shift = offset - mid;
        relative[c] = shift;
        merge_contour(&mut contour, child_contour, shift);
    }

    let own = contour.entry(ranks[v]).or_insert((-half, half));
    own.0 = own.0.min(-half);
    own.1 = own.1.max(half);

    contour
}

/// Place sibling subtrees left to right; returns each one's center offset,
/// the first sibling sitting at 0.
fn pack_siblings(contours: &[Contour], nodesep: f64) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(contours.len());
    let mut placed = Contour::new();

    for contour in contours {
        let offset = if placed.is_empty() {
            0.0
        } else {
            let previous = offsets.last().copied().unwrap_or(0.0);
            contour
                .iter()
                .filter_map(|(rank, &(left, _))| {
                    placed.get(rank).map(|&(_, right)| right + nodesep - left)
                })
                .fold(previous, f64::max)
        };

        merge_contour(&mut placed, contour, offset);
        offsets.push(offset);
    }

    offsets
}

fn merge_contour(into: &mut Contour, other: &Contour, shift: f64) {
    for (&rank, &(left, right)) in other {
        let entry = into.entry(rank).or_insert((left + shift, right + shift));
        entry.0 = entry.0.min(left + shift);
        entry.1 = entry.1.max(right + shift);
    }
}

/// Center of each node along the rank axis. Nodes are centred inside their
/// rank, which is as deep as its deepest node.
fn assign_rank_coordinates(ranks: &[usize], depths: &[f64], ranksep: f64) -> Vec<f64> {
    let rank_count = ranks.iter().max().map_or(0, |r| r + 1);
    let mut extent = vec![0.0_f64; rank_count];
    for (&rank, &depth) in ranks.iter().zip(depths) {
        extent[rank] = extent[rank].max(depth);
    }

    let mut starts = Vec::with_capacity(rank_count);
    let mut cursor = 0.0;
    for &e in &extent {
        starts.push(cursor);
        cursor += e + ranksep;
    }

    ranks
        .iter()
        .map(|&rank| starts[rank] + extent[rank] / 2.0)
        .collect()
}
