//! Positions a flattened graph with the layered layout engine.

use pagemap_layout::{GraphOptions, LayeredGraph, LayoutResult, NodeSize, RankDir};
use pagemap_model::Position;
use tracing::{debug, instrument};

use crate::flatten::{FlatGraph, Side};

/// Footprint every page node occupies during layout
pub const NODE_WIDTH: f64 = 200.0;
pub const NODE_HEIGHT: f64 = 150.0;

/// Rank direction as the editor exposes it
pub type LayoutDirection = RankDir;

/// Returns a copy of `graph` with top-left positions and connection sides
/// filled in. Pinned nodes keep their stored coordinate.
#[instrument(skip(graph), fields(nodes = graph.nodes.len(), edges = graph.edges.len()))]
pub fn layout(graph: &FlatGraph, direction: LayoutDirection) -> LayoutResult<FlatGraph> {
    let mut engine = LayeredGraph::new(GraphOptions::with_rankdir(direction));
    for node in &graph.nodes {
        engine.set_node(node.id.as_str(), NodeSize::new(NODE_WIDTH, NODE_HEIGHT));
    }
    for edge in &graph.edges {
        engine.set_edge(edge.source.as_str(), edge.target.as_str());
    }
    engine.layout()?;

    let (target_side, source_side) = if direction.is_horizontal() {
        (Side::Left, Side::Right)
    } else {
        (Side::Top, Side::Bottom)
    };

    let mut positioned = graph.clone();
    for node in &mut positioned.nodes {
        node.target_position = Some(target_side);
        node.source_position = Some(source_side);

        if node.data.pinned {
            continue;
        }
        if let Some(center) = engine.node(&node.id) {
            node.position = Some(Position::new(
                center.x - NODE_WIDTH / 2.0,
                center.y - NODE_HEIGHT / 2.0,
            ));
        }
        debug!(id = %node.id, position = ?node.position, "Placed node");
    }

    Ok(positioned)
}
