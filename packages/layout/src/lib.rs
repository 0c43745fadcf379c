//! # Pagemap Layout
//!
//! Layered layout for directed graphs: nodes are assigned to ranks by
//! longest path from the sources, kept in registration order within a rank,
//! and given coordinates so that parents sit centred over their children.
//!
//! ```rust,ignore
//! use pagemap_layout::{GraphOptions, LayeredGraph, NodeSize, RankDir};
//!
//! let mut g = LayeredGraph::new(GraphOptions::with_rankdir(RankDir::LR));
//! g.set_node("a", NodeSize::new(200.0, 150.0));
//! g.set_node("b", NodeSize::new(200.0, 150.0));
//! g.set_edge("a", "b");
//! g.layout()?;
//! ```
//!
//! Reported coordinates are node centers.

mod error;
mod graph;
mod layered;

pub use error::{LayoutError, LayoutResult};
pub use graph::{GraphOptions, GraphSize, LayeredGraph, NodeSize, Point, RankDir};
