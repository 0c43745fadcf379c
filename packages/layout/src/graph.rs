//! # Layered Graph
//!
//! Input/output container for the layout algorithm. Mirrors the familiar
//! `setGraph / setNode / setEdge / layout / node` workflow:
//!
//! ```rust,ignore
//! let mut g = LayeredGraph::new(GraphOptions::default());
//! g.set_node("home", NodeSize::new(200.0, 150.0));
//! g.set_node("about", NodeSize::new(200.0, 150.0));
//! g.set_edge("home", "about");
//! g.layout()?;
//! let center = g.node("about").unwrap();
//! ```
//!
//! A graph is a plain value. Build one per layout pass; nothing is shared
//! between passes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::LayoutResult;
use crate::layered;

/// Flow direction of ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RankDir {
    /// Top to bottom: ranks stack vertically
    #[default]
    TB,
    /// Left to right: ranks stack horizontally
    LR,
}

impl RankDir {
    pub fn is_horizontal(self) -> bool {
        matches!(self, RankDir::LR)
    }
}

impl std::str::FromStr for RankDir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TB" => Ok(RankDir::TB),
            "LR" => Ok(RankDir::LR),
            other => Err(format!("Unknown rank direction: {} (expected TB or LR)", other)),
        }
    }
}

impl std::fmt::Display for RankDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankDir::TB => write!(f, "TB"),
            RankDir::LR => write!(f, "LR"),
        }
    }
}

/// Graph-level layout options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphOptions {
    pub rankdir: RankDir,
    /// Gap between neighbouring nodes in the same rank
    pub nodesep: f64,
    /// Gap between ranks
    pub ranksep: f64,
    pub marginx: f64,
    pub marginy: f64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 50.0,
            ranksep: 50.0,
            marginx: 0.0,
            marginy: 0.0,
        }
    }
}

impl GraphOptions {
    pub fn with_rankdir(rankdir: RankDir) -> Self {
        Self {
            rankdir,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
}

impl NodeSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Center of a laid-out node
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Extent of the whole drawing after layout
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GraphSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct NodeEntry {
    pub id: String,
    pub size: NodeSize,
    pub center: Option<Point>,
}

/// Directed graph with per-node footprints and computed centers.
#[derive(Debug, Clone)]
pub struct LayeredGraph {
    options: GraphOptions,
    pub(crate) nodes: Vec<NodeEntry>,
    index: HashMap<String, usize>,
    pub(crate) edges: Vec<(String, String)>,
    size: GraphSize,
}

impl LayeredGraph {
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            size: GraphSize::default(),
        }
    }

    pub fn set_graph(&mut self, options: GraphOptions) {
        self.options = options;
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Register a node, or update the footprint of an existing one.
    pub fn set_node(&mut self, id: impl Into<String>, size: NodeSize) {
        let id = id.into();
        match self.index.get(&id) {
            Some(&i) => self.nodes[i].size = size,
            None => {
                self.index.insert(id.clone(), self.nodes.len());
                self.nodes.push(NodeEntry {
                    id,
                    size,
                    center: None,
                });
            }
        }
    }

    /// Register a directed edge. Repeated edges collapse into one.
    pub fn set_edge(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let edge = (source.into(), target.into());
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Center of `id` from the last successful [`layout`](Self::layout).
    pub fn node(&self, id: &str) -> Option<Point> {
        self.index.get(id).and_then(|&i| self.nodes[i].center)
    }

    /// Width and height of the drawing, margins included.
    pub fn graph_size(&self) -> GraphSize {
        self.size
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Compute centers for every node.
    ///
    /// On error no node carries a center, so stale coordinates from an
    /// earlier pass are never reported.
    #[instrument(skip(self), fields(nodes = self.nodes.len(), edges = self.edges.len(), rankdir = %self.options.rankdir))]
    pub fn layout(&mut self) -> LayoutResult<()> {
        for node in &mut self.nodes {
            node.center = None;
        }
        self.size = GraphSize::default();

        let centers = layered::compute(self)?;
        let mut size = GraphSize::default();

        for (node, center) in self.nodes.iter_mut().zip(centers) {
            size.width = size.width.max(center.x + node.size.width / 2.0);
            size.height = size.height.max(center.y + node.size.height / 2.0);
            node.center = Some(center);
        }

        size.width += self.options.marginx;
        size.height += self.options.marginy;
        self.size = size;

        debug!(width = size.width, height = size.height, "Layout complete");
        Ok(())
    }
}
