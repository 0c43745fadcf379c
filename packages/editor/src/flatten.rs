//! # Flattener
//!
//! Converts the recursive page tree into the flat node and edge lists a
//! node-link renderer consumes.
//!
//! ```text
//! home ─┬─ about            nodes: home, about, blog, post
//!       └─ blog ── post     edges: home-about, home-blog, blog-post
//! ```
//!
//! Traversal is preorder and child order is preserved, which becomes the
//! default left-to-right order of the layout. Node records carry data only;
//! edits flow back to the editor as messages.

use std::collections::HashSet;

use pagemap_model::{PageNode, Position, HOME_PAGE_ID};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::FlattenError;

/// Renderer node type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "custom")]
    Page,
}

/// Renderer edge type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    #[serde(rename = "smoothstep")]
    SmoothStep,
}

/// Side of a node where edges attach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Synthetic drag identifier for a home section, independent of its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionKey(pub String);

impl SectionKey {
    pub fn from_index(index: usize) -> Self {
        Self(format!("section-{}", index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionItem {
    pub key: SectionKey,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData {
    pub label: String,
    pub level: u32,
    /// Only present on the home page
    pub sections: Option<Vec<SectionItem>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub data: PageData,
    pub class_name: String,
    /// Top-left corner; `None` until laid out unless the page is pinned
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_position: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_position: Option<Side>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl FlatNode {
    pub fn sections(&self) -> Option<&[SectionItem]> {
        self.data.sections.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl FlatEdge {
    pub fn between(parent: &str, child: &str) -> Self {
        Self {
            id: format!("{}-{}", parent, child),
            source: parent.to_string(),
            target: child.to_string(),
            kind: EdgeKind::SmoothStep,
            selected: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatGraph {
    pub nodes: Vec<FlatNode>,
    pub edges: Vec<FlatEdge>,
}

impl FlatGraph {
    pub fn node(&self, id: &str) -> Option<&FlatNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&FlatEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// The node carrying the home section list, if any.
    pub fn home(&self) -> Option<&FlatNode> {
        self.node(HOME_PAGE_ID)
    }
}

/// Flatten `root` into nodes and edges. Fails on the first repeated id.
pub fn flatten(root: &PageNode, home_sections: &[String]) -> Result<FlatGraph, FlattenError> {
    let mut graph = FlatGraph {
        nodes: Vec::with_capacity(root.page_count()),
        edges: Vec::with_capacity(root.page_count().saturating_sub(1)),
    };
    let mut seen = HashSet::new();
    let mut duplicate = None;

    root.walk(&mut |page, parent| {
        if duplicate.is_some() {
            return;
        }
        if !seen.insert(page.id.as_str()) {
            duplicate = Some(page.id.clone());
            return;
        }

        graph.nodes.push(flat_node(page, home_sections));
        if let Some(parent_id) = parent {
            graph.edges.push(FlatEdge::between(parent_id, &page.id));
        }
    });

    if let Some(id) = duplicate {
        return Err(FlattenError::DuplicateId(id));
    }

    debug!(nodes = graph.nodes.len(), edges = graph.edges.len(), "Flattened page tree");
    Ok(graph)
}

/// Key each section by its slot.
pub(crate) fn section_items(home_sections: &[String]) -> Vec<SectionItem> {
    home_sections
        .iter()
        .enumerate()
        .map(|(i, name)| SectionItem {
            key: SectionKey::from_index(i),
            name: name.clone(),
        })
        .collect()
}

fn flat_node(page: &PageNode, home_sections: &[String]) -> FlatNode {
    let sections = (page.id == HOME_PAGE_ID).then(|| section_items(home_sections));

    FlatNode {
        id: page.id.clone(),
        kind: NodeKind::Page,
        data: PageData {
            label: page.label.clone(),
            level: page.level,
            sections,
            pinned: page.position.is_some(),
        },
        class_name: format!("level-{}", page.level),
        position: page.position,
        source_position: None,
        target_position: None,
        selected: false,
    }
}
