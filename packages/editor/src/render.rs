//! View-level change events reported by the renderer.
//!
//! These patch the render snapshot only. Dragging a node around, selecting
//! it or hiding it never reaches the document; the next recompute replaces
//! whatever they did with the auto-layout.

use pagemap_model::Position;
use serde::{Deserialize, Serialize};

use crate::flatten::FlatGraph;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeChange {
    /// `position` is absent while a drag is still settling
    Position {
        id: String,
        #[serde(default)]
        position: Option<Position>,
    },
    Select { id: String, selected: bool },
    Remove { id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgeChange {
    Select { id: String, selected: bool },
    Remove { id: String },
}

impl FlatGraph {
    /// Apply renderer node changes. Unknown ids are ignored.
    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) {
        for change in changes {
            match change {
                NodeChange::Position { id, position } => {
                    if let (Some(node), Some(p)) = (self.nodes.iter_mut().find(|n| n.id == *id), position) {
                        node.position = Some(*p);
                    }
                }
                NodeChange::Select { id, selected } => {
                    if let Some(node) = self.nodes.iter_mut().find(|n| n.id == *id) {
                        node.selected = *selected;
                    }
                }
                NodeChange::Remove { id } => {
                    self.nodes.retain(|n| n.id != *id);
                    self.edges.retain(|e| e.source != *id && e.target != *id);
                }
            }
        }
    }

    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
        for change in changes {
            match change {
                EdgeChange::Select { id, selected } => {
                    if let Some(edge) = self.edges.iter_mut().find(|e| e.id == *id) {
                        edge.selected = *selected;
                    }
                }
                EdgeChange::Remove { id } => self.edges.retain(|e| e.id != *id),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use pagemap_model::HierarchyDocument;

    fn graph() -> FlatGraph {
        let doc = HierarchyDocument::default_structure();
        flatten(&doc.pages, &doc.home_sections).unwrap()
    }

    #[test]
    fn test_change_events_parse() {
        let json = r#"[
            {"type":"position","id":"about","position":{"x":1.5,"y":2}},
            {"type":"position","id":"blog"},
            {"type":"select","id":"home","selected":true},
            {"type":"remove","id":"contact"}
        ]"#;
        let changes: Vec<NodeChange> = serde_json::from_str(json).unwrap();

        assert_eq!(changes.len(), 4);
        assert_eq!(
            changes[0],
            NodeChange::Position {
                id: "about".to_string(),
                position: Some(Position::new(1.5, 2.0)),
            }
        );
        assert_eq!(
            changes[1],
            NodeChange::Position {
                id: "blog".to_string(),
                position: None,
            }
        );
    }

    #[test]
    fn test_apply_position_and_select() {
        let mut g = graph();
        g.apply_node_changes(&[
            NodeChange::Position {
                id: "about".to_string(),
                position: Some(Position::new(7.0, 8.0)),
            },
            NodeChange::Select {
                id: "about".to_string(),
                selected: true,
            },
            NodeChange::Select {
                id: "ghost".to_string(),
                selected: true,
            },
        ]);

        let about = g.node("about").unwrap();
        assert_eq!(about.position, Some(Position::new(7.0, 8.0)));
        assert!(about.selected);
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut g = graph();
        g.apply_node_changes(&[NodeChange::Remove {
            id: "services".to_string(),
        }]);

        assert!(g.node("services").is_none());
        assert!(g.edges.iter().all(|e| e.source != "services" && e.target != "services"));
        assert!(g.node("service1").is_some());
    }

    #[test]
    fn test_edge_changes() {
        let mut g = graph();
        g.apply_edge_changes(&[
            EdgeChange::Select {
                id: "home-blog".to_string(),
                selected: true,
            },
            EdgeChange::Remove {
                id: "home-about".to_string(),
            },
        ]);

        assert!(g.edge("home-blog").unwrap().selected);
        assert!(g.edge("home-about").is_none());
    }
}
