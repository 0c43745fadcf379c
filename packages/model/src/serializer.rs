//! JSON text <-> [`HierarchyDocument`]

use tracing::debug;

use crate::document::HierarchyDocument;
use crate::error::{ParseError, ParseResult};

/// Parse and validate a persisted document.
pub fn parse(source: &str) -> ParseResult<HierarchyDocument> {
    let doc: HierarchyDocument = serde_json::from_str(source)?;
    doc.validate()?;
    debug!(pages = doc.page_count(), sections = doc.home_sections.len(), "Parsed document");
    Ok(doc)
}

/// Compact JSON, as written to the key-value store.
///
/// Documents that [`parse`] would reject are refused here too.
pub fn serialize(doc: &HierarchyDocument) -> ParseResult<String> {
    doc.validate()?;
    serde_json::to_string(doc).map_err(ParseError::Serialize)
}

/// Two-space indented JSON, as offered for download.
pub fn serialize_pretty(doc: &HierarchyDocument) -> ParseResult<String> {
    doc.validate()?;
    serde_json::to_string_pretty(doc).map_err(ParseError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MAX_DEPTH;
    use crate::page::{PageNode, Position};

    #[test]
    fn test_round_trip_default() {
        let doc = HierarchyDocument::default_structure();
        let parsed = parse(&serialize(&doc).unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_round_trip_with_pin_and_custom_sections() {
        let mut doc = HierarchyDocument::new(
            PageNode::new("home", "Home", 1).with_children(vec![PageNode::new("faq", "FAQ", 4)]),
            vec!["Footer".to_string(), "Footer".to_string()],
        );
        doc.pages.children[0].position = Some(Position::new(12.5, -40.0));

        let parsed = parse(&serialize_pretty(&doc).unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serialize(&HierarchyDocument::default_structure()).unwrap();
        assert!(json.starts_with(r#"{"pages":{"id":"home","label":"Home","level":1,"children":["#));
        assert!(json.contains(r#""homeSections":["Hero","Features","Testimonials","CTA","Footer"]"#));
    }

    #[test]
    fn test_parse_accepts_original_shape() {
        let source = r#"{
            "pages": {
                "id": "home", "label": "Home", "level": 1,
                "children": [{ "id": "about", "label": "About", "level": 2, "children": [] }]
            },
            "homeSections": ["Hero"]
        }"#;

        let doc = parse(source).unwrap();
        assert_eq!(doc.pages.children[0].label, "About");
        assert_eq!(doc.home_sections, vec!["Hero"]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse("not json").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let err = parse(r#"{"pages": 3}"#).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_parse_rejects_duplicate_ids() {
        let source = r#"{
            "pages": {
                "id": "home", "label": "Home", "level": 1,
                "children": [
                    { "id": "a", "label": "A", "level": 2, "children": [] },
                    { "id": "a", "label": "A again", "level": 2, "children": [] }
                ]
            },
            "homeSections": []
        }"#;

        assert!(matches!(parse(source), Err(ParseError::DuplicateId(id)) if id == "a"));
    }

    fn deep_chain(depth: usize) -> HierarchyDocument {
        let mut node = PageNode::new(format!("p{depth}"), "Leaf", depth as u32);
        node.position = Some(Position::new(1.0, 2.0));
        for level in (1..depth).rev() {
            node = PageNode::new(format!("p{level}"), "Page", level as u32).with_children(vec![node]);
        }
        HierarchyDocument::new(node, vec!["Hero".to_string()])
    }

    #[test]
    fn test_deepest_allowed_chain_round_trips() {
        let doc = deep_chain(MAX_DEPTH);

        assert_eq!(parse(&serialize(&doc).unwrap()).unwrap(), doc);
        assert_eq!(parse(&serialize_pretty(&doc).unwrap()).unwrap(), doc);
    }

    #[test]
    fn test_serialize_refuses_too_deep_chain() {
        let doc = deep_chain(MAX_DEPTH + 1);
        assert!(matches!(serialize(&doc), Err(ParseError::TooDeep(_))));
    }

    #[test]
    fn test_serialize_refuses_non_finite_pin() {
        let mut doc = HierarchyDocument::default_structure();
        doc.pages.children[0].position = Some(Position::new(f64::INFINITY, 0.0));

        assert!(matches!(serialize(&doc), Err(ParseError::InvalidPosition(id)) if id == "about"));
    }
}
