//! # Hierarchy Document
//!
//! The unit of persistence and export: the page tree plus the ordered list of
//! sections shown on the home page.
//!
//! ```text
//! {
//!   "pages": { "id": "home", "label": "Home", "level": 1, "children": [...] },
//!   "homeSections": ["Hero", "Features", ...]
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};
use crate::page::PageNode;

/// Id of the page that owns the section list
pub const HOME_PAGE_ID: &str = "home";

/// Default section order for a fresh document
pub const DEFAULT_HOME_SECTIONS: [&str; 5] = ["Hero", "Features", "Testimonials", "CTA", "Footer"];

/// Deepest nesting a document may have, counting the root as depth 1.
///
/// Each page costs two JSON nesting levels, which keeps a saved tree well
/// inside `serde_json`'s recursion limit.
pub const MAX_DEPTH: usize = 48;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyDocument {
    pub pages: PageNode,
    #[serde(default)]
    pub home_sections: Vec<String>,
}

impl HierarchyDocument {
    pub fn new(pages: PageNode, home_sections: Vec<String>) -> Self {
        Self {
            pages,
            home_sections,
        }
    }

    /// The structure a new editor starts with.
    pub fn default_structure() -> Self {
        let page = PageNode::new;
        let pages = page("home", "Home", 1).with_children(vec![
            page("about", "About", 2),
            page("services", "Services", 2).with_children(vec![
                page("service1", "Service Detail 1", 3),
                page("service2", "Service Detail 2", 3),
            ]),
            page("blog", "Blog", 2).with_children(vec![
                page("blog1", "Blog Post 1", 3),
                page("blog2", "Blog Post 2", 3),
                page("author", "Author Page", 3),
            ]),
            page("contact", "Contact", 2).with_children(vec![
                page("location", "Location Info", 3),
                page("support", "Support Page", 3),
            ]),
        ]);

        Self {
            pages,
            home_sections: DEFAULT_HOME_SECTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.page_count()
    }

    pub fn find(&self, id: &str) -> Option<&PageNode> {
        self.pages.find(id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut PageNode> {
        self.pages.find_mut(id)
    }

    /// Check structural invariants: ids unique across the whole tree, levels
    /// start at 1, depth at most [`MAX_DEPTH`], pins finite.
    pub fn validate(&self) -> ParseResult<()> {
        let mut seen = HashSet::new();
        let mut result = Ok(());

        self.pages.walk(&mut |page, _| {
            if result.is_err() {
                return;
            }
            if !seen.insert(page.id.as_str()) {
                result = Err(ParseError::DuplicateId(page.id.clone()));
            } else if page.level == 0 {
                result = Err(ParseError::InvalidLevel(page.id.clone()));
            } else if page.position.is_some_and(|p| !p.is_finite()) {
                result = Err(ParseError::InvalidPosition(page.id.clone()));
            }
        });
        result?;

        if self.pages.height() > MAX_DEPTH {
            let deepest = deepest_page(&self.pages);
            return Err(ParseError::TooDeep(deepest.id.clone()));
        }
        Ok(())
    }

    /// Collect every page id in preorder.
    pub fn page_ids(&self) -> Vec<&str> {
        let mut ids = Vec::with_capacity(self.page_count());
        self.pages.walk(&mut |page, _| ids.push(page.id.as_str()));
        ids
    }
}

fn deepest_page(page: &PageNode) -> &PageNode {
    page.children
        .iter()
        .max_by_key(|child| child.height())
        .map_or(page, deepest_page)
}

impl Default for HierarchyDocument {
    fn default() -> Self {
        Self::default_structure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_structure_shape() {
        let doc = HierarchyDocument::default_structure();

        assert_eq!(doc.pages.id, HOME_PAGE_ID);
        let second_level: Vec<&str> = doc.pages.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(second_level, vec!["about", "services", "blog", "contact"]);
        assert_eq!(
            doc.home_sections,
            vec!["Hero", "Features", "Testimonials", "CTA", "Footer"]
        );
        assert_eq!(doc.page_count(), 12);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let mut doc = HierarchyDocument::default_structure();
        doc.pages.children[0].id = "blog1".to_string();

        match doc.validate() {
            Err(ParseError::DuplicateId(id)) => assert_eq!(id, "blog1"),
            other => panic!("Expected DuplicateId, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_level_zero() {
        let mut doc = HierarchyDocument::default_structure();
        doc.pages.children[1].level = 0;

        assert!(matches!(doc.validate(), Err(ParseError::InvalidLevel(id)) if id == "services"));
    }

    #[test]
    fn test_level_not_checked_against_depth() {
        let mut doc = HierarchyDocument::default_structure();
        doc.pages.children[0].level = 7;
        assert!(doc.validate().is_ok());
    }

    /// A single-file chain `p1 > p2 > ... > p<depth>`.
    fn chain(depth: usize) -> HierarchyDocument {
        let mut node = PageNode::new(format!("p{depth}"), format!("Page {depth}"), depth as u32);
        for level in (1..depth).rev() {
            node = PageNode::new(format!("p{level}"), format!("Page {level}"), level as u32)
                .with_children(vec![node]);
        }
        HierarchyDocument::new(node, Vec::new())
    }

    #[test]
    fn test_validate_depth_limit() {
        assert!(chain(MAX_DEPTH).validate().is_ok());

        let too_deep = chain(MAX_DEPTH + 1);
        match too_deep.validate() {
            Err(ParseError::TooDeep(id)) => assert_eq!(id, format!("p{}", MAX_DEPTH + 1)),
            other => panic!("Expected TooDeep, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_finite_pin() {
        let mut doc = HierarchyDocument::default_structure();
        doc.find_mut("blog").unwrap().position = Some(crate::Position::new(f64::NAN, 0.0));

        assert!(matches!(doc.validate(), Err(ParseError::InvalidPosition(id)) if id == "blog"));
    }

    #[test]
    fn test_page_ids_preorder() {
        let doc = HierarchyDocument::default_structure();
        let ids = doc.page_ids();
        assert_eq!(&ids[..4], &["home", "about", "services", "service1"]);
    }
}
