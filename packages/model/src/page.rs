use serde::{Deserialize, Serialize};

/// Top-left coordinate of a node on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// JSON has no NaN or infinity, so only finite coordinates persist.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One page in the site hierarchy.
///
/// `level` is display metadata and is not checked against tree depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageNode {
    pub id: String,
    pub label: String,
    pub level: u32,
    #[serde(default)]
    pub children: Vec<PageNode>,

    /// Pinned top-left coordinate; overrides auto-layout when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl PageNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            level,
            children: Vec::new(),
            position: None,
        }
    }

    /// Builder-style helper for constructing trees in code
    pub fn with_children(mut self, children: Vec<PageNode>) -> Self {
        self.children = children;
        self
    }

    pub fn find(&self, id: &str) -> Option<&PageNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut PageNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Returns the parent of `id` together with the child's index in it.
    pub fn parent_of(&self, id: &str) -> Option<(&PageNode, usize)> {
        if let Some(index) = self.children.iter().position(|c| c.id == id) {
            return Some((self, index));
        }
        self.children.iter().find_map(|child| child.parent_of(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// True when `descendant_id` lives somewhere inside this page's subtree
    /// (including the page itself).
    pub fn is_ancestor_of(&self, descendant_id: &str) -> bool {
        self.contains(descendant_id)
    }

    /// Total number of pages in this subtree, including this one.
    pub fn page_count(&self) -> usize {
        1 + self.children.iter().map(PageNode::page_count).sum::<usize>()
    }

    /// Number of levels in this subtree; a leaf has height 1.
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(PageNode::height).max().unwrap_or(0)
    }

    /// Depth of `id` below this page, counting this page as depth 1.
    pub fn depth_of(&self, id: &str) -> Option<usize> {
        if self.id == id {
            return Some(1);
        }
        self.children
            .iter()
            .find_map(|child| child.depth_of(id))
            .map(|depth| depth + 1)
    }

    /// Preorder walk. The callback receives each page and its parent id.
    pub fn walk<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a PageNode, Option<&'a str>),
    {
        self.walk_inner(None, f);
    }

    fn walk_inner<'a, F>(&'a self, parent: Option<&'a str>, f: &mut F)
    where
        F: FnMut(&'a PageNode, Option<&'a str>),
    {
        f(self, parent);
        for child in &self.children {
            child.walk_inner(Some(self.id.as_str()), f);
        }
    }

    /// Removes the page with `id` from anywhere below this page.
    ///
    /// Returns the removed subtree with its former parent id and index.
    pub fn remove_descendant(&mut self, id: &str) -> Option<(PageNode, String, usize)> {
        if let Some(index) = self.children.iter().position(|c| c.id == id) {
            let removed = self.children.remove(index);
            return Some((removed, self.id.clone(), index));
        }
        self.children
            .iter_mut()
            .find_map(|child| child.remove_descendant(id))
    }
}
