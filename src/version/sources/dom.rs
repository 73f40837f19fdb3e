//! Minimal tree abstraction for walking parsed HTML documents
//!
//! The walk uses an explicit stack, so deeply nested input cannot
//! exhaust the call stack. Nodes are yielded in document order.

use markup5ever_rcdom::{Handle, NodeData};

/// A node that has attributes and child nodes
///
/// Nodes are cheap handles; the tree they belong to must outlive any walk.
pub trait TreeNode: Sized + Clone {
    /// Local element name, or `None` for non-element nodes
    fn element_name(&self) -> Option<String>;

    /// Value of the named attribute, if present
    fn attr(&self, name: &str) -> Option<String>;

    /// Child nodes in document order
    fn children(&self) -> Vec<Self>;
}

impl TreeNode for Handle {
    fn element_name(&self) -> Option<String> {
        match &self.data {
            NodeData::Element { name, .. } => Some(name.local.to_string()),
            _ => None,
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        match &self.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|attr| attr.name.local.as_ref() == name)
                .map(|attr| attr.value.to_string()),
            _ => None,
        }
    }

    fn children(&self) -> Vec<Self> {
        self.children.borrow().clone()
    }
}

/// Pre-order depth-first iterator over a tree
pub struct DepthFirst<N> {
    stack: Vec<N>,
}

impl<N: TreeNode> DepthFirst<N> {
    pub fn new(root: N) -> Self {
        Self { stack: vec![root] }
    }
}

impl<N: TreeNode> Iterator for DepthFirst<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let node = self.stack.pop()?;
        // Reversed so the first child is popped next
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

/// Collects the `href` of every anchor element in document order
pub fn anchor_hrefs<N: TreeNode>(root: &N) -> Vec<String> {
    DepthFirst::new(root.clone())
        .filter(|node| node.element_name().as_deref() == Some("a"))
        .filter_map(|node| node.attr("href"))
        .collect()
}
