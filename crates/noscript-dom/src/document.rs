//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
}

impl Document {
    /// Create an empty document (document node only)
    pub fn new() -> Self {
        Self::default()
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        self.tree
            .children(self.root())
            .find(|(_, node)| node.is_element())
            .map(|(id, _)| id)
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.tree
            .children(html)
            .find(|(_, node)| node.is_tag("body"))
            .map(|(id, _)| id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}
