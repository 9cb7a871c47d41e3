//! noscript DOM - Document Object Model
//!
//! Arena-backed, mutable DOM tree. Nodes are addressed by [`NodeId`] and
//! linked through parent/child/sibling ids, so detaching a node drops its
//! whole subtree from the document in O(1).

mod document;
mod node;
mod operations;
mod tree;

pub use document::Document;
pub use node::{Attribute, ElementData, Namespace, Node, NodeData, TextData};
pub use operations::{DomError, DomResult};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for a missing link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this id points at a node rather than being the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
