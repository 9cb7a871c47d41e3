//! DOM Node Operations
//!
//! Errors raised by structural mutations (append, prepend, detach).

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("node {0:?} not found")]
    NotFound(NodeId),
    /// Inserting a node under itself or one of its descendants
    #[error("cannot insert {child:?} under its own descendant {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    /// Node already has a parent
    #[error("node {0:?} is already attached")]
    AlreadyAttached(NodeId),
    /// Parent cannot hold children
    #[error("node {0:?} cannot have children")]
    InvalidNodeType(NodeId),
}
