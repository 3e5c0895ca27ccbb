use thiserror::Error;

use crate::NodeId;

/// Errors raised by document tree mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),
    #[error("node {0} cannot have children")]
    CannotHaveChildren(NodeId),
    #[error("appending {child} to {parent} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },
    #[error("the document root cannot be detached")]
    DetachRoot,
}

pub type Result<T> = std::result::Result<T, ModelError>;
