//! Minimal tree capability used by ancestor searches.

use crate::{Document, NodeId};

/// Parent and tag access over any tree.
///
/// [`Document`] implements it, and tests can supply a hand-built tree
/// without constructing a full document.
pub trait Ancestry {
    type Node: Copy + Eq;

    fn parent_of(&self, node: Self::Node) -> Option<Self::Node>;

    /// Lowercase tag of an element node, `None` for other nodes.
    fn tag_of(&self, node: Self::Node) -> Option<&str>;
}

impl Ancestry for Document {
    type Node = NodeId;

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node)
    }

    fn tag_of(&self, node: NodeId) -> Option<&str> {
        self.tag_name(node)
    }
}
