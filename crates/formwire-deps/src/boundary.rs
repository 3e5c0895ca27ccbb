//! Where change listeners for a source field are attached.

use formwire_model::{Ancestry, ControlRef, NodeId};

/// Nearest `fieldset` at or above `start`, stopping at the enclosing `form`.
pub fn enclosing_fieldset<T: Ancestry>(tree: &T, start: T::Node) -> Option<T::Node> {
    let mut cursor = Some(start);
    while let Some(node) = cursor {
        match tree.tag_of(node) {
            Some("fieldset") => return Some(node),
            Some("form") => return None,
            _ => cursor = tree.parent_of(node),
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenTarget {
    /// The field sits in a fieldset; any change inside it re-evaluates.
    Fieldset(NodeId),
    /// The control itself, or every member of a group outside a fieldset.
    Controls(Vec<NodeId>),
}

impl ListenTarget {
    pub fn nodes(&self) -> &[NodeId] {
        match self {
            ListenTarget::Fieldset(node) => std::slice::from_ref(node),
            ListenTarget::Controls(nodes) => nodes,
        }
    }
}

/// The search starts from the group's first member.
pub fn listening_target<T>(tree: &T, control: &ControlRef) -> ListenTarget
where
    T: Ancestry<Node = NodeId>,
{
    match enclosing_fieldset(tree, control.representative()) {
        Some(fieldset) => ListenTarget::Fieldset(fieldset),
        None => ListenTarget::Controls(control.members().to_vec()),
    }
}
