use std::collections::BTreeSet;

use formwire_model::NodeId;

/// Hidden and auto-suppressed markers, kept apart from the document so the
/// presentation classes are only ever an output.
#[derive(Debug, Clone, Default)]
pub struct StateTable {
    hidden: BTreeSet<NodeId>,
    suppressed: BTreeSet<NodeId>,
}

impl StateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self, element: NodeId) -> bool {
        self.hidden.contains(&element)
    }

    pub fn set_hidden(&mut self, element: NodeId, hidden: bool) {
        if hidden {
            self.hidden.insert(element);
        } else {
            self.hidden.remove(&element);
        }
    }

    pub fn is_suppressed(&self, input: NodeId) -> bool {
        self.suppressed.contains(&input)
    }

    pub fn suppress(&mut self, input: NodeId) {
        self.suppressed.insert(input);
    }

    /// Clear the marker; returns whether the input carried it.
    pub fn release(&mut self, input: NodeId) -> bool {
        self.suppressed.remove(&input)
    }

    pub fn suppressed(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.suppressed.iter().copied()
    }
}
