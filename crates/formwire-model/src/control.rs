//! Resolution of named form controls.

use crate::{Document, NodeId};

const CONTROL_TAGS: [&str; 4] = ["input", "select", "textarea", "button"];

pub fn is_form_control(document: &Document, node: NodeId) -> bool {
    CONTROL_TAGS.iter().any(|tag| document.is_tag(node, tag))
}

/// A control looked up by name, as `form.elements[name]` returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlRef {
    Single(NodeId),
    Group(ControlGroup),
}

/// Two or more controls sharing a name, typically a radio group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlGroup {
    members: Vec<NodeId>,
}

impl ControlGroup {
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn first(&self) -> NodeId {
        self.members[0]
    }

    /// Value of the first checked radio member, or empty when none is
    /// checked.
    pub fn value(&self, document: &Document) -> String {
        self.members
            .iter()
            .copied()
            .find(|member| {
                document.attr(*member, "type") == Some("radio") && document.is_checked(*member)
            })
            .map(|member| document.control_value(member))
            .unwrap_or_default()
    }
}

impl ControlRef {
    /// The control itself, or the first member of a group.
    pub fn representative(&self) -> NodeId {
        match self {
            ControlRef::Single(node) => *node,
            ControlRef::Group(group) => group.first(),
        }
    }

    pub fn members(&self) -> &[NodeId] {
        match self {
            ControlRef::Single(node) => std::slice::from_ref(node),
            ControlRef::Group(group) => group.members(),
        }
    }

    pub fn value(&self, document: &Document) -> String {
        match self {
            ControlRef::Single(node) => document.control_value(*node),
            ControlRef::Group(group) => group.value(document),
        }
    }
}

/// Controls inside `form` whose `name` or `id` equals `name`.
pub fn resolve_control(document: &Document, form: NodeId, name: &str) -> Option<ControlRef> {
    let mut members = document.find_all(form, |doc, node| {
        is_form_control(doc, node)
            && (doc.attr(node, "name") == Some(name) || doc.attr(node, "id") == Some(name))
    });
    match members.len() {
        0 => None,
        1 => Some(ControlRef::Single(members.remove(0))),
        _ => Some(ControlRef::Group(ControlGroup { members })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_value_follows_checked_radio() {
        let mut doc = Document::new();
        let form = doc.append_element(doc.root(), "form", [("id", "f")]).unwrap();
        let first = doc
            .append_element(form, "input", [("type", "radio"), ("name", "kind"), ("value", "a")])
            .unwrap();
        let second = doc
            .append_element(form, "input", [("type", "radio"), ("name", "kind"), ("value", "b")])
            .unwrap();

        let control = resolve_control(&doc, form, "kind").unwrap();
        assert_eq!(control.representative(), first);
        assert_eq!(control.members(), [first, second]);
        assert_eq!(control.value(&doc), "");

        doc.set_checked(second, true).unwrap();
        assert_eq!(control.value(&doc), "b");
    }

    #[test]
    fn resolves_by_id_and_ignores_other_forms() {
        let mut doc = Document::new();
        let form = doc.append_element(doc.root(), "form", [("id", "f")]).unwrap();
        let other = doc.append_element(doc.root(), "form", [("id", "g")]).unwrap();
        let status = doc
            .append_element(form, "select", [("id", "status")])
            .unwrap();
        doc.append_element(other, "input", [("name", "status")]).unwrap();

        assert_eq!(
            resolve_control(&doc, form, "status"),
            Some(ControlRef::Single(status))
        );
        assert_eq!(resolve_control(&doc, form, "missing"), None);
    }
}
