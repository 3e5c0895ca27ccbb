//! Arena-backed document tree.
//!
//! The tree mirrors the subset of the browser DOM the enhancement layer
//! touches: element tags and attributes, class lists, control state (value,
//! checked, disabled, files), detached template content and focus. Nodes live
//! in a single `Vec` and are addressed by [`NodeId`]; detaching a node only
//! unlinks it from its parent.

use crate::error::{ModelError, Result};
use crate::ids::NodeId;

#[derive(Debug, Clone)]
pub enum NodeKind {
    Document,
    Element(Element),
    Text(String),
    /// Parentless container, used for template content.
    Fragment,
}

#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    value: String,
    checked: bool,
    disabled: bool,
    files: Vec<String>,
    content: Option<NodeId>,
    /// A `select` whose value was set to a value no option carries.
    unselected: bool,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attributes in source order, excluding `class`.
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    focused: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            root: NodeId(0),
            focused: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Create a detached element.
    ///
    /// `class`, `value`, `checked`, `selected` and `disabled` attributes seed
    /// the corresponding element state. A `template` element gets an empty
    /// content fragment.
    pub fn create_element<I, K, V>(&mut self, tag: &str, attrs: I) -> NodeId
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut element = Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        };
        for (key, value) in attrs {
            let key = key.into().to_ascii_lowercase();
            let value = value.into();
            match key.as_str() {
                "class" => element.classes = split_classes(&value),
                "value" => element.value.clone_from(&value),
                "checked" | "selected" => element.checked = true,
                "disabled" => element.disabled = true,
                _ => {}
            }
            if key != "class" {
                element.attrs.push((key, value));
            }
        }
        let is_template = element.tag == "template";
        let id = self.push(NodeKind::Element(element));
        if is_template {
            let content = self.create_fragment();
            if let Some(element) = self.element_mut(id) {
                element.content = Some(content);
            }
        }
        id
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.push(NodeKind::Fragment)
    }

    /// Create an element and append it to `parent`.
    pub fn append_element<I, K, V>(&mut self, parent: NodeId, tag: &str, attrs: I) -> Result<NodeId>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let id = self.create_element(tag, attrs);
        self.append_child(parent, id)?;
        Ok(id)
    }

    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> Result<NodeId> {
        let id = self.create_text(text);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Append `child` as the last child of `parent`, moving it from any
    /// previous parent. Appending a fragment moves its children instead.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self.node(parent).ok_or(ModelError::UnknownNode(parent))?;
        if matches!(parent_node.kind, NodeKind::Text(_)) {
            return Err(ModelError::CannotHaveChildren(parent));
        }
        let child_node = self.node(child).ok_or(ModelError::UnknownNode(child))?;
        if child == self.root {
            return Err(ModelError::WouldCycle { parent, child });
        }
        if matches!(child_node.kind, NodeKind::Fragment) {
            let moved = child_node.children.clone();
            for grandchild in moved {
                self.append_child(parent, grandchild)?;
            }
            return Ok(());
        }
        if parent == child || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(ModelError::WouldCycle { parent, child });
        }
        self.unlink(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Remove `node` from its parent. Detaching an already detached node is a
    /// no-op.
    pub fn detach(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(ModelError::DetachRoot);
        }
        if self.node(node).is_none() {
            return Err(ModelError::UnknownNode(node));
        }
        self.unlink(node);
        if let Some(focused) = self.focused
            && (focused == node || self.ancestors(focused).any(|ancestor| ancestor == node))
        {
            self.focused = None;
        }
        Ok(())
    }

    fn unlink(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|id| *id != node);
        }
    }

    /// Deep clone of `node` and its subtree, detached. Template content is
    /// cloned along with the template element.
    pub fn clone_subtree(&mut self, node: NodeId) -> Result<NodeId> {
        let source = self.node(node).ok_or(ModelError::UnknownNode(node))?;
        let mut kind = source.kind.clone();
        let children = source.children.clone();
        let content = match &mut kind {
            NodeKind::Element(element) => element.content.take(),
            _ => None,
        };
        if matches!(kind, NodeKind::Document) {
            kind = NodeKind::Fragment;
        }
        let copy = self.push(kind);
        if let Some(content) = content {
            let content_copy = self.clone_subtree(content)?;
            if let Some(element) = self.element_mut(copy) {
                element.content = Some(content_copy);
            }
        }
        for child in children {
            let child_copy = self.clone_subtree(child)?;
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        Ok(copy)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Ancestors of `node`, nearest first, excluding `node` itself.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            document: self,
            cursor: self.parent(node),
        }
    }

    /// Descendants of `node` in document order, excluding `node` itself.
    /// Template content is not part of the tree and is not visited.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        node == self.root || self.ancestors(node).any(|ancestor| ancestor == self.root)
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.node(node).map(|n| &n.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(node.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(element)) => Some(element),
            _ => None,
        }
    }

    fn element_mut_or_err(&mut self, node: NodeId) -> Result<&mut Element> {
        if self.node(node).is_none() {
            return Err(ModelError::UnknownNode(node));
        }
        self.element_mut(node).ok_or(ModelError::NotAnElement(node))
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(Element::tag)
    }

    pub fn is_tag(&self, node: NodeId, tag: &str) -> bool {
        self.tag_name(node)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|element| element.attr(name))
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        let element = self.element_mut_or_err(node)?;
        let name = name.to_ascii_lowercase();
        if name == "class" {
            element.classes = split_classes(value);
            return Ok(());
        }
        match element.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => element.attrs.push((name, value.to_string())),
        }
        Ok(())
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> Result<()> {
        let element = self.element_mut_or_err(node)?;
        element.attrs.retain(|(key, _)| key != name);
        Ok(())
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.element(node).map(Element::classes).unwrap_or(&[])
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    /// Add `class`; returns whether the class list changed.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<bool> {
        let element = self.element_mut_or_err(node)?;
        if element.classes.iter().any(|c| c == class) {
            return Ok(false);
        }
        element.classes.push(class.to_string());
        Ok(true)
    }

    /// Remove `class`; returns whether the class list changed.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<bool> {
        let element = self.element_mut_or_err(node)?;
        let before = element.classes.len();
        element.classes.retain(|c| c != class);
        Ok(element.classes.len() != before)
    }

    /// Raw value state of an element (empty for non-elements).
    pub fn value(&self, node: NodeId) -> &str {
        self.element(node).map(Element::value).unwrap_or("")
    }

    /// Current value as a form control reports it.
    ///
    /// A `select` reports its selected option, or its first option unless
    /// its selection was cleared; an `option` falls back to its text,
    /// everything else its value state.
    pub fn control_value(&self, node: NodeId) -> String {
        match self.tag_name(node) {
            Some("select") => {
                let options = self.options_of(node);
                let unselected = self.element(node).is_some_and(|select| select.unselected);
                options
                    .iter()
                    .copied()
                    .find(|option| self.is_checked(*option))
                    .or_else(|| options.first().copied().filter(|_| !unselected))
                    .map(|option| self.option_value(option))
                    .unwrap_or_default()
            }
            Some("option") => self.option_value(node),
            _ => self.value(node).to_string(),
        }
    }

    fn options_of(&self, select: NodeId) -> Vec<NodeId> {
        self.descendants(select)
            .into_iter()
            .filter(|node| self.is_tag(*node, "option"))
            .collect()
    }

    fn option_value(&self, option: NodeId) -> String {
        match self.attr(option, "value") {
            Some(value) => value.to_string(),
            None => self.text_content(option).trim().to_string(),
        }
    }

    /// Set the value of a control.
    ///
    /// For a `select` this selects the first option with a matching value
    /// and deselects the others. When no option matches, nothing is
    /// selected and the select reports `""`.
    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<()> {
        if self.is_tag(node, "select") {
            let options = self.options_of(node);
            let chosen = options
                .iter()
                .copied()
                .find(|option| self.option_value(*option) == value);
            for option in options {
                self.element_mut_or_err(option)?.checked = Some(option) == chosen;
            }
            let select = self.element_mut_or_err(node)?;
            select.unselected = chosen.is_none();
            select.value = if chosen.is_some() { value.to_string() } else { String::new() };
            return Ok(());
        }
        self.element_mut_or_err(node)?.value = value.to_string();
        Ok(())
    }

    /// Checkedness of an input, selectedness of an option.
    pub fn is_checked(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(Element::checked)
    }

    /// Check or uncheck a control. Checking a radio button unchecks the other
    /// radio buttons sharing its name in the same form.
    pub fn set_checked(&mut self, node: NodeId, checked: bool) -> Result<()> {
        self.element_mut_or_err(node)?.checked = checked;
        if !checked || self.attr(node, "type") != Some("radio") {
            return Ok(());
        }
        let Some(name) = self.attr(node, "name").map(str::to_string) else {
            return Ok(());
        };
        let scope = self.form_owner(node).unwrap_or(self.root);
        let siblings: Vec<NodeId> = self
            .descendants(scope)
            .into_iter()
            .filter(|other| {
                *other != node
                    && self.attr(*other, "type") == Some("radio")
                    && self.attr(*other, "name") == Some(name.as_str())
            })
            .collect();
        for other in siblings {
            self.element_mut_or_err(other)?.checked = false;
        }
        Ok(())
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(Element::disabled)
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) -> Result<()> {
        self.element_mut_or_err(node)?.disabled = disabled;
        Ok(())
    }

    pub fn files(&self, node: NodeId) -> &[String] {
        self.element(node).map(Element::files).unwrap_or(&[])
    }

    pub fn set_files(&mut self, node: NodeId, files: Vec<String>) -> Result<()> {
        self.element_mut_or_err(node)?.files = files;
        Ok(())
    }

    /// Content fragment of a `template` element.
    pub fn template_content(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).and_then(|element| element.content)
    }

    pub fn text_content(&self, node: NodeId) -> String {
        match self.node(node).map(|n| &n.kind) {
            Some(NodeKind::Text(text)) => text.clone(),
            Some(_) => self
                .children(node)
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
            None => String::new(),
        }
    }

    /// Nearest `form` ancestor of `node`.
    pub fn form_owner(&self, node: NodeId) -> Option<NodeId> {
        self.ancestors(node).find(|ancestor| self.is_tag(*ancestor, "form"))
    }

    /// First connected element with the given `id` attribute.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|node| self.attr(*node, "id") == Some(id))
    }

    /// Descendants of `scope` (document order) matching `predicate`.
    pub fn find_all<F>(&self, scope: NodeId, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .filter(|node| predicate(self, *node))
            .collect()
    }

    pub fn find_first<F>(&self, scope: NodeId, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .find(|node| predicate(self, *node))
    }

    pub fn elements_by_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.find_all(scope, |doc, node| doc.is_tag(node, tag))
    }

    pub fn elements_with_attr(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.find_all(scope, |doc, node| doc.has_attr(node, name))
    }

    pub fn focus(&mut self, node: NodeId) -> Result<()> {
        self.element(node).ok_or(ModelError::NotAnElement(node))?;
        self.focused = Some(node);
        Ok(())
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }
}

pub struct Ancestors<'a> {
    document: &'a Document,
    cursor: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        self.cursor = self.document.parent(current);
        Some(current)
    }
}

fn split_classes(value: &str) -> Vec<String> {
    let mut classes: Vec<String> = Vec::new();
    for class in value.split_ascii_whitespace() {
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_attrs() -> [(&'static str, &'static str); 0] {
        []
    }

    #[test]
    fn append_and_detach() {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.append_element(root, "form", no_attrs()).unwrap();
        let input = doc.append_element(form, "input", [("name", "a")]).unwrap();
        assert!(doc.is_connected(input));
        doc.detach(form).unwrap();
        assert!(!doc.is_connected(input));
        assert_eq!(doc.parent(input), Some(form));
    }

    #[test]
    fn append_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.append_element(doc.root(), "div", no_attrs()).unwrap();
        let inner = doc.append_element(outer, "div", no_attrs()).unwrap();
        assert_eq!(
            doc.append_child(inner, outer),
            Err(ModelError::WouldCycle {
                parent: inner,
                child: outer
            })
        );
    }

    #[test]
    fn appending_fragment_moves_children() {
        let mut doc = Document::new();
        let template = doc.append_element(doc.root(), "template", no_attrs()).unwrap();
        let content = doc.template_content(template).unwrap();
        doc.append_element(content, "input", [("type", "file")]).unwrap();
        doc.append_element(content, "a", [("role", "remove-templated-row")])
            .unwrap();

        let copy = doc.clone_subtree(content).unwrap();
        let wrapper = doc.append_element(doc.root(), "div", no_attrs()).unwrap();
        doc.append_child(wrapper, copy).unwrap();

        assert_eq!(doc.children(wrapper).len(), 2);
        assert!(doc.children(copy).is_empty());
        assert_eq!(doc.children(content).len(), 2);
    }

    #[test]
    fn class_attribute_seeds_class_list() {
        let mut doc = Document::new();
        let div = doc
            .append_element(doc.root(), "div", [("class", "row d-none row")])
            .unwrap();
        assert_eq!(doc.classes(div), ["row", "d-none"]);
        assert!(!doc.add_class(div, "row").unwrap());
        assert!(doc.remove_class(div, "d-none").unwrap());
        assert!(!doc.has_class(div, "d-none"));
    }

    #[test]
    fn select_reports_selected_option() {
        let mut doc = Document::new();
        let select = doc
            .append_element(doc.root(), "select", [("name", "colour")])
            .unwrap();
        let red = doc.append_element(select, "option", [("value", "red")]).unwrap();
        let blue = doc.append_element(select, "option", no_attrs()).unwrap();
        doc.append_text(blue, " blue ").unwrap();

        assert_eq!(doc.control_value(select), "red");
        doc.set_value(select, "blue").unwrap();
        assert_eq!(doc.control_value(select), "blue");
        assert!(!doc.is_checked(red));
    }

    #[test]
    fn select_without_matching_option_reports_empty() {
        let mut doc = Document::new();
        let select = doc
            .append_element(doc.root(), "select", [("name", "size")])
            .unwrap();
        let small = doc.append_element(select, "option", [("value", "s")]).unwrap();
        doc.append_element(select, "option", [("value", "m")]).unwrap();

        doc.set_value(select, "xl").unwrap();
        assert_eq!(doc.control_value(select), "");
        assert_eq!(doc.value(select), "");
        assert!(!doc.is_checked(small));

        doc.set_value(select, "s").unwrap();
        assert_eq!(doc.control_value(select), "s");
        assert!(doc.is_checked(small));
    }

    #[test]
    fn checking_radio_unchecks_group() {
        let mut doc = Document::new();
        let form = doc.append_element(doc.root(), "form", no_attrs()).unwrap();
        let yes = doc
            .append_element(
                form,
                "input",
                [("type", "radio"), ("name", "ok"), ("value", "yes"), ("checked", "")],
            )
            .unwrap();
        let no = doc
            .append_element(form, "input", [("type", "radio"), ("name", "ok"), ("value", "no")])
            .unwrap();
        doc.set_checked(no, true).unwrap();
        assert!(!doc.is_checked(yes));
        assert!(doc.is_checked(no));
    }

    #[test]
    fn detaching_focused_subtree_clears_focus() {
        let mut doc = Document::new();
        let row = doc.append_element(doc.root(), "div", no_attrs()).unwrap();
        let input = doc.append_element(row, "input", no_attrs()).unwrap();
        doc.focus(input).unwrap();
        doc.detach(row).unwrap();
        assert_eq!(doc.focused(), None);
    }
}
