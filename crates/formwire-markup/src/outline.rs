//! Indented one-line-per-node rendering used for diagnostics and snapshots.

use std::fmt::Write;

use formwire_model::{Document, NodeId, NodeKind, is_form_control};

/// Render `node` and its subtree as an indented outline.
///
/// Each element line reads `tag#id.class` followed by its `name`, current
/// control value, `role` and the `disabled`, `checked`, `focused` flags.
/// Template content is not shown.
pub fn outline(document: &Document, node: NodeId) -> String {
    let mut out = String::new();
    render(document, node, 0, &mut out);
    out
}

fn render(document: &Document, node: NodeId, depth: usize, out: &mut String) {
    let Some(entry) = document.node(node) else {
        return;
    };
    let next_depth = match entry.kind() {
        NodeKind::Document | NodeKind::Fragment => depth,
        NodeKind::Text(text) => {
            let _ = writeln!(out, "{}{:?}", "  ".repeat(depth), text);
            depth + 1
        }
        NodeKind::Element(element) => {
            let mut line = format!("{}{}", "  ".repeat(depth), element.tag());
            if let Some(id) = document.attr(node, "id") {
                let _ = write!(line, "#{id}");
            }
            for class in element.classes() {
                let _ = write!(line, ".{class}");
            }
            if let Some(name) = document.attr(node, "name") {
                let _ = write!(line, " name={name}");
            }
            if is_form_control(document, node) {
                let value = document.control_value(node);
                if !value.is_empty() {
                    let _ = write!(line, " value={value:?}");
                }
            }
            if let Some(role) = document.attr(node, "role") {
                let _ = write!(line, " role={role}");
            }
            if !element.files().is_empty() {
                let _ = write!(line, " files=[{}]", element.files().join(", "));
            }
            if element.disabled() {
                line.push_str(" disabled");
            }
            if element.checked() {
                line.push_str(" checked");
            }
            if document.focused() == Some(node) {
                line.push_str(" focused");
            }
            out.push_str(&line);
            out.push('\n');
            depth + 1
        }
    };
    for child in document.children(node) {
        render(document, *child, next_depth, out);
    }
}
