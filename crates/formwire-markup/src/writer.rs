//! Serialize a document subtree back to markup.
//!
//! Control state is written as attributes, so the output reflects the
//! current `value`, `checked` and `disabled` state rather than the markup the
//! document was loaded from.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use formwire_model::{Document, NodeId, NodeKind};

use crate::error::Result;
use crate::reader::is_void;

const STATE_ATTRS: [&str; 5] = ["value", "checked", "selected", "disabled", "class"];

/// Markup for `node` and its subtree. Writing the document root writes its
/// children.
pub fn write_markup(document: &Document, node: NodeId) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, document, node)?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_node(writer: &mut Writer<Vec<u8>>, document: &Document, node: NodeId) -> Result<()> {
    let Some(entry) = document.node(node) else {
        return Ok(());
    };
    match entry.kind() {
        NodeKind::Document | NodeKind::Fragment => write_children(writer, document, node),
        NodeKind::Text(text) => {
            writer.write_event(Event::Text(BytesText::new(text)))?;
            Ok(())
        }
        NodeKind::Element(element) => {
            let tag = element.tag();
            let mut start = BytesStart::new(tag);
            if !element.classes().is_empty() {
                let classes = element.classes().join(" ");
                start.push_attribute(("class", classes.as_str()));
            }
            for (key, value) in element.attrs() {
                if !STATE_ATTRS.contains(&key.as_str()) {
                    start.push_attribute((key.as_str(), value.as_str()));
                }
            }
            if !element.value().is_empty() {
                start.push_attribute(("value", element.value()));
            }
            if element.checked() {
                let name = if tag == "option" { "selected" } else { "checked" };
                start.push_attribute((name, name));
            }
            if element.disabled() {
                start.push_attribute(("disabled", "disabled"));
            }

            let content = document.template_content(node);
            let has_children = !document.children(node).is_empty()
                || content.is_some_and(|content| !document.children(content).is_empty());
            if is_void(tag) || !has_children {
                if is_void(tag) {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    writer.write_event(Event::End(BytesEnd::new(tag)))?;
                }
                return Ok(());
            }
            writer.write_event(Event::Start(start))?;
            if let Some(content) = content {
                write_children(writer, document, content)?;
            }
            write_children(writer, document, node)?;
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
            Ok(())
        }
    }
}

fn write_children(writer: &mut Writer<Vec<u8>>, document: &Document, node: NodeId) -> Result<()> {
    for child in document.children(node) {
        write_node(writer, document, *child)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn writes_current_state() {
        let mut document =
            parse_document(r#"<form id="f"><input name="a" value="x"/><p>hi</p></form>"#)
                .expect("parse");
        let form = document.element_by_id("f").expect("form");
        let input = document.children(form)[0];
        document.set_value(input, "y").unwrap();
        document.set_disabled(input, true).unwrap();
        document.add_class(input, "d-none").unwrap();

        let markup = write_markup(&document, form).expect("write");
        assert_eq!(
            markup,
            r#"<form id="f"><input class="d-none" name="a" value="y" disabled="disabled"/><p>hi</p></form>"#
        );
    }

    #[test]
    fn template_content_is_written_inside_template() {
        let source = r#"<template id="t"><input type="file"/></template>"#;
        let document = parse_document(source).expect("parse");
        let markup = write_markup(&document, document.root()).expect("write");
        assert_eq!(markup, source);
    }
}
