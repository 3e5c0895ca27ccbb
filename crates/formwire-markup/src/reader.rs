//! Markup loading.
//!
//! Accepts well-formed XHTML as well as the HTML habits found in templated
//! forms: void elements such as `<input>` without a closing slash and
//! boolean attributes without a value (`required`, `disabled`).
//!
//! Text keeps its whitespace and entity references are resolved into it.
//! Text made of whitespace only is not kept.

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use tracing::debug;

use formwire_model::{Document, NodeId};

use crate::error::{MarkupError, Result};

/// Elements that never have content or a closing tag.
pub const VOID_ELEMENTS: [&str; 8] = ["area", "br", "col", "hr", "img", "input", "link", "meta"];

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

struct Open {
    tag: String,
    /// Where children are appended: the element, or a template's content.
    container: NodeId,
}

/// Parse `input` into a new document.
pub fn parse_document(input: &str) -> Result<Document> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().check_end_names = false;

    let mut document = Document::new();
    let mut stack: Vec<Open> = Vec::new();
    let mut text = String::new();

    loop {
        let parent = stack
            .last()
            .map_or(document.root(), |open| open.container);
        let event = reader.read_event()?;
        match event {
            Event::Text(_) | Event::GeneralRef(_) | Event::CData(_) | Event::Comment(_) => {}
            _ => flush_text(&mut document, parent, &mut text)?,
        }
        match event {
            Event::Start(start) => {
                let (tag, node) = open_element(&mut document, &start)?;
                document.append_child(parent, node)?;
                if !is_void(&tag) {
                    let container = document.template_content(node).unwrap_or(node);
                    stack.push(Open { tag, container });
                }
            }
            Event::Empty(start) => {
                let (_, node) = open_element(&mut document, &start)?;
                document.append_child(parent, node)?;
            }
            Event::End(end) => {
                let tag = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
                if is_void(&tag) {
                    continue;
                }
                let Some(position) = stack.iter().rposition(|open| open.tag == tag) else {
                    return Err(MarkupError::UnexpectedClose(tag));
                };
                for implied in stack.drain(position..).skip(1) {
                    debug!(tag = %implied.tag, "implicitly closed element");
                }
            }
            Event::Text(raw) => text.push_str(&String::from_utf8_lossy(&raw)),
            Event::GeneralRef(reference) => push_reference(&mut text, &reference)?,
            Event::CData(data) => text.push_str(&String::from_utf8_lossy(&data)),
            Event::Eof => break,
            _ => {}
        }
    }

    match stack.pop() {
        Some(open) => Err(MarkupError::Unclosed(open.tag)),
        None => Ok(document),
    }
}

fn flush_text(document: &mut Document, parent: NodeId, text: &mut String) -> Result<()> {
    if !text.trim().is_empty() {
        document.append_text(parent, std::mem::take(text))?;
    }
    text.clear();
    Ok(())
}

/// Unknown named entities are kept as written.
fn push_reference(text: &mut String, reference: &BytesRef<'_>) -> Result<()> {
    if let Some(ch) = reference.resolve_char_ref()? {
        text.push(ch);
        return Ok(());
    }
    let name = String::from_utf8_lossy(reference);
    match resolve_predefined_entity(&name) {
        Some(value) => text.push_str(value),
        None => {
            text.push('&');
            text.push_str(&name);
            text.push(';');
        }
    }
    Ok(())
}

fn open_element(document: &mut Document, start: &BytesStart<'_>) -> Result<(String, NodeId)> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let mut attrs: Vec<(String, String)> = Vec::new();
    for attr in start.html_attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw)?.into_owned();
        attrs.push((key, value));
    }
    let node = document.create_element(&tag, attrs);
    Ok((tag, node))
}
