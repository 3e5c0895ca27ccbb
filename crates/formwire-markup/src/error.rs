use thiserror::Error;

use formwire_model::ModelError;

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("entity error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("document error: {0}")]
    Model(#[from] ModelError),

    /// Closing tag without a matching open element.
    #[error("unexpected closing tag </{0}>")]
    UnexpectedClose(String),

    /// Element still open at end of input.
    #[error("element <{0}> is never closed")]
    Unclosed(String),
}

pub type Result<T> = std::result::Result<T, MarkupError>;
