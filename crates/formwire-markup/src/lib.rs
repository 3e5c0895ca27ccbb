//! Form markup loading and rendering for formwire documents.

pub mod error;
pub mod outline;
pub mod reader;
pub mod writer;

pub use error::{MarkupError, Result};
pub use outline::outline;
pub use reader::{VOID_ELEMENTS, is_void, parse_document};
pub use writer::write_markup;
