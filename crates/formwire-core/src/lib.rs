//! Declarative form enhancement.
//!
//! [`FormEnhancer::initialize`] scans a document for `data-depends`
//! declarations, row templates, `data-dropzone` inputs and `data-field-op`
//! actions, and registers listeners for them. Events are then fed in through
//! [`FormEnhancer::dispatch`] or its helpers.
//!
//! ```
//! use formwire_core::{FormEnhancer, RecordedAlerts};
//! use formwire_model::{Document, EnhanceOptions};
//!
//! let mut document = Document::new();
//! let form = document.append_element(document.root(), "form", [("id", "f")]).unwrap();
//! let toggle = document.append_element(form, "input", [("name", "more")]).unwrap();
//! let extra = document
//!     .append_element(form, "div", [("data-depends", "more"), ("data-depends-value", "yes")])
//!     .unwrap();
//!
//! let mut alerts = RecordedAlerts::new();
//! let root = document.root();
//! let mut enhancer =
//!     FormEnhancer::initialize(&mut document, root, EnhanceOptions::default(), &mut alerts).enhancer;
//! assert!(document.has_class(extra, "d-none"));
//!
//! enhancer.change_value(&mut document, toggle, "yes").unwrap();
//! assert!(!document.has_class(extra, "d-none"));
//! ```

pub mod alerts;
pub mod enhancer;
pub mod error;

pub use alerts::{AlertSink, RecordedAlerts, TracingAlerts};
pub use enhancer::{DispatchOutcome, FormEnhancer, Handler, Initialized};
pub use error::{DispatchError, Result, SetupError};
