//! Conditional visibility of form elements driven by other fields' values.
//!
//! Markup declares the relation on the dependent element:
//!
//! ```html
//! <div data-depends="status" data-depends-value="active">…</div>
//! <div data-depends="status,kind" data-depends-value="!draft,a:b">…</div>
//! ```
//!
//! While hidden, the element carries the hidden class and its enabled inputs
//! are disabled and marked auto-suppressed; only marked inputs are enabled
//! again when it shows.

pub mod boundary;
pub mod declaration;
pub mod engine;
pub mod error;
pub mod state;

pub use boundary::{ListenTarget, enclosing_fieldset, listening_target};
pub use declaration::{Condition, ConditionSpec, ListMismatch, parse_declaration};
pub use engine::{DependencyEngine, DependencySetup, Observer, ObserverId, Transition};
pub use error::{DependencyError, Result};
pub use state::StateTable;
