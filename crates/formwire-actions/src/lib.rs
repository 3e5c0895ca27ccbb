//! Small declarative behaviours: field actions that edit string-list values
//! and file drop zones.

pub mod dropzone;
pub mod error;
pub mod field;

pub use dropzone::{DROP_EVENTS, DropZone, DropZoneId, DropZoneSetup, DropZones};
pub use error::{ActionError, ActionIssue, DropZoneError};
pub use field::{ActionId, ActionOutcome, FieldAction, FieldActions, FieldEffect, FieldOperation};
