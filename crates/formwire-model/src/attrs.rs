//! Declarative attribute surface read from form markup.
//!
//! These names are part of the markup contract and must stay bit-exact.

/// Comma separated list of source field names.
pub const DATA_DEPENDS: &str = "data-depends";
/// Comma separated list of value specs aligned with [`DATA_DEPENDS`].
pub const DATA_DEPENDS_VALUE: &str = "data-depends-value";
/// Id of the drop target region for a file input.
pub const DATA_DROPZONE: &str = "data-dropzone";

pub const DATA_FIELD_OP: &str = "data-field-op";
pub const DATA_FIELD_NAME: &str = "data-field-name";
pub const DATA_FIELD_VALUE: &str = "data-field-value";
pub const DATA_FIELD_TRIGGER: &str = "data-field-trigger";
pub const DATA_FIELD_EFFECT: &str = "data-field-effect";
pub const DATA_FIELD_EFFECT_TARGET: &str = "data-field-effect-target";

pub const ROLE: &str = "role";
/// `role` value marking the remove control inside a row template.
pub const ROLE_REMOVE_TEMPLATED_ROW: &str = "remove-templated-row";

/// Separator between entries of `data-depends` and `data-depends-value`.
pub const DEPENDS_LIST_SEPARATOR: char = ',';
/// Leading marker on a value spec that inverts the match.
pub const NEGATION_MARKER: char = '!';

/// Message shown to the user when dependency lists do not line up.
pub const MISMATCH_MESSAGE: &str = "Mismatch of data-depends and data-depends-value";
