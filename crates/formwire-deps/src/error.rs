use thiserror::Error;

use formwire_model::{ModelError, NodeId};

use crate::engine::ObserverId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DependencyError {
    /// `data-depends` and `data-depends-value` list a different number of
    /// entries. Fatal for the declaring element.
    #[error(
        "mismatch of data-depends and data-depends-value on {element}: {names} field(s), {values} value spec(s)"
    )]
    ConfigurationMismatch {
        element: NodeId,
        names: usize,
        values: usize,
    },

    /// A declared source field does not name any control in the form.
    #[error("{element} depends on unknown field '{field}'")]
    UnresolvedField { element: NodeId, field: String },

    #[error("unknown dependency observer {0:?}")]
    UnknownObserver(ObserverId),

    #[error("document error: {0}")]
    Model(#[from] ModelError),
}

impl DependencyError {
    /// Whether the end user must be told, rather than only the log.
    pub fn alerts_user(&self) -> bool {
        matches!(self, DependencyError::ConfigurationMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, DependencyError>;
