use thiserror::Error;

use formwire_actions::{ActionError, DropZoneError};
use formwire_deps::DependencyError;
use formwire_model::{ModelError, NodeId};
use formwire_rows::RowError;

/// A declaration that could not be wired during initialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error(transparent)]
    Dependency(#[from] DependencyError),

    #[error(transparent)]
    Row(#[from] RowError),

    #[error(transparent)]
    DropZone(#[from] DropZoneError),
}

impl SetupError {
    pub fn alerts_user(&self) -> bool {
        matches!(self, SetupError::Dependency(err) if err.alerts_user())
    }
}

/// Failure while running the handlers of one event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Dependency(#[from] DependencyError),

    #[error(transparent)]
    Row(#[from] RowError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    DropZone(#[from] DropZoneError),

    #[error("{0} is not in the document")]
    Detached(NodeId),

    #[error("document error: {0}")]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
