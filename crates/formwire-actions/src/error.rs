use thiserror::Error;

use formwire_model::{ModelError, NodeId};

use crate::dropzone::DropZoneId;
use crate::field::ActionId;

/// Problems noticed while running a field action.
///
/// None of these stop the action; they are logged and reported back in
/// [`crate::ActionOutcome::issues`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionIssue {
    #[error("effect '{0}' has no effect target")]
    MissingEffectTarget(String),

    #[error("effect target '{0}' does not exist")]
    UnknownEffectTarget(String),

    #[error("effect '{effect}' does not exist, specified for target '{target}'")]
    UnknownEffect { effect: String, target: String },

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown field op '{0}'")]
    UnknownOperation(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("unknown field action {0:?}")]
    UnknownAction(ActionId),

    #[error("document error: {0}")]
    Model(#[from] ModelError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DropZoneError {
    /// `data-dropzone` names an id that is not in the document.
    #[error("{input} names drop region '{region}' which does not exist")]
    MissingRegion { input: NodeId, region: String },

    #[error("unknown drop zone {0:?}")]
    UnknownZone(DropZoneId),

    #[error("document error: {0}")]
    Model(#[from] ModelError),
}
