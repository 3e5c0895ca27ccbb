use thiserror::Error;

use formwire_model::{ModelError, NodeId};

use crate::repeater::{GroupId, RowId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("row template {0} has no id")]
    TemplateWithoutId(NodeId),

    #[error("{0} is not a template element")]
    NotATemplate(NodeId),

    #[error("no container '{container_id}' for row template '{template_id}'")]
    MissingContainer {
        template_id: String,
        container_id: String,
    },

    #[error("row template '{0}' has no input")]
    TemplateWithoutInput(String),

    #[error("unknown row group {0:?}")]
    UnknownGroup(GroupId),

    #[error("unknown row {0:?}")]
    UnknownRow(RowId),

    #[error("document error: {0}")]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, RowError>;
