use thiserror::Error;

use crate::NodeKind;

/// Errors produced while loading an attack tree dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to parse attack tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error("root of an attack tree must be a goal, found {0}")]
    RootNotGoal(NodeKind),

    #[error("only the root can be a goal, found nested goal {0:?}")]
    NestedGoal(String),
}
