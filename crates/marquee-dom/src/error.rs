//! Document error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Node not found: {0}")]
    NodeNotFound(usize),

    #[error("Malformed page description: {0}")]
    Malformed(#[from] serde_json::Error),
}
