//! Tab error types
//!
//! Missing pane targets are not errors (they degrade to "no pane visible");
//! these cover caller misuse of the controller API.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab group not found: {0}")]
    GroupNotFound(usize),

    #[error("Trigger {index} not found in group {group}")]
    ButtonNotFound { group: usize, index: usize },

    #[error("Document error: {0}")]
    Document(#[from] marquee_dom::DocumentError),
}
