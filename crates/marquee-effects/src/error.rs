//! Effect error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EffectError {
    #[error("Effect target not found: {0}")]
    TargetNotFound(String),

    #[error("Invalid toast transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Document error: {0}")]
    Document(#[from] marquee_dom::DocumentError),
}
