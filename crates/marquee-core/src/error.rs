//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Document error: {0}")]
    Document(#[from] marquee_dom::DocumentError),

    #[error("Tab error: {0}")]
    Tab(#[from] marquee_tabs::TabError),

    #[error("Effect error: {0}")]
    Effect(#[from] marquee_effects::EffectError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Page not initialized")]
    NotInitialized,
}
