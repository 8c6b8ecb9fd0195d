//! MARQUEE Core
//!
//! Central coordination layer for the page presentation engine.
//! Rust owns all presentation state; the rendered document is a stateless
//! projection of it.

mod config;
mod error;
mod page;

pub use config::Config;
pub use error::CoreError;
pub use page::{GroupInfo, Page, PageSnapshot, ToastInfo};

// Re-export core components
pub use marquee_dom::{
    Capabilities, Document, DocumentError, Event, EventKind, Node, NodeId, NodeSpec, Rect,
};
pub use marquee_effects::{
    EffectError, FloaterField, ImageFade, ParticleField, RevealObserver, RippleManager, Toast,
    ToastState, ToastTray, TOAST_MESSAGE,
};
pub use marquee_tabs::{InitPolicy, TabController, TabError, TabGroup};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
