//! MARQUEE Tab Switching
//!
//! Per PRD Section 3: each content section owns one tab group, and within a
//! group exactly one trigger is active and exactly one pane visible. The
//! selection lives here as explicit state; the document's classes are a pure
//! projection of it, recomputed on every transition.

mod controller;
mod error;
mod group;
mod policy;

pub use controller::TabController;
pub use error::TabError;
pub use group::{TabButton, TabGroup, TabPane};
pub use policy::InitPolicy;

/// Marker class of a container scope owning one tab group.
pub const CONTAINER_CLASS: &str = "tab-container";
/// Marker class of a trigger control.
pub const TRIGGER_CLASS: &str = "tab-button";
/// Marker class of a content pane.
pub const PANE_CLASS: &str = "tab-content";
/// Enclosing section scope panes are resolved in.
pub const SECTION_CLASS: &str = "content-section";
/// Data attribute on a trigger naming its pane.
pub const TARGET_ATTR: &str = "tab";
/// Projection class present on the active trigger.
pub const ACTIVE_CLASS: &str = "active";
/// Projection class present on every non-visible pane.
pub const HIDDEN_CLASS: &str = "hidden";

pub type Result<T> = std::result::Result<T, TabError>;
