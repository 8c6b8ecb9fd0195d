//! MARQUEE Host Document Model
//!
//! The page engine treats the rendered document as an external collaborator:
//! a tree of elements with classes, data attributes and layout rects. MARQUEE
//! owns the state; the document is a projection target plus a source of
//! discrete input events.

mod document;
mod error;
mod event;
mod node;

pub use document::Document;
pub use error::DocumentError;
pub use event::{Capabilities, Event, EventKind};
pub use node::{Node, NodeId, NodeSpec, Rect};

pub type Result<T> = std::result::Result<T, DocumentError>;
