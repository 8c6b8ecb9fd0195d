//! Input events and host capabilities
//!
//! Every behavior in the engine is a synchronous reaction to one of these
//! discrete events. Handlers run to completion on a single thread; no event
//! spans more than one turn.

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum EventKind {
    /// Document finished loading; fired once per page view
    Ready,
    /// Pointer click, coordinates in document space
    Click { x: f32, y: f32 },
    /// Pointer entered the target (hover hosts only)
    MouseEnter,
    /// Touch began on the target (touch hosts only)
    TouchStart,
    /// A lazily-loaded image finished loading
    ImageLoad,
    /// Viewport intersection report for an observed element
    Intersection { ratio: f32 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Event {
    pub target: NodeId,
    pub kind: EventKind,
}

impl Event {
    pub fn new(target: NodeId, kind: EventKind) -> Self {
        Self { target, kind }
    }

    pub fn click(target: NodeId, x: f32, y: f32) -> Self {
        Self::new(target, EventKind::Click { x, y })
    }

    pub fn ready(target: NodeId) -> Self {
        Self::new(target, EventKind::Ready)
    }
}

/// Host feature flags.
///
/// The engine never sniffs its environment; the host declares what it
/// supports and the managers branch on that.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Capabilities {
    /// Touch input host: touch events replace hover
    pub touch: bool,
    /// Whether viewport intersection reports will arrive
    pub intersection_observer: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            touch: false,
            intersection_observer: true,
        }
    }
}

impl Capabilities {
    /// Whether `kind` counts as a "press" on this host: touch hosts press
    /// with touchstart, pointer hosts with click.
    pub fn is_press(&self, kind: &EventKind) -> bool {
        if self.touch {
            matches!(kind, EventKind::TouchStart)
        } else {
            matches!(kind, EventKind::Click { .. })
        }
    }

    /// Whether `kind` counts as "attention" on a decorated control: hover on
    /// pointer hosts, touchstart on touch hosts.
    pub fn is_attention(&self, kind: &EventKind) -> bool {
        if self.touch {
            matches!(kind, EventKind::TouchStart)
        } else {
            matches!(kind, EventKind::MouseEnter)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_serde() {
        let kind = EventKind::Intersection { ratio: 0.25 };
        let json = serde_json::to_string(&kind).unwrap();
        let back: EventKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}
