//! Achievement toasts
//!
//! Activating an action card shows a toast in the corner:
//! ```text
//! Entering
//!   ↓ 300 ms slide-in
//! Visible
//!   ↓ 2 s hold
//! Leaving
//!   ↓ 300 ms slide-out, then removed
//! ```
//! Toasts stack; each runs its own clock.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use marquee_dom::{Document, NodeId};

use crate::error::EffectError;
use crate::Result;

/// Cards that show a toast when activated.
pub const ACTION_CARD_CLASS: &str = "action-card";
/// Overlay class carried by toast elements.
pub const TOAST_CLASS: &str = "achievement-toast";
/// Message shown when an action card is activated.
pub const TOAST_MESSAGE: &str = "Progress tracked!";
pub const SLIDE_MS: i64 = 300;
pub const HOLD_MS: i64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastState {
    /// Sliding in from the edge
    Entering,
    /// Fully shown
    Visible,
    /// Sliding back out; removed when done
    Leaving,
}

impl ToastState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: ToastState) -> bool {
        match (self, target) {
            (ToastState::Entering, ToastState::Visible) => true,
            (ToastState::Visible, ToastState::Leaving) => true,
            // Same state is always valid (no-op)
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToastState::Entering => "entering",
            ToastState::Visible => "visible",
            ToastState::Leaving => "leaving",
        }
    }
}

impl std::fmt::Display for ToastState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toast {
    pub id: String,
    pub message: String,
    pub state: ToastState,
    /// Overlay element appended to the document root
    pub overlay: NodeId,
    pub shown_at: DateTime<Utc>,
}

impl Toast {
    /// Attempt to transition to a new state
    pub fn transition_to(&mut self, new_state: ToastState) -> Result<()> {
        if !self.state.can_transition_to(new_state) {
            return Err(EffectError::InvalidTransition {
                from: self.state.to_string(),
                to: new_state.to_string(),
            });
        }

        tracing::debug!(
            toast_id = %self.id,
            from = %self.state,
            to = %new_state,
            "Toast state transition"
        );

        self.state = new_state;
        Ok(())
    }

    /// Moment the toast should be removed entirely.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.shown_at + Duration::milliseconds(SLIDE_MS + HOLD_MS + SLIDE_MS)
    }
}

pub struct ToastTray {
    toasts: Arc<RwLock<Vec<Toast>>>,
}

impl ToastTray {
    pub fn new() -> Self {
        Self {
            toasts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Show a toast. Overlapping toasts are allowed; each is appended
    /// independently.
    pub fn show(&self, doc: &mut Document, message: impl Into<String>) -> Result<Toast> {
        let overlay = doc.create_element("div");
        doc.add_class(overlay, TOAST_CLASS)?;
        let root = doc.root();
        doc.append_child(root, overlay)?;

        let toast = Toast {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            state: ToastState::Entering,
            overlay,
            shown_at: Utc::now(),
        };

        tracing::info!(toast_id = %toast.id, message = %toast.message, "Toast shown");

        self.toasts.write().push(toast.clone());
        Ok(toast)
    }

    /// Advance every toast's clock: slide in, hold, slide out, remove.
    /// Returns how many toasts were removed.
    pub fn sweep(&self, doc: &mut Document, now: DateTime<Utc>) -> usize {
        let removed: Vec<Toast> = {
            let mut toasts = self.toasts.write();

            for toast in toasts.iter_mut() {
                let age = now - toast.shown_at;
                if age >= Duration::milliseconds(SLIDE_MS) && toast.state == ToastState::Entering {
                    let _ = toast.transition_to(ToastState::Visible);
                }
                if age >= Duration::milliseconds(SLIDE_MS + HOLD_MS)
                    && toast.state == ToastState::Visible
                {
                    let _ = toast.transition_to(ToastState::Leaving);
                }
            }

            let (done, live) = toasts.drain(..).partition(|t| now >= t.expires_at());
            *toasts = live;
            done
        };

        for toast in &removed {
            let _ = doc.remove(toast.overlay);
        }
        removed.len()
    }

    pub fn active(&self) -> Vec<Toast> {
        self.toasts.read().clone()
    }

    pub fn active_count(&self) -> usize {
        self.toasts.read().len()
    }
}

impl Default for ToastTray {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ToastTray {
    fn clone(&self) -> Self {
        Self {
            toasts: Arc::clone(&self.toasts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(ToastState::Entering.can_transition_to(ToastState::Visible));
        assert!(ToastState::Visible.can_transition_to(ToastState::Leaving));
        assert!(ToastState::Visible.can_transition_to(ToastState::Visible));
    }

    #[test]
    fn test_invalid_transitions() {
        // Can't skip the visible phase
        assert!(!ToastState::Entering.can_transition_to(ToastState::Leaving));
        // Can't come back once leaving
        assert!(!ToastState::Leaving.can_transition_to(ToastState::Visible));
        assert!(!ToastState::Leaving.can_transition_to(ToastState::Entering));
    }

    #[test]
    fn test_lifecycle_on_schedule() {
        let mut doc = Document::new("body");
        let tray = ToastTray::new();

        let toast = tray.show(&mut doc, TOAST_MESSAGE).unwrap();
        assert_eq!(toast.state, ToastState::Entering);

        // Slid in
        let t1 = toast.shown_at + Duration::milliseconds(SLIDE_MS);
        tray.sweep(&mut doc, t1);
        assert_eq!(tray.active()[0].state, ToastState::Visible);

        // Hold elapsed, sliding out
        let t2 = toast.shown_at + Duration::milliseconds(SLIDE_MS + HOLD_MS);
        tray.sweep(&mut doc, t2);
        assert_eq!(tray.active()[0].state, ToastState::Leaving);

        // Gone
        let t3 = toast.shown_at + Duration::milliseconds(SLIDE_MS + HOLD_MS + SLIDE_MS);
        assert_eq!(tray.sweep(&mut doc, t3), 1);
        assert_eq!(tray.active_count(), 0);
        assert!(doc.node(toast.overlay).unwrap().is_detached());
    }

    #[test]
    fn test_late_sweep_steps_through() {
        let mut doc = Document::new("body");
        let tray = ToastTray::new();

        // A single late sweep must walk the machine through to removal
        // without an illegal Entering -> Leaving jump
        let toast = tray.show(&mut doc, "late").unwrap();
        let much_later = toast.shown_at + Duration::milliseconds(10_000);
        assert_eq!(tray.sweep(&mut doc, much_later), 1);
        assert_eq!(tray.active_count(), 0);
    }

    #[test]
    fn test_toasts_stack() {
        let mut doc = Document::new("body");
        let tray = ToastTray::new();

        tray.show(&mut doc, "one").unwrap();
        tray.show(&mut doc, "two").unwrap();
        assert_eq!(tray.active_count(), 2);
    }
}
