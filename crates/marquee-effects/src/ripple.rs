//! Click ripples
//!
//! A press on any button spawns a ripple overlay inside it, sized to cover
//! the control and centered on the press point. Ripples live for 500 ms and
//! are retired by the sweep.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use marquee_dom::{Document, NodeId};

use crate::error::EffectError;
use crate::Result;

/// Overlay class carried by ripple elements.
pub const RIPPLE_CLASS: &str = "ripple";
pub const RIPPLE_LIFETIME_MS: i64 = 500;

#[derive(Debug, Clone)]
pub struct Ripple {
    pub id: String,
    /// Button the ripple plays inside
    pub source: NodeId,
    /// Overlay element appended to the source
    pub overlay: NodeId,
    /// Offset of the ripple's top-left within the source rect
    pub x: f32,
    pub y: f32,
    /// Diameter, `max(width, height)` of the source
    pub size: f32,
    pub spawned_at: DateTime<Utc>,
}

impl Ripple {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.spawned_at >= Duration::milliseconds(RIPPLE_LIFETIME_MS)
    }
}

pub struct RippleManager {
    ripples: Arc<RwLock<Vec<Ripple>>>,
}

impl RippleManager {
    pub fn new() -> Self {
        Self {
            ripples: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Spawn a ripple inside `source` for a press at document coordinates
    /// `(press_x, press_y)`.
    pub fn spawn(
        &self,
        doc: &mut Document,
        source: NodeId,
        press_x: f32,
        press_y: f32,
    ) -> Result<Ripple> {
        let node = doc.node(source)?;
        if node.is_detached() {
            return Err(EffectError::TargetNotFound(source.to_string()));
        }
        let rect = node.rect;

        let size = rect.width.max(rect.height);
        let x = press_x - rect.x - size / 2.0;
        let y = press_y - rect.y - size / 2.0;

        let overlay = doc.create_element("span");
        doc.add_class(overlay, RIPPLE_CLASS)?;
        doc.append_child(source, overlay)?;

        let ripple = Ripple {
            id: Uuid::new_v4().to_string(),
            source,
            overlay,
            x,
            y,
            size,
            spawned_at: Utc::now(),
        };

        self.ripples.write().push(ripple.clone());
        Ok(ripple)
    }

    /// Drop expired ripples and remove their overlays. Returns how many were
    /// retired.
    pub fn sweep(&self, doc: &mut Document, now: DateTime<Utc>) -> usize {
        let expired: Vec<Ripple> = {
            let mut ripples = self.ripples.write();
            let (done, live) = ripples.drain(..).partition(|r| r.is_expired(now));
            *ripples = live;
            done
        };

        for ripple in &expired {
            let _ = doc.remove(ripple.overlay);
        }
        expired.len()
    }

    pub fn active_count(&self) -> usize {
        self.ripples.read().len()
    }
}

impl Default for RippleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RippleManager {
    fn clone(&self) -> Self {
        Self {
            ripples: Arc::clone(&self.ripples),
        }
    }
}
