//! Floating header shapes
//!
//! Five translucent shapes drift inside the header for the life of the page.
//! Geometry is randomized once at spawn; there is nothing to sweep.

use parking_lot::RwLock;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

use marquee_dom::{Document, NodeId};

use crate::error::EffectError;
use crate::Result;

/// Overlay class carried by floater elements.
pub const FLOATER_CLASS: &str = "floater";
pub const FLOATER_COUNT: usize = 5;
/// Size: `MIN_SIZE + rand * SIZE_JITTER`
pub const MIN_SIZE: f32 = 20.0;
pub const SIZE_JITTER: f32 = 30.0;
/// Drift cycle: `MIN_PERIOD_S + rand * PERIOD_JITTER_S`
pub const MIN_PERIOD_S: f32 = 8.0;
pub const PERIOD_JITTER_S: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct Floater {
    pub id: String,
    /// Overlay element appended to the header
    pub node: NodeId,
    pub size: f32,
    /// Position within the header, percent of each axis
    pub left_pct: f32,
    pub top_pct: f32,
    /// Full drift cycle, seconds
    pub period_s: f32,
}

pub struct FloaterField {
    floaters: Arc<RwLock<Vec<Floater>>>,
}

impl FloaterField {
    pub fn new() -> Self {
        Self {
            floaters: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Scatter the shapes into `header`.
    pub fn scatter(
        &self,
        doc: &mut Document,
        header: NodeId,
        rng: &mut impl Rng,
    ) -> Result<Vec<Floater>> {
        if doc.node(header)?.is_detached() {
            return Err(EffectError::TargetNotFound(header.to_string()));
        }

        let mut spawned = Vec::with_capacity(FLOATER_COUNT);
        for _ in 0..FLOATER_COUNT {
            let node = doc.create_element("div");
            doc.add_class(node, FLOATER_CLASS)?;
            doc.append_child(header, node)?;

            spawned.push(Floater {
                id: Uuid::new_v4().to_string(),
                node,
                size: MIN_SIZE + rng.gen::<f32>() * SIZE_JITTER,
                left_pct: rng.gen::<f32>() * 100.0,
                top_pct: rng.gen::<f32>() * 100.0,
                period_s: MIN_PERIOD_S + rng.gen::<f32>() * PERIOD_JITTER_S,
            });
        }

        self.floaters.write().extend(spawned.iter().cloned());
        Ok(spawned)
    }

    pub fn count(&self) -> usize {
        self.floaters.read().len()
    }

    pub fn floaters(&self) -> Vec<Floater> {
        self.floaters.read().clone()
    }
}

impl Default for FloaterField {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for FloaterField {
    fn clone(&self) -> Self {
        Self {
            floaters: Arc::clone(&self.floaters),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scatter_geometry_ranges() {
        let mut doc = Document::new("body");
        let root = doc.root();
        let header = doc.create_element("header");
        doc.append_child(root, header).unwrap();

        let field = FloaterField::new();
        let mut rng = StdRng::seed_from_u64(3);
        let floaters = field.scatter(&mut doc, header, &mut rng).unwrap();

        assert_eq!(floaters.len(), FLOATER_COUNT);
        assert_eq!(doc.node(header).unwrap().children().len(), FLOATER_COUNT);
        for floater in &floaters {
            assert!(floater.size >= MIN_SIZE && floater.size <= MIN_SIZE + SIZE_JITTER);
            assert!((0.0..=100.0).contains(&floater.left_pct));
            assert!((0.0..=100.0).contains(&floater.top_pct));
            assert!(
                floater.period_s >= MIN_PERIOD_S
                    && floater.period_s <= MIN_PERIOD_S + PERIOD_JITTER_S
            );
            assert!(doc.has_class(floater.node, FLOATER_CLASS));
        }
    }
}
