//! Particle bursts
//!
//! Attention on a nav or cta control (hover on pointer hosts, touchstart on
//! touch hosts) scatters six particles radially from the control's center.
//! Each travels a randomized distance and lives for one second.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

use marquee_dom::{Document, NodeId};

use crate::error::EffectError;
use crate::Result;

/// Controls that emit bursts on attention.
pub const NAV_BUTTON_CLASS: &str = "nav-button";
pub const CTA_BUTTON_CLASS: &str = "cta-button";
/// Overlay class carried by particle elements.
pub const PARTICLE_CLASS: &str = "particle";
pub const PARTICLES_PER_BURST: usize = 6;
pub const PARTICLE_LIFETIME_MS: i64 = 1000;
pub const PARTICLE_SIZE: f32 = 4.0;
/// Travel distance: `MIN_DISTANCE + rand * DISTANCE_JITTER`
pub const MIN_DISTANCE: f32 = 40.0;
pub const DISTANCE_JITTER: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct Particle {
    pub id: String,
    /// Control the burst originated from
    pub source: NodeId,
    /// Overlay element appended to the document root
    pub overlay: NodeId,
    /// Burst origin, the source's center
    pub origin_x: f32,
    pub origin_y: f32,
    /// Travel vector to the particle's end position
    pub travel_x: f32,
    pub travel_y: f32,
    pub spawned_at: DateTime<Utc>,
}

impl Particle {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.spawned_at >= Duration::milliseconds(PARTICLE_LIFETIME_MS)
    }
}

pub struct ParticleField {
    particles: Arc<RwLock<Vec<Particle>>>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self {
            particles: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Scatter one burst from the center of `source`.
    pub fn burst(
        &self,
        doc: &mut Document,
        source: NodeId,
        rng: &mut impl Rng,
    ) -> Result<Vec<Particle>> {
        let node = doc.node(source)?;
        if node.is_detached() {
            return Err(EffectError::TargetNotFound(source.to_string()));
        }
        let (origin_x, origin_y) = node.rect.center();
        let root = doc.root();

        let mut spawned = Vec::with_capacity(PARTICLES_PER_BURST);
        for i in 0..PARTICLES_PER_BURST {
            let angle = std::f32::consts::TAU * i as f32 / PARTICLES_PER_BURST as f32;
            let distance = MIN_DISTANCE + rng.gen::<f32>() * DISTANCE_JITTER;

            let overlay = doc.create_element("div");
            doc.add_class(overlay, PARTICLE_CLASS)?;
            doc.append_child(root, overlay)?;

            spawned.push(Particle {
                id: Uuid::new_v4().to_string(),
                source,
                overlay,
                origin_x,
                origin_y,
                travel_x: angle.cos() * distance,
                travel_y: angle.sin() * distance,
                spawned_at: Utc::now(),
            });
        }

        self.particles.write().extend(spawned.iter().cloned());
        Ok(spawned)
    }

    /// Drop expired particles and remove their overlays.
    pub fn sweep(&self, doc: &mut Document, now: DateTime<Utc>) -> usize {
        let expired: Vec<Particle> = {
            let mut particles = self.particles.write();
            let (done, live) = particles.drain(..).partition(|p| p.is_expired(now));
            *particles = live;
            done
        };

        for particle in &expired {
            let _ = doc.remove(particle.overlay);
        }
        expired.len()
    }

    pub fn active_count(&self) -> usize {
        self.particles.read().len()
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ParticleField {
    fn clone(&self) -> Self {
        Self {
            particles: Arc::clone(&self.particles),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_dom::Rect;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn doc_with_control() -> (Document, NodeId) {
        let mut doc = Document::new("body");
        let root = doc.root();
        let control = doc.create_element("button");
        doc.append_child(root, control).unwrap();
        doc.node_mut(control).unwrap().rect = Rect::new(10.0, 10.0, 80.0, 20.0);
        (doc, control)
    }

    #[test]
    fn test_burst_count_and_origin() {
        let (mut doc, control) = doc_with_control();
        let field = ParticleField::new();
        let mut rng = StdRng::seed_from_u64(7);

        let burst = field.burst(&mut doc, control, &mut rng).unwrap();

        assert_eq!(burst.len(), PARTICLES_PER_BURST);
        assert_eq!(field.active_count(), PARTICLES_PER_BURST);
        for particle in &burst {
            assert_eq!((particle.origin_x, particle.origin_y), (50.0, 20.0));
            let distance = (particle.travel_x.powi(2) + particle.travel_y.powi(2)).sqrt();
            assert!(distance >= MIN_DISTANCE - 1e-3);
            assert!(distance <= MIN_DISTANCE + DISTANCE_JITTER + 1e-3);
        }
    }

    #[test]
    fn test_burst_angles_are_even() {
        let (mut doc, control) = doc_with_control();
        let field = ParticleField::new();
        let mut rng = StdRng::seed_from_u64(7);

        let burst = field.burst(&mut doc, control, &mut rng).unwrap();

        for (i, particle) in burst.iter().enumerate() {
            let angle = particle.travel_y.atan2(particle.travel_x);
            let expected = std::f32::consts::TAU * i as f32 / PARTICLES_PER_BURST as f32;
            // atan2 folds into (-pi, pi]
            let expected = if expected > std::f32::consts::PI {
                expected - std::f32::consts::TAU
            } else {
                expected
            };
            assert!((angle - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_sweep_expires_whole_burst() {
        let (mut doc, control) = doc_with_control();
        let field = ParticleField::new();
        let mut rng = StdRng::seed_from_u64(7);

        let burst = field.burst(&mut doc, control, &mut rng).unwrap();
        let newest = burst.last().unwrap().spawned_at;
        let later = newest + Duration::milliseconds(PARTICLE_LIFETIME_MS);

        assert_eq!(field.sweep(&mut doc, later), PARTICLES_PER_BURST);
        assert_eq!(field.active_count(), 0);
    }
}
