//! MARQUEE Decorative Effects
//!
//! Per PRD Section 4/5: interaction feedback (ripples, achievement toasts)
//! and ambient motion (particle bursts, scroll reveal, floating header
//! shapes, image fade-in). All of it is fire-and-forget: an event spawns a
//! record, a sweep retires it when its lifetime elapses. Nothing here
//! carries a correctness contract beyond bookkeeping; the page stays fully
//! functional with the whole layer disabled.

mod error;
mod fade;
mod floater;
mod particle;
mod reveal;
mod ripple;
mod toast;

pub use error::EffectError;
pub use fade::ImageFade;
pub use floater::{Floater, FloaterField, FLOATER_COUNT};
pub use particle::{
    Particle, ParticleField, CTA_BUTTON_CLASS, NAV_BUTTON_CLASS, PARTICLES_PER_BURST,
    PARTICLE_LIFETIME_MS,
};
pub use reveal::{RevealObserver, REVEAL_THRESHOLD};
pub use ripple::{Ripple, RippleManager, RIPPLE_LIFETIME_MS};
pub use toast::{
    Toast, ToastState, ToastTray, ACTION_CARD_CLASS, HOLD_MS, SLIDE_MS, TOAST_MESSAGE,
};

pub type Result<T> = std::result::Result<T, EffectError>;
