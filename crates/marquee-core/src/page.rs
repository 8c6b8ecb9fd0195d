//! Page facade
//!
//! The central state container for one page view. All presentation state
//! flows through here; the rendered document is purely a projection target.
//! Dispatch is single-threaded and event-driven: every handler runs to
//! completion before the next event is taken.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use marquee_dom::{Document, Event, EventKind, NodeId};
use marquee_effects::{
    FloaterField, ImageFade, ParticleField, RevealObserver, RippleManager, Toast, ToastState,
    ToastTray, ACTION_CARD_CLASS, CTA_BUTTON_CLASS, NAV_BUTTON_CLASS, TOAST_MESSAGE,
};
use marquee_tabs::{TabController, TabGroup};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// Root class set at ready-time on decorated pages.
pub const SMOOTH_SCROLL_CLASS: &str = "smooth-scroll";

pub struct Page {
    /// Configuration
    config: Config,
    /// The host document
    doc: Arc<RwLock<Document>>,
    /// Tab controller handle, present once initialized
    tabs: Arc<RwLock<Option<TabController>>>,
    ripples: RippleManager,
    particles: ParticleField,
    toasts: ToastTray,
    reveal: RevealObserver,
    floaters: FloaterField,
    fade: ImageFade,
    rng: Arc<RwLock<StdRng>>,
}

impl Page {
    pub fn new(config: Config, document: Document) -> Self {
        Self::with_rng(config, document, StdRng::from_entropy())
    }

    /// Deterministic construction for tests and replay.
    pub fn seeded(config: Config, document: Document, seed: u64) -> Self {
        Self::with_rng(config, document, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, document: Document, rng: StdRng) -> Self {
        let reveal = RevealObserver::new(config.capabilities);
        Self {
            config,
            doc: Arc::new(RwLock::new(document)),
            tabs: Arc::new(RwLock::new(None)),
            ripples: RippleManager::new(),
            particles: ParticleField::new(),
            toasts: ToastTray::new(),
            reveal,
            floaters: FloaterField::new(),
            fade: ImageFade::new(),
            rng: Arc::new(RwLock::new(rng)),
        }
    }

    /// The ready-time pass: bring tab groups to their initial state and, on
    /// decorated pages, register the ambient layer. Running it again is a
    /// no-op.
    pub fn initialize(&self) -> Result<()> {
        if self.tabs.read().is_some() {
            tracing::debug!("Page already initialized");
            return Ok(());
        }

        let mut doc = self.doc.write();
        let root = doc.root();

        let controller = TabController::initialize(&mut doc, root, self.config.init_policy)?;

        if self.config.gamification {
            doc.add_class(root, SMOOTH_SCROLL_CLASS)?;
            self.fade.register(&mut doc, root)?;
            self.reveal.observe(&mut doc, root)?;
            if let Some(header) = doc.first_with_tag(root, "header") {
                let mut rng = self.rng.write();
                self.floaters.scatter(&mut doc, header, &mut *rng)?;
            }
        }

        *self.tabs.write() = Some(controller);

        tracing::info!(gamification = self.config.gamification, "Page initialized");

        Ok(())
    }

    /// Route one input event to completion.
    ///
    /// Events aimed at nodes that no longer exist are dropped silently;
    /// dispatching anything but `Ready` before initialization is caller
    /// misuse.
    pub fn dispatch(&self, event: Event) -> Result<()> {
        if matches!(event.kind, EventKind::Ready) {
            return self.initialize();
        }

        if self.tabs.read().is_none() {
            return Err(CoreError::NotInitialized);
        }

        let mut doc = self.doc.write();
        match doc.node(event.target) {
            Ok(node) if !node.is_detached() => {}
            _ => return Ok(()),
        }

        let decorated = self.config.gamification;
        let caps = self.config.capabilities;

        match event.kind {
            // Handled above
            EventKind::Ready => {}

            EventKind::Click { x, y } => {
                {
                    let mut tabs = self.tabs.write();
                    if let Some(tabs) = tabs.as_mut() {
                        tabs.activate_node(&mut doc, event.target)?;
                    }
                }

                if decorated {
                    if let Some(button) = closest_tag(&doc, event.target, "button") {
                        self.ripples.spawn(&mut doc, button, x, y)?;
                    }
                    if caps.is_press(&event.kind)
                        && doc.closest(event.target, ACTION_CARD_CLASS).is_some()
                    {
                        self.toasts.show(&mut doc, TOAST_MESSAGE)?;
                    }
                }
            }

            EventKind::TouchStart => {
                if decorated && caps.is_attention(&event.kind) {
                    if let Some(control) = decorated_control(&doc, event.target) {
                        let mut rng = self.rng.write();
                        self.particles.burst(&mut doc, control, &mut *rng)?;
                    }
                }
                if decorated
                    && caps.is_press(&event.kind)
                    && doc.closest(event.target, ACTION_CARD_CLASS).is_some()
                {
                    self.toasts.show(&mut doc, TOAST_MESSAGE)?;
                }
            }

            EventKind::MouseEnter => {
                if decorated && caps.is_attention(&event.kind) {
                    if let Some(control) = decorated_control(&doc, event.target) {
                        let mut rng = self.rng.write();
                        self.particles.burst(&mut doc, control, &mut *rng)?;
                    }
                }
            }

            EventKind::ImageLoad => {
                if decorated {
                    self.fade.on_load(&mut doc, event.target)?;
                }
            }

            EventKind::Intersection { ratio } => {
                if decorated {
                    self.reveal.on_intersection(&mut doc, event.target, ratio)?;
                }
            }
        }

        Ok(())
    }

    /// Retire every timed effect whose lifetime has elapsed. Returns how
    /// many records were removed.
    pub fn advance(&self, now: DateTime<Utc>) -> usize {
        let mut doc = self.doc.write();
        self.ripples.sweep(&mut doc, now)
            + self.particles.sweep(&mut doc, now)
            + self.toasts.sweep(&mut doc, now)
    }

    /// Direct tab activation, bypassing event resolution.
    pub fn activate_tab(&self, group: usize, button: usize) -> Result<()> {
        let mut doc = self.doc.write();
        let mut tabs = self.tabs.write();
        let tabs = tabs.as_mut().ok_or(CoreError::NotInitialized)?;
        tabs.activate(&mut doc, group, button)?;
        Ok(())
    }

    pub fn with_document<T>(&self, f: impl FnOnce(&Document) -> T) -> T {
        f(&self.doc.read())
    }

    pub fn with_document_mut<T>(&self, f: impl FnOnce(&mut Document) -> T) -> T {
        f(&mut self.doc.write())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Serializable view of the full presentation state.
    pub fn snapshot(&self) -> Result<PageSnapshot> {
        let tabs = self.tabs.read();
        let tabs = tabs.as_ref().ok_or(CoreError::NotInitialized)?;

        Ok(PageSnapshot {
            groups: tabs.groups().iter().map(GroupInfo::from).collect(),
            ripples: self.ripples.active_count(),
            particles: self.particles.active_count(),
            toasts: self.toasts.active().iter().map(ToastInfo::from).collect(),
            floaters: self.floaters.count(),
            sections_observed: self.reveal.observed_count(),
            sections_revealed: self.reveal.revealed_count(),
            images_registered: self.fade.registered_count(),
            images_loaded: self.fade.loaded_count(),
        })
    }
}

impl Clone for Page {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            doc: Arc::clone(&self.doc),
            tabs: Arc::clone(&self.tabs),
            ripples: self.ripples.clone(),
            particles: self.particles.clone(),
            toasts: self.toasts.clone(),
            reveal: self.reveal.clone(),
            floaters: self.floaters.clone(),
            fade: self.fade.clone(),
            rng: Arc::clone(&self.rng),
        }
    }
}

/// Nearest self-or-ancestor with the given tag.
fn closest_tag(doc: &Document, node: NodeId, tag: &str) -> Option<NodeId> {
    let mut current = Some(node);
    while let Some(id) = current {
        let n = doc.node(id).ok()?;
        if n.is_detached() {
            return None;
        }
        if n.tag == tag {
            return Some(id);
        }
        current = n.parent();
    }
    None
}

/// Nearest enclosing control that gets particle bursts.
fn decorated_control(doc: &Document, node: NodeId) -> Option<NodeId> {
    doc.closest(node, NAV_BUTTON_CLASS)
        .or_else(|| doc.closest(node, CTA_BUTTON_CLASS))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupInfo {
    pub container: NodeId,
    pub selected: Option<usize>,
    /// Identifier of the visible pane, when one is visible
    pub visible_pane: Option<String>,
    pub buttons: usize,
    pub panes: usize,
}

impl From<&TabGroup> for GroupInfo {
    fn from(group: &TabGroup) -> Self {
        Self {
            container: group.container(),
            selected: group.selected(),
            visible_pane: group.visible_pane().map(|p| p.pane_id.clone()),
            buttons: group.buttons().len(),
            panes: group.panes().len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastInfo {
    pub message: String,
    pub state: ToastState,
}

impl From<&Toast> for ToastInfo {
    fn from(toast: &Toast) -> Self {
        Self {
            message: toast.message.clone(),
            state: toast.state,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub groups: Vec<GroupInfo>,
    pub ripples: usize,
    pub particles: usize,
    pub toasts: Vec<ToastInfo>,
    pub floaters: usize,
    pub sections_observed: usize,
    pub sections_revealed: usize,
    pub images_registered: usize,
    pub images_loaded: usize,
}
