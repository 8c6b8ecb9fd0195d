//! Scroll reveal
//!
//! Content sections start at a hidden baseline and reveal once the viewport
//! reaches them. Reveal is monotonic: a section never re-hides when scrolled
//! back out. Hosts without intersection reporting reveal everything at
//! observe time (the older-device fallback).

use parking_lot::RwLock;
use std::sync::Arc;

use marquee_dom::{Capabilities, Document, NodeId};

use crate::Result;

/// Sections carrying this class are observed.
pub const CONTENT_SECTION_CLASS: &str = "content-section";
/// Baseline class while a section waits for the viewport.
pub const PENDING_CLASS: &str = "reveal-pending";
/// Class present once a section has been revealed.
pub const REVEALED_CLASS: &str = "revealed";
/// Minimum intersection ratio that counts as "in view".
pub const REVEAL_THRESHOLD: f32 = 0.1;
/// Bottom root margin hosts should apply when computing ratios.
pub const ROOT_MARGIN_BOTTOM_PX: f32 = -100.0;

#[derive(Debug, Clone)]
struct RevealTarget {
    node: NodeId,
    revealed: bool,
}

pub struct RevealObserver {
    targets: Arc<RwLock<Vec<RevealTarget>>>,
    /// No intersection reports will arrive; reveal immediately
    fallback: bool,
}

impl RevealObserver {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            targets: Arc::new(RwLock::new(Vec::new())),
            fallback: !capabilities.intersection_observer,
        }
    }

    /// Register every content section under `scope`. Returns how many were
    /// registered.
    pub fn observe(&self, doc: &mut Document, scope: NodeId) -> Result<usize> {
        let sections = doc.descendants_with_class(scope, CONTENT_SECTION_CLASS);
        let mut targets = self.targets.write();

        for &node in &sections {
            if self.fallback {
                doc.add_class(node, REVEALED_CLASS)?;
                targets.push(RevealTarget {
                    node,
                    revealed: true,
                });
            } else {
                doc.add_class(node, PENDING_CLASS)?;
                targets.push(RevealTarget {
                    node,
                    revealed: false,
                });
            }
        }

        tracing::debug!(
            sections = sections.len(),
            fallback = self.fallback,
            "Observing sections for reveal"
        );

        Ok(sections.len())
    }

    /// Feed one intersection report. Returns whether this report revealed
    /// the section.
    pub fn on_intersection(&self, doc: &mut Document, node: NodeId, ratio: f32) -> Result<bool> {
        if ratio < REVEAL_THRESHOLD {
            return Ok(false);
        }

        let mut targets = self.targets.write();
        let Some(target) = targets.iter_mut().find(|t| t.node == node) else {
            return Ok(false);
        };
        if target.revealed {
            return Ok(false);
        }

        target.revealed = true;
        doc.remove_class(node, PENDING_CLASS)?;
        doc.add_class(node, REVEALED_CLASS)?;
        Ok(true)
    }

    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.targets
            .read()
            .iter()
            .any(|t| t.node == node && t.revealed)
    }

    pub fn revealed_count(&self) -> usize {
        self.targets.read().iter().filter(|t| t.revealed).count()
    }

    pub fn observed_count(&self) -> usize {
        self.targets.read().len()
    }
}

impl Clone for RevealObserver {
    fn clone(&self) -> Self {
        Self {
            targets: Arc::clone(&self.targets),
            fallback: self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_sections(count: usize) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new("body");
        let root = doc.root();
        let sections = (0..count)
            .map(|_| {
                let section = doc.create_element("section");
                doc.append_child(root, section).unwrap();
                doc.add_class(section, CONTENT_SECTION_CLASS).unwrap();
                section
            })
            .collect();
        (doc, sections)
    }

    #[test]
    fn test_threshold_boundary() {
        let (mut doc, sections) = doc_with_sections(1);
        let observer = RevealObserver::new(Capabilities::default());
        let root = doc.root();
        observer.observe(&mut doc, root).unwrap();

        assert!(!observer.on_intersection(&mut doc, sections[0], 0.09).unwrap());
        assert!(!observer.is_revealed(sections[0]));

        assert!(observer.on_intersection(&mut doc, sections[0], 0.1).unwrap());
        assert!(observer.is_revealed(sections[0]));
        assert!(doc.has_class(sections[0], REVEALED_CLASS));
        assert!(!doc.has_class(sections[0], PENDING_CLASS));
    }

    #[test]
    fn test_reveal_is_monotonic() {
        let (mut doc, sections) = doc_with_sections(1);
        let observer = RevealObserver::new(Capabilities::default());
        let root = doc.root();
        observer.observe(&mut doc, root).unwrap();

        observer.on_intersection(&mut doc, sections[0], 0.5).unwrap();
        // Scrolled back out: a zero-ratio report must not re-hide
        assert!(!observer.on_intersection(&mut doc, sections[0], 0.0).unwrap());
        assert!(observer.is_revealed(sections[0]));
    }

    #[test]
    fn test_no_observer_fallback_reveals_immediately() {
        let (mut doc, sections) = doc_with_sections(3);
        let observer = RevealObserver::new(Capabilities {
            touch: true,
            intersection_observer: false,
        });
        let root = doc.root();

        observer.observe(&mut doc, root).unwrap();
        assert_eq!(observer.revealed_count(), 3);
        for section in sections {
            assert!(doc.has_class(section, REVEALED_CLASS));
        }
    }

    #[test]
    fn test_unobserved_node_ignored() {
        let (mut doc, _) = doc_with_sections(1);
        let observer = RevealObserver::new(Capabilities::default());
        let root = doc.root();
        observer.observe(&mut doc, root).unwrap();

        let stray = doc.create_element("div");
        doc.append_child(root, stray).unwrap();
        assert!(!observer.on_intersection(&mut doc, stray, 1.0).unwrap());
    }
}
