//! Lazy-image fade-in
//!
//! Lazily-loaded images start at a hidden baseline and fade in when their
//! load event arrives. State is one boolean per image.

use parking_lot::RwLock;
use std::sync::Arc;

use marquee_dom::{Document, NodeId};

use crate::Result;

/// Images declaring `loading=lazy` are registered.
pub const LAZY_ATTR: &str = "loading";
pub const LAZY_VALUE: &str = "lazy";
/// Baseline class while the image has not loaded yet.
pub const PENDING_CLASS: &str = "fade-pending";
/// Class present once the image has loaded.
pub const LOADED_CLASS: &str = "loaded";

#[derive(Debug, Clone)]
struct FadeTarget {
    node: NodeId,
    loaded: bool,
}

pub struct ImageFade {
    images: Arc<RwLock<Vec<FadeTarget>>>,
}

impl ImageFade {
    pub fn new() -> Self {
        Self {
            images: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register every lazy image under `scope` at the hidden baseline.
    pub fn register(&self, doc: &mut Document, scope: NodeId) -> Result<usize> {
        // Lazy images are matched by tag and attribute, not by class
        let mut found = Vec::new();
        let mut stack = vec![scope];
        while let Some(id) = stack.pop() {
            let Ok(node) = doc.node(id) else { continue };
            if node.is_detached() {
                continue;
            }
            if node.tag == "img" && node.data_attr(LAZY_ATTR) == Some(LAZY_VALUE) {
                found.push(id);
            }
            stack.extend(node.children().iter().copied());
        }

        let mut images = self.images.write();
        for &node in &found {
            doc.add_class(node, PENDING_CLASS)?;
            images.push(FadeTarget {
                node,
                loaded: false,
            });
        }

        Ok(found.len())
    }

    /// Handle a load event. Returns whether the node was a registered,
    /// not-yet-loaded image.
    pub fn on_load(&self, doc: &mut Document, node: NodeId) -> Result<bool> {
        let mut images = self.images.write();
        let Some(target) = images.iter_mut().find(|t| t.node == node) else {
            return Ok(false);
        };
        if target.loaded {
            return Ok(false);
        }

        target.loaded = true;
        doc.remove_class(node, PENDING_CLASS)?;
        doc.add_class(node, LOADED_CLASS)?;
        Ok(true)
    }

    pub fn registered_count(&self) -> usize {
        self.images.read().len()
    }

    pub fn loaded_count(&self) -> usize {
        self.images.read().iter().filter(|t| t.loaded).count()
    }
}

impl Default for ImageFade {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ImageFade {
    fn clone(&self) -> Self {
        Self {
            images: Arc::clone(&self.images),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_load() {
        let mut doc = Document::new("body");
        let root = doc.root();
        let img = doc.create_element("img");
        doc.append_child(root, img).unwrap();
        doc.node_mut(img)
            .unwrap()
            .data
            .insert(LAZY_ATTR.to_string(), LAZY_VALUE.to_string());
        let eager = doc.create_element("img");
        doc.append_child(root, eager).unwrap();

        let fade = ImageFade::new();
        assert_eq!(fade.register(&mut doc, root).unwrap(), 1);
        assert!(doc.has_class(img, PENDING_CLASS));

        assert!(fade.on_load(&mut doc, img).unwrap());
        assert!(doc.has_class(img, LOADED_CLASS));
        assert!(!doc.has_class(img, PENDING_CLASS));
        assert_eq!(fade.loaded_count(), 1);

        // Duplicate load events are no-ops
        assert!(!fade.on_load(&mut doc, img).unwrap());
        // Unregistered images are ignored
        assert!(!fade.on_load(&mut doc, eager).unwrap());
    }
}
