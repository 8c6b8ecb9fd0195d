//! Element records
//!
//! Nodes carry only what the presentation layer reads or writes: identity,
//! classes, data attributes, an inline display override and a host-assigned
//! layout rect.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Arena index of a node within its [`Document`](crate::Document).
///
/// Ids are never reused for the lifetime of a document, so a stale id held
/// across a removal stays detectable instead of aliasing a new element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host-assigned layout geometry, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point in document coordinates.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Element tag, e.g. `div` or `button`
    pub tag: String,
    /// The addressable identifier (`id` attribute), if declared
    pub element_id: Option<String>,
    /// Class set; ordering is irrelevant to matching
    pub classes: BTreeSet<String>,
    /// `data-*` attributes, keyed without the prefix
    pub data: BTreeMap<String, String>,
    /// Inline display override from markup, untouched by projection
    pub display: Option<String>,
    /// Layout rect assigned by the host
    pub rect: Rect,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Set once the node is removed from the tree
    pub(crate) detached: bool,
}

impl Node {
    pub(crate) fn new(tag: String) -> Self {
        Self {
            tag,
            element_id: None,
            classes: BTreeSet::new(),
            data: BTreeMap::new(),
            display: None,
            rect: Rect::default(),
            parent: None,
            children: Vec::new(),
            detached: false,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Value of a `data-*` attribute, keyed without the prefix.
    pub fn data_attr(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}

/// Serde-loadable description of a subtree, the static markup boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.center(), (60.0, 40.0));
    }

    #[test]
    fn test_node_spec_defaults() {
        let spec: NodeSpec = serde_json::from_str(r#"{"tag": "div"}"#).unwrap();
        assert_eq!(spec.tag, "div");
        assert!(spec.id.is_none());
        assert!(spec.classes.is_empty());
        assert!(spec.children.is_empty());
    }
}
