//! Document tree and scoped queries
//!
//! An arena-backed element tree. Queries are always scoped to a subtree,
//! never global, and return nodes in document order.

use crate::error::DocumentError;
use crate::node::{Node, NodeId, NodeSpec};
use crate::Result;

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Create a document with a single root element.
    pub fn new(root_tag: impl Into<String>) -> Self {
        let root = Node::new(root_tag.into());
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Build a document from a page description.
    pub fn from_spec(spec: &NodeSpec) -> Self {
        let mut doc = Document::new(spec.tag.clone());
        let root = doc.root;
        doc.apply_spec(root, spec);
        for child in &spec.children {
            doc.build_subtree(root, child);
        }
        doc
    }

    /// Parse a JSON page description and build the document from it.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: NodeSpec = serde_json::from_str(json)?;
        Ok(Self::from_spec(&spec))
    }

    fn build_subtree(&mut self, parent: NodeId, spec: &NodeSpec) {
        let id = self.create_element(spec.tag.clone());
        self.apply_spec(id, spec);
        // Fresh ids from create_element are always in range
        let _ = self.append_child(parent, id);
        for child in &spec.children {
            self.build_subtree(id, child);
        }
    }

    fn apply_spec(&mut self, id: NodeId, spec: &NodeSpec) {
        let node = &mut self.nodes[id.0];
        node.element_id = spec.id.clone();
        node.classes = spec.classes.iter().cloned().collect();
        node.data = spec.data.clone();
        node.display = spec.display.clone();
        if let Some(rect) = spec.rect {
            node.rect = rect;
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create an unattached element; place it with [`append_child`](Self::append_child).
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag.into()));
        id
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .ok_or(DocumentError::NodeNotFound(id.0))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .ok_or(DocumentError::NodeNotFound(id.0))
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Detach a node and its subtree. Arena slots stay allocated; detached
    /// nodes drop out of every query instead of aliasing new elements.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        self.node(id)?;
        if let Some(parent) = self.nodes[id.0].parent {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            self.nodes[current.0].detached = true;
            stack.extend(self.nodes[current.0].children.iter().copied());
        }
        Ok(())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes
            .get(id.0)
            .map(|n| !n.detached && n.has_class(class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        self.node_mut(id)?.classes.insert(class.to_string());
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        self.node_mut(id)?.classes.remove(class);
        Ok(())
    }

    /// All descendants of `scope` (exclusive) carrying `class`, in document
    /// order. Detached nodes never match.
    pub fn descendants_with_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(scope, &mut |id, node| {
            if id != scope && node.has_class(class) {
                found.push(id);
            }
        });
        found
    }

    /// First element within `scope` (inclusive) whose `id` attribute matches.
    pub fn element_by_id(&self, scope: NodeId, element_id: &str) -> Option<NodeId> {
        let mut found = None;
        self.walk(scope, &mut |id, node| {
            if found.is_none() && node.element_id.as_deref() == Some(element_id) {
                found = Some(id);
            }
        });
        found
    }

    /// First element within `scope` (inclusive) with the given tag.
    pub fn first_with_tag(&self, scope: NodeId, tag: &str) -> Option<NodeId> {
        let mut found = None;
        self.walk(scope, &mut |id, node| {
            if found.is_none() && node.tag == tag {
                found = Some(id);
            }
        });
        found
    }

    /// Nearest self-or-ancestor carrying `class`.
    pub fn closest(&self, id: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.nodes.get(node_id.0)?;
            if node.detached {
                return None;
            }
            if node.has_class(class) {
                return Some(node_id);
            }
            current = node.parent;
        }
        None
    }

    /// Preorder walk of the subtree under `scope`, skipping detached nodes.
    fn walk(&self, scope: NodeId, visit: &mut impl FnMut(NodeId, &Node)) {
        let Some(node) = self.nodes.get(scope.0) else {
            return;
        };
        if node.detached {
            return;
        }
        visit(scope, node);
        for child in node.children.clone() {
            self.walk(child, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::from_json(
            r#"{
                "tag": "body",
                "children": [
                    {
                        "tag": "section",
                        "classes": ["content-section"],
                        "children": [
                            {
                                "tag": "div",
                                "classes": ["tab-container"],
                                "children": [
                                    {"tag": "button", "classes": ["tab-button"], "data": {"tab": "overview"}},
                                    {"tag": "button", "classes": ["tab-button"], "data": {"tab": "details"}}
                                ]
                            },
                            {"tag": "div", "id": "overview", "classes": ["tab-content"]},
                            {"tag": "div", "id": "details", "classes": ["tab-content"]}
                        ]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = sample();
        let buttons = doc.descendants_with_class(doc.root(), "tab-button");
        assert_eq!(buttons.len(), 2);
        assert_eq!(
            doc.node(buttons[0]).unwrap().data_attr("tab"),
            Some("overview")
        );
        assert_eq!(
            doc.node(buttons[1]).unwrap().data_attr("tab"),
            Some("details")
        );
    }

    #[test]
    fn test_element_by_id_scoped() {
        let doc = sample();
        let section = doc.descendants_with_class(doc.root(), "content-section")[0];
        assert!(doc.element_by_id(section, "overview").is_some());
        assert!(doc.element_by_id(section, "missing").is_none());
    }

    #[test]
    fn test_closest_walks_ancestors() {
        let doc = sample();
        let button = doc.descendants_with_class(doc.root(), "tab-button")[0];
        let section = doc.closest(button, "content-section").unwrap();
        assert!(doc.has_class(section, "content-section"));
        assert!(doc.closest(button, "nonexistent").is_none());
    }

    #[test]
    fn test_remove_detaches_subtree() {
        let mut doc = sample();
        let container = doc.descendants_with_class(doc.root(), "tab-container")[0];
        doc.remove(container).unwrap();
        assert!(doc.descendants_with_class(doc.root(), "tab-button").is_empty());
        assert!(doc.node(container).unwrap().is_detached());
    }

    #[test]
    fn test_class_mutation() {
        let mut doc = sample();
        let button = doc.descendants_with_class(doc.root(), "tab-button")[0];
        doc.add_class(button, "active").unwrap();
        assert!(doc.has_class(button, "active"));
        doc.remove_class(button, "active").unwrap();
        assert!(!doc.has_class(button, "active"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(Document::from_json("not json").is_err());
    }
}
