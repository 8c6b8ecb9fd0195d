//! Tab Controller
//!
//! The handle returned by initialization. Owns every tab group found under
//! one document root; dropping the handle releases the per-container state.

use marquee_dom::{Document, NodeId};

use crate::error::TabError;
use crate::group::{TabButton, TabGroup, TabPane};
use crate::policy::InitPolicy;
use crate::Result;
use crate::{CONTAINER_CLASS, PANE_CLASS, SECTION_CLASS, TARGET_ATTR, TRIGGER_CLASS};

pub struct TabController {
    groups: Vec<TabGroup>,
    policy: InitPolicy,
}

impl TabController {
    /// Scan the subtree under `root` for tab containers and bring every
    /// group to its initial state.
    ///
    /// All panes start hidden and all triggers inactive; under
    /// [`InitPolicy::AutoActivateFirst`] each non-empty group then selects
    /// its first trigger in document order. A container with no triggers is
    /// left alone.
    pub fn initialize(doc: &mut Document, root: NodeId, policy: InitPolicy) -> Result<Self> {
        let mut groups = Vec::new();

        for container in doc.descendants_with_class(root, CONTAINER_CLASS) {
            // Panes live in the enclosing content section, not the container
            let section = doc.closest(container, SECTION_CLASS).unwrap_or(container);

            let buttons: Vec<TabButton> = doc
                .descendants_with_class(container, TRIGGER_CLASS)
                .into_iter()
                .map(|node| {
                    let pane_id = doc
                        .node(node)
                        .map(|n| n.data_attr(TARGET_ATTR).unwrap_or_default().to_string())
                        .unwrap_or_default();
                    TabButton {
                        node,
                        pane_id,
                        active: false,
                    }
                })
                .collect();

            let panes: Vec<TabPane> = doc
                .descendants_with_class(section, PANE_CLASS)
                .into_iter()
                .map(|node| {
                    let pane_id = doc
                        .node(node)
                        .ok()
                        .and_then(|n| n.element_id.clone())
                        .unwrap_or_default();
                    TabPane {
                        node,
                        pane_id,
                        visible: false,
                    }
                })
                .collect();

            let mut group = TabGroup::new(container, section, buttons, panes);
            group.clear_selection();
            if policy == InitPolicy::AutoActivateFirst && !group.is_empty() {
                group.select(0);
            }
            group.project(doc)?;
            groups.push(group);
        }

        tracing::info!(
            groups = groups.len(),
            policy = %policy,
            "Tab controller initialized"
        );

        Ok(Self { groups, policy })
    }

    pub fn policy(&self) -> InitPolicy {
        self.policy
    }

    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Result<&TabGroup> {
        self.groups.get(index).ok_or(TabError::GroupNotFound(index))
    }

    /// Transition one group to `tab button_index active` and reproject it.
    ///
    /// Unconditional from any state and idempotent; other groups are never
    /// touched.
    pub fn activate(
        &mut self,
        doc: &mut Document,
        group_index: usize,
        button_index: usize,
    ) -> Result<()> {
        let group = self
            .groups
            .get_mut(group_index)
            .ok_or(TabError::GroupNotFound(group_index))?;

        if button_index >= group.buttons().len() {
            return Err(TabError::ButtonNotFound {
                group: group_index,
                index: button_index,
            });
        }

        group.select(button_index);
        group.project(doc)
    }

    /// Resolve an interaction target to its trigger and activate it.
    ///
    /// The target may be the trigger element itself or any descendant of it.
    /// Returns `Ok(false)` when the node belongs to no known trigger.
    pub fn activate_node(&mut self, doc: &mut Document, node: NodeId) -> Result<bool> {
        let Some(trigger) = doc.closest(node, TRIGGER_CLASS) else {
            return Ok(false);
        };

        let hit = self.groups.iter().enumerate().find_map(|(gi, group)| {
            group
                .buttons()
                .iter()
                .position(|b| b.node == trigger)
                .map(|bi| (gi, bi))
        });

        match hit {
            Some((gi, bi)) => {
                self.activate(doc, gi, bi)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
