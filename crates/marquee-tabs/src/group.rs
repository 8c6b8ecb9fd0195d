//! Tab group records
//!
//! Triggers and panes are in-memory records with explicit boolean state; the
//! document classes never hold state of their own.

use marquee_dom::{Document, NodeId};
use serde::{Deserialize, Serialize};

use crate::{ACTIVE_CLASS, HIDDEN_CLASS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabButton {
    /// Trigger element in the document
    pub node: NodeId,
    /// Declared target pane identifier; empty when the trigger declares none
    pub pane_id: String,
    /// Derived, recomputed on every transition
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabPane {
    /// Content element in the document
    pub node: NodeId,
    /// Addressable identifier of the element
    pub pane_id: String,
    /// Derived, recomputed on every transition
    pub visible: bool,
}

/// One container's tab group.
///
/// State machine: `{no-tab-active} ∪ {tab k active}`. `select` transitions
/// unconditionally to `tab k active` from any state, so re-selecting the
/// current tab re-asserts the same state rather than toggling it off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabGroup {
    /// Container element owning the triggers
    pub(crate) container: NodeId,
    /// Section scope the panes were resolved in
    pub(crate) section: NodeId,
    pub(crate) buttons: Vec<TabButton>,
    pub(crate) panes: Vec<TabPane>,
    pub(crate) selected: Option<usize>,
}

impl TabGroup {
    pub(crate) fn new(
        container: NodeId,
        section: NodeId,
        buttons: Vec<TabButton>,
        panes: Vec<TabPane>,
    ) -> Self {
        Self {
            container,
            section,
            buttons,
            panes,
            selected: None,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn section(&self) -> NodeId {
        self.section
    }

    pub fn buttons(&self) -> &[TabButton] {
        &self.buttons
    }

    pub fn panes(&self) -> &[TabPane] {
        &self.panes
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn active_button(&self) -> Option<&TabButton> {
        self.buttons.iter().find(|b| b.active)
    }

    pub fn visible_pane(&self) -> Option<&TabPane> {
        self.panes.iter().find(|p| p.visible)
    }

    /// Transition to `tab index active` and recompute every derived flag.
    ///
    /// A declared pane id matching no pane leaves all panes hidden; the
    /// trigger still activates. When two panes share an id, only the first
    /// in document order becomes visible.
    pub(crate) fn select(&mut self, index: usize) {
        self.selected = Some(index);
        self.recompute();

        tracing::debug!(
            container = %self.container,
            index,
            pane = %self.buttons[index].pane_id,
            "Tab selected"
        );
    }

    /// Transition to `no-tab-active`.
    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
        self.recompute();
    }

    fn recompute(&mut self) {
        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.active = self.selected == Some(i);
        }

        let target = self
            .selected
            .map(|i| self.buttons[i].pane_id.as_str())
            .filter(|id| !id.is_empty());

        let mut shown = false;
        for pane in self.panes.iter_mut() {
            pane.visible = !shown && target == Some(pane.pane_id.as_str());
            shown |= pane.visible;
        }
    }

    /// Project the boolean state onto document classes: `active` present on
    /// exactly the active trigger, `hidden` present on every non-visible pane.
    pub(crate) fn project(&self, doc: &mut Document) -> crate::Result<()> {
        for button in &self.buttons {
            if button.active {
                doc.add_class(button.node, ACTIVE_CLASS)?;
            } else {
                doc.remove_class(button.node, ACTIVE_CLASS)?;
            }
        }
        for pane in &self.panes {
            if pane.visible {
                doc.remove_class(pane.node, HIDDEN_CLASS)?;
            } else {
                doc.add_class(pane.node, HIDDEN_CLASS)?;
            }
        }
        Ok(())
    }
}
