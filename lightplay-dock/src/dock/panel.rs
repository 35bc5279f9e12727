//! Tab container
//!
//! A [`Panel`] holds an ordered list of tabs, at most one of which is active.
//! Activation is the only place tab content is rendered: switching tabs always
//! clears the content area and renders from scratch.
//!
//! Render and cleanup calls alternate per tab. Whenever a tab that is
//! currently rendered is about to be rendered again or removed, its cleanup
//! runs first.

use super::tab::{MountArea, Tab};
use super::types::PanelId;

/// A tabbed container in the layout tree.
#[derive(Debug, Clone)]
pub struct Panel {
    id: PanelId,
    tabs: Vec<Tab>,
    active: Option<usize>,
    content: MountArea,
}

impl Panel {
    /// Creates an empty panel with the given ID.
    #[must_use]
    pub fn new(id: PanelId) -> Self {
        Self {
            id,
            tabs: Vec::new(),
            active: None,
            content: MountArea::new(id),
        }
    }

    /// Returns the panel ID.
    #[must_use]
    pub const fn id(&self) -> PanelId {
        self.id
    }

    /// Returns the tabs in display order.
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Returns the tab at `index`.
    #[must_use]
    pub fn tab(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    /// Returns the tab labels in display order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.tabs.iter().map(Tab::label).collect()
    }

    /// Returns the number of tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Returns true if the panel holds no tabs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Returns the index of the active tab, `None` iff the panel is empty.
    #[must_use]
    pub const fn active_tab_index(&self) -> Option<usize> {
        self.active
    }

    /// Returns the active tab.
    #[must_use]
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|index| self.tabs.get(index))
    }

    /// Returns true if the tab at `index` is the active one.
    #[must_use]
    pub fn is_tab_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Returns the content area the active tab rendered into.
    #[must_use]
    pub const fn content(&self) -> &MountArea {
        &self.content
    }

    /// Appends a tab. The active tab is not changed.
    pub fn add_tab(&mut self, tab: Tab) {
        self.tabs.push(tab);
    }

    /// Activates the tab at `index`.
    ///
    /// Out-of-range indices are ignored and return `false`. The previously
    /// active tab is cleaned up, the content area is cleared and the new tab
    /// renders into it.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }

        if let Some(previous) = self.active.take() {
            if let Some(tab) = self.tabs.get(previous) {
                tab.cleanup();
            }
        }

        self.active = Some(index);
        let tab = &self.tabs[index];
        self.content.mount(tab.label());
        tab.render(&mut self.content);

        tracing::trace!(panel = %self.id, index, label = tab.label(), "Tab activated");
        true
    }

    /// Removes the tab at `index` and returns it.
    ///
    /// Returns `None` without side effects if the index is out of range. When
    /// the removed tab was active, its cleanup runs before removal. If tabs
    /// remain, the tab now at the adjusted active position is (re)activated.
    pub fn take_tab(&mut self, index: usize) -> Option<Tab> {
        if index >= self.tabs.len() {
            return None;
        }

        if self.active == Some(index) {
            self.tabs[index].cleanup();
            self.active = None;
        }

        let tab = self.tabs.remove(index);

        if self.tabs.is_empty() {
            self.active = None;
            self.content.clear();
            return Some(tab);
        }

        let next = match self.active {
            Some(active) if active > index => active - 1,
            Some(active) => active,
            None => index,
        }
        .min(self.tabs.len() - 1);

        // Keep the bookkeeping pointed at the tab that is still rendered so
        // activation cleans up the right one.
        if self.active.is_some() {
            self.active = Some(next);
        }
        self.activate(next);

        Some(tab)
    }

    /// Cleans up the active tab and clears the content area.
    ///
    /// Used when the whole layout is discarded.
    pub fn teardown(&mut self) {
        if let Some(tab) = self.active.take().and_then(|index| self.tabs.get(index)) {
            tab.cleanup();
        }
        self.content.clear();
    }
}
