//! Dock layout model
//!
//! This module provides [`DockLayout`], which owns the layout tree and the
//! arena of live panels for one mounted editor screen. Structural edits grow
//! the tree by wrapping a panel slot in a new split and shrink it by
//! collapsing an emptied panel's split into its sibling.
//!
//! # Example
//!
//! ```
//! use lightplay_dock::dock::{
//!     DockLayout, LayoutDescriptor, SplitDirection, TabTypeRegistry,
//! };
//!
//! let registry = TabTypeRegistry::new();
//! let mut layout = DockLayout::build(
//!     LayoutDescriptor::even(
//!         SplitDirection::Horizontal,
//!         LayoutDescriptor::labels(["X"]),
//!         LayoutDescriptor::labels(["Y"]),
//!     ),
//!     &registry,
//! );
//! assert_eq!(layout.panel_count(), 2);
//!
//! // Removing the only tab of the left panel collapses the split.
//! let left = layout.panel_ids()[0];
//! layout.remove_tab(left, 0);
//! assert_eq!(layout.panel_count(), 1);
//! assert!(layout.root().is_panel());
//! ```

use std::collections::HashMap;

use super::descriptor::LayoutDescriptor;
use super::panel::Panel;
use super::registry::TabTypeRegistry;
use super::tab::Tab;
use super::tree::{
    CollapseResult, DEFAULT_SPLIT_RATIO, Geometry, LayoutNode, SplitNode, clamp_ratio,
};
use super::types::{PanelId, Rect, SplitDirection, SplitId};
use crate::logging::span_names;

/// Default divider thickness in container units.
pub const DEFAULT_DIVIDER_THICKNESS: f64 = 4.0;

/// The live layout of one editor screen.
///
/// Holds the tree rooted at a single node, the arena of panels it references
/// and the container bounds used for geometry. Each build starts a fresh
/// arena; nothing is shared between layouts.
#[derive(Debug)]
pub struct DockLayout {
    root: LayoutNode,
    panels: HashMap<PanelId, Panel>,
    bounds: Rect,
    divider_thickness: f64,
    new_split_ratio: f64,
    persist_requested: bool,
}

impl DockLayout {
    /// Materializes a layout from its description.
    ///
    /// Tabs without explicit behavior are bound through `registry`. Each panel
    /// with tabs activates its configured tab (clamped into range), which
    /// renders that tab immediately.
    #[must_use]
    pub fn build(descriptor: LayoutDescriptor, registry: &TabTypeRegistry) -> Self {
        let _span = crate::trace_operation_debug!(span_names::LAYOUT_BUILD).entered();

        let mut panels = HashMap::new();
        let root = materialize(descriptor, registry, &mut panels);
        tracing::debug!(panels = panels.len(), depth = root.depth(), "Layout built");

        Self {
            root,
            panels,
            bounds: Rect::default(),
            divider_thickness: DEFAULT_DIVIDER_THICKNESS,
            new_split_ratio: DEFAULT_SPLIT_RATIO,
            persist_requested: false,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the root node.
    #[must_use]
    pub const fn root(&self) -> &LayoutNode {
        &self.root
    }

    /// Returns a panel by ID.
    #[must_use]
    pub fn panel(&self, panel_id: PanelId) -> Option<&Panel> {
        self.panels.get(&panel_id)
    }

    /// Returns all panel IDs in tree order.
    #[must_use]
    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.root.panel_ids()
    }

    /// Returns the number of live panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Returns true if the panel is live in this layout.
    #[must_use]
    pub fn contains_panel(&self, panel_id: PanelId) -> bool {
        self.panels.contains_key(&panel_id)
    }

    /// Returns a split by ID.
    #[must_use]
    pub fn split(&self, split_id: SplitId) -> Option<&SplitNode> {
        self.root.find_split(split_id)
    }

    /// Returns the container bounds.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Sets the container bounds used for geometry.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Returns the divider thickness.
    #[must_use]
    pub const fn divider_thickness(&self) -> f64 {
        self.divider_thickness
    }

    /// Sets the divider thickness.
    pub fn set_divider_thickness(&mut self, thickness: f64) {
        self.divider_thickness = thickness.max(0.0);
    }

    /// Returns the ratio given to splits created by [`Self::split_panel`].
    #[must_use]
    pub const fn new_split_ratio(&self) -> f64 {
        self.new_split_ratio
    }

    /// Sets the ratio given to newly created splits.
    pub fn set_new_split_ratio(&mut self, ratio: f64) {
        self.new_split_ratio = clamp_ratio(ratio);
    }

    /// Computes the rectangles of every panel and split.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.root.geometry(self.bounds, self.divider_thickness)
    }

    /// Returns the rectangle of a panel.
    #[must_use]
    pub fn panel_rect(&self, panel_id: PanelId) -> Option<Rect> {
        self.geometry().panel(panel_id)
    }

    /// Returns the rectangle of a split.
    #[must_use]
    pub fn split_rect(&self, split_id: SplitId) -> Option<Rect> {
        self.geometry().split(split_id)
    }

    /// Checks the structural invariants.
    ///
    /// Every panel in the tree is live, every live panel is in the tree, and
    /// only a root panel may be empty.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let ids = self.root.panel_ids();
        if ids.len() != self.panels.len() {
            return false;
        }
        ids.iter().all(|id| {
            self.panels.get(id).is_some_and(|panel| {
                let active_ok = match panel.active_tab_index() {
                    Some(index) => index < panel.len(),
                    None => panel.is_empty(),
                };
                active_ok && (!panel.is_empty() || self.root.is_panel())
            })
        })
    }

    // ========================================================================
    // Tab Operations
    // ========================================================================

    /// Appends a tab to a panel.
    ///
    /// The active tab is unchanged, except that a tab added to an empty panel
    /// becomes active. Returns `false` if the panel does not exist.
    pub fn add_tab(&mut self, panel_id: PanelId, tab: Tab) -> bool {
        let Some(panel) = self.panels.get_mut(&panel_id) else {
            return false;
        };
        let was_empty = panel.is_empty();
        panel.add_tab(tab);
        if was_empty {
            panel.activate(0);
        }
        true
    }

    /// Activates a tab. Unknown panels and out-of-range indices are ignored.
    pub fn activate_tab(&mut self, panel_id: PanelId, index: usize) -> bool {
        self.panels
            .get_mut(&panel_id)
            .is_some_and(|panel| panel.activate(index))
    }

    /// Removes a tab and returns it.
    ///
    /// Out-of-range indices are ignored. If the panel becomes empty it is
    /// deregistered and collapsed out of the tree.
    pub fn remove_tab(&mut self, panel_id: PanelId, index: usize) -> Option<Tab> {
        let panel = self.panels.get_mut(&panel_id)?;
        let tab = panel.take_tab(index)?;
        if panel.is_empty() {
            self.collapse_panel(panel_id);
        }
        Some(tab)
    }

    // ========================================================================
    // Structural Operations
    // ========================================================================

    /// Wraps a panel in a new split with a fresh panel holding `tab`.
    ///
    /// The target keeps all its tabs. With `new_first` the fresh panel is the
    /// first child (left/top), otherwise the second (right/bottom). Returns
    /// the ID of the new panel, or `None` if the target does not exist.
    pub fn split_panel(
        &mut self,
        target: PanelId,
        direction: SplitDirection,
        new_first: bool,
        tab: Tab,
    ) -> Option<PanelId> {
        if !self.panels.contains_key(&target) || !self.root.contains_panel(target) {
            return None;
        }

        let new_id = PanelId::new();
        let mut panel = Panel::new(new_id);
        panel.add_tab(tab);
        panel.activate(0);

        let ratio = self.new_split_ratio;
        self.root.replace_panel(target, |existing| {
            let fresh = LayoutNode::Panel(new_id);
            if new_first {
                LayoutNode::split(direction, ratio, fresh, existing)
            } else {
                LayoutNode::split(direction, ratio, existing, fresh)
            }
        });
        self.panels.insert(new_id, panel);

        tracing::debug!(
            target = %target,
            new_panel = %new_id,
            direction = %direction,
            new_first,
            "Panel split"
        );
        Some(new_id)
    }

    /// Sets a split's ratio. Returns `false` if the split does not exist.
    pub fn set_split_ratio(&mut self, split_id: SplitId, ratio: f64) -> bool {
        match self.root.find_split_mut(split_id) {
            Some(split) => {
                split.ratio = clamp_ratio(ratio);
                true
            }
            None => false,
        }
    }

    /// Removes an emptied panel together with its enclosing split.
    ///
    /// A root panel has no split to collapse into, so it stays in place as an
    /// empty panel.
    fn collapse_panel(&mut self, panel_id: PanelId) {
        let _span =
            crate::trace_operation_debug!(span_names::PANEL_COLLAPSE, panel = %panel_id).entered();

        match self.root.collapse_panel(panel_id) {
            CollapseResult::Collapsed { split } => {
                self.panels.remove(&panel_id);
                self.persist_requested = true;
                tracing::debug!(panel = %panel_id, split = %split, "Empty panel collapsed");
            }
            CollapseResult::IsRoot => {
                tracing::debug!(panel = %panel_id, "Root panel emptied");
            }
            CollapseResult::NotFound => {
                tracing::warn!(panel = %panel_id, "Emptied panel missing from layout tree");
            }
        }
    }

    // ========================================================================
    // Persistence Requests
    // ========================================================================

    /// Marks the layout as changed so the host persists it.
    pub fn request_persist(&mut self) {
        self.persist_requested = true;
    }

    /// Returns true if a save is pending.
    #[must_use]
    pub const fn persist_requested(&self) -> bool {
        self.persist_requested
    }

    /// Returns and clears the pending-save flag.
    pub fn take_persist_request(&mut self) -> bool {
        std::mem::take(&mut self.persist_requested)
    }

    /// Cleans up every active tab before the layout is discarded.
    pub fn teardown(&mut self) {
        for panel in self.panels.values_mut() {
            panel.teardown();
        }
    }
}

fn materialize(
    descriptor: LayoutDescriptor,
    registry: &TabTypeRegistry,
    panels: &mut HashMap<PanelId, Panel>,
) -> LayoutNode {
    match descriptor {
        LayoutDescriptor::Panel(desc) => {
            let id = PanelId::new();
            let mut panel = Panel::new(id);
            for tab in desc.tabs {
                let behavior = tab
                    .behavior
                    .or_else(|| registry.get(&tab.label).cloned());
                if behavior.is_none() {
                    tracing::debug!(label = %tab.label, "Tab has no registered behavior");
                }
                panel.add_tab(Tab::new(tab.label, behavior));
            }
            if !panel.is_empty() {
                panel.activate(desc.active_tab_index.min(panel.len() - 1));
            }
            panels.insert(id, panel);
            LayoutNode::Panel(id)
        }
        LayoutDescriptor::Split(desc) => {
            let first = materialize(*desc.first, registry, panels);
            let second = materialize(*desc.second, registry, panels);
            LayoutNode::split(desc.direction, desc.ratio, first, second)
        }
    }
}
