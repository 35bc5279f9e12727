//! Tab drag-and-drop protocol
//!
//! A drag gesture moves one tab between panels. While a tab is dragged every
//! eligible panel is a drop target; the pointer position inside a target
//! picks one of five [`DropZone`]s. Dropping on the center merges the tab
//! into the target, dropping on an edge splits the target and places the tab
//! in a fresh panel on that side.
//!
//! Only one gesture is in flight at a time. [`DragCoordinator`] owns the
//! session and clears it on every drop or cancel.

use std::fmt;

use super::error::{DockError, DropOutcome};
use super::model::DockLayout;
use super::tab::{Tab, TabBehavior};
use super::types::{PanelId, Point, SplitDirection};
use crate::logging::span_names;

/// Fraction of a panel's width/height that counts as an edge zone.
pub const DEFAULT_EDGE_THRESHOLD: f64 = 0.22;

/// Region of a target panel under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropZone {
    /// Merge into the target panel.
    Center,
    /// Split horizontally, new panel first.
    Left,
    /// Split horizontally, new panel second.
    Right,
    /// Split vertically, new panel first.
    Top,
    /// Split vertically, new panel second.
    Bottom,
}

impl DropZone {
    /// Returns the split direction an edge zone creates.
    #[must_use]
    pub const fn direction(self) -> Option<SplitDirection> {
        match self {
            Self::Center => None,
            Self::Left | Self::Right => Some(SplitDirection::Horizontal),
            Self::Top | Self::Bottom => Some(SplitDirection::Vertical),
        }
    }

    /// Returns true if the new panel goes before the target.
    #[must_use]
    pub const fn places_new_first(self) -> bool {
        matches!(self, Self::Left | Self::Top)
    }

    /// Returns the zone name used in overlays and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for DropZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a normalized pointer position.
///
/// Horizontal edges are checked before vertical ones, so a top-right corner
/// reports [`DropZone::Right`].
///
/// ```
/// use lightplay_dock::dock::{DropZone, classify_zone, DEFAULT_EDGE_THRESHOLD};
///
/// assert_eq!(classify_zone(0.1, 0.5, DEFAULT_EDGE_THRESHOLD), DropZone::Left);
/// assert_eq!(classify_zone(0.5, 0.5, DEFAULT_EDGE_THRESHOLD), DropZone::Center);
/// assert_eq!(classify_zone(0.9, 0.1, DEFAULT_EDGE_THRESHOLD), DropZone::Right);
/// ```
#[must_use]
pub fn classify_zone(x: f64, y: f64, threshold: f64) -> DropZone {
    if x < threshold {
        DropZone::Left
    } else if x > 1.0 - threshold {
        DropZone::Right
    } else if y < threshold {
        DropZone::Top
    } else if y > 1.0 - threshold {
        DropZone::Bottom
    } else {
        DropZone::Center
    }
}

/// State of the tab currently being dragged.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Panel the tab was picked up from.
    pub source_panel: PanelId,
    /// Index of the tab in its source panel.
    pub source_index: usize,
    /// Label of the dragged tab.
    pub label: String,
    /// Behavior of the dragged tab.
    pub behavior: Option<TabBehavior>,
    /// Panels accepting the drop.
    pub candidates: Vec<PanelId>,
    /// Panel and zone currently highlighted.
    pub highlight: Option<(PanelId, DropZone)>,
}

impl DragSession {
    /// Returns true if the panel accepts the drop.
    #[must_use]
    pub fn accepts(&self, panel_id: PanelId) -> bool {
        self.candidates.contains(&panel_id)
    }
}

/// Owns the single drag session of a layout.
#[derive(Debug, Clone)]
pub struct DragCoordinator {
    session: Option<DragSession>,
    edge_threshold: f64,
}

impl Default for DragCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl DragCoordinator {
    /// Creates an idle coordinator with the default edge threshold.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_threshold(DEFAULT_EDGE_THRESHOLD)
    }

    /// Creates an idle coordinator with a custom edge threshold.
    #[must_use]
    pub const fn with_threshold(edge_threshold: f64) -> Self {
        Self {
            session: None,
            edge_threshold,
        }
    }

    /// Returns the edge threshold.
    #[must_use]
    pub const fn edge_threshold(&self) -> f64 {
        self.edge_threshold
    }

    /// Starts dragging the tab at `index` of `panel_id`.
    ///
    /// Every panel becomes a drop target except a source panel whose only tab
    /// is the dragged one. A session left over from an unfinished gesture is
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the panel or tab does not exist.
    pub fn begin(
        &mut self,
        layout: &DockLayout,
        panel_id: PanelId,
        index: usize,
    ) -> Result<(), DockError> {
        let panel = layout
            .panel(panel_id)
            .ok_or(DockError::PanelNotFound(panel_id))?;
        let tab = panel.tab(index).ok_or(DockError::TabOutOfRange {
            panel: panel_id,
            index,
            len: panel.len(),
        })?;

        if let Some(stale) = self.session.take() {
            tracing::warn!(label = %stale.label, "Discarding unfinished drag session");
        }

        let source_is_single = panel.len() == 1;
        let candidates = layout
            .panel_ids()
            .into_iter()
            .filter(|id| !(source_is_single && *id == panel_id))
            .collect();

        tracing::debug!(panel = %panel_id, index, label = tab.label(), "Tab drag started");
        self.session = Some(DragSession {
            source_panel: panel_id,
            source_index: index,
            label: tab.label().to_owned(),
            behavior: tab.behavior().cloned(),
            candidates,
            highlight: None,
        });
        Ok(())
    }

    /// Returns true while a tab is being dragged.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the active session.
    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Returns the panels showing a drop overlay.
    #[must_use]
    pub fn drop_targets(&self) -> &[PanelId] {
        self.session
            .as_ref()
            .map_or(&[], |session| session.candidates.as_slice())
    }

    /// Returns true if the panel shows a drop overlay.
    #[must_use]
    pub fn is_drop_target(&self, panel_id: PanelId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.accepts(panel_id))
    }

    /// Returns the highlighted panel and zone.
    #[must_use]
    pub fn highlighted(&self) -> Option<(PanelId, DropZone)> {
        self.session.as_ref().and_then(|session| session.highlight)
    }

    /// Classifies the pointer over a panel without touching the session.
    #[must_use]
    pub fn zone_at(&self, layout: &DockLayout, panel_id: PanelId, point: Point) -> Option<DropZone> {
        let rect = layout.panel_rect(panel_id)?;
        if !rect.contains(point) {
            return None;
        }
        let (x, y) = rect.normalize(point)?;
        Some(classify_zone(x, y, self.edge_threshold))
    }

    /// Updates the highlight for a pointer over a candidate panel.
    ///
    /// A pointer outside the panel's bounds clears that panel's highlight.
    pub fn hover(&mut self, layout: &DockLayout, panel_id: PanelId, point: Point) -> Option<DropZone> {
        let zone = self.zone_at(layout, panel_id, point);
        let session = self.session.as_mut()?;
        if !session.accepts(panel_id) {
            return None;
        }
        match zone {
            Some(zone) => session.highlight = Some((panel_id, zone)),
            None => {
                if session.highlight.is_some_and(|(id, _)| id == panel_id) {
                    session.highlight = None;
                }
            }
        }
        zone
    }

    /// Clears the highlight when the pointer leaves a panel.
    pub fn leave(&mut self, panel_id: PanelId) {
        if let Some(session) = self.session.as_mut() {
            if session.highlight.is_some_and(|(id, _)| id == panel_id) {
                session.highlight = None;
            }
        }
    }

    /// Finishes the gesture over a panel at a pointer position.
    ///
    /// A pointer outside the panel resolves to no zone and the drop is a
    /// no-op. The session is cleared in every case.
    pub fn drop(&mut self, layout: &mut DockLayout, target: PanelId, point: Point) -> DropOutcome {
        match self.zone_at(layout, target, point) {
            Some(zone) => self.drop_in_zone(layout, target, zone),
            None => {
                self.cancel();
                DropOutcome::NoOp
            }
        }
    }

    /// Finishes the gesture in an already classified zone.
    ///
    /// The session is cleared in every case. A successful drop requests a
    /// layout save.
    pub fn drop_in_zone(
        &mut self,
        layout: &mut DockLayout,
        target: PanelId,
        zone: DropZone,
    ) -> DropOutcome {
        let Some(session) = self.session.take() else {
            return DropOutcome::NoOp;
        };

        let _span = crate::trace_operation!(
            span_names::TAB_DROP,
            label = %session.label,
            target = %target,
            zone = %zone
        )
        .entered();

        let outcome = apply_drop(layout, &session, target, zone);
        if outcome.is_mutation() {
            layout.request_persist();
            tracing::info!(outcome = ?outcome, "Tab dropped");
        } else {
            tracing::debug!("Drop ignored");
        }
        outcome
    }

    /// Abandons the gesture.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(label = %session.label, "Tab drag cancelled");
        }
    }
}

fn apply_drop(
    layout: &mut DockLayout,
    session: &DragSession,
    target: PanelId,
    zone: DropZone,
) -> DropOutcome {
    if !session.accepts(target) || !layout.contains_panel(target) {
        return DropOutcome::NoOp;
    }

    let source_matches = layout
        .panel(session.source_panel)
        .and_then(|panel| panel.tab(session.source_index))
        .is_some_and(|tab| tab.label() == session.label);
    if !source_matches {
        tracing::warn!(label = %session.label, "Dragged tab no longer at its source");
        return DropOutcome::NoOp;
    }

    let same_panel = session.source_panel == target;
    if same_panel && layout.panel(target).is_some_and(|panel| panel.len() == 1) {
        return DropOutcome::NoOp;
    }

    // The source may collapse here; the target survives because it either
    // differs from the source or still holds other tabs.
    let Some(mut tab) = layout.remove_tab(session.source_panel, session.source_index) else {
        return DropOutcome::NoOp;
    };
    if tab.behavior().is_none() {
        tab = Tab::new(session.label.clone(), session.behavior.clone());
    }

    match zone.direction() {
        None => {
            layout.add_tab(target, tab);
            let last = layout.panel(target).map_or(0, |panel| panel.len() - 1);
            layout.activate_tab(target, last);
            DropOutcome::Merged { target }
        }
        Some(direction) => {
            match layout.split_panel(target, direction, zone.places_new_first(), tab) {
                Some(new_panel) => DropOutcome::Split {
                    target,
                    new_panel,
                    direction,
                },
                None => DropOutcome::NoOp,
            }
        }
    }
}
