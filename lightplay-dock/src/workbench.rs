//! Editor workbench
//!
//! [`Workbench`] is the host-facing entry point. It keeps the tab-type
//! registry, the live layout and the in-flight gestures together, routes
//! user input to the layout and saves the layout whenever a gesture asks
//! for it.
//!
//! # Example
//!
//! ```
//! use lightplay_dock::dock::{MountArea, Rect};
//! use lightplay_dock::workbench::{LayoutSource, SCENE_TAB, Workbench};
//!
//! let mut workbench = Workbench::in_memory();
//! workbench.register_tab_type(SCENE_TAB, |area: &mut MountArea| area.set_text("scene"), None::<fn()>);
//!
//! let source = workbench.build_layout(Rect::from_size(1280.0, 720.0));
//! assert_eq!(source, LayoutSource::Default);
//! assert_eq!(workbench.layout().unwrap().panel_count(), 4);
//! ```

use crate::config::LayoutSettings;
use crate::dock::{
    DividerDrag, DockError, DockLayout, DragCoordinator, DropOutcome, DropZone, LayoutDescriptor,
    MountArea, PanelId, Point, Rect, SplitDirection, SplitId, TabTypeRegistry,
};
use crate::persistence::{LayoutPersistence, LayoutStore, MemoryStore};

/// Label of the scene view tab.
pub const SCENE_TAB: &str = "Scene";
/// Label of the inspector tab.
pub const INSPECTOR_TAB: &str = "Inspector";
/// Label of the objects list tab.
pub const OBJECTS_TAB: &str = "Objects";
/// Label of the assets browser tab.
pub const ASSETS_TAB: &str = "Assets";

/// The stock editor arrangement.
///
/// ```text
/// Split(horizontal, 0.7)
/// ├── Scene
/// └── Split(vertical, 0.4)
///     ├── Inspector
///     └── Split(vertical, 0.5)
///         ├── Objects
///         └── Assets
/// ```
#[must_use]
pub fn editor_default_layout() -> LayoutDescriptor {
    LayoutDescriptor::split(
        SplitDirection::Horizontal,
        0.7,
        LayoutDescriptor::labels([SCENE_TAB]),
        LayoutDescriptor::split(
            SplitDirection::Vertical,
            0.4,
            LayoutDescriptor::labels([INSPECTOR_TAB]),
            LayoutDescriptor::split(
                SplitDirection::Vertical,
                0.5,
                LayoutDescriptor::labels([OBJECTS_TAB]),
                LayoutDescriptor::labels([ASSETS_TAB]),
            ),
        ),
    )
}

/// Where a built layout came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSource {
    /// Resolved from the stored layout.
    Restored,
    /// Built from the default arrangement.
    Default,
}

/// Host facade over the dock layout.
#[derive(Debug)]
pub struct Workbench {
    registry: TabTypeRegistry,
    settings: LayoutSettings,
    persistence: LayoutPersistence,
    default_layout: LayoutDescriptor,
    layout: Option<DockLayout>,
    drag: DragCoordinator,
    divider: DividerDrag,
}

impl Workbench {
    /// Creates a workbench storing its layout in `store`.
    #[must_use]
    pub fn new(settings: LayoutSettings, store: impl LayoutStore + 'static) -> Self {
        Self {
            registry: TabTypeRegistry::new(),
            persistence: LayoutPersistence::new(store, settings.storage_key.clone()),
            drag: DragCoordinator::with_threshold(settings.edge_threshold),
            divider: DividerDrag::with_limits(settings.resize_limits()),
            default_layout: editor_default_layout(),
            layout: None,
            settings,
        }
    }

    /// Creates a workbench with default settings and an in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(LayoutSettings::default(), MemoryStore::new())
    }

    /// Replaces the arrangement used when nothing is stored.
    #[must_use]
    pub fn with_default_layout(mut self, default_layout: LayoutDescriptor) -> Self {
        self.default_layout = default_layout;
        self
    }

    /// Registers a tool panel so stored layouts can bind it.
    pub fn register_tab_type<R, C>(&mut self, label: impl Into<String>, render: R, cleanup: Option<C>)
    where
        R: Fn(&mut MountArea) + 'static,
        C: Fn() + 'static,
    {
        self.registry.register(label, render, cleanup);
    }

    /// Returns the tab-type registry.
    #[must_use]
    pub const fn registry(&self) -> &TabTypeRegistry {
        &self.registry
    }

    /// Returns the settings in use.
    #[must_use]
    pub const fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Returns the persistence handle.
    #[must_use]
    pub const fn persistence(&self) -> &LayoutPersistence {
        &self.persistence
    }

    /// Returns the live layout, if one has been built.
    #[must_use]
    pub const fn layout(&self) -> Option<&DockLayout> {
        self.layout.as_ref()
    }

    /// Returns the tab drag coordinator.
    #[must_use]
    pub const fn drag(&self) -> &DragCoordinator {
        &self.drag
    }

    /// Returns the divider gesture.
    #[must_use]
    pub const fn divider(&self) -> &DividerDrag {
        &self.divider
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Builds the layout, preferring the stored one over the default.
    ///
    /// Any previous layout is torn down first.
    pub fn build_layout(&mut self, bounds: Rect) -> LayoutSource {
        let (descriptor, source) = match self.persistence.load(&self.registry) {
            Some(descriptor) => (descriptor, LayoutSource::Restored),
            None => (self.default_layout.clone(), LayoutSource::Default),
        };
        self.install(descriptor, bounds);
        tracing::info!(source = ?source, "Editor layout built");
        source
    }

    /// Forgets the stored layout and rebuilds the default arrangement.
    pub fn reset_layout(&mut self) {
        self.persistence.clear();
        let bounds = self.layout.as_ref().map_or_else(Rect::default, DockLayout::bounds);
        self.install(self.default_layout.clone(), bounds);
        tracing::info!("Editor layout reset");
    }

    /// Cleans up every active tab and drops the layout.
    pub fn teardown(&mut self) {
        self.drag.cancel();
        if let Some(layout) = self.layout.as_mut() {
            self.divider.cancel(layout);
            layout.teardown();
        }
        self.layout = None;
    }

    fn install(&mut self, descriptor: LayoutDescriptor, bounds: Rect) {
        self.teardown();
        let mut layout = DockLayout::build(descriptor, &self.registry);
        layout.set_divider_thickness(self.settings.divider_thickness);
        layout.set_new_split_ratio(self.settings.default_ratio);
        layout.set_bounds(bounds);
        self.layout = Some(layout);
    }

    /// Applies new container bounds.
    pub fn resize(&mut self, bounds: Rect) {
        if let Some(layout) = self.layout.as_mut() {
            layout.set_bounds(bounds);
        }
    }

    /// Saves the layout immediately.
    pub fn save_now(&mut self) -> bool {
        match self.layout.as_mut() {
            Some(layout) => {
                layout.take_persist_request();
                self.persistence.save(layout)
            }
            None => false,
        }
    }

    fn flush_persist(&mut self) {
        if let Some(layout) = self.layout.as_mut() {
            if layout.take_persist_request() {
                self.persistence.save(layout);
            }
        }
    }

    // ========================================================================
    // Tab Input
    // ========================================================================

    /// Handles a click on a tab header.
    pub fn click_tab(&mut self, panel: PanelId, index: usize) -> bool {
        self.layout
            .as_mut()
            .is_some_and(|layout| layout.activate_tab(panel, index))
    }

    /// Closes a tab. Returns `false` for unknown panels or indices.
    pub fn close_tab(&mut self, panel: PanelId, index: usize) -> bool {
        let removed = self
            .layout
            .as_mut()
            .and_then(|layout| layout.remove_tab(panel, index))
            .is_some();
        self.flush_persist();
        removed
    }

    /// Starts dragging a tab.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no such panel or tab.
    pub fn begin_tab_drag(&mut self, panel: PanelId, index: usize) -> Result<(), DockError> {
        let layout = self.layout.as_ref().ok_or(DockError::PanelNotFound(panel))?;
        self.drag.begin(layout, panel, index)
    }

    /// Tracks the pointer over a panel during a tab drag.
    pub fn hover_tab_drag(&mut self, panel: PanelId, point: Point) -> Option<DropZone> {
        let layout = self.layout.as_ref()?;
        self.drag.hover(layout, panel, point)
    }

    /// Clears the highlight of a panel the pointer left.
    pub fn leave_tab_drag(&mut self, panel: PanelId) {
        self.drag.leave(panel);
    }

    /// Drops the dragged tab over a panel.
    pub fn drop_tab(&mut self, panel: PanelId, point: Point) -> DropOutcome {
        let Some(layout) = self.layout.as_mut() else {
            self.drag.cancel();
            return DropOutcome::NoOp;
        };
        let outcome = self.drag.drop(layout, panel, point);
        self.flush_persist();
        outcome
    }

    /// Abandons the tab drag.
    pub fn cancel_tab_drag(&mut self) {
        self.drag.cancel();
    }

    // ========================================================================
    // Divider Input
    // ========================================================================

    /// Presses a divider.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no such split.
    pub fn begin_divider(&mut self, split: SplitId) -> Result<(), DockError> {
        let layout = self.layout.as_ref().ok_or(DockError::SplitNotFound(split))?;
        self.divider.begin(layout, split)
    }

    /// Moves the held divider.
    ///
    /// # Errors
    ///
    /// Returns an error if no divider is held.
    pub fn move_divider(&mut self, point: Point) -> Result<Option<f64>, DockError> {
        let layout = self
            .layout
            .as_mut()
            .ok_or(DockError::GestureInactive("divider"))?;
        self.divider.update(layout, point)
    }

    /// Releases the held divider and saves the layout.
    pub fn end_divider(&mut self) -> bool {
        let ended = self
            .layout
            .as_mut()
            .is_some_and(|layout| self.divider.end(layout));
        self.flush_persist();
        ended
    }

    /// Abandons the divider gesture, restoring the ratio.
    pub fn cancel_divider(&mut self) {
        if let Some(layout) = self.layout.as_mut() {
            self.divider.cancel(layout);
        }
    }
}
