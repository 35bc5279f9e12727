//! Dockable panel layout
//!
//! This module provides the layout engine behind the editor workbench: a
//! binary tree of splits and tabbed panels that users rearrange by dragging
//! tabs and dividers.
//!
//! # Architecture
//!
//! - **Arena-backed tree**: the tree holds panel handles, the layout owns the panels
//! - **Structural edits**: edge drops wrap a panel in a new split, emptied panels collapse
//! - **Registry binding**: tabs carry only a label; behavior comes from the registry
//!
//! # Module Structure
//!
//! - `types` - Handles and geometry (`PanelId`, `SplitId`, `SplitDirection`, `Rect`)
//! - `tab` - Tabs and their content area (`Tab`, `TabBehavior`, `MountArea`)
//! - `panel` - Tab container (`Panel`)
//! - `tree` - Layout tree (`LayoutNode`, `SplitNode`)
//! - `descriptor` - Build configuration (`LayoutDescriptor`)
//! - `registry` - Label to behavior mapping (`TabTypeRegistry`)
//! - `model` - Live layout (`DockLayout`)
//! - `drag` - Tab drag-and-drop (`DragCoordinator`, `DropZone`)
//! - `resize` - Divider resizing (`DividerDrag`)
//! - `error` - Error types (`DockError`, `DropOutcome`)
//!
//! # Example
//!
//! ```
//! use lightplay_dock::dock::{
//!     DockLayout, DragCoordinator, DropOutcome, DropZone, LayoutDescriptor, TabTypeRegistry,
//! };
//!
//! let mut registry = TabTypeRegistry::new();
//! registry.register("Scene", |area| area.set_text("scene"), None::<fn()>);
//! registry.register("Inspector", |area| area.set_text("inspector"), None::<fn()>);
//!
//! let mut layout = DockLayout::build(
//!     LayoutDescriptor::labels(["Scene", "Inspector"]),
//!     &registry,
//! );
//! let panel = layout.panel_ids()[0];
//!
//! // Drag the inspector to the right edge of its own panel
//! let mut drag = DragCoordinator::new();
//! drag.begin(&layout, panel, 1).unwrap();
//! let outcome = drag.drop_in_zone(&mut layout, panel, DropZone::Right);
//!
//! assert!(matches!(outcome, DropOutcome::Split { .. }));
//! assert_eq!(layout.panel_count(), 2);
//! ```

mod descriptor;
mod drag;
mod error;
mod model;
mod panel;
mod registry;
mod resize;
mod tab;
mod tree;
mod types;

pub use descriptor::{LayoutDescriptor, PanelDescriptor, SplitDescriptor, TabDescriptor};
pub use drag::{DEFAULT_EDGE_THRESHOLD, DragCoordinator, DragSession, DropZone, classify_zone};
pub use error::{DockError, DropOutcome};
pub use model::{DEFAULT_DIVIDER_THICKNESS, DockLayout};
pub use panel::Panel;
pub use registry::TabTypeRegistry;
pub use resize::{
    DividerDrag, MIN_EXTENT_HORIZONTAL, MIN_EXTENT_VERTICAL, ResizeLimits, ratio_for_offset,
};
pub use tab::{CleanupFn, MountArea, RenderFn, Tab, TabBehavior};
pub use tree::{
    CollapseResult, DEFAULT_SPLIT_RATIO, Geometry, LayoutNode, MAX_SPLIT_RATIO, MIN_SPLIT_RATIO,
    SplitNode, clamp_ratio,
};
pub use types::{PanelId, Point, Rect, SplitDirection, SplitId};
