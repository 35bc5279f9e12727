//! `LightPlay` Dock Library
//!
//! This crate provides the dockable panel layout of the `LightPlay` scene
//! editor: a binary tree of resizable splits and tabbed tool panels that
//! users rearrange by dragging tabs and dividers, saved between sessions.
//!
//! # Crate Structure
//!
//! - [`dock`] - Layout tree, panels, tab drag-and-drop, divider resizing
//! - [`persistence`] - Stored layout format and storage backends
//! - [`config`] - Layout settings and persistence
//! - [`logging`] - Tracing setup and standard span names
//! - [`workbench`] - Host facade and the default editor arrangement

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod dock;
pub mod logging;
pub mod persistence;
pub mod workbench;

// =============================================================================
// Convenience re-exports
//
// Flat re-exports used by the property and integration tests. Library users
// should prefer the modular paths (e.g. `lightplay_dock::dock::DockLayout`).
// =============================================================================

pub use config::{ConfigError, LayoutSettings, SettingsManager};
pub use dock::{
    DockError, DockLayout, DragCoordinator, DropOutcome, DropZone, LayoutDescriptor, LayoutNode,
    MountArea, Panel, PanelId, Point, Rect, SplitDirection, SplitId, Tab, TabBehavior,
    TabDescriptor, TabTypeRegistry,
};
pub use logging::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, TracingResult, init_tracing,
    is_tracing_initialized,
};
pub use persistence::{
    FileStore, LAYOUT_STORAGE_KEY, LayoutPersistence, LayoutStore, MemoryStore, PersistError,
    StoredNode,
};
pub use workbench::{LayoutSource, Workbench, editor_default_layout};
