//! Error types for dock operations
//!
//! This module defines the error type and the drop outcome enum used
//! throughout the dock layout.

use super::types::{PanelId, SplitDirection, SplitId};

/// Errors that can occur when starting a gesture on the layout.
///
/// Tab activation and removal never fail; out-of-range indices there are
/// silently ignored.
#[derive(Debug, thiserror::Error)]
pub enum DockError {
    /// The specified panel was not found.
    #[error("panel not found: {0}")]
    PanelNotFound(PanelId),

    /// The specified split was not found.
    #[error("split not found: {0}")]
    SplitNotFound(SplitId),

    /// The tab index does not exist in the panel.
    #[error("tab index {index} out of range for {panel} with {len} tabs")]
    TabOutOfRange {
        /// Panel that was addressed.
        panel: PanelId,
        /// Requested index.
        index: usize,
        /// Number of tabs in the panel.
        len: usize,
    },

    /// A gesture update arrived with no gesture in progress.
    #[error("no {0} gesture in progress")]
    GestureInactive(&'static str),
}

/// Result of finishing a tab drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The tab was appended to the target panel and activated there.
    Merged {
        /// Panel that received the tab.
        target: PanelId,
    },
    /// The target panel was split and the tab moved into a new panel.
    Split {
        /// Panel that was split; it keeps all its tabs.
        target: PanelId,
        /// Newly created panel holding only the dragged tab.
        new_panel: PanelId,
        /// Direction of the created split.
        direction: SplitDirection,
    },
    /// Nothing changed.
    NoOp,
}

impl DropOutcome {
    /// Returns true if the layout was mutated.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::NoOp)
    }

    /// Returns the panel created by a split drop, if any.
    #[must_use]
    pub const fn new_panel(&self) -> Option<PanelId> {
        match self {
            Self::Split { new_panel, .. } => Some(*new_panel),
            Self::Merged { .. } | Self::NoOp => None,
        }
    }
}
