//! Divider resizing
//!
//! Dragging a split's divider converts the pointer offset inside the split
//! into a ratio. Both children keep a minimum extent along the split axis.
//! The ratio is applied on every pointer move; a save is requested once when
//! the gesture ends.

use super::error::DockError;
use super::model::DockLayout;
use super::types::{Point, SplitDirection, SplitId};
use crate::logging::span_names;

/// Minimum child width of a horizontal split.
pub const MIN_EXTENT_HORIZONTAL: f64 = 100.0;

/// Minimum child height of a vertical split.
pub const MIN_EXTENT_VERTICAL: f64 = 60.0;

/// Minimum extents kept on each side of a divider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLimits {
    /// Minimum width of each child of a horizontal split.
    pub min_horizontal: f64,
    /// Minimum height of each child of a vertical split.
    pub min_vertical: f64,
}

impl Default for ResizeLimits {
    fn default() -> Self {
        Self {
            min_horizontal: MIN_EXTENT_HORIZONTAL,
            min_vertical: MIN_EXTENT_VERTICAL,
        }
    }
}

impl ResizeLimits {
    /// Returns the minimum extent along a split axis.
    #[must_use]
    pub const fn min_extent(&self, direction: SplitDirection) -> f64 {
        match direction {
            SplitDirection::Horizontal => self.min_horizontal,
            SplitDirection::Vertical => self.min_vertical,
        }
    }
}

/// Converts a divider offset into a split ratio.
///
/// The offset is clamped to `[min, total - min - divider]`. When the split is
/// too small to honor both minimums, the lower bound wins. Returns `None` for
/// a split with no extent.
///
/// ```
/// use lightplay_dock::dock::ratio_for_offset;
///
/// assert_eq!(ratio_for_offset(400.0, 1000.0, 0.0, 100.0), Some(0.4));
/// assert_eq!(ratio_for_offset(20.0, 1000.0, 0.0, 100.0), Some(0.1));
/// assert_eq!(ratio_for_offset(990.0, 1000.0, 0.0, 100.0), Some(0.9));
/// ```
#[must_use]
pub fn ratio_for_offset(offset: f64, total: f64, divider: f64, min: f64) -> Option<f64> {
    if total <= 0.0 || !total.is_finite() || !offset.is_finite() {
        return None;
    }
    let clamped = offset.min(total - min - divider).max(min);
    Some(clamped / total)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveResize {
    split: SplitId,
    direction: SplitDirection,
    original_ratio: f64,
}

/// Press-drag-release gesture on one divider.
#[derive(Debug, Clone, Default)]
pub struct DividerDrag {
    active: Option<ActiveResize>,
    limits: ResizeLimits,
}

impl DividerDrag {
    /// Creates an idle gesture with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle gesture with custom limits.
    #[must_use]
    pub const fn with_limits(limits: ResizeLimits) -> Self {
        Self {
            active: None,
            limits,
        }
    }

    /// Returns the limits in use.
    #[must_use]
    pub const fn limits(&self) -> ResizeLimits {
        self.limits
    }

    /// Returns the split being resized.
    #[must_use]
    pub fn active_split(&self) -> Option<SplitId> {
        self.active.map(|active| active.split)
    }

    /// Returns true while a divider is held.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Presses the divider of `split_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the split does not exist.
    pub fn begin(&mut self, layout: &DockLayout, split_id: SplitId) -> Result<(), DockError> {
        let split = layout
            .split(split_id)
            .ok_or(DockError::SplitNotFound(split_id))?;
        self.active = Some(ActiveResize {
            split: split_id,
            direction: split.direction,
            original_ratio: split.ratio,
        });
        tracing::trace!(split = %split_id, ratio = split.ratio, "Divider pressed");
        Ok(())
    }

    /// Applies the pointer position and returns the new ratio.
    ///
    /// Returns `Ok(None)` when the split currently has no extent.
    ///
    /// # Errors
    ///
    /// Returns an error if no divider is held or the split disappeared.
    pub fn update(&mut self, layout: &mut DockLayout, point: Point) -> Result<Option<f64>, DockError> {
        let active = self.active.ok_or(DockError::GestureInactive("divider"))?;
        let rect = layout
            .split_rect(active.split)
            .ok_or(DockError::SplitNotFound(active.split))?;

        let Some(ratio) = ratio_for_offset(
            rect.offset_of(point, active.direction),
            rect.extent(active.direction),
            layout.divider_thickness(),
            self.limits.min_extent(active.direction),
        ) else {
            return Ok(None);
        };

        layout.set_split_ratio(active.split, ratio);
        Ok(layout.split(active.split).map(|split| split.ratio))
    }

    /// Releases the divider and requests a save.
    ///
    /// Returns `false` if no divider was held.
    pub fn end(&mut self, layout: &mut DockLayout) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        let _span =
            crate::trace_operation_debug!(span_names::DIVIDER_RESIZE, split = %active.split)
                .entered();
        layout.request_persist();
        tracing::debug!(
            from = active.original_ratio,
            to = layout.split(active.split).map(|split| split.ratio),
            "Divider released"
        );
        true
    }

    /// Abandons the gesture and restores the ratio captured at press time.
    pub fn cancel(&mut self, layout: &mut DockLayout) {
        if let Some(active) = self.active.take() {
            layout.set_split_ratio(active.split, active.original_ratio);
            tracing::debug!(split = %active.split, "Divider resize cancelled");
        }
    }
}
