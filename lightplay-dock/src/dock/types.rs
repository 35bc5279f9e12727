//! Core type definitions for the dock layout
//!
//! This module contains the identifier types, the split direction enum and
//! the small geometry types used for hit-testing and divider resizing.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a panel within a built layout.
///
/// Panel IDs are handles into the layout's panel arena. They stay valid while
/// the splits around the panel are created and collapsed, but are not stable
/// across rebuilds of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelId(pub Uuid);

impl PanelId {
    /// Creates a new random panel ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PanelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Panel({})", self.0)
    }
}

/// Unique identifier for a split node.
///
/// Used by the host to address a divider while it is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitId(pub Uuid);

impl SplitId {
    /// Creates a new random split ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SplitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SplitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Split({})", self.0)
    }
}

/// Axis along which a split divides its space.
///
/// A horizontal split places its children side by side (left | right) and
/// divides the width; a vertical split stacks them (top over bottom) and
/// divides the height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Children side by side, the ratio applies to the width.
    Horizontal,
    /// Children stacked, the ratio applies to the height.
    Vertical,
}

impl SplitDirection {
    /// Returns the wire name of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pointer position in container units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in container units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (never negative).
    pub width: f64,
    /// Height (never negative).
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle. Negative sizes are clamped to zero.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Creates a rectangle anchored at the origin.
    #[must_use]
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Returns true if the rectangle has no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns true if the point lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Maps a point to normalized `[0, 1] x [0, 1]` coordinates.
    ///
    /// Returns `None` for an empty rectangle.
    #[must_use]
    pub fn normalize(&self, point: Point) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        Some((
            (point.x - self.x) / self.width,
            (point.y - self.y) / self.height,
        ))
    }

    /// Returns the extent of the rectangle along the split axis.
    #[must_use]
    pub const fn extent(&self, direction: SplitDirection) -> f64 {
        match direction {
            SplitDirection::Horizontal => self.width,
            SplitDirection::Vertical => self.height,
        }
    }

    /// Returns the pointer offset from the rectangle origin along the split axis.
    #[must_use]
    pub fn offset_of(&self, point: Point, direction: SplitDirection) -> f64 {
        match direction {
            SplitDirection::Horizontal => point.x - self.x,
            SplitDirection::Vertical => point.y - self.y,
        }
    }

    /// Divides the rectangle for a split.
    ///
    /// The first part receives `ratio` of the extent, the divider takes
    /// `divider` units and the second part takes whatever remains.
    #[must_use]
    pub fn split(&self, direction: SplitDirection, ratio: f64, divider: f64) -> (Self, Self) {
        let extent = self.extent(direction);
        let first = (extent * ratio).clamp(0.0, extent);
        let second = (extent - first - divider).max(0.0);
        match direction {
            SplitDirection::Horizontal => (
                Self::new(self.x, self.y, first, self.height),
                Self::new(self.x + first + divider, self.y, second, self.height),
            ),
            SplitDirection::Vertical => (
                Self::new(self.x, self.y, self.width, first),
                Self::new(self.x, self.y + first + divider, self.width, second),
            ),
        }
    }
}
