//! Layout tree structure
//!
//! This module provides the binary tree used to represent a dock layout.
//! Each node is either a panel handle or a split node with exactly two
//! children. Panels themselves live in the layout's arena, so relocating a
//! subtree never touches panel state.
//!
//! # Tree Structure
//!
//! ```text
//! Split(horizontal, 0.7)
//! ├── Panel(A)
//! └── Split(vertical, 0.4)
//!     ├── Panel(B)
//!     └── Panel(C)
//! ```

use std::collections::HashMap;

use super::types::{PanelId, Rect, SplitDirection, SplitId};

/// Default split ratio (50% of available space).
pub const DEFAULT_SPLIT_RATIO: f64 = 0.5;

/// Smallest ratio a split keeps.
pub const MIN_SPLIT_RATIO: f64 = 0.01;

/// Largest ratio a split keeps.
pub const MAX_SPLIT_RATIO: f64 = 0.99;

/// Brings a ratio into the open interval a split accepts.
///
/// Non-finite values fall back to [`DEFAULT_SPLIT_RATIO`].
#[must_use]
pub fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() {
        ratio.clamp(MIN_SPLIT_RATIO, MAX_SPLIT_RATIO)
    } else {
        DEFAULT_SPLIT_RATIO
    }
}

/// A node in the layout tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    /// A tab container, addressed through the panel arena.
    Panel(PanelId),
    /// Two children sharing space along one axis.
    Split(SplitNode),
}

/// A split node containing two children.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitNode {
    /// Handle used to address the divider.
    pub id: SplitId,
    /// Split axis.
    pub direction: SplitDirection,
    /// Fraction of the extent given to the first child.
    pub ratio: f64,
    /// First child (left for horizontal, top for vertical).
    pub first: Box<LayoutNode>,
    /// Second child (right for horizontal, bottom for vertical).
    pub second: Box<LayoutNode>,
}

impl SplitNode {
    /// Creates a split node. The ratio is clamped into the accepted range.
    #[must_use]
    pub fn new(
        direction: SplitDirection,
        ratio: f64,
        first: LayoutNode,
        second: LayoutNode,
    ) -> Self {
        Self {
            id: SplitId::new(),
            direction,
            ratio: clamp_ratio(ratio),
            first: Box::new(first),
            second: Box::new(second),
        }
    }
}

/// Result of collapsing an emptied panel out of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseResult {
    /// The panel is not in this tree.
    NotFound,
    /// The panel is the root itself; there is no sibling to promote.
    IsRoot,
    /// The enclosing split was replaced by the panel's sibling.
    Collapsed {
        /// The split that was removed.
        split: SplitId,
    },
}

/// Rectangles of every panel and split for one set of container bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    panels: HashMap<PanelId, Rect>,
    splits: HashMap<SplitId, Rect>,
}

impl Geometry {
    /// Returns the rectangle of a panel.
    #[must_use]
    pub fn panel(&self, id: PanelId) -> Option<Rect> {
        self.panels.get(&id).copied()
    }

    /// Returns the rectangle of a split.
    #[must_use]
    pub fn split(&self, id: SplitId) -> Option<Rect> {
        self.splits.get(&id).copied()
    }
}

impl LayoutNode {
    /// Creates a split node.
    #[must_use]
    pub fn split(direction: SplitDirection, ratio: f64, first: Self, second: Self) -> Self {
        Self::Split(SplitNode::new(direction, ratio, first, second))
    }

    /// Returns true if this node is a panel.
    #[must_use]
    pub const fn is_panel(&self) -> bool {
        matches!(self, Self::Panel(_))
    }

    /// Returns true if this node is a split.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        matches!(self, Self::Split(_))
    }

    /// Returns the panel handle if this is a panel node.
    #[must_use]
    pub const fn as_panel(&self) -> Option<PanelId> {
        match self {
            Self::Panel(id) => Some(*id),
            Self::Split(_) => None,
        }
    }

    /// Returns the split node if this is a split node.
    #[must_use]
    pub const fn as_split(&self) -> Option<&SplitNode> {
        match self {
            Self::Panel(_) => None,
            Self::Split(split) => Some(split),
        }
    }

    // ========================================================================
    // Tree Traversal Methods
    // ========================================================================

    /// Returns all panel IDs in pre-order (depth-first, first child first).
    #[must_use]
    pub fn panel_ids(&self) -> Vec<PanelId> {
        let mut ids = Vec::new();
        self.collect_panel_ids(&mut ids);
        ids
    }

    fn collect_panel_ids(&self, ids: &mut Vec<PanelId>) {
        match self {
            Self::Panel(id) => ids.push(*id),
            Self::Split(split) => {
                split.first.collect_panel_ids(ids);
                split.second.collect_panel_ids(ids);
            }
        }
    }

    /// Returns the number of panels in the tree.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        match self {
            Self::Panel(_) => 1,
            Self::Split(split) => split.first.panel_count() + split.second.panel_count(),
        }
    }

    /// Returns the depth of the tree. A lone panel has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Panel(_) => 0,
            Self::Split(split) => 1 + split.first.depth().max(split.second.depth()),
        }
    }

    /// Returns true if the tree contains the panel.
    #[must_use]
    pub fn contains_panel(&self, panel_id: PanelId) -> bool {
        match self {
            Self::Panel(id) => *id == panel_id,
            Self::Split(split) => {
                split.first.contains_panel(panel_id) || split.second.contains_panel(panel_id)
            }
        }
    }

    /// Returns the first panel in the tree (leftmost/topmost).
    #[must_use]
    pub fn first_panel(&self) -> PanelId {
        match self {
            Self::Panel(id) => *id,
            Self::Split(split) => split.first.first_panel(),
        }
    }

    /// Finds a split by its ID.
    #[must_use]
    pub fn find_split(&self, split_id: SplitId) -> Option<&SplitNode> {
        match self {
            Self::Panel(_) => None,
            Self::Split(split) if split.id == split_id => Some(split),
            Self::Split(split) => split
                .first
                .find_split(split_id)
                .or_else(|| split.second.find_split(split_id)),
        }
    }

    /// Finds a split by its ID and returns a mutable reference.
    pub fn find_split_mut(&mut self, split_id: SplitId) -> Option<&mut SplitNode> {
        match self {
            Self::Panel(_) => None,
            Self::Split(split) => {
                if split.id == split_id {
                    Some(split)
                } else if split.first.find_split(split_id).is_some() {
                    split.first.find_split_mut(split_id)
                } else {
                    split.second.find_split_mut(split_id)
                }
            }
        }
    }

    /// Computes the rectangles of every node for the given bounds.
    #[must_use]
    pub fn geometry(&self, bounds: Rect, divider: f64) -> Geometry {
        let mut geometry = Geometry::default();
        self.collect_geometry(bounds, divider, &mut geometry);
        geometry
    }

    fn collect_geometry(&self, bounds: Rect, divider: f64, out: &mut Geometry) {
        match self {
            Self::Panel(id) => {
                out.panels.insert(*id, bounds);
            }
            Self::Split(split) => {
                out.splits.insert(split.id, bounds);
                let (first, second) = bounds.split(split.direction, split.ratio, divider);
                split.first.collect_geometry(first, divider, out);
                split.second.collect_geometry(second, divider, out);
            }
        }
    }

    // ========================================================================
    // Tree Mutation Methods
    // ========================================================================

    /// Replaces the slot holding `panel_id` with `f(slot)`.
    ///
    /// The slot is swapped in place, so the rest of the tree is untouched.
    /// Returns `false` if the panel is not in the tree.
    pub fn replace_panel<F>(&mut self, panel_id: PanelId, f: F) -> bool
    where
        F: FnOnce(Self) -> Self,
    {
        let Some(slot) = self.panel_slot_mut(panel_id) else {
            return false;
        };
        let current = std::mem::replace(slot, Self::Panel(panel_id));
        *slot = f(current);
        true
    }

    fn panel_slot_mut(&mut self, panel_id: PanelId) -> Option<&mut Self> {
        if self.as_panel() == Some(panel_id) {
            return Some(self);
        }
        match self {
            Self::Panel(_) => None,
            Self::Split(split) => {
                if split.first.contains_panel(panel_id) {
                    split.first.panel_slot_mut(panel_id)
                } else {
                    split.second.panel_slot_mut(panel_id)
                }
            }
        }
    }

    /// Removes a panel's enclosing split, promoting its sibling.
    ///
    /// The split is replaced in its own parent slot by the sibling subtree,
    /// which is moved rather than rebuilt. When the split was the root, the
    /// sibling becomes the new root.
    pub fn collapse_panel(&mut self, panel_id: PanelId) -> CollapseResult {
        match self {
            Self::Panel(id) => {
                if *id == panel_id {
                    CollapseResult::IsRoot
                } else {
                    CollapseResult::NotFound
                }
            }
            Self::Split(split) => {
                let sibling = if split.first.as_panel() == Some(panel_id) {
                    Some(std::mem::replace(
                        split.second.as_mut(),
                        Self::Panel(panel_id),
                    ))
                } else if split.second.as_panel() == Some(panel_id) {
                    Some(std::mem::replace(
                        split.first.as_mut(),
                        Self::Panel(panel_id),
                    ))
                } else {
                    None
                };

                if let Some(sibling) = sibling {
                    let removed = split.id;
                    *self = sibling;
                    return CollapseResult::Collapsed { split: removed };
                }

                match split.first.collapse_panel(panel_id) {
                    CollapseResult::NotFound => split.second.collapse_panel(panel_id),
                    result => result,
                }
            }
        }
    }
}
