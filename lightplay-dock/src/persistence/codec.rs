//! Layout wire format
//!
//! A live layout is stored as a recursive JSON object:
//!
//! ```json
//! {
//!   "type": "split",
//!   "direction": "horizontal",
//!   "ratio": 0.7,
//!   "children": [
//!     { "type": "panel", "tabs": ["Scene"], "activeTabIndex": 0 },
//!     { "type": "panel", "tabs": ["Inspector", "Objects"], "activeTabIndex": 1 }
//!   ]
//! }
//! ```
//!
//! Only labels are stored. Resolving a stored tree binds each label through
//! the tab-type registry and prunes whatever no longer resolves.

use serde::{Deserialize, Serialize};

use super::error::PersistError;
use crate::dock::{
    DEFAULT_SPLIT_RATIO, DockLayout, Geometry, LayoutDescriptor, LayoutNode, SplitDirection,
    TabDescriptor, TabTypeRegistry, clamp_ratio,
};
use crate::logging::span_names;

/// Stored form of one layout node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoredNode {
    /// A split with exactly two children.
    Split {
        /// Split axis.
        direction: SplitDirection,
        /// Fraction of the extent held by the first child.
        #[serde(default = "default_ratio")]
        ratio: f64,
        /// First and second child.
        children: Box<[StoredNode; 2]>,
    },
    /// A panel listing its tab labels.
    Panel {
        /// Tab labels in display order.
        tabs: Vec<String>,
        /// Index of the active tab, `-1` for an empty panel.
        #[serde(rename = "activeTabIndex", default)]
        active_tab_index: i64,
    },
}

const fn default_ratio() -> f64 {
    DEFAULT_SPLIT_RATIO
}

impl StoredNode {
    /// Creates a stored panel.
    #[must_use]
    pub fn panel<I, S>(tabs: I, active_tab_index: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Panel {
            tabs: tabs.into_iter().map(Into::into).collect(),
            active_tab_index,
        }
    }

    /// Creates a stored split.
    #[must_use]
    pub fn split(direction: SplitDirection, ratio: f64, first: Self, second: Self) -> Self {
        Self::Split {
            direction,
            ratio,
            children: Box::new([first, second]),
        }
    }

    /// Returns every stored label in tree order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Panel { tabs, .. } => tabs.iter().map(String::as_str).collect(),
            Self::Split { children, .. } => {
                let mut labels = children[0].labels();
                labels.extend(children[1].labels());
                labels
            }
        }
    }
}

/// Rounds to three decimal places.
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Captures the live layout in its stored form.
///
/// Split ratios are measured from the current geometry: the first child's
/// extent over the split's extent. With empty bounds the node's own ratio
/// is used.
#[must_use]
pub fn serialize_layout(layout: &DockLayout) -> StoredNode {
    let geometry = layout.geometry();
    serialize_node(layout.root(), layout, &geometry)
}

fn serialize_node(node: &LayoutNode, layout: &DockLayout, geometry: &Geometry) -> StoredNode {
    match node {
        LayoutNode::Panel(id) => match layout.panel(*id) {
            Some(panel) => StoredNode::Panel {
                tabs: panel.labels().into_iter().map(str::to_owned).collect(),
                active_tab_index: panel
                    .active_tab_index()
                    .and_then(|index| i64::try_from(index).ok())
                    .unwrap_or(-1),
            },
            None => StoredNode::panel(Vec::<String>::new(), -1),
        },
        LayoutNode::Split(split) => {
            let total = geometry
                .split(split.id)
                .map_or(0.0, |rect| rect.extent(split.direction));
            let first = node_extent(&split.first, geometry, split.direction);
            let ratio = if total > 0.0 {
                first / total
            } else {
                split.ratio
            };
            StoredNode::split(
                split.direction,
                round3(ratio),
                serialize_node(&split.first, layout, geometry),
                serialize_node(&split.second, layout, geometry),
            )
        }
    }
}

fn node_extent(node: &LayoutNode, geometry: &Geometry, direction: SplitDirection) -> f64 {
    let rect = match node {
        LayoutNode::Panel(id) => geometry.panel(*id),
        LayoutNode::Split(split) => geometry.split(split.id),
    };
    rect.map_or(0.0, |rect| rect.extent(direction))
}

/// Rebinds a stored tree to live behavior.
///
/// Unregistered labels are dropped. A panel with no surviving tab resolves
/// to `None`; a split with one surviving child is replaced by that child.
/// The stored active tab keeps its position among the survivors, otherwise
/// the first survivor becomes active.
#[must_use]
pub fn resolve(node: &StoredNode, registry: &TabTypeRegistry) -> Option<LayoutDescriptor> {
    match node {
        StoredNode::Panel {
            tabs,
            active_tab_index,
        } => {
            let mut resolved = Vec::with_capacity(tabs.len());
            let mut active = 0;
            for (index, label) in tabs.iter().enumerate() {
                let Some(behavior) = registry.get(label) else {
                    tracing::debug!(label = %label, "Dropping unregistered tab");
                    continue;
                };
                if i64::try_from(index).is_ok_and(|index| index == *active_tab_index) {
                    active = resolved.len();
                }
                resolved.push(TabDescriptor::new(label.as_str()).with_behavior(behavior.clone()));
            }
            if resolved.is_empty() {
                return None;
            }
            Some(LayoutDescriptor::panel(resolved).with_active(active))
        }
        StoredNode::Split {
            direction,
            ratio,
            children,
        } => {
            let [first, second] = &**children;
            match (resolve(first, registry), resolve(second, registry)) {
                (Some(first), Some(second)) => Some(LayoutDescriptor::split(
                    *direction,
                    sanitize_ratio(*ratio),
                    first,
                    second,
                )),
                (Some(only), None) | (None, Some(only)) => Some(only),
                (None, None) => None,
            }
        }
    }
}

/// Maps a stored ratio into the range a split accepts.
///
/// Zero, negative and non-finite values mean "unset" and become the default.
#[must_use]
pub fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        clamp_ratio(ratio)
    } else {
        DEFAULT_SPLIT_RATIO
    }
}

/// Encodes a stored tree as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(node: &StoredNode) -> Result<String, PersistError> {
    serde_json::to_string(node).map_err(PersistError::Serialization)
}

/// Decodes a stored tree from JSON.
///
/// # Errors
///
/// Returns an error if the blob is not JSON or does not have the layout
/// shape.
pub fn decode(blob: &str) -> Result<StoredNode, PersistError> {
    serde_json::from_str(blob).map_err(PersistError::Deserialization)
}

/// Decodes and resolves a blob, treating any failure as no layout.
#[must_use]
pub fn resolve_blob(blob: &str, registry: &TabTypeRegistry) -> Option<LayoutDescriptor> {
    let _span = crate::trace_operation_debug!(span_names::LAYOUT_RESOLVE).entered();

    let stored = match decode(blob) {
        Ok(stored) => stored,
        Err(err) => {
            tracing::warn!(error = %err, "Ignoring malformed stored layout");
            return None;
        }
    };
    let resolved = resolve(&stored, registry);
    if resolved.is_none() {
        tracing::info!("Stored layout has no registered tabs");
    }
    resolved
}
