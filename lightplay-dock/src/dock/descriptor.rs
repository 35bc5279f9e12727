//! Layout build configuration
//!
//! A [`LayoutDescriptor`] describes a tree to materialize: either a literal
//! default arrangement written by the host, or the output of resolving a
//! persisted layout. Tabs may carry explicit callbacks; tabs that do not are
//! bound through the tab-type registry at build time.

use super::tab::{MountArea, TabBehavior};
use super::tree::DEFAULT_SPLIT_RATIO;
use super::types::SplitDirection;

/// Description of one node of a layout to build.
#[derive(Debug, Clone)]
pub enum LayoutDescriptor {
    /// A tab container.
    Panel(PanelDescriptor),
    /// A split with two children.
    Split(SplitDescriptor),
}

/// Description of a panel.
#[derive(Debug, Clone, Default)]
pub struct PanelDescriptor {
    /// Tabs in display order.
    pub tabs: Vec<TabDescriptor>,
    /// Tab to activate after building (defaults to the first).
    pub active_tab_index: usize,
}

/// Description of a split.
#[derive(Debug, Clone)]
pub struct SplitDescriptor {
    /// Split axis.
    pub direction: SplitDirection,
    /// Fraction of the extent given to the first child.
    pub ratio: f64,
    /// First child.
    pub first: Box<LayoutDescriptor>,
    /// Second child.
    pub second: Box<LayoutDescriptor>,
}

/// Description of a tab.
#[derive(Debug, Clone)]
pub struct TabDescriptor {
    /// Stable tab label.
    pub label: String,
    /// Explicit behavior; `None` defers to the registry.
    pub behavior: Option<TabBehavior>,
}

impl TabDescriptor {
    /// Creates a tab description that will be bound through the registry.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            behavior: None,
        }
    }

    /// Attaches an explicit render callback.
    #[must_use]
    pub fn with_render(mut self, render: impl Fn(&mut MountArea) + 'static) -> Self {
        self.behavior = Some(TabBehavior::new(render));
        self
    }

    /// Attaches an explicit behavior pair.
    #[must_use]
    pub fn with_behavior(mut self, behavior: TabBehavior) -> Self {
        self.behavior = Some(behavior);
        self
    }
}

impl LayoutDescriptor {
    /// Describes a panel holding the given tabs, first tab active.
    #[must_use]
    pub fn panel(tabs: impl IntoIterator<Item = TabDescriptor>) -> Self {
        Self::Panel(PanelDescriptor {
            tabs: tabs.into_iter().collect(),
            active_tab_index: 0,
        })
    }

    /// Describes a panel of registry-bound tabs from their labels.
    #[must_use]
    pub fn labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::panel(labels.into_iter().map(TabDescriptor::new))
    }

    /// Describes a split.
    #[must_use]
    pub fn split(direction: SplitDirection, ratio: f64, first: Self, second: Self) -> Self {
        Self::Split(SplitDescriptor {
            direction,
            ratio,
            first: Box::new(first),
            second: Box::new(second),
        })
    }

    /// Describes an even split.
    #[must_use]
    pub fn even(direction: SplitDirection, first: Self, second: Self) -> Self {
        Self::split(direction, DEFAULT_SPLIT_RATIO, first, second)
    }

    /// Sets which tab a panel description activates. No effect on splits.
    #[must_use]
    pub fn with_active(mut self, index: usize) -> Self {
        if let Self::Panel(panel) = &mut self {
            panel.active_tab_index = index;
        }
        self
    }

    /// Returns the number of panels described.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        match self {
            Self::Panel(_) => 1,
            Self::Split(split) => split.first.panel_count() + split.second.panel_count(),
        }
    }
}
