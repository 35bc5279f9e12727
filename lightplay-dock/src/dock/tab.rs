//! Tabs and the content area they render into
//!
//! A tab is a label plus an optional behavior pair. The label is the stable
//! identity used for persistence and registry lookup; the behavior is never
//! serialized.

use std::fmt;
use std::rc::Rc;

use super::types::PanelId;

/// Callback that populates a panel's content area for the active tab.
pub type RenderFn = Rc<dyn Fn(&mut MountArea)>;

/// Callback that releases whatever the matching render acquired.
pub type CleanupFn = Rc<dyn Fn()>;

/// Content area owned by a panel.
///
/// The active tab's render callback receives it freshly cleared each time the
/// tab is activated. Tools must not assume its content survives a tab switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountArea {
    panel: PanelId,
    label: Option<String>,
    nodes: Vec<String>,
}

impl MountArea {
    /// Creates an empty content area for a panel.
    #[must_use]
    pub fn new(panel: PanelId) -> Self {
        Self {
            panel,
            label: None,
            nodes: Vec::new(),
        }
    }

    /// Returns the panel that owns this area.
    #[must_use]
    pub const fn panel(&self) -> PanelId {
        self.panel
    }

    /// Returns the label of the tab currently mounted, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Appends a content node.
    pub fn push(&mut self, node: impl Into<String>) {
        self.nodes.push(node.into());
    }

    /// Replaces all content with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.nodes.clear();
        self.nodes.push(text.into());
    }

    /// Returns the content nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Returns all content nodes joined into one string.
    #[must_use]
    pub fn text(&self) -> String {
        self.nodes.concat()
    }

    /// Returns true if nothing is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes all content and forgets the mounted label.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.label = None;
    }

    pub(crate) fn mount(&mut self, label: &str) {
        self.nodes.clear();
        self.label = Some(label.to_owned());
    }
}

/// Render/cleanup pair attached to a tab.
#[derive(Clone)]
pub struct TabBehavior {
    /// Populates the content area.
    pub render: RenderFn,
    /// Optional teardown, run before the tab is re-rendered or removed.
    pub cleanup: Option<CleanupFn>,
}

impl TabBehavior {
    /// Creates a behavior with a render callback and no cleanup.
    #[must_use]
    pub fn new(render: impl Fn(&mut MountArea) + 'static) -> Self {
        Self {
            render: Rc::new(render),
            cleanup: None,
        }
    }

    /// Attaches a cleanup callback.
    #[must_use]
    pub fn with_cleanup(mut self, cleanup: impl Fn() + 'static) -> Self {
        self.cleanup = Some(Rc::new(cleanup));
        self
    }

    /// Creates a behavior from already shared callbacks.
    #[must_use]
    pub fn from_parts(render: RenderFn, cleanup: Option<CleanupFn>) -> Self {
        Self { render, cleanup }
    }
}

impl fmt::Debug for TabBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabBehavior")
            .field("has_cleanup", &self.cleanup.is_some())
            .finish_non_exhaustive()
    }
}

/// A tab inside a panel.
#[derive(Debug, Clone)]
pub struct Tab {
    label: String,
    behavior: Option<TabBehavior>,
}

impl Tab {
    /// Creates a tab.
    ///
    /// A tab without behavior is still listed and can be activated, it just
    /// renders nothing.
    #[must_use]
    pub fn new(label: impl Into<String>, behavior: Option<TabBehavior>) -> Self {
        Self {
            label: label.into(),
            behavior,
        }
    }

    /// Returns the tab label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the attached behavior, if any.
    #[must_use]
    pub const fn behavior(&self) -> Option<&TabBehavior> {
        self.behavior.as_ref()
    }

    /// Invokes the render callback with the given area.
    pub fn render(&self, area: &mut MountArea) {
        if let Some(behavior) = &self.behavior {
            (behavior.render)(area);
        }
    }

    /// Invokes the cleanup callback if one is attached.
    pub fn cleanup(&self) {
        if let Some(cleanup) = self.behavior.as_ref().and_then(|b| b.cleanup.as_ref()) {
            cleanup();
        }
    }
}
