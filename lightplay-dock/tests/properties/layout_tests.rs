//! Property-based tests for structural layout edits
//!
//! Random sequences of tab edits, splits and drops must never leave an empty
//! non-root panel, a dangling arena entry or an active index out of range.

use lightplay_dock::dock::{
    DockLayout, DragCoordinator, DropOutcome, DropZone, LayoutDescriptor, MountArea, PanelId,
    Rect, SplitDirection, Tab, TabTypeRegistry,
};
use proptest::prelude::*;

const LABELS: [&str; 6] = [
    "Scene", "Inspector", "Objects", "Assets", "Console", "Timeline",
];

// ============================================================================
// Test Strategies
// ============================================================================

fn registry() -> TabTypeRegistry {
    let mut registry = TabTypeRegistry::new();
    for label in LABELS {
        registry.register(
            label,
            move |area: &mut MountArea| area.set_text(label),
            None::<fn()>,
        );
    }
    registry
}

/// Scene+Console | (Inspector / Objects+Assets)
fn initial_layout() -> DockLayout {
    let descriptor = LayoutDescriptor::split(
        SplitDirection::Horizontal,
        0.7,
        LayoutDescriptor::labels(["Scene", "Console"]),
        LayoutDescriptor::split(
            SplitDirection::Vertical,
            0.4,
            LayoutDescriptor::labels(["Inspector"]),
            LayoutDescriptor::labels(["Objects", "Assets"]),
        ),
    );
    let mut layout = DockLayout::build(descriptor, &registry());
    layout.set_bounds(Rect::from_size(1600.0, 900.0));
    layout
}

fn split_direction_strategy() -> impl Strategy<Value = SplitDirection> {
    prop_oneof![
        Just(SplitDirection::Horizontal),
        Just(SplitDirection::Vertical),
    ]
}

fn zone_strategy() -> impl Strategy<Value = DropZone> {
    prop_oneof![
        Just(DropZone::Left),
        Just(DropZone::Right),
        Just(DropZone::Top),
        Just(DropZone::Bottom),
        Just(DropZone::Center),
    ]
}

fn edge_zone_strategy() -> impl Strategy<Value = DropZone> {
    prop_oneof![
        Just(DropZone::Left),
        Just(DropZone::Right),
        Just(DropZone::Top),
        Just(DropZone::Bottom),
    ]
}

/// Represents an operation that can be performed on a `DockLayout`
#[derive(Debug, Clone)]
enum LayoutOperation {
    /// Append a tab to a panel (by index into `panel_ids`)
    AddTab { panel_index: usize, label: usize },
    /// Remove a tab from a panel
    RemoveTab { panel_index: usize, tab_index: usize },
    /// Activate a tab
    Activate { panel_index: usize, tab_index: usize },
    /// Split a panel with a fresh tab
    Split {
        panel_index: usize,
        direction: SplitDirection,
        new_first: bool,
        label: usize,
    },
    /// Drag a tab and drop it into a zone of another panel
    Drop {
        source_index: usize,
        tab_index: usize,
        target_index: usize,
        zone: DropZone,
    },
}

fn drop_operation_strategy() -> impl Strategy<Value = LayoutOperation> {
    (0usize..10, 0usize..10, 0usize..10, zone_strategy()).prop_map(
        |(source_index, tab_index, target_index, zone)| LayoutOperation::Drop {
            source_index,
            tab_index,
            target_index,
            zone,
        },
    )
}

fn layout_operation_strategy() -> impl Strategy<Value = LayoutOperation> {
    prop_oneof![
        (0usize..10, 0usize..LABELS.len())
            .prop_map(|(panel_index, label)| LayoutOperation::AddTab { panel_index, label }),
        (0usize..10, 0usize..10).prop_map(|(panel_index, tab_index)| {
            LayoutOperation::RemoveTab {
                panel_index,
                tab_index,
            }
        }),
        (0usize..10, 0usize..10).prop_map(|(panel_index, tab_index)| {
            LayoutOperation::Activate {
                panel_index,
                tab_index,
            }
        }),
        (
            0usize..10,
            split_direction_strategy(),
            any::<bool>(),
            0usize..LABELS.len()
        )
            .prop_map(|(panel_index, direction, new_first, label)| {
                LayoutOperation::Split {
                    panel_index,
                    direction,
                    new_first,
                    label,
                }
            }),
        drop_operation_strategy(),
    ]
}

fn layout_operations_strategy(max_ops: usize) -> impl Strategy<Value = Vec<LayoutOperation>> {
    proptest::collection::vec(layout_operation_strategy(), 0..=max_ops)
}

fn pick(layout: &DockLayout, index: usize) -> Option<PanelId> {
    let ids = layout.panel_ids();
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()])
    }
}

fn tab_count(layout: &DockLayout, panel: PanelId) -> usize {
    layout.panel(panel).map_or(0, |panel| panel.len())
}

fn labels_of(layout: &DockLayout, panel: PanelId) -> Vec<String> {
    layout.panel(panel).map_or_else(Vec::new, |panel| {
        panel.labels().into_iter().map(str::to_owned).collect()
    })
}

/// All labels in tree order
fn all_labels(layout: &DockLayout) -> Vec<String> {
    layout
        .panel_ids()
        .into_iter()
        .flat_map(|id| labels_of(layout, id))
        .collect()
}

fn sorted(mut labels: Vec<String>) -> Vec<String> {
    labels.sort();
    labels
}

/// Apply an operation to a layout, ignoring rejected edits
fn apply_operation(layout: &mut DockLayout, op: &LayoutOperation) {
    match *op {
        LayoutOperation::AddTab { panel_index, label } => {
            if let Some(panel) = pick(layout, panel_index) {
                layout.add_tab(panel, Tab::new(LABELS[label], None));
            }
        }
        LayoutOperation::RemoveTab {
            panel_index,
            tab_index,
        } => {
            if let Some(panel) = pick(layout, panel_index) {
                let len = tab_count(layout, panel);
                if len > 0 {
                    layout.remove_tab(panel, tab_index % len);
                }
            }
        }
        LayoutOperation::Activate {
            panel_index,
            tab_index,
        } => {
            if let Some(panel) = pick(layout, panel_index) {
                layout.activate_tab(panel, tab_index);
            }
        }
        LayoutOperation::Split {
            panel_index,
            direction,
            new_first,
            label,
        } => {
            if let Some(panel) = pick(layout, panel_index) {
                layout.split_panel(panel, direction, new_first, Tab::new(LABELS[label], None));
            }
        }
        LayoutOperation::Drop {
            source_index,
            tab_index,
            target_index,
            zone,
        } => {
            let (Some(source), Some(target)) =
                (pick(layout, source_index), pick(layout, target_index))
            else {
                return;
            };
            let len = tab_count(layout, source);
            if len == 0 {
                return;
            }
            let mut drag = DragCoordinator::new();
            if drag.begin(layout, source, tab_index % len).is_ok() {
                drag.drop_in_zone(layout, target, zone);
            }
            assert!(!drag.is_dragging());
        }
    }
}

// ============================================================================
// Property 1: Structural invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every reachable layout keeps the arena and tree in sync
    #[test]
    fn prop_operations_keep_layout_consistent(
        ops in layout_operations_strategy(25),
    ) {
        let mut layout = initial_layout();

        for op in &ops {
            apply_operation(&mut layout, op);
            prop_assert!(layout.is_consistent(), "inconsistent after {:?}", op);
            prop_assert_eq!(layout.panel_count(), layout.root().panel_count());
        }
    }

    /// Only a lone root panel is ever empty
    #[test]
    fn prop_no_empty_panel_below_a_split(
        ops in layout_operations_strategy(25),
    ) {
        let mut layout = initial_layout();

        for op in &ops {
            apply_operation(&mut layout, op);
            if layout.root().is_split() {
                for id in layout.panel_ids() {
                    prop_assert!(tab_count(&layout, id) > 0);
                }
            }
        }
    }

    /// Removing every tab collapses down to one empty root panel
    #[test]
    fn prop_removing_every_tab_leaves_empty_root(
        picks in proptest::collection::vec(any::<usize>(), 5),
    ) {
        let mut layout = initial_layout();

        for index in picks {
            let panel = pick(&layout, index).unwrap();
            prop_assert!(layout.remove_tab(panel, 0).is_some());
            prop_assert!(layout.is_consistent());
        }

        prop_assert_eq!(layout.panel_count(), 1);
        let root = layout.root().as_panel().unwrap();
        let panel = layout.panel(root).unwrap();
        prop_assert!(panel.is_empty());
        prop_assert_eq!(panel.active_tab_index(), None);
        prop_assert_eq!(layout.panel_rect(root), Some(layout.bounds()));
    }

    /// Splitting keeps the target's tabs and adds one panel
    #[test]
    fn prop_split_panel_keeps_target_tabs(
        panel_index in 0usize..10,
        direction in split_direction_strategy(),
        new_first in any::<bool>(),
        label in 0usize..LABELS.len(),
    ) {
        let mut layout = initial_layout();
        let target = pick(&layout, panel_index).unwrap();
        let before = labels_of(&layout, target);

        let new_panel = layout
            .split_panel(target, direction, new_first, Tab::new(LABELS[label], None))
            .unwrap();

        prop_assert_eq!(layout.panel_count(), 4);
        prop_assert_eq!(labels_of(&layout, target), before);
        prop_assert_eq!(labels_of(&layout, new_panel), vec![LABELS[label].to_string()]);

        let ids = layout.panel_ids();
        let target_pos = ids.iter().position(|id| *id == target).unwrap();
        let new_pos = ids.iter().position(|id| *id == new_panel).unwrap();
        if new_first {
            prop_assert_eq!(new_pos + 1, target_pos);
        } else {
            prop_assert_eq!(target_pos + 1, new_pos);
        }
    }
}

// ============================================================================
// Property 2: Drag and drop
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Drops move tabs around without losing or duplicating any
    #[test]
    fn prop_drops_conserve_tabs(
        drops in proptest::collection::vec(drop_operation_strategy(), 0..=20),
    ) {
        let mut layout = initial_layout();
        let before = sorted(all_labels(&layout));

        for op in &drops {
            apply_operation(&mut layout, op);
            prop_assert!(layout.is_consistent());
        }

        prop_assert_eq!(sorted(all_labels(&layout)), before);
    }

    /// A center drop appends the tab to the target and activates it
    #[test]
    fn prop_center_drop_appends_and_activates(
        source_index in 0usize..3,
        tab_index in 0usize..2,
        target_index in 0usize..3,
    ) {
        prop_assume!(source_index != target_index);
        let mut layout = initial_layout();
        let source = pick(&layout, source_index).unwrap();
        let target = pick(&layout, target_index).unwrap();
        let index = tab_index % tab_count(&layout, source);

        let mut source_before = labels_of(&layout, source);
        let moved = source_before.remove(index);
        let mut target_after = labels_of(&layout, target);
        target_after.push(moved.clone());

        let mut drag = DragCoordinator::new();
        drag.begin(&layout, source, index).unwrap();
        let outcome = drag.drop_in_zone(&mut layout, target, DropZone::Center);

        prop_assert_eq!(outcome, DropOutcome::Merged { target });
        prop_assert_eq!(labels_of(&layout, target), target_after.clone());
        let panel = layout.panel(target).unwrap();
        prop_assert_eq!(panel.active_tab_index(), Some(target_after.len() - 1));
        prop_assert_eq!(panel.content().text(), moved);

        if source_before.is_empty() {
            prop_assert!(!layout.contains_panel(source));
        } else {
            prop_assert_eq!(labels_of(&layout, source), source_before);
        }
        prop_assert!(layout.persist_requested());
    }

    /// An edge drop puts the tab in a new panel on that side of the target
    #[test]
    fn prop_edge_drop_places_new_panel_on_side(
        source_index in 0usize..3,
        tab_index in 0usize..2,
        target_index in 0usize..3,
        zone in edge_zone_strategy(),
    ) {
        prop_assume!(source_index != target_index);
        let mut layout = initial_layout();
        let source = pick(&layout, source_index).unwrap();
        let target = pick(&layout, target_index).unwrap();
        let index = tab_index % tab_count(&layout, source);
        let moved = labels_of(&layout, source)[index].clone();
        let target_before = labels_of(&layout, target);

        let mut drag = DragCoordinator::new();
        drag.begin(&layout, source, index).unwrap();
        let outcome = drag.drop_in_zone(&mut layout, target, zone);

        let new_panel = outcome.new_panel().unwrap();
        prop_assert_eq!(
            outcome,
            DropOutcome::Split { target, new_panel, direction: zone.direction().unwrap() }
        );
        prop_assert_eq!(labels_of(&layout, new_panel), vec![moved]);
        prop_assert_eq!(labels_of(&layout, target), target_before);

        let new_rect = layout.panel_rect(new_panel).unwrap();
        let target_rect = layout.panel_rect(target).unwrap();
        match zone {
            DropZone::Left => prop_assert!(new_rect.x < target_rect.x),
            DropZone::Right => prop_assert!(new_rect.x > target_rect.x),
            DropZone::Top => prop_assert!(new_rect.y < target_rect.y),
            DropZone::Bottom => prop_assert!(new_rect.y > target_rect.y),
            DropZone::Center => unreachable!(),
        }
    }

    /// A single-tab panel cannot be dropped onto itself
    #[test]
    fn prop_single_tab_self_drop_is_noop(zone in zone_strategy()) {
        let mut layout = initial_layout();
        let inspector = layout
            .panel_ids()
            .into_iter()
            .find(|id| labels_of(&layout, *id) == vec!["Inspector".to_string()])
            .unwrap();
        let before = all_labels(&layout);

        let mut drag = DragCoordinator::new();
        drag.begin(&layout, inspector, 0).unwrap();
        prop_assert!(!drag.is_drop_target(inspector));
        let outcome = drag.drop_in_zone(&mut layout, inspector, zone);

        prop_assert_eq!(outcome, DropOutcome::NoOp);
        prop_assert_eq!(all_labels(&layout), before);
        prop_assert_eq!(layout.panel_count(), 3);
        prop_assert!(!layout.persist_requested());
    }
}
