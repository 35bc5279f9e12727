//! Workbench sessions against a file-backed store
//!
//! Each test drives the workbench the way the editor does: build, gesture,
//! then start a fresh workbench over the same directory and check what it
//! restores.

use std::cell::Cell;
use std::rc::Rc;

use lightplay_dock::dock::MountArea;
use lightplay_dock::workbench::{ASSETS_TAB, INSPECTOR_TAB, OBJECTS_TAB, SCENE_TAB};
use lightplay_dock::{
    DropOutcome, DropZone, FileStore, LayoutSettings, LayoutSource, LayoutStore, MemoryStore,
    PanelId, Point, Rect, SettingsManager, SplitDirection, Workbench,
};
use tempfile::TempDir;

const EDITOR_TABS: [&str; 4] = [SCENE_TAB, INSPECTOR_TAB, OBJECTS_TAB, ASSETS_TAB];

fn bounds() -> Rect {
    Rect::from_size(1200.0, 800.0)
}

fn workbench_with(store: impl LayoutStore + 'static, labels: &[&'static str]) -> Workbench {
    let mut workbench = Workbench::new(LayoutSettings::default(), store);
    for &label in labels {
        workbench.register_tab_type(
            label,
            move |area: &mut MountArea| area.set_text(label),
            None::<fn()>,
        );
    }
    workbench
}

fn editor_workbench(dir: &TempDir) -> Workbench {
    workbench_with(FileStore::new(dir.path()), &EDITOR_TABS)
}

fn panel_with(workbench: &Workbench, label: &str) -> PanelId {
    let layout = workbench.layout().expect("layout built");
    layout
        .panel_ids()
        .into_iter()
        .find(|id| {
            layout
                .panel(*id)
                .is_some_and(|panel| panel.labels().contains(&label))
        })
        .expect(&format!("no panel holds {label}"))
}

fn center_of(workbench: &Workbench, panel: PanelId) -> Point {
    let rect = workbench
        .layout()
        .and_then(|layout| layout.panel_rect(panel))
        .expect("panel has geometry");
    Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

fn point_in(workbench: &Workbench, panel: PanelId, fx: f64, fy: f64) -> Point {
    let rect = workbench
        .layout()
        .and_then(|layout| layout.panel_rect(panel))
        .expect("panel has geometry");
    Point::new(rect.x + rect.width * fx, rect.y + rect.height * fy)
}

// ============================================================================
// First run
// ============================================================================

#[test]
fn first_run_builds_default_and_stores_nothing() {
    let dir = TempDir::new().unwrap();
    let mut workbench = editor_workbench(&dir);

    assert_eq!(workbench.build_layout(bounds()), LayoutSource::Default);

    let layout = workbench.layout().unwrap();
    assert_eq!(layout.panel_count(), 4);
    assert!(layout.is_consistent());
    assert!(workbench.persistence().stored_blob().is_none());

    let scene = panel_with(&workbench, SCENE_TAB);
    let panel = workbench.layout().unwrap().panel(scene).unwrap();
    assert_eq!(panel.content().text(), SCENE_TAB);
}

// ============================================================================
// Gestures persist and restore
// ============================================================================

#[test]
fn merged_tab_survives_restart() {
    let dir = TempDir::new().unwrap();
    let mut workbench = editor_workbench(&dir);
    workbench.build_layout(bounds());

    let scene = panel_with(&workbench, SCENE_TAB);
    let inspector = panel_with(&workbench, INSPECTOR_TAB);
    workbench.begin_tab_drag(inspector, 0).unwrap();
    let outcome = workbench.drop_tab(scene, center_of(&workbench, scene));

    assert_eq!(outcome, DropOutcome::Merged { target: scene });
    assert_eq!(workbench.layout().unwrap().panel_count(), 3);
    assert!(workbench.persistence().stored_blob().is_some());
    assert!(dir.path().join("lightplay_editor_layout.json").exists());
    workbench.teardown();

    let mut restarted = editor_workbench(&dir);
    assert_eq!(restarted.build_layout(bounds()), LayoutSource::Restored);

    let layout = restarted.layout().unwrap();
    assert_eq!(layout.panel_count(), 3);
    let scene = panel_with(&restarted, SCENE_TAB);
    let panel = restarted.layout().unwrap().panel(scene).unwrap();
    assert_eq!(panel.labels(), vec![SCENE_TAB, INSPECTOR_TAB]);
    assert_eq!(panel.active_tab_index(), Some(1));
    assert_eq!(panel.content().text(), INSPECTOR_TAB);
}

#[test]
fn edge_drop_split_survives_restart() {
    let dir = TempDir::new().unwrap();
    let mut workbench = editor_workbench(&dir);
    workbench.build_layout(bounds());

    let scene = panel_with(&workbench, SCENE_TAB);
    let assets = panel_with(&workbench, ASSETS_TAB);
    workbench.begin_tab_drag(assets, 0).unwrap();

    let target = point_in(&workbench, scene, 0.5, 0.05);
    assert_eq!(workbench.hover_tab_drag(scene, target), Some(DropZone::Top));
    let outcome = workbench.drop_tab(scene, target);

    let DropOutcome::Split {
        target: split_target,
        new_panel,
        direction,
    } = outcome
    else {
        panic!("expected a split, got {outcome:?}");
    };
    assert_eq!(split_target, scene);
    assert_eq!(direction, SplitDirection::Vertical);
    assert_eq!(
        workbench.layout().unwrap().panel(new_panel).unwrap().labels(),
        vec![ASSETS_TAB]
    );
    // Assets left its panel, which collapsed; the new panel replaces it.
    assert_eq!(workbench.layout().unwrap().panel_count(), 4);
    assert!(!workbench.drag().is_dragging());

    let mut restarted = editor_workbench(&dir);
    assert_eq!(restarted.build_layout(bounds()), LayoutSource::Restored);
    let layout = restarted.layout().unwrap();
    assert!(layout.is_consistent());

    let scene = panel_with(&restarted, SCENE_TAB);
    let assets = panel_with(&restarted, ASSETS_TAB);
    let scene_rect = layout.panel_rect(scene).unwrap();
    let assets_rect = layout.panel_rect(assets).unwrap();
    assert!(assets_rect.y < scene_rect.y, "new panel sits above the target");
    assert!((assets_rect.x - scene_rect.x).abs() < f64::EPSILON);
}

#[test]
fn divider_ratio_survives_restart() {
    let dir = TempDir::new().unwrap();
    let mut workbench = editor_workbench(&dir);
    workbench.build_layout(bounds());

    let root_split = workbench.layout().unwrap().root().as_split().unwrap().id;
    workbench.begin_divider(root_split).unwrap();
    let ratio = workbench.move_divider(Point::new(600.0, 300.0)).unwrap();
    assert_eq!(ratio, Some(0.5));
    assert!(workbench.persistence().stored_blob().is_none());
    assert!(workbench.end_divider());
    assert!(workbench.persistence().stored_blob().is_some());

    let mut restarted = editor_workbench(&dir);
    assert_eq!(restarted.build_layout(bounds()), LayoutSource::Restored);
    let root = restarted.layout().unwrap().root().as_split().unwrap();
    assert!((root.ratio - 0.5).abs() < 1e-9);
}

#[test]
fn closing_tabs_persists_the_collapsed_tree() {
    let dir = TempDir::new().unwrap();
    let mut workbench = editor_workbench(&dir);
    workbench.build_layout(bounds());

    for label in [ASSETS_TAB, OBJECTS_TAB, INSPECTOR_TAB] {
        let panel = panel_with(&workbench, label);
        assert!(workbench.close_tab(panel, 0));
    }

    let layout = workbench.layout().unwrap();
    assert_eq!(layout.panel_count(), 1);
    assert!(layout.root().is_panel());

    let mut restarted = editor_workbench(&dir);
    assert_eq!(restarted.build_layout(bounds()), LayoutSource::Restored);
    let layout = restarted.layout().unwrap();
    assert!(layout.root().is_panel());
    let scene = panel_with(&restarted, SCENE_TAB);
    assert_eq!(layout.panel_rect(scene), Some(bounds()));
}

#[test]
fn cancelled_gestures_store_nothing() {
    let dir = TempDir::new().unwrap();
    let mut workbench = editor_workbench(&dir);
    workbench.build_layout(bounds());

    let scene = panel_with(&workbench, SCENE_TAB);
    let objects = panel_with(&workbench, OBJECTS_TAB);
    workbench.begin_tab_drag(objects, 0).unwrap();
    workbench.hover_tab_drag(scene, center_of(&workbench, scene));
    workbench.cancel_tab_drag();

    let root_split = workbench.layout().unwrap().root().as_split().unwrap().id;
    workbench.begin_divider(root_split).unwrap();
    workbench.move_divider(Point::new(400.0, 10.0)).unwrap();
    workbench.cancel_divider();

    let layout = workbench.layout().unwrap();
    assert_eq!(layout.panel_count(), 4);
    assert!((layout.root().as_split().unwrap().ratio - 0.7).abs() < f64::EPSILON);
    assert!(workbench.persistence().stored_blob().is_none());
}

// ============================================================================
// Restore edge cases
// ============================================================================

#[test]
fn unregistered_tool_is_pruned_on_restore() {
    let dir = TempDir::new().unwrap();
    let mut workbench = editor_workbench(&dir);
    workbench.build_layout(bounds());
    assert!(workbench.save_now());

    let mut restarted = workbench_with(
        FileStore::new(dir.path()),
        &[SCENE_TAB, OBJECTS_TAB, ASSETS_TAB],
    );
    assert_eq!(restarted.build_layout(bounds()), LayoutSource::Restored);

    let layout = restarted.layout().unwrap();
    assert_eq!(layout.panel_count(), 3);
    assert!(layout.is_consistent());
    let labels: Vec<String> = layout
        .panel_ids()
        .into_iter()
        .flat_map(|id| {
            layout
                .panel(id)
                .unwrap()
                .labels()
                .into_iter()
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect();
    assert_eq!(labels, vec![SCENE_TAB, OBJECTS_TAB, ASSETS_TAB]);
}

#[test]
fn nothing_registered_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let mut workbench = editor_workbench(&dir);
    workbench.build_layout(bounds());
    assert!(workbench.save_now());

    let mut restarted = workbench_with(FileStore::new(dir.path()), &[]);
    assert_eq!(restarted.build_layout(bounds()), LayoutSource::Default);
}

#[test]
fn malformed_blob_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path());
    std::fs::write(store.path_for("lightplay_editor_layout"), "{ not json").unwrap();

    let mut workbench = workbench_with(store, &EDITOR_TABS);
    assert_eq!(workbench.build_layout(bounds()), LayoutSource::Default);
    assert_eq!(workbench.layout().unwrap().panel_count(), 4);
}

#[test]
fn reset_forgets_stored_layout() {
    let dir = TempDir::new().unwrap();
    let mut workbench = editor_workbench(&dir);
    workbench.build_layout(bounds());

    let scene = panel_with(&workbench, SCENE_TAB);
    let inspector = panel_with(&workbench, INSPECTOR_TAB);
    workbench.begin_tab_drag(inspector, 0).unwrap();
    workbench.drop_tab(scene, center_of(&workbench, scene));
    assert!(workbench.persistence().stored_blob().is_some());

    workbench.reset_layout();
    assert!(workbench.persistence().stored_blob().is_none());
    assert_eq!(workbench.layout().unwrap().panel_count(), 4);
    assert_eq!(workbench.layout().unwrap().bounds(), bounds());

    let mut restarted = editor_workbench(&dir);
    assert_eq!(restarted.build_layout(bounds()), LayoutSource::Default);
}

// ============================================================================
// Storage failures and settings
// ============================================================================

#[test]
fn full_store_does_not_break_gestures() {
    let mut workbench = workbench_with(MemoryStore::with_quota(32), &EDITOR_TABS);
    workbench.build_layout(bounds());

    let scene = panel_with(&workbench, SCENE_TAB);
    let objects = panel_with(&workbench, OBJECTS_TAB);
    workbench.begin_tab_drag(objects, 0).unwrap();
    let outcome = workbench.drop_tab(scene, point_in(&workbench, scene, 0.95, 0.5));

    assert!(outcome.is_mutation());
    assert!(workbench.layout().unwrap().is_consistent());
    assert!(!workbench.layout().unwrap().persist_requested());
    assert!(workbench.persistence().stored_blob().is_none());
    assert!(!workbench.save_now());
}

#[test]
fn settings_file_configures_workbench() {
    let dir = TempDir::new().unwrap();
    let manager = SettingsManager::new(dir.path().join("layout.toml"));
    std::fs::write(
        manager.path(),
        "storage_key = \"custom_layout\"\nedge_threshold = 0.4\ndivider_thickness = 8.0\n",
    )
    .unwrap();
    let settings = manager.load().unwrap();

    let store_dir = dir.path().join("store");
    let mut workbench = Workbench::new(settings, FileStore::new(&store_dir));
    workbench.register_tab_type(SCENE_TAB, |_: &mut MountArea| {}, None::<fn()>);
    workbench.build_layout(bounds());

    assert!((workbench.drag().edge_threshold() - 0.4).abs() < f64::EPSILON);
    assert!((workbench.layout().unwrap().divider_thickness() - 8.0).abs() < f64::EPSILON);
    assert_eq!(workbench.persistence().key(), "custom_layout");

    assert!(workbench.save_now());
    assert!(store_dir.join("custom_layout.json").exists());
}

// ============================================================================
// Tab lifecycle
// ============================================================================

#[test]
fn rebuild_cleans_up_active_tabs() {
    let renders = Rc::new(Cell::new(0_usize));
    let cleanups = Rc::new(Cell::new(0_usize));

    let mut workbench = Workbench::in_memory();
    for label in EDITOR_TABS {
        let renders = Rc::clone(&renders);
        let cleanups = Rc::clone(&cleanups);
        workbench.register_tab_type(
            label,
            move |area: &mut MountArea| {
                renders.set(renders.get() + 1);
                area.set_text(label);
            },
            Some(move || cleanups.set(cleanups.get() + 1)),
        );
    }

    workbench.build_layout(bounds());
    assert_eq!(renders.get(), 4);
    assert_eq!(cleanups.get(), 0);

    workbench.build_layout(bounds());
    assert_eq!(cleanups.get(), 4);
    assert_eq!(renders.get(), 8);

    workbench.teardown();
    assert_eq!(cleanups.get(), 8);
    assert!(workbench.layout().is_none());
}
