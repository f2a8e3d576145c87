use chrono::NaiveDate;
use study_planner::calendar::{upcoming, window_end};
use study_planner::{
    ColorTag, DashboardSummary, JsonFileBackend, ModuleDraft, PlannerStore, TaskDraft,
};
use tempfile::TempDir;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Algorithms holds dated tasks around the turn of 2026/2027, Databases one
/// undated and one far-future task.
fn planner() -> (TempDir, PlannerStore) {
    let dir = tempfile::tempdir().unwrap();
    let mut store = PlannerStore::open(JsonFileBackend::new(dir.path().join("planner.json")));

    let algorithms = store
        .add_module(ModuleDraft::new("Algorithms").color(ColorTag::Red))
        .unwrap();
    for (title, due) in [
        ("Final exam", "2027-01-20"),
        ("Homework 3", "2026-12-15"),
        ("Homework 1", "2026-11-02"),
        ("Homework 2", "2026-12-15"),
        ("Project", "2027-02-01"),
    ] {
        store
            .add_task(algorithms.id, TaskDraft::new(title).due(due))
            .unwrap();
    }
    let finished = store
        .add_task(algorithms.id, TaskDraft::new("Warm-up").due("2026-11-01"))
        .unwrap();
    store
        .toggle_task_completion(algorithms.id, finished.id)
        .unwrap();

    let databases = store.add_module(ModuleDraft::new("Databases")).unwrap();
    store
        .add_task(databases.id, TaskDraft::new("Reading list"))
        .unwrap();
    store
        .add_task(databases.id, TaskDraft::new("Thesis").due("2099-01-01"))
        .unwrap();

    (dir, store)
}

#[test]
fn window_end_rolls_over_the_year() {
    assert_eq!(window_end(d(2026, 10, 18)), d(2026, 12, 1));
    assert_eq!(window_end(d(2026, 11, 30)), d(2027, 1, 1));
    assert_eq!(window_end(d(2026, 12, 5)), d(2027, 2, 1));
}

#[test]
fn december_view_includes_january_once_and_sorts_by_date() {
    let (_dir, store) = planner();
    let entries = upcoming(store.document(), d(2026, 12, 15));
    let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();

    assert_eq!(
        titles,
        ["Homework 1", "Homework 3", "Homework 2", "Final exam"]
    );
    assert!(entries[0].is_overdue);
    assert!(entries[1].is_today && entries[2].is_today);
    assert!(!entries[3].is_overdue && !entries[3].is_today);
    assert_eq!(entries[3].module_name, "Algorithms");
    assert_eq!(entries[3].color_tag, ColorTag::Red);
}

#[test]
fn completed_and_undated_tasks_never_appear() {
    let (_dir, store) = planner();
    let entries = upcoming(store.document(), d(2026, 11, 1));
    assert!(entries.iter().all(|e| e.title != "Warm-up"));
    assert!(entries.iter().all(|e| e.title != "Reading list"));
    assert!(entries.iter().all(|e| e.title != "Thesis"));
    assert_eq!(entries.len(), 3);
}

#[test]
fn dashboard_totals_and_progress() {
    let (_dir, store) = planner();
    let summary = DashboardSummary::from_document(store.document(), d(2026, 12, 15));

    assert_eq!(summary.total_tasks, 8);
    assert_eq!(summary.total_completed, 1);
    assert_eq!(summary.total_overdue, 1);
    assert_eq!(summary.modules.len(), 2);
    assert_eq!(summary.modules[0].name, "Algorithms");
    assert_eq!(summary.modules[0].completed, 1);
    assert_eq!(summary.modules[0].total, 6);
    assert_eq!(summary.modules[0].percent(), 16);
    assert_eq!(summary.modules[1].percent(), 0);
    assert_eq!(summary.to_cli_summary(), "tasks=8, done=1, overdue=1");
}

#[test]
fn empty_planner_has_an_empty_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlannerStore::open(JsonFileBackend::new(dir.path().join("planner.json")));
    let summary = DashboardSummary::from_document(store.document(), d(2026, 10, 18));
    assert_eq!(summary, DashboardSummary::default());
}
