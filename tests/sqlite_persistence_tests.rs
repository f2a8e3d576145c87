#![cfg(feature = "sqlite")]

use chrono::NaiveDate;
use study_planner::{
    ColorTag, LoadStatus, ModuleDraft, PlannerBackend, PlannerStore, Priority,
    SqlitePlannerBackend, TaskDraft,
};
use tempfile::NamedTempFile;

#[test]
fn sqlite_backend_round_trips_the_planner() {
    let file = NamedTempFile::new().unwrap();

    let mut store = PlannerStore::open(SqlitePlannerBackend::new(file.path()).unwrap());
    assert!(matches!(store.load_status(), LoadStatus::Missing));

    let algorithms = store
        .add_module(
            ModuleDraft::new("Algorithms")
                .color(ColorTag::Teal)
                .description("Graphs and greedy methods"),
        )
        .unwrap();
    let homework = store
        .add_task(
            algorithms.id,
            TaskDraft::new("Homework 1")
                .due("2099-01-01")
                .priority(Priority::PracticalWork),
        )
        .unwrap();
    store.add_module(ModuleDraft::new("Databases")).unwrap();
    store
        .toggle_task_completion(algorithms.id, homework.id)
        .unwrap();

    let backend = SqlitePlannerBackend::new(file.path()).unwrap();
    let loaded = backend
        .load_document()
        .expect("load document")
        .expect("document exists");

    assert_eq!(loaded.modules.len(), 2);
    assert_eq!(loaded.modules[0].name, "Algorithms");
    assert_eq!(loaded.modules[0].color_tag, ColorTag::Teal);
    assert_eq!(loaded.modules[1].name, "Databases");
    let task = &loaded.modules[0].tasks[0];
    assert_eq!(task.id, homework.id);
    assert!(task.completed);
    assert_eq!(task.priority, Priority::PracticalWork);
    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2099, 1, 1));
    assert!(loaded.saved_at.is_some());
}

#[test]
fn sqlite_save_replaces_removed_modules() {
    let file = NamedTempFile::new().unwrap();
    let mut store = PlannerStore::open(SqlitePlannerBackend::new(file.path()).unwrap());
    let first = store.add_module(ModuleDraft::new("First")).unwrap();
    store.add_module(ModuleDraft::new("Second")).unwrap();
    store.remove_module(first.id).unwrap();

    let reopened = PlannerStore::open(SqlitePlannerBackend::new(file.path()).unwrap());
    assert!(matches!(reopened.load_status(), LoadStatus::Loaded { modules: 1 }));
    assert_eq!(reopened.modules()[0].name, "Second");
    assert!(
        reopened
            .backend_description()
            .starts_with("sqlite:")
    );
}
