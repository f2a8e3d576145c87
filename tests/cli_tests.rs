use assert_cmd::Command;
use predicates::str::contains as str_contains;
use std::path::Path;
use tempfile::{TempDir, tempdir};

#[allow(deprecated)]
fn run_cli(data: &Path, script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("planner").expect("planner binary");
    let export_dir = data.parent().unwrap_or(Path::new("."));
    cmd.env("STUDY_PLANNER_DATA", data)
        .env("STUDY_PLANNER_EXPORT_DIR", export_dir)
        .env("STUDY_PLANNER_BACKEND", "json")
        .env_remove("RUST_LOG")
        .write_stdin(script.to_string())
        .assert()
}

fn workspace() -> (TempDir, std::path::PathBuf) {
    let dir = tempdir().expect("temp dir");
    let data = dir.path().join("planner.json");
    (dir, data)
}

const ADD_ALGORITHMS: &str = "module add\nAlgorithms\nGraphs\n\nselect 1\ntask add\nHomework 1\n\n2000-01-01\nsubmission\n";

#[test]
fn cli_starts_fresh_without_data() {
    let (_dir, data) = workspace();
    run_cli(&data, "modules\nquit\n")
        .success()
        .stdout(str_contains("starting fresh"))
        .stdout(str_contains("No modules yet."));
}

#[test]
fn cli_adds_module_and_task() {
    let (_dir, data) = workspace();
    run_cli(&data, &format!("{ADD_ALGORITHMS}tasks\nquit\n"))
        .success()
        .stdout(str_contains("Module 'Algorithms' added."))
        .stdout(str_contains("Task 'Homework 1' added."))
        .stdout(str_contains("[ ] Homework 1 (submission, due 2000-01-01) OVERDUE"));
    assert!(data.exists(), "mutations should be saved immediately");
}

#[test]
fn cli_data_survives_restart() {
    let (_dir, data) = workspace();
    run_cli(&data, &format!("{ADD_ALGORITHMS}quit\n")).success();
    run_cli(&data, "select 1\nquit\n")
        .success()
        .stdout(str_contains("Loaded 1 module(s)"))
        .stdout(str_contains("Homework 1"));
}

#[test]
fn cli_requires_a_selected_module_for_task_commands() {
    let (_dir, data) = workspace();
    run_cli(&data, "task add\nquit\n")
        .success()
        .stdout(str_contains("Select a module first (select <n>)."));
}

#[test]
fn cli_toggle_updates_dashboard() {
    let (_dir, data) = workspace();
    run_cli(&data, &format!("{ADD_ALGORITHMS}task done 1\ndashboard\nquit\n"))
        .success()
        .stdout(str_contains("Task 'Homework 1' marked done."))
        .stdout(str_contains("Completed   : 1"))
        .stdout(str_contains("Algorithms  1/1 (100%)"));
}

#[test]
fn cli_calendar_lists_overdue_tasks() {
    let (_dir, data) = workspace();
    run_cli(&data, &format!("{ADD_ALGORITHMS}calendar\nquit\n"))
        .success()
        .stdout(str_contains("2000-01-01  Homework 1  (Algorithms)  OVERDUE"));
}

#[test]
fn cli_module_removal_needs_confirmation() {
    let (_dir, data) = workspace();
    let script = format!("{ADD_ALGORITHMS}module rm 1\nn\nmodule rm 1\ny\nmodules\nquit\n");
    let assert = run_cli(&data, &script).success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("Cancelled."), "{output}");
    assert!(output.contains("Module 'Algorithms' deleted."), "{output}");
    let after = output.split("deleted.").last().unwrap_or_default();
    assert!(after.contains("No modules yet."), "{after}");
}

#[test]
fn cli_exports_csv() {
    let (dir, data) = workspace();
    let target = dir.path().join("export.csv");
    let script = format!("{ADD_ALGORITHMS}export {}\nquit\n", target.display());
    run_cli(&data, &script)
        .success()
        .stdout(str_contains("Exported to"));
    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.contains("Algorithms,Homework 1,,2000-01-01,submission,Open"));
}

#[test]
fn cli_reports_unreadable_data_and_continues() {
    let (_dir, data) = workspace();
    std::fs::write(&data, "not json at all").unwrap();
    run_cli(&data, "modules\nquit\n")
        .success()
        .stdout(str_contains("Could not load data"))
        .stdout(str_contains("planner.json.corrupt"))
        .stdout(str_contains("No modules yet."));
}

#[test]
fn cli_rejects_unknown_commands_and_positions() {
    let (_dir, data) = workspace();
    run_cli(&data, "frobnicate\nselect 7\nselect x\nquit\n")
        .success()
        .stdout(str_contains("Unknown command. Type 'help'."))
        .stdout(str_contains("No such module."))
        .stdout(str_contains("Usage: select <n>"));
}
