use anyhow::Context;
use std::io::{self, StdinLock, Stdout};
use std::path::Path;
use study_planner::calendar::{self, today};
use study_planner::{
    BackendKind, DashboardSummary, DialogOutcome, JsonFileBackend, LoadStatus, ModuleDraft,
    ModuleId, PlannerConfig, PlannerError, PlannerStore, Prompter, Session, TaskDraft, View,
};
use tracing_subscriber::EnvFilter;

type Ui = Prompter<StdinLock<'static>, Stdout>;

fn print_help(ui: &mut Ui) -> io::Result<()> {
    ui.say(
        "Commands:\n  help                 Show this help\n  modules              List modules with progress\n  module add           Create a module (dialog)\n  module edit <n>      Edit module n (dialog)\n  module rm <n>        Delete module n and its tasks\n  select <n>           Select module n and show its tasks\n  tasks                Show tasks of the selected module\n  task add             Add a task to the selected module (dialog)\n  task edit <n>        Edit task n (dialog)\n  task done <n>        Toggle completion of task n\n  task rm <n>          Delete task n\n  calendar             Overdue tasks and tasks due through next month\n  dashboard            Totals and progress per module\n  export [path]        Export all tasks as CSV\n  save                 Save now\n  reload               Reload data from disk\n  quit|exit            Exit\n\nIn dialogs, type ':cancel' to abort.",
    )
}

fn init_tracing(config: &PlannerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[cfg(feature = "sqlite")]
fn open_sqlite(path: &Path) -> anyhow::Result<PlannerStore> {
    let backend = study_planner::SqlitePlannerBackend::new(path)
        .with_context(|| format!("opening sqlite database {}", path.display()))?;
    Ok(PlannerStore::open(backend))
}

#[cfg(not(feature = "sqlite"))]
fn open_sqlite(_path: &Path) -> anyhow::Result<PlannerStore> {
    anyhow::bail!("this build has no sqlite support; use STUDY_PLANNER_BACKEND=json")
}

fn open_store(config: &PlannerConfig) -> anyhow::Result<PlannerStore> {
    let store = match config.backend {
        BackendKind::Json => PlannerStore::open(JsonFileBackend::new(&config.data_path)),
        BackendKind::Sqlite => open_sqlite(&config.data_path)?,
    };
    Ok(store.with_export_dir(&config.export_dir))
}

fn report_load(ui: &mut Ui, store: &PlannerStore) -> io::Result<()> {
    match store.load_status() {
        LoadStatus::Loaded { modules } => {
            ui.say(format!("Loaded {modules} module(s) from {}.", store.backend_description()))
        }
        LoadStatus::Missing => ui.say(format!(
            "No saved data at {}, starting fresh.",
            store.backend_description()
        )),
        LoadStatus::Failed(err) => {
            ui.say(format!(
                "Could not load data ({err}). Starting with an empty planner."
            ))?;
            match store.unreadable_copy() {
                Some(copy) => ui.say(format!("The unreadable data was kept at {}.", copy.display())),
                None => Ok(()),
            }
        }
    }
}

fn report_error(ui: &mut Ui, err: PlannerError) -> io::Result<()> {
    match err {
        PlannerError::Storage(err) => {
            ui.say(format!("Changed in memory, but saving failed: {err}"))
        }
        other => ui.say(format!("Error: {other}")),
    }
}

/// `1`-based position typed by the user to a zero-based index.
fn parse_position(arg: Option<&str>) -> Option<usize> {
    arg?.parse::<usize>().ok()?.checked_sub(1)
}

fn render_modules(ui: &mut Ui, store: &PlannerStore) -> io::Result<()> {
    if store.modules().is_empty() {
        return ui.say("No modules yet. Use 'module add' to create one.");
    }
    for (idx, module) in store.modules().iter().enumerate() {
        ui.say(format!(
            "{:>2}. {} [{}] {}/{} ({}%)",
            idx + 1,
            module.name,
            module.color_tag,
            module.completed_count(),
            module.tasks.len(),
            (module.progress() * 100.0).floor() as u32
        ))?;
        if !module.description.is_empty() {
            ui.say(format!("      {}", module.description))?;
        }
    }
    Ok(())
}

fn render_tasks(ui: &mut Ui, store: &PlannerStore, session: &mut Session) -> io::Result<()> {
    let Some(module) = session.selected_module(store) else {
        return ui.say("Select a module first (select <n>).");
    };
    ui.say(format!("Tasks for {}:", module.name))?;
    if module.tasks.is_empty() {
        return ui.say("  No tasks yet. Use 'task add' to create one.");
    }
    let today = today();
    for (idx, task) in module.tasks.iter().enumerate() {
        let mark = if task.completed { "x" } else { " " };
        let mut line = format!("{:>3}. [{mark}] {} ({}", idx + 1, task.title, task.priority);
        if let Some(due) = task.due_date {
            line.push_str(&format!(", due {due}"));
        }
        line.push(')');
        if task.is_overdue_on(today) {
            line.push_str(" OVERDUE");
        }
        ui.say(line)?;
        if !task.description.is_empty() {
            ui.say(format!("         {}", task.description))?;
        }
    }
    Ok(())
}

fn render_calendar(ui: &mut Ui, store: &PlannerStore) -> io::Result<()> {
    let entries = calendar::upcoming(store.document(), today());
    ui.say("Overdue tasks and tasks due through the end of next month:")?;
    if entries.is_empty() {
        return ui.say("  No open tasks due through the end of next month.");
    }
    for entry in entries {
        let flag = if entry.is_today {
            "  TODAY"
        } else if entry.is_overdue {
            "  OVERDUE"
        } else {
            ""
        };
        ui.say(format!(
            "  {}  {}  ({}){flag}",
            entry.due_date, entry.title, entry.module_name
        ))?;
    }
    Ok(())
}

fn render_dashboard(ui: &mut Ui, store: &PlannerStore) -> io::Result<()> {
    ui.say("Dashboard")?;
    if store.modules().is_empty() {
        return ui.say("  No modules yet.");
    }
    let summary = DashboardSummary::from_document(store.document(), today());
    ui.say(format!("  Total tasks : {}", summary.total_tasks))?;
    ui.say(format!("  Completed   : {}", summary.total_completed))?;
    ui.say(format!("  Overdue     : {}", summary.total_overdue))?;
    ui.say("Progress per module:")?;
    for module in &summary.modules {
        ui.say(format!(
            "  {}  {}/{} ({}%)",
            module.name,
            module.completed,
            module.total,
            module.percent()
        ))?;
    }
    Ok(())
}

fn module_draft(store: &PlannerStore, id: ModuleId) -> Option<ModuleDraft> {
    store.module(id).map(|module| ModuleDraft {
        name: module.name.clone(),
        color_tag: module.color_tag,
        description: module.description.clone(),
    })
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = PlannerConfig::from_env()?;
    init_tracing(&config);

    let mut store = open_store(&config)?;
    let mut session = Session::new();
    let mut ui: Ui = Prompter::new(io::stdin().lock(), io::stdout());

    ui.say("Study Planner (CLI) - type 'help' for commands\n")?;
    report_load(&mut ui, &store)?;
    render_modules(&mut ui, &store)?;

    loop {
        let Some(input) = ui.read_command("> ")? else {
            break;
        };
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(&mut ui)?,
            "quit" | "exit" => break,
            "modules" | "show" => {
                session.view = View::Modules;
                render_modules(&mut ui, &store)?;
            }
            "select" => match parse_position(parts.next()) {
                Some(position) => match session.select(&store, position) {
                    Some(_) => render_tasks(&mut ui, &store, &mut session)?,
                    None => ui.say("No such module.")?,
                },
                None => ui.say("Usage: select <n>")?,
            },
            "tasks" => render_tasks(&mut ui, &store, &mut session)?,
            "calendar" => {
                session.view = View::Calendar;
                render_calendar(&mut ui, &store)?;
            }
            "dashboard" => {
                session.view = View::Dashboard;
                render_dashboard(&mut ui, &store)?;
            }
            "module" => match (parts.next(), parse_position(parts.next())) {
                (Some("add"), _) => {
                    ui.say("New module")?;
                    match ui.module_dialog(None)? {
                        DialogOutcome::Submitted(draft) => match store.add_module(draft) {
                            Ok(module) => {
                                ui.say(format!("Module '{}' added.", module.name))?;
                                render_modules(&mut ui, &store)?;
                            }
                            Err(err) => report_error(&mut ui, err)?,
                        },
                        DialogOutcome::Cancelled => ui.say("Cancelled.")?,
                    }
                }
                (Some("edit"), Some(position)) => {
                    let Some(id) = store.module_at(position).map(|m| m.id) else {
                        ui.say("No such module.")?;
                        continue;
                    };
                    let current = module_draft(&store, id);
                    match ui.module_dialog(current.as_ref())? {
                        DialogOutcome::Submitted(draft) => match store.update_module(id, draft) {
                            Ok(module) => ui.say(format!("Module '{}' updated.", module.name))?,
                            Err(err) => report_error(&mut ui, err)?,
                        },
                        DialogOutcome::Cancelled => ui.say("Cancelled.")?,
                    }
                }
                (Some("rm"), Some(position)) => {
                    let Some(module) = store.module_at(position) else {
                        ui.say("No such module.")?;
                        continue;
                    };
                    let (id, name) = (module.id, module.name.clone());
                    let question = format!(
                        "Delete module '{name}' and its {} task(s)?",
                        module.tasks.len()
                    );
                    match ui.confirm(&question)? {
                        DialogOutcome::Submitted(()) => match store.remove_module(id) {
                            Ok(_) => {
                                if session.selected_id() == Some(id) {
                                    session.clear_selection();
                                }
                                ui.say(format!("Module '{name}' deleted."))?;
                            }
                            Err(err) => report_error(&mut ui, err)?,
                        },
                        DialogOutcome::Cancelled => ui.say("Cancelled.")?,
                    }
                }
                _ => ui.say("Usage: module add | module edit <n> | module rm <n>")?,
            },
            "task" => {
                let sub = parts.next();
                let position = parse_position(parts.next());
                let Some(module_id) = session.selected_module(&store).map(|m| m.id) else {
                    ui.say("Select a module first (select <n>).")?;
                    continue;
                };
                match (sub, position) {
                    (Some("add"), _) => {
                        let name = store.module(module_id).map(|m| m.name.clone()).unwrap_or_default();
                        ui.say(format!("New task for {name}"))?;
                        match ui.task_dialog(None)? {
                            DialogOutcome::Submitted(draft) => {
                                match store.add_task(module_id, draft) {
                                    Ok(task) => {
                                        ui.say(format!("Task '{}' added.", task.title))?;
                                        render_tasks(&mut ui, &store, &mut session)?;
                                    }
                                    Err(err) => report_error(&mut ui, err)?,
                                }
                            }
                            DialogOutcome::Cancelled => ui.say("Cancelled.")?,
                        }
                    }
                    (Some(action @ ("edit" | "done" | "rm")), Some(position)) => {
                        let Some(task) = store.task_at(module_id, position).cloned() else {
                            ui.say("No such task.")?;
                            continue;
                        };
                        match action {
                            "done" => match store.toggle_task_completion(module_id, task.id) {
                                Ok(true) => ui.say(format!("Task '{}' marked done.", task.title))?,
                                Ok(false) => ui.say(format!("Task '{}' reopened.", task.title))?,
                                Err(err) => report_error(&mut ui, err)?,
                            },
                            "edit" => {
                                let current = TaskDraft {
                                    title: task.title.clone(),
                                    description: task.description.clone(),
                                    due_date: study_planner::task::format_due_date(task.due_date),
                                    priority: task.priority,
                                };
                                match ui.task_dialog(Some(&current))? {
                                    DialogOutcome::Submitted(draft) => {
                                        match store.update_task(module_id, task.id, draft) {
                                            Ok(task) => {
                                                ui.say(format!("Task '{}' updated.", task.title))?
                                            }
                                            Err(err) => report_error(&mut ui, err)?,
                                        }
                                    }
                                    DialogOutcome::Cancelled => ui.say("Cancelled.")?,
                                }
                            }
                            _ => {
                                let question = format!("Delete task '{}'?", task.title);
                                match ui.confirm(&question)? {
                                    DialogOutcome::Submitted(()) => {
                                        match store.remove_task(module_id, task.id) {
                                            Ok(_) => ui.say("Task deleted.")?,
                                            Err(err) => report_error(&mut ui, err)?,
                                        }
                                    }
                                    DialogOutcome::Cancelled => ui.say("Cancelled.")?,
                                }
                            }
                        }
                    }
                    _ => ui.say("Usage: task add | task edit <n> | task done <n> | task rm <n>")?,
                }
            }
            "export" => match store.export_csv(parts.next().map(Path::new)) {
                Ok(path) => ui.say(format!("Exported to {}.", path.display()))?,
                Err(err) => ui.say(format!("Export failed: {err}"))?,
            },
            "save" => match store.save() {
                Ok(()) => ui.say("Data saved.")?,
                Err(err) => ui.say(format!("Error saving data: {err}"))?,
            },
            "reload" => {
                store.reload();
                session.clear_selection();
                report_load(&mut ui, &store)?;
                render_modules(&mut ui, &store)?;
            }
            _ => ui.say("Unknown command. Type 'help'.")?,
        }
    }

    Ok(())
}
