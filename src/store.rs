use crate::document::PlannerDocument;
use crate::draft::{ModuleDraft, TaskDraft};
use crate::error::{PlannerError, PlannerResult};
use crate::ids::{IdAllocator, ModuleId, TaskId};
use crate::module::Module;
use crate::persistence::{self, PersistenceResult, PlannerBackend, StorageError};
use crate::task::{Task, parse_due_date};
use crate::validation;
use chrono::{Local, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of the most recent load.
#[derive(Debug)]
pub enum LoadStatus {
    Loaded { modules: usize },
    /// Nothing stored yet; the store starts empty.
    Missing,
    /// The stored data could not be read; the store starts empty.
    Failed(StorageError),
}

impl LoadStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed(_))
    }
}

/// In-memory source of truth for modules and tasks.
///
/// Every successful mutation is followed by a full save through the backend.
pub struct PlannerStore {
    backend: Box<dyn PlannerBackend>,
    document: PlannerDocument,
    ids: IdAllocator,
    load_status: LoadStatus,
    unreadable_copy: Option<PathBuf>,
    export_dir: PathBuf,
}

impl PlannerStore {
    /// Loads from `backend`. Never fails: unreadable data leaves an empty store
    /// and is reported through [`PlannerStore::load_status`].
    pub fn open<B: PlannerBackend + 'static>(backend: B) -> Self {
        let mut store = Self {
            backend: Box::new(backend),
            document: PlannerDocument::default(),
            ids: IdAllocator::default(),
            load_status: LoadStatus::Missing,
            unreadable_copy: None,
            export_dir: PathBuf::from("."),
        };
        store.reload();
        store
    }

    pub fn with_export_dir<P: AsRef<Path>>(mut self, export_dir: P) -> Self {
        self.export_dir = export_dir.as_ref().to_path_buf();
        self
    }

    pub fn reload(&mut self) -> &LoadStatus {
        self.unreadable_copy = None;
        let status = match self.read_backend() {
            Ok(Some(document)) => {
                let modules = document.modules.len();
                info!(
                    source = %self.backend.describe(),
                    modules,
                    tasks = document.task_count(),
                    "planner data loaded"
                );
                self.install(document);
                LoadStatus::Loaded { modules }
            }
            Ok(None) => {
                info!(source = %self.backend.describe(), "no planner data yet, starting empty");
                self.install(PlannerDocument::default());
                LoadStatus::Missing
            }
            Err(err) => {
                warn!(source = %self.backend.describe(), %err, "could not load planner data, starting empty");
                match self.backend.preserve_unreadable() {
                    Ok(Some(copy)) => {
                        warn!(copy = %copy.display(), "kept a copy of the unreadable data");
                        self.unreadable_copy = Some(copy);
                    }
                    Ok(None) => {}
                    Err(copy_err) => warn!(%copy_err, "could not copy the unreadable data aside"),
                }
                self.install(PlannerDocument::default());
                LoadStatus::Failed(err)
            }
        };
        self.load_status = status;
        &self.load_status
    }

    fn read_backend(&self) -> PersistenceResult<Option<PlannerDocument>> {
        let Some(mut document) = self.backend.load_document()? else {
            return Ok(None);
        };
        if !document.has_complete_ids() {
            debug!("stored data has missing or duplicate ids, renumbering");
            document.renumber();
        }
        persistence::validate_document(&document)?;
        Ok(Some(document))
    }

    fn install(&mut self, document: PlannerDocument) {
        self.ids = IdAllocator::starting_after(document.highest_id());
        self.document = document;
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Where the data that failed the last load was copied, if it was.
    pub fn unreadable_copy(&self) -> Option<&Path> {
        self.unreadable_copy.as_deref()
    }

    pub fn document(&self) -> &PlannerDocument {
        &self.document
    }

    pub fn modules(&self) -> &[Module] {
        &self.document.modules
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.document.module(id)
    }

    /// Module shown at zero-based `position`.
    pub fn module_at(&self, position: usize) -> Option<&Module> {
        self.document.modules.get(position)
    }

    /// Task shown at zero-based `position` inside `module`.
    pub fn task_at(&self, module: ModuleId, position: usize) -> Option<&Task> {
        self.document
            .module(module)
            .and_then(|module| module.tasks.get(position))
    }

    pub fn backend_description(&self) -> String {
        self.backend.describe()
    }

    /// Writes the whole document, stamping `savedAt`.
    pub fn save(&mut self) -> PersistenceResult<()> {
        let previous = self.document.saved_at.replace(Utc::now());
        match self.backend.save_document(&self.document) {
            Ok(()) => {
                debug!(destination = %self.backend.describe(), "planner data saved");
                Ok(())
            }
            Err(err) => {
                self.document.saved_at = previous;
                warn!(destination = %self.backend.describe(), %err, "saving planner data failed");
                Err(err)
            }
        }
    }

    fn module_position(&self, id: ModuleId) -> Option<usize> {
        self.document.modules.iter().position(|module| module.id == id)
    }

    pub fn add_module(&mut self, draft: ModuleDraft) -> PlannerResult<Module> {
        let name = validation::module_name(&draft.name)?;
        let module = Module::new(
            self.ids.next_module(),
            name,
            draft.color_tag,
            draft.description.trim(),
        );
        info!(module = %module.id, name = %module.name, "module added");
        self.document.modules.push(module.clone());
        self.save()?;
        Ok(module)
    }

    pub fn update_module(&mut self, id: ModuleId, draft: ModuleDraft) -> PlannerResult<Module> {
        let name = validation::module_name(&draft.name)?;
        let module = self
            .document
            .module_mut(id)
            .ok_or(PlannerError::ModuleNotFound(id))?;
        module.name = name;
        module.color_tag = draft.color_tag;
        module.description = draft.description.trim().to_string();
        let updated = module.clone();
        info!(module = %id, "module updated");
        self.save()?;
        Ok(updated)
    }

    /// Removes the module and its tasks. Returns `false` if it was already gone.
    pub fn remove_module(&mut self, id: ModuleId) -> PlannerResult<bool> {
        let Some(position) = self.module_position(id) else {
            debug!(module = %id, "module already removed");
            return Ok(false);
        };
        let removed = self.document.modules.remove(position);
        info!(module = %id, name = %removed.name, tasks = removed.tasks.len(), "module removed");
        self.save()?;
        Ok(true)
    }

    /// Appends a task. An unreadable due date is dropped rather than rejected.
    pub fn add_task(&mut self, module: ModuleId, draft: TaskDraft) -> PlannerResult<Task> {
        let title = validation::task_title(&draft.title)?;
        let position = self
            .module_position(module)
            .ok_or(PlannerError::ModuleNotFound(module))?;

        let mut task = Task::new(self.ids.next_task(), title);
        task.description = draft.description.trim().to_string();
        task.due_date = lenient_due_date(&draft.due_date);
        task.priority = draft.priority;

        info!(module = %module, task = %task.id, title = %task.title, "task added");
        self.document.modules[position].tasks.push(task.clone());
        self.save()?;
        Ok(task)
    }

    pub fn update_task(
        &mut self,
        module: ModuleId,
        task: TaskId,
        draft: TaskDraft,
    ) -> PlannerResult<Task> {
        let title = validation::task_title(&draft.title)?;
        let due_date = lenient_due_date(&draft.due_date);
        let entry = self.task_mut(module, task)?;
        entry.title = title;
        entry.description = draft.description.trim().to_string();
        entry.due_date = due_date;
        entry.priority = draft.priority;
        let updated = entry.clone();
        info!(module = %module, task = %task, "task updated");
        self.save()?;
        Ok(updated)
    }

    /// Removes a task. Returns `false` when the module or task no longer exists.
    pub fn remove_task(&mut self, module: ModuleId, task: TaskId) -> PlannerResult<bool> {
        let Some(owner) = self.document.module_mut(module) else {
            debug!(module = %module, "task removal for unknown module ignored");
            return Ok(false);
        };
        let Some(position) = owner.tasks.iter().position(|entry| entry.id == task) else {
            debug!(module = %module, task = %task, "task already removed");
            return Ok(false);
        };
        owner.tasks.remove(position);
        info!(module = %module, task = %task, "task removed");
        self.save()?;
        Ok(true)
    }

    /// Flips completion and returns the new state.
    pub fn toggle_task_completion(&mut self, module: ModuleId, task: TaskId) -> PlannerResult<bool> {
        let entry = self.task_mut(module, task)?;
        entry.completed = !entry.completed;
        let completed = entry.completed;
        info!(module = %module, task = %task, completed, "task toggled");
        self.save()?;
        Ok(completed)
    }

    fn task_mut(&mut self, module: ModuleId, task: TaskId) -> PlannerResult<&mut Task> {
        self.document
            .module_mut(module)
            .ok_or(PlannerError::ModuleNotFound(module))?
            .task_mut(task)
            .ok_or(PlannerError::TaskNotFound { module, task })
    }

    /// Exports to `destination`, or to a dated file in the export directory.
    pub fn export_csv(&self, destination: Option<&Path>) -> PersistenceResult<PathBuf> {
        let destination = match destination {
            Some(path) => path.to_path_buf(),
            None => self
                .export_dir
                .join(persistence::default_export_file_name(Local::now().date_naive())),
        };
        let written = persistence::export_csv(&self.document, &destination)?;
        info!(path = %written.display(), rows = self.document.task_count(), "csv export written");
        Ok(written)
    }
}

fn lenient_due_date(input: &str) -> Option<chrono::NaiveDate> {
    match parse_due_date(input) {
        Ok(date) => date,
        Err(err) => {
            warn!(%err, "storing task without due date");
            None
        }
    }
}
