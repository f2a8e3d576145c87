use crate::ids::{ID_CEILING, ModuleId, TaskId};
use crate::module::Module;
use crate::persistence::lenient;
use crate::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted root: every module in display order plus the last save time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerDocument {
    #[serde(default, deserialize_with = "lenient::list")]
    pub modules: Vec<Module>,
    #[serde(default, deserialize_with = "lenient::optional_timestamp")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl PlannerDocument {
    pub fn new(modules: Vec<Module>) -> Self {
        Self {
            modules,
            saved_at: None,
        }
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|module| module.id == id)
    }

    pub fn module_mut(&mut self, id: ModuleId) -> Option<&mut Module> {
        self.modules.iter_mut().find(|module| module.id == id)
    }

    /// Every task paired with its owning module, in display order.
    pub fn tasks(&self) -> impl Iterator<Item = (&Module, &Task)> {
        self.modules
            .iter()
            .flat_map(|module| module.tasks.iter().map(move |task| (module, task)))
    }

    pub fn task_count(&self) -> usize {
        self.modules.iter().map(|module| module.tasks.len()).sum()
    }

    /// Largest id of either kind, `0` for an empty document.
    pub fn highest_id(&self) -> u64 {
        let module_max = self.modules.iter().map(|m| m.id.0).max().unwrap_or(0);
        let task_max = self.tasks().map(|(_, t)| t.id.0).max().unwrap_or(0);
        module_max.max(task_max)
    }

    pub(crate) fn has_complete_ids(&self) -> bool {
        let mut seen_modules = std::collections::HashSet::new();
        let mut seen_tasks = std::collections::HashSet::new();
        for module in &self.modules {
            if !module.id.is_assigned()
                || module.id.0 > ID_CEILING
                || !seen_modules.insert(module.id)
            {
                return false;
            }
            for task in &module.tasks {
                if !task.id.is_assigned()
                    || task.id.0 > ID_CEILING
                    || !seen_tasks.insert(task.id)
                {
                    return false;
                }
            }
        }
        true
    }

    /// Gives every module and task a fresh id in document order.
    pub(crate) fn renumber(&mut self) {
        let mut next = 0;
        for module in &mut self.modules {
            next += 1;
            module.id = ModuleId(next);
            for task in &mut module.tasks {
                next += 1;
                task.id = TaskId(next);
            }
        }
    }
}
