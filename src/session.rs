use crate::ids::ModuleId;
use crate::module::Module;
use crate::store::PlannerStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Modules,
    Calendar,
    Dashboard,
}

/// Per-run UI state. Lives with the front-end, never inside the store.
#[derive(Debug, Clone, Default)]
pub struct Session {
    selected: Option<ModuleId>,
    pub view: View,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the module at zero-based `position`; returns its id.
    pub fn select(&mut self, store: &PlannerStore, position: usize) -> Option<ModuleId> {
        let id = store.module_at(position).map(|module| module.id)?;
        self.selected = Some(id);
        Some(id)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected module, dropping a selection whose module has been removed.
    pub fn selected_module<'a>(&mut self, store: &'a PlannerStore) -> Option<&'a Module> {
        let id = self.selected?;
        match store.module(id) {
            Some(module) => Some(module),
            None => {
                self.selected = None;
                None
            }
        }
    }

    pub fn selected_id(&self) -> Option<ModuleId> {
        self.selected
    }
}
