use crate::module::ColorTag;
use crate::task::Priority;

/// Field values for creating or editing a module, as a dialog collects them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDraft {
    pub name: String,
    pub color_tag: ColorTag,
    pub description: String,
}

impl ModuleDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn color(mut self, color_tag: ColorTag) -> Self {
        self.color_tag = color_tag;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Field values for creating or editing a task.
///
/// `due_date` stays raw text: an unreadable date degrades to "no deadline"
/// inside the store instead of blocking the save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn due(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}
