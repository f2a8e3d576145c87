use crate::document::PlannerDocument;
use crate::module::Module;
use crate::task::Task;
use std::collections::HashSet;

/// Rejected user input. The operation is not performed and the caller re-prompts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("module name must not be empty")]
    EmptyModuleName,

    #[error("task title must not be empty")]
    EmptyTaskTitle,

    #[error("invalid date '{input}' (expected YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("unknown priority '{0}'")]
    UnknownPriority(String),

    #[error("unknown colour '{0}'")]
    UnknownColor(String),

    #[error("inconsistent document: {0}")]
    Inconsistent(String),
}

/// Trims `name` and rejects it when nothing is left.
pub fn module_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyModuleName);
    }
    Ok(trimmed.to_string())
}

/// Trims `title` and rejects it when nothing is left.
pub fn task_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTaskTitle);
    }
    Ok(trimmed.to_string())
}

pub fn validate_task(task: &Task) -> Result<(), ValidationError> {
    if task.title.trim().is_empty() {
        return Err(ValidationError::Inconsistent(format!(
            "task {} has an empty title",
            task.id
        )));
    }
    if !task.id.is_assigned() {
        return Err(ValidationError::Inconsistent(format!(
            "task '{}' has no id",
            task.title
        )));
    }
    Ok(())
}

pub fn validate_module(module: &Module) -> Result<(), ValidationError> {
    if module.name.trim().is_empty() {
        return Err(ValidationError::Inconsistent(format!(
            "module {} has an empty name",
            module.id
        )));
    }
    if !module.id.is_assigned() {
        return Err(ValidationError::Inconsistent(format!(
            "module '{}' has no id",
            module.name
        )));
    }
    for task in &module.tasks {
        validate_task(task)?;
    }
    Ok(())
}

/// Checks every entity plus id uniqueness across the document.
pub fn validate_document(document: &PlannerDocument) -> Result<(), ValidationError> {
    let mut module_ids = HashSet::with_capacity(document.modules.len());
    let mut task_ids = HashSet::new();
    for module in &document.modules {
        validate_module(module)?;
        if !module_ids.insert(module.id) {
            return Err(ValidationError::Inconsistent(format!(
                "duplicate module id {}",
                module.id
            )));
        }
        for task in &module.tasks {
            if !task_ids.insert(task.id) {
                return Err(ValidationError::Inconsistent(format!(
                    "duplicate task id {}",
                    task.id
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ModuleId, TaskId};
    use crate::module::ColorTag;

    fn module_with_tasks(id: u64, task_ids: &[u64]) -> Module {
        let mut module = Module::new(ModuleId(id), "Algorithms", ColorTag::Blue, "");
        for task_id in task_ids {
            module.tasks.push(Task::new(TaskId(*task_id), "Homework"));
        }
        module
    }

    #[test]
    fn blank_names_and_titles_are_rejected() {
        assert_eq!(module_name("   "), Err(ValidationError::EmptyModuleName));
        assert_eq!(task_title("\t"), Err(ValidationError::EmptyTaskTitle));
        assert_eq!(module_name("  Linear Algebra ").unwrap(), "Linear Algebra");
    }

    #[test]
    fn duplicate_task_ids_across_modules_are_inconsistent() {
        let mut document = PlannerDocument::default();
        document.modules.push(module_with_tasks(1, &[3]));
        document.modules.push(module_with_tasks(2, &[3]));

        let err = validate_document(&document).unwrap_err();
        assert!(err.to_string().contains("duplicate task id"), "{err}");
    }

    #[test]
    fn unassigned_module_id_is_inconsistent() {
        let mut document = PlannerDocument::default();
        document.modules.push(module_with_tasks(0, &[]));
        assert!(matches!(
            validate_document(&document),
            Err(ValidationError::Inconsistent(_))
        ));
    }
}
