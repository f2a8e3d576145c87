use crate::ids::{ModuleId, TaskId};
use crate::persistence::StorageError;
use crate::validation::ValidationError;

/// Failure of a store operation.
///
/// `Storage` coming back from a mutation means the in-memory change was kept
/// but could not be written; the next successful save makes it durable.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("could not save data: {0}")]
    Storage(#[from] StorageError),

    #[error("module {0} not found")]
    ModuleNotFound(ModuleId),

    #[error("task {task} not found in module {module}")]
    TaskNotFound { module: ModuleId, task: TaskId },
}

pub type PlannerResult<T> = Result<T, PlannerError>;
