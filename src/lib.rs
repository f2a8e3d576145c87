pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod dialog;
pub mod document;
pub mod draft;
pub mod error;
pub mod ids;
pub mod module;
pub mod persistence;
pub mod session;
pub mod store;
pub mod task;
pub mod validation;

pub use calendar::CalendarEntry;
pub use config::{BackendKind, ConfigError, PlannerConfig};
pub use dashboard::{DashboardSummary, ModuleProgress};
pub use dialog::{DialogOutcome, Prompter};
pub use document::PlannerDocument;
pub use draft::{ModuleDraft, TaskDraft};
pub use error::{PlannerError, PlannerResult};
pub use ids::{ModuleId, TaskId};
pub use module::{ColorTag, Module};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqlitePlannerBackend;
pub use persistence::{JsonFileBackend, PlannerBackend, StorageError, export_csv, write_csv};
pub use session::{Session, View};
pub use store::{LoadStatus, PlannerStore};
pub use task::{Priority, Task, parse_due_date};
pub use validation::ValidationError;
