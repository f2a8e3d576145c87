use crate::document::PlannerDocument;
use crate::validation;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<tempfile::PersistError> for StorageError {
    fn from(value: tempfile::PersistError) -> Self {
        Self::Io(value.error)
    }
}

pub type PersistenceResult<T> = Result<T, StorageError>;

/// Where a [`PlannerDocument`] lives between runs.
pub trait PlannerBackend {
    /// `Ok(None)` when nothing has been stored yet.
    fn load_document(&self) -> PersistenceResult<Option<PlannerDocument>>;

    /// Replaces the stored document as a whole.
    fn save_document(&mut self, document: &PlannerDocument) -> PersistenceResult<()>;

    /// Human readable location, used in log lines.
    fn describe(&self) -> String;

    /// Copies stored data that failed to load aside, before the next save
    /// replaces it. Returns where the copy went.
    fn preserve_unreadable(&self) -> PersistenceResult<Option<PathBuf>> {
        Ok(None)
    }
}

pub fn validate_document(document: &PlannerDocument) -> PersistenceResult<()> {
    validation::validate_document(document)
        .map_err(|err| StorageError::InvalidData(err.to_string()))
}

pub mod file;
pub mod lenient;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{JsonFileBackend, default_export_file_name, export_csv, write_csv};
