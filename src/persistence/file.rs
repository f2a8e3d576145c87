use super::{PersistenceResult, PlannerBackend, StorageError};
use crate::document::PlannerDocument;
use crate::task::format_due_date;
use chrono::NaiveDate;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const EXPORT_HEADER: [&str; 6] = ["Module", "Task", "Description", "DueDate", "Priority", "Status"];

/// Stores the document as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl PlannerBackend for JsonFileBackend {
    fn load_document(&self) -> PersistenceResult<Option<PlannerDocument>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let document: PlannerDocument = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(document))
    }

    /// Writes a sibling temp file and renames it over the target, so readers
    /// see either the old or the new document, never a torn one.
    fn save_document(&mut self, document: &PlannerDocument) -> PersistenceResult<()> {
        super::validate_document(document)?;
        let directory = self.directory();
        fs::create_dir_all(directory)?;

        let mut staged = NamedTempFile::new_in(directory)?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, document)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        staged.as_file().sync_all()?;
        staged.persist(&self.path)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn preserve_unreadable(&self) -> PersistenceResult<Option<PathBuf>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let mut name = self.path.as_os_str().to_owned();
        name.push(".corrupt");
        let backup = PathBuf::from(name);
        fs::copy(&self.path, &backup)?;
        Ok(Some(backup))
    }
}

/// One row per task; a module without tasks still gets a row with only its name.
pub fn write_csv<W: Write>(document: &PlannerDocument, writer: W) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(EXPORT_HEADER)?;
    for module in &document.modules {
        if module.tasks.is_empty() {
            writer.write_record([module.name.as_str(), "", "", "", "", ""])?;
            continue;
        }
        for task in &module.tasks {
            let due = format_due_date(task.due_date);
            writer.write_record([
                module.name.as_str(),
                task.title.as_str(),
                task.description.as_str(),
                due.as_str(),
                task.priority.label(),
                task.status_label(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn default_export_file_name(today: NaiveDate) -> String {
    format!("study_planner_export_{}.csv", today.format("%Y-%m-%d"))
}

pub fn export_csv<P: AsRef<Path>>(
    document: &PlannerDocument,
    destination: P,
) -> PersistenceResult<PathBuf> {
    let destination = destination.as_ref();
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    if destination.is_dir() {
        return Err(StorageError::InvalidData(format!(
            "export destination {} is a directory",
            destination.display()
        )));
    }
    let file = File::create(destination)?;
    write_csv(document, BufWriter::new(file))?;
    Ok(destination.to_path_buf())
}
