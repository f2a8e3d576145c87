use super::{PersistenceResult, PlannerBackend};
use crate::document::PlannerDocument;
use crate::module::Module;
use crate::persistence::lenient;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

/// Keeps each module as a JSON row; a save rewrites all rows in one transaction.
pub struct SqlitePlannerBackend {
    connection: Connection,
    path: PathBuf,
}

impl SqlitePlannerBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path.as_ref())?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection,
            path: path.as_ref().to_path_buf(),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS planner_meta (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                saved_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS modules (
                position INTEGER PRIMARY KEY,
                module_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

impl PlannerBackend for SqlitePlannerBackend {
    fn load_document(&self) -> PersistenceResult<Option<PlannerDocument>> {
        let mut stmt = self
            .connection
            .prepare("SELECT saved_at FROM planner_meta WHERE id = 1")?;
        let saved_at: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;

        let Some(saved_at) = saved_at else {
            return Ok(None);
        };

        let mut stmt = self
            .connection
            .prepare("SELECT module_json FROM modules ORDER BY position ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut modules = Vec::new();
        for json in rows {
            let module: Module = serde_json::from_str(&json?)?;
            modules.push(module);
        }

        Ok(Some(PlannerDocument {
            modules,
            saved_at: lenient::parse_timestamp(&saved_at),
        }))
    }

    fn save_document(&mut self, document: &PlannerDocument) -> PersistenceResult<()> {
        super::validate_document(document)?;
        let saved_at = document
            .saved_at
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_default();

        let tx = self.connection.transaction()?;
        tx.execute("DELETE FROM modules", [])?;
        {
            let mut stmt = tx.prepare("INSERT INTO modules (position, module_json) VALUES (?1, ?2)")?;
            for (position, module) in document.modules.iter().enumerate() {
                let json = serde_json::to_string(module)?;
                stmt.execute(params![position as i64, json])?;
            }
        }
        tx.execute(
            "INSERT INTO planner_meta (id, saved_at) VALUES (1, ?1)
             ON CONFLICT(id) DO UPDATE SET saved_at = excluded.saved_at",
            params![saved_at],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}
