use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Json,
    Sqlite,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(BackendKind::Json),
            "sqlite" => Ok(BackendKind::Sqlite),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown backend '{0}' (expected json or sqlite)")]
    UnknownBackend(String),
}

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Backing file for the planner data.
    pub data_path: PathBuf,
    /// Directory for CSV exports without an explicit destination.
    pub export_dir: PathBuf,
    pub backend: BackendKind,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("study_planner_data.json"),
            export_dir: PathBuf::from("."),
            backend: BackendKind::Json,
            log_filter: "warn".to_string(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                   |
    /// |----------------------------|---------------------------|
    /// | `STUDY_PLANNER_DATA`       | `study_planner_data.json` |
    /// | `STUDY_PLANNER_EXPORT_DIR` | `.`                       |
    /// | `STUDY_PLANNER_BACKEND`    | `json`                    |
    /// | `STUDY_PLANNER_LOG`        | `warn`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match value("STUDY_PLANNER_BACKEND") {
            Some(raw) => raw.parse()?,
            None => defaults.backend,
        };

        Ok(Self {
            data_path: value("STUDY_PLANNER_DATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            export_dir: value("STUDY_PLANNER_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            backend,
            log_filter: value("STUDY_PLANNER_LOG").unwrap_or(defaults.log_filter),
        })
    }
}
