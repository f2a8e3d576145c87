use crate::ids::TaskId;
use crate::persistence::lenient;
use crate::validation::ValidationError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Kind of study work a task represents. Display only, it does not order tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    #[default]
    SelfStudy,
    PracticalWork,
    Submission,
    Exam,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::SelfStudy,
        Priority::PracticalWork,
        Priority::Submission,
        Priority::Exam,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Priority::SelfStudy => "self-study",
            Priority::PracticalWork => "practical-work",
            Priority::Submission => "submission",
            Priority::Exam => "exam",
        }
    }

    /// Matches a label case-insensitively; spaces and underscores count as hyphens.
    pub fn from_label(input: &str) -> Option<Self> {
        let normalized = input.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Self::ALL
            .into_iter()
            .find(|priority| priority.label() == normalized)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ValidationError::UnknownPriority(s.trim().to_string()))
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(Priority::default());
        };
        Ok(Self::from_label(&raw).unwrap_or_else(|| {
            tracing::warn!(priority = %raw, "unknown stored priority, using self-study");
            Priority::default()
        }))
    }
}

/// A unit of coursework owned by exactly one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default)]
    pub id: TaskId,
    pub title: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::due_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub completed: bool,
    #[serde(default = "Utc::now", deserialize_with = "lenient::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            due_date: None,
            priority: Priority::default(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// True iff the task is open and its due date lies strictly before `today`.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) if !self.completed => due < today,
            _ => false,
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Local::now().date_naive())
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed { "Done" } else { "Open" }
    }
}

/// Parses a due date typed by a user or read from disk.
///
/// Blank input means "no deadline". Besides `YYYY-MM-DD`, ISO date-times are
/// accepted and truncated to their date.
pub fn parse_due_date(input: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Some(datetime.date()));
        }
    }
    Err(ValidationError::InvalidDate {
        input: trimmed.to_string(),
    })
}

pub fn format_due_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
