//! Field adapters that keep partially damaged files loadable.
//!
//! A bad due date becomes "no deadline" and a bad timestamp becomes the load
//! time; both are logged instead of failing the whole document.

use crate::task::parse_due_date;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub fn due_date<'de, D>(deserializer: D) -> Result<Option<chrono::NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(text) = raw else {
        return Ok(None);
    };
    match parse_due_date(&text) {
        Ok(date) => Ok(date),
        Err(err) => {
            tracing::warn!(%err, "ignoring unreadable stored due date");
            Ok(None)
        }
    }
}

/// `null` reads as an empty string.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` reads as `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` reads as an empty list.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp).unwrap_or_else(|| {
        tracing::warn!(value = ?raw, "unreadable creation timestamp, using current time");
        Utc::now()
    }))
}

pub fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// RFC 3339, or a naive ISO timestamp read as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn naive_iso_timestamps_are_read_as_utc() {
        let parsed = parse_timestamp("2025-03-14T10:22:33.123456").unwrap();
        assert_eq!(parsed.year(), 2025);
        assert_eq!(parsed.hour(), 10);
        assert_eq!(parsed.nanosecond(), 123_456_000);
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let parsed = parse_timestamp("2025-03-14T10:00:00+02:00").unwrap();
        assert_eq!(parsed.hour(), 8);
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn null_task_fields_fall_back_to_defaults() {
        let task: crate::task::Task = serde_json::from_value(serde_json::json!({
            "title": "Homework 1",
            "description": null,
            "priority": null,
            "completed": null,
            "dueDate": null
        }))
        .unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.priority, crate::task::Priority::SelfStudy);
        assert!(!task.completed);
        assert_eq!(task.due_date, None);
    }
}
