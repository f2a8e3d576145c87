use crate::ids::{ModuleId, TaskId};
use crate::persistence::lenient;
use crate::task::Task;
use crate::validation::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fixed display palette for modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorTag {
    #[default]
    Blue,
    Green,
    Orange,
    Red,
    Purple,
    Teal,
    Violet,
    Brown,
    Grey,
    Yellow,
    Beige,
}

impl ColorTag {
    pub const ALL: [ColorTag; 11] = [
        ColorTag::Blue,
        ColorTag::Green,
        ColorTag::Orange,
        ColorTag::Red,
        ColorTag::Purple,
        ColorTag::Teal,
        ColorTag::Violet,
        ColorTag::Brown,
        ColorTag::Grey,
        ColorTag::Yellow,
        ColorTag::Beige,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ColorTag::Blue => "blue",
            ColorTag::Green => "green",
            ColorTag::Orange => "orange",
            ColorTag::Red => "red",
            ColorTag::Purple => "purple",
            ColorTag::Teal => "teal",
            ColorTag::Violet => "violet",
            ColorTag::Brown => "brown",
            ColorTag::Grey => "grey",
            ColorTag::Yellow => "yellow",
            ColorTag::Beige => "beige",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            ColorTag::Blue => "#2196F3",
            ColorTag::Green => "#4CAF50",
            ColorTag::Orange => "#FF9800",
            ColorTag::Red => "#F44336",
            ColorTag::Purple => "#9C27B0",
            ColorTag::Teal => "#009688",
            ColorTag::Violet => "#6959CD",
            ColorTag::Brown => "#8B4513",
            ColorTag::Grey => "#BABABA",
            ColorTag::Yellow => "#FFFF00",
            ColorTag::Beige => "#FFE7BA",
        }
    }

    /// Accepts the palette key or its hex value, ignoring case.
    pub fn lookup(input: &str) -> Option<Self> {
        let needle = input.trim();
        Self::ALL.into_iter().find(|tag| {
            tag.key().eq_ignore_ascii_case(needle) || tag.hex().eq_ignore_ascii_case(needle)
        })
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ColorTag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| ValidationError::UnknownColor(s.trim().to_string()))
    }
}

impl Serialize for ColorTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for ColorTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(ColorTag::default());
        };
        Ok(Self::lookup(&raw).unwrap_or_else(|| {
            tracing::warn!(color = %raw, "unknown stored colour, using blue");
            ColorTag::default()
        }))
    }
}

/// A named course grouping an ordered list of tasks. Removing the module removes its tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(default)]
    pub id: ModuleId,
    pub name: String,
    #[serde(default)]
    pub color_tag: ColorTag,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub tasks: Vec<Task>,
    #[serde(default = "Utc::now", deserialize_with = "lenient::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Module {
    pub fn new(
        id: ModuleId,
        name: impl Into<String>,
        color_tag: ColorTag,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color_tag,
            description: description.into(),
            tasks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn overdue_count_on(&self, today: NaiveDate) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.is_overdue_on(today))
            .count()
    }

    /// Fraction of completed tasks, `0.0` for a module without tasks.
    pub fn progress(&self) -> f64 {
        if self.tasks.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.tasks.len() as f64
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_with(done: usize, open: usize) -> Module {
        let mut module = Module::new(ModuleId(1), "Databases", ColorTag::Teal, "");
        let mut next = 1;
        for _ in 0..done {
            let mut task = Task::new(TaskId(next), "done");
            task.completed = true;
            module.tasks.push(task);
            next += 1;
        }
        for _ in 0..open {
            module.tasks.push(Task::new(TaskId(next), "open"));
            next += 1;
        }
        module
    }

    #[test]
    fn empty_module_has_zero_progress() {
        assert_eq!(module_with(0, 0).progress(), 0.0);
    }

    #[test]
    fn progress_is_completed_over_total() {
        assert_eq!(module_with(1, 3).progress(), 0.25);
        assert_eq!(module_with(2, 0).progress(), 1.0);
        assert_eq!(module_with(1, 2).completed_count(), 1);
    }

    #[test]
    fn colour_lookup_accepts_key_and_hex() {
        assert_eq!("Violet".parse::<ColorTag>(), Ok(ColorTag::Violet));
        assert_eq!("#4caf50".parse::<ColorTag>(), Ok(ColorTag::Green));
        assert!("magenta".parse::<ColorTag>().is_err());
    }

    #[test]
    fn missing_colour_and_tasks_use_defaults() {
        let module: Module = serde_json::from_value(serde_json::json!({
            "name": "Statistics",
            "colorTag": "#FF9800"
        }))
        .unwrap();
        assert_eq!(module.color_tag, ColorTag::Orange);
        assert!(module.tasks.is_empty());
        assert_eq!(module.description, "");

        let module: Module =
            serde_json::from_value(serde_json::json!({ "name": "Physics" })).unwrap();
        assert_eq!(module.color_tag, ColorTag::Blue);
    }
}
