//! Line-based request/response dialogs.
//!
//! Each dialog returns what the user entered or that they backed out; there
//! is no state shared between dialogs.

use crate::draft::{ModuleDraft, TaskDraft};
use crate::module::ColorTag;
use crate::task::{Priority, parse_due_date};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Typed at any prompt to abandon the dialog.
pub const CANCEL: &str = ":cancel";

/// Entered in an edit dialog to clear the due date.
pub const CLEAR: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    Submitted(T),
    Cancelled,
}

impl<T> DialogOutcome<T> {
    pub fn submitted(self) -> Option<T> {
        match self {
            DialogOutcome::Submitted(value) => Some(value),
            DialogOutcome::Cancelled => None,
        }
    }
}

macro_rules! answer {
    ($outcome:expr) => {
        match $outcome {
            DialogOutcome::Submitted(value) => value,
            DialogOutcome::Cancelled => return Ok(DialogOutcome::Cancelled),
        }
    };
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Reads the next REPL line; `None` at end of input.
    pub fn read_command(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.line.trim().to_string()))
    }

    /// One field. End of input or [`CANCEL`] cancels.
    pub fn ask(&mut self, label: &str) -> io::Result<DialogOutcome<String>> {
        match self.read_command(&format!("{label}: "))? {
            Some(answer) if answer != CANCEL => Ok(DialogOutcome::Submitted(answer)),
            _ => Ok(DialogOutcome::Cancelled),
        }
    }

    pub fn confirm(&mut self, question: &str) -> io::Result<DialogOutcome<()>> {
        let answer = answer!(self.ask(&format!("{question} [y/N]"))?);
        match answer.to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(DialogOutcome::Submitted(())),
            _ => Ok(DialogOutcome::Cancelled),
        }
    }

    /// New-module dialog, or an edit dialog when `current` is given
    /// (blank answers keep the current value).
    pub fn module_dialog(
        &mut self,
        current: Option<&ModuleDraft>,
    ) -> io::Result<DialogOutcome<ModuleDraft>> {
        let base = current.cloned().unwrap_or_default();

        let name = loop {
            let answer = answer!(self.ask(&labelled("Name", current.map(|d| d.name.as_str())))?);
            if !answer.is_empty() {
                break answer;
            }
            if current.is_some() {
                break base.name.clone();
            }
            self.say("Please enter a module name.")?;
        };

        let description = answer!(self.ask("Description")?);
        let description = if description.is_empty() {
            base.description.clone()
        } else {
            description
        };

        let color_tag = loop {
            let answer = answer!(self.ask(&labelled("Colour", Some(base.color_tag.key())))?);
            if answer.is_empty() {
                break base.color_tag;
            }
            match answer.parse::<ColorTag>() {
                Ok(tag) => break tag,
                Err(err) => {
                    self.say(format!("{err}. Choose one of: {}", colour_choices()))?;
                }
            }
        };

        Ok(DialogOutcome::Submitted(ModuleDraft {
            name,
            color_tag,
            description,
        }))
    }

    /// New-task dialog, or an edit dialog when `current` is given.
    pub fn task_dialog(&mut self, current: Option<&TaskDraft>) -> io::Result<DialogOutcome<TaskDraft>> {
        let base = current.cloned().unwrap_or_default();

        let title = loop {
            let answer = answer!(self.ask(&labelled("Title", current.map(|d| d.title.as_str())))?);
            if !answer.is_empty() {
                break answer;
            }
            if current.is_some() {
                break base.title.clone();
            }
            self.say("Please enter a task title.")?;
        };

        let description = answer!(self.ask("Description")?);
        let description = if description.is_empty() {
            base.description.clone()
        } else {
            description
        };

        let due_label = if current.is_some() {
            format!("Due date (YYYY-MM-DD, '{CLEAR}' to clear) [{}]", base.due_date)
        } else {
            "Due date (YYYY-MM-DD, blank for none)".to_string()
        };
        let due = answer!(self.ask(&due_label)?);
        let due_date = match due.as_str() {
            "" => base.due_date.clone(),
            CLEAR => String::new(),
            text => {
                if let Err(err) = parse_due_date(text) {
                    self.say(format!("{err}; the task will have no due date."))?;
                }
                text.to_string()
            }
        };

        let priority = loop {
            let answer = answer!(self.ask(&labelled("Priority", Some(base.priority.label())))?);
            if answer.is_empty() {
                break base.priority;
            }
            match answer.parse::<Priority>() {
                Ok(priority) => break priority,
                Err(err) => {
                    let choices = Priority::ALL
                        .iter()
                        .map(|p| p.label())
                        .collect::<Vec<_>>()
                        .join(", ");
                    self.say(format!("{err}. Choose one of: {choices}"))?;
                }
            }
        };

        Ok(DialogOutcome::Submitted(TaskDraft {
            title,
            description,
            due_date,
            priority,
        }))
    }
}

fn labelled(label: &str, current: Option<&str>) -> String {
    match current {
        Some(value) => format!("{label} [{value}]"),
        None => label.to_string(),
    }
}

fn colour_choices() -> String {
    ColorTag::ALL
        .iter()
        .map(|tag| tag.key())
        .collect::<Vec<_>>()
        .join(", ")
}
