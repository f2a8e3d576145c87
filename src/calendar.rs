use crate::document::PlannerDocument;
use crate::ids::{ModuleId, TaskId};
use crate::module::ColorTag;
use chrono::{Datelike, Local, Months, NaiveDate};

/// One line of the due-date view.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub due_date: NaiveDate,
    pub module_id: ModuleId,
    pub module_name: String,
    pub color_tag: ColorTag,
    pub task_id: TaskId,
    pub title: String,
    pub is_today: bool,
    pub is_overdue: bool,
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First day after the window: the first of the month after next.
///
/// Month arithmetic goes through chrono, so December rolls into January and
/// February of the following year.
pub fn window_end(today: NaiveDate) -> NaiveDate {
    let first_of_month = today.with_day(1).unwrap_or(today);
    first_of_month
        .checked_add_months(Months::new(2))
        .unwrap_or(NaiveDate::MAX)
}

/// Open tasks that are overdue (any age) or due this month or next, earliest first.
pub fn upcoming(document: &PlannerDocument, today: NaiveDate) -> Vec<CalendarEntry> {
    let end = window_end(today);
    let mut entries: Vec<CalendarEntry> = document
        .tasks()
        .filter(|(_, task)| !task.completed)
        .filter_map(|(module, task)| {
            let due = task.due_date?;
            if due >= end {
                return None;
            }
            Some(CalendarEntry {
                due_date: due,
                module_id: module.id,
                module_name: module.name.clone(),
                color_tag: module.color_tag,
                task_id: task.id,
                title: task.title.clone(),
                is_today: due == today,
                is_overdue: due < today,
            })
        })
        .collect();
    // stable: equal dates keep document order
    entries.sort_by_key(|entry| entry.due_date);
    entries
}
