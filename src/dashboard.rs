use crate::document::PlannerDocument;
use crate::ids::ModuleId;
use crate::module::ColorTag;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleProgress {
    pub id: ModuleId,
    pub name: String,
    pub color_tag: ColorTag,
    pub completed: usize,
    pub total: usize,
    pub progress: f64,
}

impl ModuleProgress {
    /// Whole percent, rounded down.
    pub fn percent(&self) -> u32 {
        (self.progress * 100.0).floor() as u32
    }
}

/// Totals across every module plus per-module progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_tasks: usize,
    pub total_completed: usize,
    pub total_overdue: usize,
    pub modules: Vec<ModuleProgress>,
}

impl DashboardSummary {
    pub fn from_document(document: &PlannerDocument, today: NaiveDate) -> Self {
        let mut summary = Self::default();
        for module in &document.modules {
            let completed = module.completed_count();
            summary.total_tasks += module.tasks.len();
            summary.total_completed += completed;
            summary.total_overdue += module.overdue_count_on(today);
            summary.modules.push(ModuleProgress {
                id: module.id,
                name: module.name.clone(),
                color_tag: module.color_tag,
                completed,
                total: module.tasks.len(),
                progress: module.progress(),
            });
        }
        summary
    }

    pub fn to_cli_summary(&self) -> String {
        format!(
            "tasks={}, done={}, overdue={}",
            self.total_tasks, self.total_completed, self.total_overdue
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_down() {
        let progress = ModuleProgress {
            id: ModuleId(1),
            name: "Logic".into(),
            color_tag: ColorTag::Grey,
            completed: 2,
            total: 3,
            progress: 2.0 / 3.0,
        };
        assert_eq!(progress.percent(), 66);
    }

    #[test]
    fn empty_document_has_zero_totals() {
        let summary = DashboardSummary::from_document(
            &PlannerDocument::default(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        assert_eq!(summary, DashboardSummary::default());
        assert_eq!(summary.to_cli_summary(), "tasks=0, done=0, overdue=0");
    }
}
