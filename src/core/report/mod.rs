//! Report generation module for study plans
//!
//! Renders a [`GeneratedPlan`] as a Markdown or HTML document with summary
//! statistics, the day-by-day schedule, and a per-subject allocation table.

pub mod formats;

use crate::core::models::{DifficultyLevel, GeneratedPlan, Subject};
use chrono::NaiveDate;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Closing line printed under every report
pub const MOTIVATION: &str = "Keep pushing forward! Every small step counts.";

/// Data context for report generation
///
/// Aggregates everything a report needs so each renderer reads from one place.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Plan being reported
    pub plan: &'a GeneratedPlan,
    /// Subjects the plan was generated from
    pub subjects: &'a [Subject],
    /// Daily study budget used
    pub hours_per_day: f64,
    /// Date the plan starts on
    pub start_date: NaiveDate,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        plan: &'a GeneratedPlan,
        subjects: &'a [Subject],
        hours_per_day: f64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            plan,
            subjects,
            hours_per_day,
            start_date,
        }
    }

    /// Subject entry by name
    #[must_use]
    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Difficulty badge for a subject (Medium when the subject is unknown)
    #[must_use]
    pub fn difficulty_level(&self, name: &str) -> DifficultyLevel {
        self.subject(name)
            .map_or(DifficultyLevel::Medium, Subject::difficulty_level)
    }

    /// Share of the total weight held by `weight`, as a percentage
    #[must_use]
    pub fn weight_share(&self, weight: f64) -> f64 {
        let total: f64 = self.plan.allocations.iter().map(|a| a.weight).sum();
        if total > 0.0 {
            weight / total * 100.0
        } else {
            0.0
        }
    }

    /// Number of sessions in the rendered days
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.plan.total_sessions()
    }

    /// Hours covered by the rendered days
    #[must_use]
    pub fn scheduled_hours(&self) -> f64 {
        self.plan.scheduled_hours()
    }

    /// Busiest day as `"Tue 2026-10-20 (4.0h)"`, or `"none"` for an empty plan
    #[must_use]
    pub fn busiest_day(&self) -> String {
        self.plan.busiest_day().map_or_else(
            || "none".to_string(),
            |day| format!("{} {} ({:.1}h)", day.day, day.date, day.total_hours()),
        )
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Reporter for the given format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::planner::generate_plan;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_context_helpers() {
        let today = date(2026, 10, 19);
        let subjects = vec![
            Subject::new("Math", "Algebra", 9, date(2026, 10, 22)),
            Subject::new("Art", "", 2, date(2026, 10, 25)),
        ];
        let plan = generate_plan(&subjects, 4.0, today).unwrap();
        let ctx = ReportContext::new(&plan, &subjects, 4.0, today);

        assert_eq!(ctx.difficulty_level("Math"), DifficultyLevel::Hard);
        assert_eq!(ctx.difficulty_level("Art"), DifficultyLevel::Easy);
        assert_eq!(ctx.difficulty_level("Missing"), DifficultyLevel::Medium);

        let shares: f64 = plan
            .allocations
            .iter()
            .map(|a| ctx.weight_share(a.weight))
            .sum();
        assert!((shares - 100.0).abs() < 1e-9);
        assert_eq!(ctx.session_count(), plan.total_sessions());
        assert_eq!(ctx.busiest_day(), "Mon 2026-10-19 (3.7h)");
    }
}
