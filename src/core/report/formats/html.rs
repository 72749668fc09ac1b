//! HTML report generator
//!
//! Renders the plan through an `askama` template into a self-contained page with
//! embedded CSS. Values are formatted up front so the template only lays them out.

use crate::core::models::{DayPlan, DifficultyLevel, Session};
use crate::core::planner::palette::primary_hex;
use crate::core::report::{ReportContext, ReportGenerator, MOTIVATION};
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Fallback accent when a session color has no hex component
const DEFAULT_ACCENT: &str = "#8AC6D1";

/// One rendered session card
#[derive(Debug, Clone)]
pub struct SessionView {
    /// Subject name
    pub subject: String,
    /// Topic studied
    pub topic: String,
    /// Duration, one decimal
    pub duration: String,
    /// Difficulty badge text
    pub badge: &'static str,
    /// CSS class for the badge
    pub badge_class: &'static str,
    /// Accent color (hex)
    pub accent: String,
}

/// One rendered day column
#[derive(Debug, Clone)]
pub struct DayView {
    /// Weekday label
    pub label: String,
    /// ISO date
    pub date: String,
    /// Total hours, one decimal
    pub total: String,
    /// Sessions in order
    pub sessions: Vec<SessionView>,
}

/// One row of the allocation table
#[derive(Debug, Clone)]
pub struct AllocationView {
    /// Subject name
    pub subject: String,
    /// Difficulty badge text
    pub badge: &'static str,
    /// CSS class for the badge
    pub badge_class: &'static str,
    /// Weight share, percent with one decimal
    pub share: String,
    /// Allocated hours
    pub allocated: String,
    /// Hours per session
    pub per_session: String,
    /// Sessions in the horizon
    pub sessions: usize,
    /// Horizon in days
    pub horizon: i64,
}

/// Page template, see `templates/plan_report.html`
#[derive(Template)]
#[template(path = "plan_report.html")]
struct PlanReportTemplate {
    start_date: String,
    subject_count: usize,
    total_hours: String,
    days_available: i64,
    hours_per_day: String,
    session_count: usize,
    scheduled_hours: String,
    busiest_day: String,
    warnings: Vec<String>,
    allocations: Vec<AllocationView>,
    days: Vec<DayView>,
    motivation: &'static str,
}

const fn badge_class(level: DifficultyLevel) -> &'static str {
    match level {
        DifficultyLevel::Easy => "badge-easy",
        DifficultyLevel::Medium => "badge-medium",
        DifficultyLevel::Hard => "badge-hard",
    }
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn session_view(session: &Session) -> SessionView {
        let level = DifficultyLevel::from_difficulty(session.difficulty);
        SessionView {
            subject: session.subject.clone(),
            topic: session.topic.clone(),
            duration: format!("{:.1}", session.duration),
            badge: level.label(),
            badge_class: badge_class(level),
            accent: primary_hex(&session.color)
                .unwrap_or(DEFAULT_ACCENT)
                .to_string(),
        }
    }

    fn day_view(day: &DayPlan) -> DayView {
        DayView {
            label: day.day.clone(),
            date: day.date.to_string(),
            total: format!("{:.1}", day.total_hours()),
            sessions: day.sessions.iter().map(Self::session_view).collect(),
        }
    }

    fn allocation_views(ctx: &ReportContext) -> Vec<AllocationView> {
        ctx.plan
            .allocations
            .iter()
            .map(|alloc| {
                let level = ctx.difficulty_level(&alloc.subject);
                AllocationView {
                    subject: alloc.subject.clone(),
                    badge: level.label(),
                    badge_class: badge_class(level),
                    share: format!("{:.1}", ctx.weight_share(alloc.weight)),
                    allocated: format!("{:.1}", alloc.allocated_hours),
                    per_session: format!("{:.1}", alloc.hours_per_session),
                    sessions: alloc.sessions_scheduled,
                    horizon: alloc.horizon_days,
                }
            })
            .collect()
    }

    fn build_template(ctx: &ReportContext) -> PlanReportTemplate {
        PlanReportTemplate {
            start_date: ctx.start_date.to_string(),
            subject_count: ctx.plan.subjects,
            total_hours: format!("{:.1}", ctx.plan.total_hours),
            days_available: ctx.plan.days_available,
            hours_per_day: format!("{:.1}", ctx.hours_per_day),
            session_count: ctx.session_count(),
            scheduled_hours: format!("{:.1}", ctx.scheduled_hours()),
            busiest_day: ctx.busiest_day(),
            warnings: ctx.plan.warnings.iter().map(ToString::to_string).collect(),
            allocations: Self::allocation_views(ctx),
            days: ctx.plan.daily_plan.iter().map(Self::day_view).collect(),
            motivation: MOTIVATION,
        }
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::build_template(ctx).render()?)
    }
}
