//! Markdown report generator
//!
//! Generates study plan reports as Markdown tables. These reports render well in
//! GitHub, GitLab, and VS Code.

use crate::core::models::DifficultyLevel;
use crate::core::report::{ReportContext, ReportGenerator, MOTIVATION};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/plan_report.md");

/// Make `text` safe inside a table cell: pipes are escaped and line breaks become spaces
fn escape_cell(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', "\\|")
}

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{start_date}}", &ctx.start_date.to_string());
        output = output.replace("{{subject_count}}", &ctx.plan.subjects.to_string());
        output = output.replace("{{total_hours}}", &format!("{:.1}", ctx.plan.total_hours));
        output = output.replace("{{days_available}}", &ctx.plan.days_available.to_string());
        output = output.replace("{{hours_per_day}}", &format!("{:.1}", ctx.hours_per_day));
        output = output.replace("{{session_count}}", &ctx.session_count().to_string());
        output = output.replace(
            "{{scheduled_hours}}",
            &format!("{:.1}", ctx.scheduled_hours()),
        );

        output = output.replace("{{busiest_day}}", &ctx.busiest_day());

        output = output.replace("{{warnings}}", &Self::generate_warnings(ctx));
        output = output.replace("{{allocation_table}}", &Self::generate_allocation_table(ctx));
        output = output.replace("{{daily_plan}}", &Self::generate_daily_plan(ctx));
        output = output.replace("{{motivation}}", MOTIVATION);

        output
    }

    /// Warnings as a blockquote list (empty when there are none)
    fn generate_warnings(ctx: &ReportContext) -> String {
        let mut text = String::new();
        if ctx.plan.warnings.is_empty() {
            return text;
        }

        text.push('\n');
        for warning in &ctx.plan.warnings {
            let _ = writeln!(text, "> ⚠️ {warning}");
        }
        text
    }

    /// Per-subject allocation table
    fn generate_allocation_table(ctx: &ReportContext) -> String {
        let mut table = String::new();

        table.push_str(
            "| Subject | Difficulty | Share | Allocated | Per Session | Sessions | Horizon |\n",
        );
        table.push_str("|---|---|---|---|---|---|---|\n");

        for alloc in &ctx.plan.allocations {
            let level = ctx.difficulty_level(&alloc.subject);
            let _ = writeln!(
                table,
                "| {} | {} | {:.1}% | {:.1}h | {:.1}h | {} | {} days |",
                escape_cell(&alloc.subject),
                level,
                ctx.weight_share(alloc.weight),
                alloc.allocated_hours,
                alloc.hours_per_session,
                alloc.sessions_scheduled,
                alloc.horizon_days
            );
        }

        table
    }

    /// One section per day with a session table
    fn generate_daily_plan(ctx: &ReportContext) -> String {
        let mut text = String::new();

        if ctx.plan.daily_plan.is_empty() {
            text.push_str("_No sessions scheduled._\n");
            return text;
        }

        for day in &ctx.plan.daily_plan {
            let _ = writeln!(
                text,
                "### {} {} ({:.1}h)\n",
                day.day,
                day.date,
                day.total_hours()
            );
            text.push_str("| Subject | Topic | Duration | Difficulty |\n");
            text.push_str("|---|---|---|---|\n");
            for session in &day.sessions {
                let level = DifficultyLevel::from_difficulty(session.difficulty);
                let _ = writeln!(
                    text,
                    "| {} | {} | {:.1}h | {} |",
                    escape_cell(&session.subject),
                    escape_cell(&session.topic),
                    session.duration,
                    level
                );
            }
            text.push('\n');
        }

        text
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
