//! Generate command handler
//!
//! Loads subjects from a file or the store, runs the generator, and optionally
//! writes a report and saves the plan.

use super::open_store;
use crate::args::GenerateArgs;
use chrono::{Local, NaiveDate};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use study_sync::config::Config;
use study_sync::core::models::{GeneratedPlan, Subject};
use study_sync::core::planner::{parse_subjects_file, PlanGenerator, PlanRequest};
use study_sync::core::report::{reporter_for, ReportContext, ReportFormat, MOTIVATION};
use study_sync::core::store::{load_subjects, save_plan, PlanRecord};
use study_sync::logger::is_verbose_enabled;
use study_sync::{debug, error, info};

/// Run the generate command. Returns `false` on failure.
pub fn run(args: &GenerateArgs, config: &Config) -> bool {
    match generate(args, config) {
        Ok(()) => true,
        Err(e) => {
            error!("Plan generation failed: {e}");
            eprintln!("{e}");
            false
        }
    }
}

/// Subjects and the daily budget to plan with
fn load_inputs(args: &GenerateArgs, config: &Config) -> Result<(Vec<Subject>, f64), String> {
    let (subjects, file_hours) = if let Some(input) = &args.input {
        let file = parse_subjects_file(input)
            .map_err(|e| format!("✗ Failed to load {}: {e}", input.display()))?;
        info!("Subjects loaded: {}", input.display());
        (file.subjects, file.hours_per_day)
    } else {
        let store = open_store(config);
        let subjects = load_subjects(&store)
            .map_err(|e| format!("✗ Failed to read saved subjects: {e}"))?;
        info!("Subjects loaded from store: {}", store.path().display());
        (subjects, None)
    };

    let hours = args
        .hours_per_day
        .or(file_hours)
        .unwrap_or(config.planner.hours_per_day);
    Ok((subjects, hours))
}

fn generate(args: &GenerateArgs, config: &Config) -> Result<(), String> {
    let (subjects, hours_per_day) = load_inputs(args, config)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let options = config.planner.options();
    debug!(
        "Generating plan: {} subject(s), {hours_per_day}h/day, today {today}, horizon {}, max {} day(s)",
        subjects.len(),
        options.horizon,
        options.max_days
    );

    let request = PlanRequest::new(subjects, hours_per_day);
    let plan = PlanGenerator::new(options)
        .generate(&request, today)
        .map_err(|e| format!("✗ Invalid input: {e}"))?;

    if args.json {
        print_json(&plan)?;
    } else {
        print_plan(&plan, today);
    }

    if let Some(format) = args.report {
        let path = write_report(
            &plan,
            &request.subjects,
            hours_per_day,
            today,
            format,
            args.output.as_deref(),
            config,
        )?;
        println!("✓ Report generated: {}", path.display());
    }

    if args.save {
        let mut store = open_store(config);
        let record = save_plan(
            &mut store,
            PlanRecord::new(hours_per_day, request.subjects, plan),
        )
        .map_err(|e| format!("✗ Failed to save plan: {e}"))?;
        info!("Plan {} saved to {}", record.id, store.path().display());
        println!("✓ Plan saved with id {}", record.id);
    }

    Ok(())
}

/// Print a plan as pretty JSON
pub fn print_json(plan: &GeneratedPlan) -> Result<(), String> {
    let json = serde_json::to_string_pretty(plan)
        .map_err(|e| format!("✗ Failed to serialize plan: {e}"))?;
    println!("{json}");
    Ok(())
}

/// Print a human-readable plan summary
pub fn print_plan(plan: &GeneratedPlan, start: NaiveDate) {
    print!("{}", format_plan(plan, start, is_verbose_enabled()));
}

/// Human-readable plan summary; `detailed` adds the per-subject allocations
///
/// Plan warnings appear here and nowhere else on the console.
pub fn format_plan(plan: &GeneratedPlan, start: NaiveDate, detailed: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Study Plan from {start} ===");
    let _ = writeln!(out, "Subjects: {}", plan.subjects);
    let _ = writeln!(out, "Total Hours: {:.1}", plan.total_hours);
    let _ = writeln!(out, "Days Available: {}", plan.days_available);
    let _ = writeln!(out, "Sessions: {}", plan.total_sessions());
    if let Some(day) = plan.busiest_day() {
        let _ = writeln!(
            out,
            "Busiest Day: {} {} ({:.1}h)",
            day.day,
            day.date,
            day.total_hours()
        );
    }

    for warning in &plan.warnings {
        let _ = writeln!(out, "⚠️  {warning}");
    }

    if plan.daily_plan.is_empty() {
        out.push_str("\nNo sessions scheduled.\n");
    }

    for day in &plan.daily_plan {
        let _ = writeln!(out, "\n{} {} ({:.1}h)", day.day, day.date, day.total_hours());
        for session in &day.sessions {
            let _ = writeln!(
                out,
                "  • {:<20} {:<24} {:.1}h",
                session.subject, session.topic, session.duration
            );
        }
    }

    if detailed {
        out.push_str("\n=== Allocations ===\n");
        for alloc in &plan.allocations {
            let _ = writeln!(
                out,
                "{}: weight {:.1}, {:.1}h allocated, {:.1}h/session, {} session(s) over {} day(s)",
                alloc.subject,
                alloc.weight,
                alloc.allocated_hours,
                alloc.hours_per_session,
                alloc.sessions_scheduled,
                alloc.horizon_days
            );
        }
    }

    let _ = writeln!(out, "\n{MOTIVATION}");
    out
}

/// Render a report to `output`, or into the configured reports directory
///
/// Returns the path written.
pub fn write_report(
    plan: &GeneratedPlan,
    subjects: &[Subject],
    hours_per_day: f64,
    start: NaiveDate,
    format: ReportFormat,
    output: Option<&Path>,
    config: &Config,
) -> Result<PathBuf, String> {
    let path = if let Some(path) = output {
        path.to_path_buf()
    } else {
        let reports_dir = PathBuf::from(&config.paths.reports_dir);
        std::fs::create_dir_all(&reports_dir).map_err(|e| {
            format!(
                "✗ Failed to create reports directory {}: {e}",
                reports_dir.display()
            )
        })?;
        reports_dir.join(format!("study_plan_{start}.{}", format.extension()))
    };

    let ctx = ReportContext::new(plan, subjects, hours_per_day, start);
    reporter_for(format)
        .generate(&ctx, &path)
        .map_err(|e| format!("✗ Failed to generate {format} report: {e}"))?;

    info!("Report exported to: {}", path.display());
    Ok(path)
}
