//! Plans command handler

use super::generate::{print_json, print_plan, write_report};
use super::open_store;
use crate::args::PlansSubcommand;
use std::path::Path;
use study_sync::config::Config;
use study_sync::core::report::ReportFormat;
use study_sync::core::store::{delete_plan, get_plan, list_plans, FileStore};
use study_sync::{error, info};

/// Dispatch plans subcommands. Returns `false` on failure.
pub fn run(subcommand: Option<PlansSubcommand>, config: &Config) -> bool {
    let mut store = open_store(config);

    let result = match subcommand {
        None | Some(PlansSubcommand::List) => list(&store),
        Some(PlansSubcommand::Show {
            id,
            json,
            report,
            output,
        }) => show(&store, id, json, report, output.as_deref(), config),
        Some(PlansSubcommand::Delete { id }) => delete(&mut store, id),
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            error!("Plans command failed: {e}");
            eprintln!("{e}");
            false
        }
    }
}

fn list(store: &FileStore) -> Result<(), String> {
    let plans = list_plans(store).map_err(|e| format!("✗ Failed to read plans: {e}"))?;
    if plans.is_empty() {
        println!("No saved plans. Save one with `studysync generate --save`.");
        return Ok(());
    }

    println!("\n=== Saved Plans ({}) ===\n", plans.len());
    for record in &plans {
        let names: Vec<&str> = record.subjects.iter().map(|s| s.name.as_str()).collect();
        println!(
            "#{:<4} {}  {:.1}h/day  {} session(s)  [{}]",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.available_hours_per_day,
            record.plan.total_sessions(),
            names.join(", ")
        );
    }
    Ok(())
}

fn show(
    store: &FileStore,
    id: u64,
    json: bool,
    report: Option<ReportFormat>,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), String> {
    let record = get_plan(store, id)
        .map_err(|e| format!("✗ Failed to read plans: {e}"))?
        .ok_or_else(|| format!("✗ No plan with id {id}"))?;
    let start = record
        .plan
        .daily_plan
        .first()
        .map_or_else(|| record.created_at.date_naive(), |day| day.date);

    if json {
        print_json(&record.plan)?;
    } else {
        println!(
            "Plan #{} saved {}",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M")
        );
        print_plan(&record.plan, start);
    }

    if let Some(format) = report {
        let path = write_report(
            &record.plan,
            &record.subjects,
            record.available_hours_per_day,
            start,
            format,
            output,
            config,
        )?;
        println!("✓ Report generated: {}", path.display());
    }
    Ok(())
}

fn delete(store: &mut FileStore, id: u64) -> Result<(), String> {
    let removed = delete_plan(store, id).map_err(|e| format!("✗ Failed to delete plan: {e}"))?;
    if !removed {
        return Err(format!("✗ No plan with id {id}"));
    }
    info!("Plan {id} deleted");
    println!("✓ Deleted plan {id}");
    Ok(())
}
