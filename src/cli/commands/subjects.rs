//! Subjects command handler

use super::open_store;
use crate::args::SubjectsSubcommand;
use chrono::NaiveDate;
use study_sync::config::Config;
use study_sync::core::models::Subject;
use study_sync::core::planner::PlanRequest;
use study_sync::core::store::{load_subjects, save_subjects, FileStore};
use study_sync::{error, info, verbose};

/// Dispatch subjects subcommands. Returns `false` on failure.
pub fn run(subcommand: Option<SubjectsSubcommand>, config: &Config) -> bool {
    let mut store = open_store(config);
    verbose!("Using store: {}", store.path().display());

    let result = match subcommand {
        None | Some(SubjectsSubcommand::List) => list(&store),
        Some(SubjectsSubcommand::Add {
            name,
            chapters,
            difficulty,
            target_date,
            hours_needed,
        }) => add(
            &mut store,
            &name,
            &chapters,
            difficulty,
            target_date,
            hours_needed,
        ),
        Some(SubjectsSubcommand::Remove { name }) => remove(&mut store, &name),
        Some(SubjectsSubcommand::Clear) => clear(&mut store),
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            error!("Subjects command failed: {e}");
            eprintln!("{e}");
            false
        }
    }
}

fn load(store: &FileStore) -> Result<Vec<Subject>, String> {
    load_subjects(store).map_err(|e| format!("✗ Failed to read subjects: {e}"))
}

fn save(store: &mut FileStore, subjects: &[Subject]) -> Result<(), String> {
    save_subjects(store, subjects).map_err(|e| format!("✗ Failed to save subjects: {e}"))
}

fn list(store: &FileStore) -> Result<(), String> {
    let subjects = load(store)?;
    if subjects.is_empty() {
        println!("No subjects saved. Add one with `studysync subjects add`.");
        return Ok(());
    }

    println!("\n=== Subjects ({}) ===\n", subjects.len());
    for subject in &subjects {
        let deadline = subject
            .target_date
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        println!(
            "• {} [{} {}/10] due {deadline}, {:.1}h",
            subject.name,
            subject.difficulty_level(),
            subject.difficulty,
            subject.effective_hours_needed()
        );
        let topics = subject.topics();
        if !topics.is_empty() {
            println!("    chapters: {}", topics.join(", "));
        }
    }
    Ok(())
}

fn add(
    store: &mut FileStore,
    name: &str,
    chapters: &str,
    difficulty: u8,
    target_date: NaiveDate,
    hours_needed: Option<f64>,
) -> Result<(), String> {
    let mut subject = Subject::new(name.trim(), chapters, difficulty, target_date);
    if let Some(hours) = hours_needed {
        subject = subject.with_hours_needed(hours);
    }

    let mut subjects = load(store)?;
    subjects.push(subject);

    // Same rules the generator applies; the budget is irrelevant here
    let request = PlanRequest::new(subjects, 1.0);
    request.validate().map_err(|e| format!("✗ {e}"))?;
    save(store, &request.subjects)?;

    info!("Subject added: {}", name.trim());
    println!("✓ Added subject '{}'", name.trim());
    Ok(())
}

fn remove(store: &mut FileStore, name: &str) -> Result<(), String> {
    let mut subjects = load(store)?;
    let before = subjects.len();
    let wanted = name.trim().to_lowercase();
    subjects.retain(|s| s.name.trim().to_lowercase() != wanted);

    if subjects.len() == before {
        return Err(format!("✗ No subject named '{name}'"));
    }

    save(store, &subjects)?;
    info!("Subject removed: {name}");
    println!("✓ Removed subject '{name}'");
    Ok(())
}

fn clear(store: &mut FileStore) -> Result<(), String> {
    let count = load(store)?.len();
    save(store, &[])?;
    info!("Cleared {count} subject(s)");
    println!("✓ Cleared {count} subject(s)");
    Ok(())
}
