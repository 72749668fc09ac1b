//! Integration tests for the JSON file store and plan records

use chrono::NaiveDate;
use std::fs;
use study_sync::core::error::StoreError;
use study_sync::core::models::Subject;
use study_sync::core::planner::{generate_plan, MAX_HOURS_NEEDED, MAX_HOURS_PER_DAY};
use study_sync::core::store::{
    delete_plan, get_plan, list_plans, load_subjects, save_plan, save_subjects, FileStore,
    MemoryStore, PlanRecord, Store, PLANS_KEY, SUBJECTS_KEY,
};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn sample_subjects() -> Vec<Subject> {
    vec![
        Subject::new(
            "Math",
            "Algebra, Calculus",
            6,
            NaiveDate::from_ymd_opt(2026, 10, 23).unwrap(),
        )
        .with_hours_needed(8.0),
        Subject::new(
            "History",
            "",
            3,
            NaiveDate::from_ymd_opt(2026, 10, 26).unwrap(),
        ),
    ]
}

fn sample_record() -> PlanRecord {
    let subjects = sample_subjects();
    let plan = generate_plan(&subjects, 3.0, today()).unwrap();
    PlanRecord::new(3.0, subjects, plan)
}

#[test]
fn test_missing_file_reads_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileStore::new(temp_dir.path().join("absent.json"));

    assert!(store.get(SUBJECTS_KEY).unwrap().is_none());
    assert!(load_subjects(&store).unwrap().is_empty());
    assert!(list_plans(&store).unwrap().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn test_subjects_persist_across_instances() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("data").join("store.json");

    let mut store = FileStore::new(&path);
    save_subjects(&mut store, &sample_subjects()).unwrap();
    assert!(path.exists());

    let reopened = FileStore::new(&path);
    let loaded = load_subjects(&reopened).unwrap();
    assert_eq!(loaded, sample_subjects());
}

#[test]
fn test_file_layout_uses_fixed_keys() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("store.json");
    let mut store = FileStore::new(&path);

    save_subjects(&mut store, &sample_subjects()).unwrap();
    save_plan(&mut store, sample_record()).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw[SUBJECTS_KEY].is_array());
    assert!(raw[PLANS_KEY].is_array());

    let stored_subject = &raw[SUBJECTS_KEY][0];
    assert_eq!(stored_subject["name"], "Math");
    assert_eq!(stored_subject["targetDate"], "2026-10-23");
    assert_eq!(stored_subject["hoursNeeded"], serde_json::json!(8.0));

    let stored_plan = &raw[PLANS_KEY][0];
    assert_eq!(stored_plan["id"], 1);
    assert!(stored_plan["createdAt"].is_string());
    assert!(stored_plan["plan"]["dailyPlan"].is_array());
}

#[test]
fn test_plan_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = FileStore::new(temp_dir.path().join("store.json"));

    let first = save_plan(&mut store, sample_record()).unwrap();
    let second = save_plan(&mut store, sample_record()).unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);

    let fetched = get_plan(&store, 1).unwrap().expect("plan 1 should exist");
    assert_eq!(fetched.plan, first.plan);
    assert_eq!(fetched.subjects, sample_subjects());

    let listed = list_plans(&store).unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed[0].created_at >= listed[1].created_at);

    assert!(delete_plan(&mut store, 1).unwrap());
    assert!(!delete_plan(&mut store, 1).unwrap());
    assert!(get_plan(&store, 1).unwrap().is_none());
    assert_eq!(list_plans(&store).unwrap().len(), 1);
}

#[test]
fn test_plan_at_input_limits_stays_readable() {
    let far = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
    let subjects = vec![
        Subject::new("Thesis", "Draft, Revise", 10, far).with_hours_needed(MAX_HOURS_NEEDED),
        Subject::new("Reading", "", 1, far),
    ];
    let plan = generate_plan(&subjects, MAX_HOURS_PER_DAY, today()).unwrap();
    assert!(plan.total_hours.is_finite());

    let mut store = MemoryStore::new();
    save_plan(&mut store, sample_record()).unwrap();
    save_plan(
        &mut store,
        PlanRecord::new(MAX_HOURS_PER_DAY, subjects, plan.clone()),
    )
    .unwrap();

    let listed = list_plans(&store).expect("saved plans should stay readable");
    assert_eq!(listed.len(), 2);
    let stored = get_plan(&store, 2).unwrap().expect("plan 2 should exist");
    assert!((stored.plan.total_hours - plan.total_hours).abs() < f64::EPSILON);
    assert_eq!(stored.plan.days_available, plan.days_available);
    assert_eq!(stored.plan.daily_plan.len(), plan.daily_plan.len());
}

#[test]
fn test_plans_and_subjects_are_independent() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = FileStore::new(temp_dir.path().join("store.json"));

    save_subjects(&mut store, &sample_subjects()).unwrap();
    save_plan(&mut store, sample_record()).unwrap();
    save_subjects(&mut store, &[]).unwrap();

    assert!(load_subjects(&store).unwrap().is_empty());
    assert_eq!(list_plans(&store).unwrap().len(), 1);
}

#[test]
fn test_remove_key() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = FileStore::new(temp_dir.path().join("store.json"));

    save_subjects(&mut store, &sample_subjects()).unwrap();
    assert!(store.remove(SUBJECTS_KEY).unwrap());
    assert!(!store.remove(SUBJECTS_KEY).unwrap());
    assert!(store.get(SUBJECTS_KEY).unwrap().is_none());
}

#[test]
fn test_empty_file_reads_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("store.json");
    fs::write(&path, "  \n").unwrap();

    let store = FileStore::new(&path);
    assert!(load_subjects(&store).unwrap().is_empty());
}

#[test]
fn test_corrupt_file_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("store.json");

    fs::write(&path, "{ not json").unwrap();
    let store = FileStore::new(&path);
    assert!(matches!(load_subjects(&store), Err(StoreError::Json(_))));

    fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(matches!(
        load_subjects(&store),
        Err(StoreError::NotAnObject(p)) if p == path
    ));
}
