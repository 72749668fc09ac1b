//! Integration tests for the study plan generator

use chrono::{Duration, NaiveDate};
use std::collections::HashSet;
use study_sync::core::error::ValidationError;
use study_sync::core::models::{PlanWarning, Subject};
use study_sync::core::planner::{
    generate_plan, HorizonPolicy, PlanGenerator, PlanRequest, PlannerOptions,
    GENERAL_STUDY_TOPIC, MAX_HOURS_NEEDED, MAX_HOURS_PER_DAY, MAX_PLAN_DAYS, MAX_SESSION_HOURS,
    MIN_ALLOCATED_HOURS,
};

/// Monday
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn in_days(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

fn subject(name: &str, chapters: &str, difficulty: u8, days: i64, hours: f64) -> Subject {
    Subject::new(name, chapters, difficulty, in_days(days)).with_hours_needed(hours)
}

fn scheduled_for(plan: &study_sync::core::models::GeneratedPlan, name: &str) -> f64 {
    plan.sessions_for(name).iter().map(|s| s.duration).sum()
}

// --- Example scenarios ---

#[test]
fn test_single_subject_alternates_chapters() {
    let subjects = vec![subject("Math", "Algebra,Calculus", 5, 4, 8.0)];
    let plan = generate_plan(&subjects, 2.0, today()).unwrap();

    assert_eq!(plan.days_available, 4);
    assert!((plan.total_hours - 8.0).abs() < f64::EPSILON);
    assert_eq!(plan.subjects, 1);

    let alloc = plan.allocation("Math").unwrap();
    assert!((alloc.allocated_hours - 8.0).abs() < f64::EPSILON);
    assert!((alloc.hours_per_session - 2.0).abs() < f64::EPSILON);
    assert_eq!(alloc.sessions_scheduled, 4);

    assert_eq!(plan.daily_plan.len(), 4);
    let topics: Vec<&str> = plan.sessions().map(|s| s.topic.as_str()).collect();
    assert_eq!(topics, vec!["Algebra", "Calculus", "Algebra", "Calculus"]);
    assert!(plan
        .sessions()
        .all(|s| (s.duration - 2.0).abs() < f64::EPSILON));
    assert!(plan.warnings.is_empty());
}

#[test]
fn test_two_equal_subjects_split_evenly() {
    let subjects = vec![
        subject("Math", "Algebra", 5, 5, 10.0),
        subject("Physics", "Optics", 5, 5, 10.0),
    ];
    let plan = generate_plan(&subjects, 4.0, today()).unwrap();

    assert_eq!(plan.days_available, 5);
    assert!((plan.total_hours - 20.0).abs() < f64::EPSILON);

    for name in ["Math", "Physics"] {
        let alloc = plan.allocation(name).unwrap();
        assert!((alloc.weight - 50.0).abs() < f64::EPSILON);
        assert!((alloc.allocated_hours - 10.0).abs() < f64::EPSILON);
        assert!((alloc.hours_per_session - 2.0).abs() < f64::EPSILON);
        assert_eq!(plan.sessions_for(name).len(), 5);
    }

    assert_eq!(plan.total_sessions(), 10);
    assert_eq!(plan.daily_plan.len(), 5);
    assert!(plan.daily_plan.iter().all(|d| d.sessions.len() == 2));
}

#[test]
fn test_empty_chapters_use_general_study() {
    let subjects = vec![subject("Art", "", 3, 3, 6.0), subject("Music", " , ,", 3, 3, 6.0)];
    let plan = generate_plan(&subjects, 2.0, today()).unwrap();

    assert!(plan.total_sessions() > 0);
    assert!(plan.sessions().all(|s| s.topic == GENERAL_STUDY_TOPIC));
}

#[test]
fn test_empty_subject_list_rejected() {
    let result = generate_plan(&[], 4.0, today());
    assert_eq!(result, Err(ValidationError::NoSubjects));
}

#[test]
fn test_deadline_today_clamps_to_one_day() {
    let subjects = vec![subject("Math", "Algebra", 5, 0, 8.0)];
    let plan = generate_plan(&subjects, 2.0, today()).unwrap();

    assert_eq!(plan.days_available, 1);
    assert!((plan.total_hours - 2.0).abs() < f64::EPSILON);
    assert_eq!(plan.daily_plan.len(), 1);
    assert_eq!(plan.daily_plan[0].date, today());
    assert_eq!(
        plan.warnings,
        vec![PlanWarning::DegenerateSchedule {
            subject: "Math".to_string(),
            days_until_deadline: 0,
        }]
    );
}

#[test]
fn test_past_deadline_clamps_and_reports_offset() {
    let subjects = vec![subject("History", "", 4, -3, 5.0)];
    let plan = generate_plan(&subjects, 3.0, today()).unwrap();

    assert_eq!(plan.days_available, 1);
    assert!(matches!(
        plan.warnings.as_slice(),
        [PlanWarning::DegenerateSchedule { days_until_deadline: -3, .. }]
    ));
}

#[test]
fn test_shared_horizon_uses_earliest_deadline() {
    let subjects = vec![
        subject("Soon", "A", 5, 3, 10.0),
        subject("Later", "B", 5, 10, 10.0),
        subject("Much Later", "C", 5, 30, 10.0),
    ];
    let plan = generate_plan(&subjects, 3.0, today()).unwrap();

    assert_eq!(plan.days_available, 3);
    assert_eq!(plan.daily_plan.len(), 3);
    assert!(plan.sessions_for("Much Later").len() <= 3);
    assert!(plan.daily_plan.iter().all(|d| d.date < in_days(3)));
    assert!(plan.allocations.iter().all(|a| a.horizon_days == 3));
}

#[test]
fn test_per_subject_horizon_respects_own_deadlines() {
    let subjects = vec![
        subject("Soon", "A", 5, 3, 10.0),
        subject("Later", "B", 5, 10, 10.0),
        subject("Much Later", "C", 5, 30, 10.0),
    ];
    let request = PlanRequest::new(subjects, 3.0);
    let generator = PlanGenerator::new(PlannerOptions::with_horizon(HorizonPolicy::PerSubject));
    let plan = generator.generate(&request, today()).unwrap();

    assert_eq!(plan.days_available, 30);
    assert_eq!(plan.daily_plan.len(), MAX_PLAN_DAYS);

    let soon = plan.allocation("Soon").unwrap();
    assert_eq!(soon.horizon_days, 3);
    assert!((soon.allocated_hours - 3.0).abs() < f64::EPSILON);
    assert_eq!(plan.sessions_for("Soon").len(), 3);

    let later = plan.allocation("Later").unwrap();
    assert!((later.allocated_hours - 10.0).abs() < f64::EPSILON);
    assert_eq!(later.sessions_scheduled, 10);
    assert_eq!(plan.sessions_for("Later").len(), MAX_PLAN_DAYS);

    assert_eq!(
        plan.warnings,
        vec![PlanWarning::Truncated {
            dropped_days: 23,
            dropped_sessions: 26,
        }]
    );
}

// --- Validation ---

#[test]
fn test_invalid_hours_per_day_rejected() {
    let subjects = vec![subject("Math", "", 5, 3, 5.0)];
    for hours in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            generate_plan(&subjects, hours, today()),
            Err(ValidationError::InvalidHoursPerDay(_))
        ));
    }
}

#[test]
fn test_oversized_daily_budget_rejected() {
    let subjects = vec![subject("Math", "", 5, 2, 5.0)];
    assert_eq!(
        generate_plan(&subjects, 1e308, today()),
        Err(ValidationError::InvalidHoursPerDay(1e308))
    );

    let plan = generate_plan(&subjects, MAX_HOURS_PER_DAY, today()).unwrap();
    assert!(plan.total_hours.is_finite());
    assert!((plan.total_hours - 2.0 * MAX_HOURS_PER_DAY).abs() < 1e-9);
}

#[test]
fn test_oversized_hours_needed_rejected() {
    let subjects = vec![
        subject("Big", "", 10, 5, 1e308),
        subject("Small", "", 1, 5, 1.0),
    ];
    assert!(matches!(
        generate_plan(&subjects, 4.0, today()),
        Err(ValidationError::InvalidHoursNeeded { ref subject, .. }) if subject == "Big"
    ));
}

#[test]
fn test_largest_inputs_keep_heaviest_subject_ahead() {
    let subjects = vec![
        subject("Big", "", 10, 5, MAX_HOURS_NEEDED),
        subject("Small", "", 1, 5, 1.0),
    ];
    let plan = generate_plan(&subjects, MAX_HOURS_PER_DAY, today()).unwrap();

    let big = plan.allocation("Big").unwrap();
    let small = plan.allocation("Small").unwrap();
    assert!(big.weight.is_finite());
    assert!(big.allocated_hours > small.allocated_hours);
    assert!((big.allocated_hours - 5.0 * MAX_HOURS_PER_DAY).abs() < 1e-9);
    assert!((small.allocated_hours - MIN_ALLOCATED_HOURS).abs() < 1e-9);
}

#[test]
fn test_duplicate_names_rejected_case_insensitively() {
    let subjects = vec![subject("Math", "", 5, 3, 5.0), subject(" math ", "", 4, 5, 5.0)];
    assert_eq!(
        generate_plan(&subjects, 2.0, today()),
        Err(ValidationError::DuplicateSubject(" math ".to_string()))
    );
}

#[test]
fn test_difficulty_out_of_range_rejected() {
    for difficulty in [0, 11] {
        let subjects = vec![subject("Math", "", difficulty, 3, 5.0)];
        assert_eq!(
            generate_plan(&subjects, 2.0, today()),
            Err(ValidationError::DifficultyOutOfRange {
                subject: "Math".to_string(),
                value: difficulty,
            })
        );
    }
}

#[test]
fn test_missing_target_date_rejected() {
    let mut math = subject("Math", "", 5, 3, 5.0);
    math.target_date = None;
    assert_eq!(
        generate_plan(&[math], 2.0, today()),
        Err(ValidationError::MissingTargetDate("Math".to_string()))
    );
}

#[test]
fn test_blank_name_rejected() {
    let subjects = vec![subject("Math", "", 5, 3, 5.0), subject("   ", "", 5, 3, 5.0)];
    assert_eq!(
        generate_plan(&subjects, 2.0, today()),
        Err(ValidationError::EmptySubjectName(1))
    );
}

// --- Properties ---

#[test]
fn test_conservation_when_sessions_fit() {
    let subjects = vec![
        subject("Math", "A,B,C", 7, 6, 12.0),
        subject("Physics", "D", 4, 6, 9.0),
        subject("Art", "", 2, 6, 4.0),
    ];
    let plan = generate_plan(&subjects, 5.0, today()).unwrap();

    for alloc in &plan.allocations {
        assert!(alloc.hours_per_session <= MAX_SESSION_HOURS);
        let scheduled = scheduled_for(&plan, &alloc.subject);
        assert!(
            (scheduled - alloc.allocated_hours).abs() <= alloc.hours_per_session + 1e-9,
            "{}: scheduled {scheduled}, allocated {}",
            alloc.subject,
            alloc.allocated_hours
        );
        assert!(alloc.unscheduled_hours().abs() <= alloc.hours_per_session + 1e-9);
    }
}

#[test]
fn test_session_length_capped() {
    let subjects = vec![subject("Math", "A", 10, 2, 50.0)];
    let plan = generate_plan(&subjects, 12.0, today()).unwrap();

    assert!(plan.sessions().all(|s| s.duration <= MAX_SESSION_HOURS));
    let alloc = plan.allocation("Math").unwrap();
    assert!((alloc.hours_per_session - MAX_SESSION_HOURS).abs() < f64::EPSILON);
    assert!(alloc.unscheduled_hours() > 0.0);
}

#[test]
fn test_day_bound() {
    let subjects = vec![
        subject("Math", "A,B", 5, 20, 10.0),
        subject("Physics", "C", 6, 25, 10.0),
    ];
    let request = PlanRequest::new(subjects, 4.0);
    let plan = PlanGenerator::new(PlannerOptions::with_horizon(HorizonPolicy::PerSubject))
        .generate(&request, today())
        .unwrap();

    assert!(plan.daily_plan.len() <= MAX_PLAN_DAYS);
    assert!(plan.daily_plan.iter().all(|d| d.date < in_days(7)));
}

#[test]
fn test_heavier_subject_gets_more_hours() {
    let subjects = vec![
        subject("Hard", "A", 8, 5, 10.0),
        subject("Easy", "B", 3, 5, 10.0),
    ];
    let plan = generate_plan(&subjects, 4.0, today()).unwrap();

    let hard = plan.allocation("Hard").unwrap();
    let easy = plan.allocation("Easy").unwrap();
    assert!(hard.weight > easy.weight);
    assert!(hard.allocated_hours >= easy.allocated_hours);
}

#[test]
fn test_minimum_allocation_floor() {
    let subjects = vec![
        subject("Huge", "A", 10, 2, 100.0),
        subject("Tiny", "B", 1, 2, 1.0),
    ];
    let plan = generate_plan(&subjects, 1.0, today()).unwrap();

    let tiny = plan.allocation("Tiny").unwrap();
    assert!((tiny.allocated_hours - MIN_ALLOCATED_HOURS).abs() < f64::EPSILON);
    assert!(!plan.sessions_for("Tiny").is_empty());
}

#[test]
fn test_all_chapters_covered_when_sessions_suffice() {
    let subjects = vec![subject("Math", "Limits, Series, Vectors", 5, 5, 10.0)];
    let plan = generate_plan(&subjects, 2.0, today()).unwrap();

    assert_eq!(plan.total_sessions(), 5);
    let seen: HashSet<&str> = plan.sessions().map(|s| s.topic.as_str()).collect();
    assert_eq!(seen.len(), 3);
}

#[test]
fn test_leading_chapters_in_order_when_sessions_short() {
    let subjects = vec![subject("Math", "A, B, C, D, E", 5, 2, 4.0)];
    let plan = generate_plan(&subjects, 2.0, today()).unwrap();

    let topics: Vec<&str> = plan.sessions().map(|s| s.topic.as_str()).collect();
    assert_eq!(topics, vec!["A", "B"]);
}

#[test]
fn test_generation_is_deterministic() {
    let subjects = vec![
        subject("Math", "A,B", 7, 4, 12.0),
        subject("Physics", "C", 4, 6, 8.0),
    ];
    let first = generate_plan(&subjects, 3.0, today()).unwrap();
    let second = generate_plan(&subjects, 3.0, today()).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_truncation_is_idempotent() {
    let short = vec![subject("Math", "A", 5, 5, 10.0)];
    let default_plan = generate_plan(&short, 2.0, today()).unwrap();
    let wide = PlanGenerator::new(PlannerOptions {
        horizon: HorizonPolicy::Shared,
        max_days: 30,
    })
    .generate(&PlanRequest::new(short, 2.0), today())
    .unwrap();
    assert_eq!(default_plan.daily_plan.len(), 5);
    assert_eq!(default_plan, wide);

    let long = vec![subject("Math", "A", 5, 10, 10.0)];
    let once = generate_plan(&long, 2.0, today()).unwrap();
    let twice = generate_plan(&long, 2.0, today()).unwrap();
    assert_eq!(once.daily_plan.len(), MAX_PLAN_DAYS);
    assert_eq!(twice.daily_plan.len(), once.daily_plan.len());
}

#[test]
fn test_days_keyed_by_date_not_weekday() {
    let subjects = vec![subject("Math", "A", 5, 10, 10.0)];
    let plan = PlanGenerator::new(PlannerOptions {
        horizon: HorizonPolicy::Shared,
        max_days: 14,
    })
    .generate(&PlanRequest::new(subjects, 1.0), today())
    .unwrap();

    assert_eq!(plan.daily_plan.len(), 10);
    let dates: HashSet<NaiveDate> = plan.daily_plan.iter().map(|d| d.date).collect();
    assert_eq!(dates.len(), 10);

    // Two Mondays stay separate
    assert_eq!(plan.daily_plan[0].day, "Mon");
    assert_eq!(plan.daily_plan[7].day, "Mon");
    assert_ne!(plan.daily_plan[0].date, plan.daily_plan[7].date);
    assert!(plan.warnings.is_empty());
}

#[test]
fn test_days_in_chronological_order() {
    let subjects = vec![
        subject("Short", "A", 5, 2, 4.0),
        subject("Long", "B", 5, 6, 4.0),
    ];
    let request = PlanRequest::new(subjects, 2.0);
    let plan = PlanGenerator::new(PlannerOptions::with_horizon(HorizonPolicy::PerSubject))
        .generate(&request, today())
        .unwrap();

    let dates: Vec<NaiveDate> = plan.daily_plan.iter().map(|d| d.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert_eq!(dates.first(), Some(&today()));
}

#[test]
fn test_json_shape() {
    let subjects = vec![subject("Math", "Algebra", 5, 2, 4.0)];
    let plan = generate_plan(&subjects, 2.0, today()).unwrap();
    let value = serde_json::to_value(&plan).unwrap();

    assert!(value.get("dailyPlan").is_some());
    assert_eq!(value["totalHours"], serde_json::json!(4.0));
    assert_eq!(value["daysAvailable"], serde_json::json!(2));
    assert_eq!(value["subjects"], serde_json::json!(1));

    let day = &value["dailyPlan"][0];
    assert_eq!(day["day"], "Mon");
    assert_eq!(day["date"], "2026-10-19");

    let session = &day["sessions"][0];
    assert_eq!(session["subject"], "Math");
    assert_eq!(session["topic"], "Algebra");
    assert_eq!(session["difficulty"], 5);
    assert!(session["color"].as_str().unwrap().contains('#'));
}
