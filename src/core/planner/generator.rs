//! Study plan generator
//!
//! Distributes study sessions over the days left before the nearest deadline:
//! 1. Each subject's weight is `difficulty × hours_needed`
//! 2. The hour budget over the horizon is split proportionally to weight
//! 3. Each subject's hours are spread evenly over the horizon, at most 3h per session
//! 4. Sessions rotate through the subject's chapters
//! 5. Days are bucketed by calendar date and only the first week is kept
//!
//! Generation is pure: the same request and reference date always give the same plan.

use crate::core::error::ValidationError;
use crate::core::models::subject::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::core::models::{DayPlan, GeneratedPlan, PlanWarning, Session, Subject, SubjectAllocation};
use crate::core::planner::calendar::{day_offset, days_until};
use crate::core::planner::palette::subject_color;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Every subject is allocated at least this many hours
pub const MIN_ALLOCATED_HOURS: f64 = 1.0;

/// Longest single study session, in hours
pub const MAX_SESSION_HOURS: f64 = 3.0;

/// Number of days kept in a generated plan
pub const MAX_PLAN_DAYS: usize = 7;

/// Horizon used when a deadline is today or already past
pub const MIN_DAYS_AVAILABLE: i64 = 1;

/// Largest accepted daily budget, in hours
pub const MAX_HOURS_PER_DAY: f64 = 24.0;

/// Largest accepted effort estimate for one subject, in hours
pub const MAX_HOURS_NEEDED: f64 = 10_000.0;

/// Topic used for subjects without chapters
pub const GENERAL_STUDY_TOPIC: &str = "General Study";

/// Input to the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Subjects in display order (order sets color and nothing else)
    pub subjects: Vec<Subject>,
    /// Daily study budget in hours
    pub available_hours_per_day: f64,
}

impl PlanRequest {
    /// Create a request
    #[must_use]
    pub const fn new(subjects: Vec<Subject>, available_hours_per_day: f64) -> Self {
        Self {
            subjects,
            available_hours_per_day,
        }
    }

    /// Check the request before any scheduling happens
    ///
    /// # Errors
    /// Returns the first [`ValidationError`] found: empty subject list, a daily
    /// budget outside `(0, MAX_HOURS_PER_DAY]`, blank or duplicate names, difficulty
    /// outside 1-10, missing target date, or an effort estimate outside
    /// `[0, MAX_HOURS_NEEDED]`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subjects.is_empty() {
            return Err(ValidationError::NoSubjects);
        }

        let hours = self.available_hours_per_day;
        if !hours.is_finite() || hours <= 0.0 || hours > MAX_HOURS_PER_DAY {
            return Err(ValidationError::InvalidHoursPerDay(hours));
        }

        let mut seen = HashSet::new();
        for (idx, subject) in self.subjects.iter().enumerate() {
            let name = subject.name.trim();
            if name.is_empty() {
                return Err(ValidationError::EmptySubjectName(idx));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(ValidationError::DuplicateSubject(subject.name.clone()));
            }
            if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&subject.difficulty) {
                return Err(ValidationError::DifficultyOutOfRange {
                    subject: subject.name.clone(),
                    value: subject.difficulty,
                });
            }
            if subject.target_date.is_none() {
                return Err(ValidationError::MissingTargetDate(subject.name.clone()));
            }
            if let Some(needed) = subject.hours_needed {
                if !needed.is_finite() || !(0.0..=MAX_HOURS_NEEDED).contains(&needed) {
                    return Err(ValidationError::InvalidHoursNeeded {
                        subject: subject.name.clone(),
                        value: needed,
                    });
                }
            }
        }

        Ok(())
    }
}

/// How the planning horizon is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizonPolicy {
    /// Every subject shares the horizon of the earliest deadline
    #[default]
    Shared,
    /// Each subject is spread over the days until its own deadline
    PerSubject,
}

impl FromStr for HorizonPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shared" => Ok(Self::Shared),
            "per-subject" | "per_subject" | "subject" => Ok(Self::PerSubject),
            _ => Err(format!(
                "Unknown horizon policy: '{s}' (expected shared or per-subject)"
            )),
        }
    }
}

impl fmt::Display for HorizonPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => write!(f, "shared"),
            Self::PerSubject => write!(f, "per-subject"),
        }
    }
}

/// Generator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerOptions {
    /// Horizon policy
    pub horizon: HorizonPolicy,
    /// Number of days kept in the plan (at least 1)
    pub max_days: usize,
}

impl PlannerOptions {
    /// Options with a given horizon policy and the default day limit
    #[must_use]
    pub const fn with_horizon(horizon: HorizonPolicy) -> Self {
        Self {
            horizon,
            max_days: MAX_PLAN_DAYS,
        }
    }
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self::with_horizon(HorizonPolicy::Shared)
    }
}

/// Study plan generator
#[derive(Debug, Clone, Default)]
pub struct PlanGenerator {
    options: PlannerOptions,
}

impl PlanGenerator {
    /// Create a generator with the given options
    #[must_use]
    pub const fn new(options: PlannerOptions) -> Self {
        Self { options }
    }

    /// Build a plan for `request` starting on `today`
    ///
    /// Sessions for day `i` fall on `today + i`. A subject gets
    /// `min(ceil(allocated / per_session), horizon)` sessions; days past
    /// `max_days` are dropped and reported as a [`PlanWarning::Truncated`].
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if the request is invalid; nothing is computed in that case.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn generate(
        &self,
        request: &PlanRequest,
        today: NaiveDate,
    ) -> Result<GeneratedPlan, ValidationError> {
        request.validate()?;

        let mut warnings = Vec::new();
        let horizons = self.compute_horizons(&request.subjects, today, &mut warnings);
        let days_available = horizons
            .iter()
            .copied()
            .max()
            .unwrap_or(MIN_DAYS_AVAILABLE);
        let hours_per_day = request.available_hours_per_day;
        let total_hours = ensure_finite("total hours", days_available as f64 * hours_per_day)?;
        let total_weight = ensure_finite(
            "total weight",
            request.subjects.iter().map(Subject::weight).sum(),
        )?;

        let max_days = self.options.max_days.max(1);
        let mut buckets: BTreeMap<NaiveDate, DayPlan> = BTreeMap::new();
        let mut allocations = Vec::with_capacity(request.subjects.len());
        let mut longest_run = 0usize;
        let mut dropped_sessions = 0usize;

        for (idx, (subject, &horizon)) in request.subjects.iter().zip(&horizons).enumerate() {
            let weight = ensure_finite("subject weight", subject.weight())?;
            let pool = horizon as f64 * hours_per_day;
            let allocated_hours =
                ensure_finite("allocated hours", (pool * weight / total_weight).round())?
                    .max(MIN_ALLOCATED_HOURS);

            let mut topics = subject.topics();
            if topics.is_empty() {
                topics.push(GENERAL_STUDY_TOPIC.to_string());
            }

            let hours_per_session =
                (allocated_hours / horizon.max(1) as f64).min(MAX_SESSION_HOURS);
            let sessions_needed = (allocated_hours / hours_per_session).ceil() as usize;
            let session_count = sessions_needed.min(horizon as usize);
            let color = subject_color(idx);

            // Session i lands on today + i, so every bucket past `max_days` would be dropped anyway
            let kept = session_count.min(max_days);
            for (i, topic) in topics.iter().cycle().take(kept).enumerate() {
                let date = day_offset(today, i);
                buckets
                    .entry(date)
                    .or_insert_with(|| DayPlan::new(date))
                    .sessions
                    .push(Session {
                        subject: subject.name.clone(),
                        topic: topic.clone(),
                        duration: hours_per_session,
                        difficulty: subject.difficulty,
                        color: color.to_string(),
                    });
            }

            longest_run = longest_run.max(session_count);
            dropped_sessions += session_count - kept;

            allocations.push(SubjectAllocation {
                subject: subject.name.clone(),
                weight,
                allocated_hours,
                hours_per_session,
                sessions_scheduled: session_count,
                horizon_days: horizon,
            });
        }

        if longest_run > max_days {
            warnings.push(PlanWarning::Truncated {
                dropped_days: longest_run - max_days,
                dropped_sessions,
            });
        }

        Ok(GeneratedPlan {
            daily_plan: buckets.into_values().collect(),
            total_hours,
            days_available,
            subjects: request.subjects.len(),
            allocations,
            warnings,
        })
    }

    /// Horizon (in days) for each subject, in input order
    fn compute_horizons(
        &self,
        subjects: &[Subject],
        today: NaiveDate,
        warnings: &mut Vec<PlanWarning>,
    ) -> Vec<i64> {
        match self.options.horizon {
            HorizonPolicy::Shared => {
                let earliest = subjects
                    .iter()
                    .filter_map(|s| s.target_date.map(|d| (s, d)))
                    .min_by_key(|(_, d)| *d);
                let days = earliest.map_or(MIN_DAYS_AVAILABLE, |(subject, date)| {
                    clamp_horizon(&subject.name, days_until(today, date), warnings)
                });
                vec![days; subjects.len()]
            }
            HorizonPolicy::PerSubject => subjects
                .iter()
                .map(|s| {
                    s.target_date.map_or(MIN_DAYS_AVAILABLE, |date| {
                        clamp_horizon(&s.name, days_until(today, date), warnings)
                    })
                })
                .collect(),
        }
    }
}

/// Reject a derived quantity that overflowed to infinity or NaN
fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFiniteSchedule(quantity))
    }
}

/// Clamp a raw day count to [`MIN_DAYS_AVAILABLE`], recording a warning when clamped
fn clamp_horizon(subject: &str, raw_days: i64, warnings: &mut Vec<PlanWarning>) -> i64 {
    if raw_days < MIN_DAYS_AVAILABLE {
        warnings.push(PlanWarning::DegenerateSchedule {
            subject: subject.to_string(),
            days_until_deadline: raw_days,
        });
        MIN_DAYS_AVAILABLE
    } else {
        raw_days
    }
}

/// Generate a plan with default options (shared horizon, 7 days)
///
/// # Errors
/// Returns a [`ValidationError`] if the request is invalid.
pub fn generate_plan(
    subjects: &[Subject],
    available_hours_per_day: f64,
    today: NaiveDate,
) -> Result<GeneratedPlan, ValidationError> {
    let request = PlanRequest::new(subjects.to_vec(), available_hours_per_day);
    PlanGenerator::default().generate(&request, today)
}
