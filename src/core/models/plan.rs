//! Generated study plan model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One scheduled block of study time for one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Subject name
    pub subject: String,
    /// Chapter studied in this session
    pub topic: String,
    /// Length in hours
    pub duration: f64,
    /// Subject difficulty (display only)
    pub difficulty: u8,
    /// Gradient token for the subject
    pub color: String,
}

/// All sessions scheduled on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Weekday label derived from `date` (e.g., "Mon")
    pub day: String,
    /// Calendar date
    pub date: NaiveDate,
    /// Sessions in scheduling order
    pub sessions: Vec<Session>,
}

impl DayPlan {
    /// Create an empty day
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            day: crate::core::planner::calendar::weekday_label(date).to_string(),
            date,
            sessions: Vec::new(),
        }
    }

    /// Total study hours on this day
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.sessions.iter().map(|s| s.duration).sum()
    }
}

/// How hours were assigned to one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAllocation {
    /// Subject name
    pub subject: String,
    /// `difficulty × hours_needed`
    pub weight: f64,
    /// Whole hours assigned across the plan
    pub allocated_hours: f64,
    /// Length of each of this subject's sessions
    pub hours_per_session: f64,
    /// Sessions generated (before any day truncation)
    pub sessions_scheduled: usize,
    /// Days this subject was spread across
    pub horizon_days: i64,
}

impl SubjectAllocation {
    /// Hours actually scheduled (`hours_per_session × sessions_scheduled`)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn scheduled_hours(&self) -> f64 {
        self.hours_per_session * self.sessions_scheduled as f64
    }

    /// Allocated hours that did not fit because sessions are capped in length
    #[must_use]
    pub fn unscheduled_hours(&self) -> f64 {
        (self.allocated_hours - self.scheduled_hours()).max(0.0)
    }
}

/// Non-fatal conditions noticed while generating a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlanWarning {
    /// A deadline is today or already past; the horizon was clamped to one day
    #[serde(rename_all = "camelCase")]
    DegenerateSchedule {
        /// Subject whose deadline set the horizon
        subject: String,
        /// Raw day difference before clamping (zero or negative)
        days_until_deadline: i64,
    },
    /// Days beyond the display limit were dropped
    #[serde(rename_all = "camelCase")]
    Truncated {
        /// Number of days dropped
        dropped_days: usize,
        /// Number of sessions on those days
        dropped_sessions: usize,
    },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateSchedule {
                subject,
                days_until_deadline,
            } => {
                let when = if *days_until_deadline == 0 {
                    "is today".to_string()
                } else {
                    format!("passed {} day(s) ago", -days_until_deadline)
                };
                write!(
                    f,
                    "deadline for '{subject}' {when}; planning horizon clamped to 1 day"
                )
            }
            Self::Truncated {
                dropped_days,
                dropped_sessions,
            } => write!(
                f,
                "{dropped_days} later day(s) with {dropped_sessions} session(s) were left out of the plan"
            ),
        }
    }
}

/// A complete study schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    /// Days in date order
    pub daily_plan: Vec<DayPlan>,
    /// `days_available × available_hours_per_day`
    pub total_hours: f64,
    /// Planning horizon in days
    pub days_available: i64,
    /// Number of subjects planned
    pub subjects: usize,
    /// Per-subject allocation details, in input order
    #[serde(default)]
    pub allocations: Vec<SubjectAllocation>,
    /// Conditions worth showing the user
    #[serde(default)]
    pub warnings: Vec<PlanWarning>,
}

impl GeneratedPlan {
    /// Iterate over every session in the plan
    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.daily_plan.iter().flat_map(|d| d.sessions.iter())
    }

    /// Number of sessions in the plan
    #[must_use]
    pub fn total_sessions(&self) -> usize {
        self.daily_plan.iter().map(|d| d.sessions.len()).sum()
    }

    /// Sum of all session durations in the plan
    #[must_use]
    pub fn scheduled_hours(&self) -> f64 {
        self.sessions().map(|s| s.duration).sum()
    }

    /// Sessions belonging to `subject`, in date order
    #[must_use]
    pub fn sessions_for<'a>(&'a self, subject: &str) -> Vec<&'a Session> {
        self.sessions().filter(|s| s.subject == subject).collect()
    }

    /// Allocation record for `subject`
    #[must_use]
    pub fn allocation(&self, subject: &str) -> Option<&SubjectAllocation> {
        self.allocations.iter().find(|a| a.subject == subject)
    }

    /// Day with the most scheduled hours (earliest wins ties)
    #[must_use]
    pub fn busiest_day(&self) -> Option<&DayPlan> {
        self.daily_plan.iter().reduce(|best, day| {
            if day.total_hours() > best.total_hours() {
                day
            } else {
                best
            }
        })
    }

    /// Whether any warnings were raised
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
