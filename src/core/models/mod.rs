//! Data models for `StudySync`

pub mod plan;
pub mod subject;

pub use plan::{DayPlan, GeneratedPlan, PlanWarning, Session, SubjectAllocation};
pub use subject::{DifficultyLevel, Subject, DEFAULT_HOURS_NEEDED};
