//! Study plan generation: the generator itself plus the helpers it relies on

pub mod calendar;
pub mod generator;
pub mod input;
pub mod palette;

pub use generator::{
    generate_plan, HorizonPolicy, PlanGenerator, PlanRequest, PlannerOptions,
    GENERAL_STUDY_TOPIC, MAX_HOURS_NEEDED, MAX_HOURS_PER_DAY, MAX_PLAN_DAYS, MAX_SESSION_HOURS,
    MIN_ALLOCATED_HOURS, MIN_DAYS_AVAILABLE,
};
pub use input::{parse_subjects_file, parse_subjects_str, InputFormat, SubjectFile};
