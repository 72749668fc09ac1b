//! Shared library for `StudySync`
//! Contains the study-plan generator, persistence, reporting, and configuration
//! used by the `studysync` CLI.

pub mod core;
pub mod logger;
pub mod shared;

pub use crate::core::config;
pub use shared::*;
