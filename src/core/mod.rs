//! Core module: planning, persistence, reports and configuration

pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod report;
pub mod store;

