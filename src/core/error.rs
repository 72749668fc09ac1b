//! Error types for plan generation, subject input, and persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Problems with a plan request detected before any scheduling happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The request contained no subjects.
    #[error("at least one subject is required to generate a plan")]
    NoSubjects,

    /// The daily budget was zero, negative, above 24, or not a number.
    #[error("available hours per day must be more than 0 and at most 24 (got {0})")]
    InvalidHoursPerDay(f64),

    /// A subject had a blank name. Holds the subject's position (0-based).
    #[error("subject #{} has an empty name", .0 + 1)]
    EmptySubjectName(usize),

    /// Two subjects share a name (compared trimmed and case-insensitively).
    #[error("duplicate subject name: {0:?}")]
    DuplicateSubject(String),

    /// Difficulty outside 1-10.
    #[error("subject {subject:?} has difficulty {value} (expected 1-10)")]
    DifficultyOutOfRange {
        /// Subject name
        subject: String,
        /// Rejected difficulty
        value: u8,
    },

    /// No target date was set, so the planning horizon cannot be computed.
    #[error("subject {0:?} has no target date")]
    MissingTargetDate(String),

    /// Negative, oversized, or non-finite effort estimate.
    #[error("subject {subject:?} has invalid hours needed ({value})")]
    InvalidHoursNeeded {
        /// Subject name
        subject: String,
        /// Rejected value
        value: f64,
    },

    /// A value derived from the inputs overflowed. Holds the name of the quantity.
    #[error("{0} is not a finite number")]
    NonFiniteSchedule(&'static str),
}

/// Errors raised while reading a subject list from disk.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// TOML syntax or schema error.
    #[error("invalid TOML subject file: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON syntax or schema error.
    #[error("invalid JSON subject file: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is not `.toml` or `.json`.
    #[error("unsupported subject file format: {0:?} (expected .toml or .json)")]
    UnsupportedFormat(String),
}

/// Errors raised by [`Store`](crate::core::store::Store) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O error at {}: {source}", .path.display())]
    Io {
        /// Backing file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The stored JSON could not be parsed or serialized.
    #[error("store JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing file is valid JSON but not a key-value object.
    #[error("store file {} does not contain a JSON object", .0.display())]
    NotAnObject(PathBuf),
}
