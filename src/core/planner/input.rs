//! Subject list parser for TOML and JSON files

use crate::core::error::InputError;
use crate::core::models::Subject;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Supported subject file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl InputFormat {
    /// Detect the format from a file extension (case-insensitive)
    ///
    /// # Errors
    /// Returns [`InputError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(InputError::UnsupportedFormat(ext)),
        }
    }
}

/// Contents of a subject file
///
/// ```toml
/// hours_per_day = 4
///
/// [[subjects]]
/// name = "Math"
/// chapters = "Algebra, Calculus"
/// difficulty = 5
/// target_date = "2026-10-23"
/// hours_needed = 8
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectFile {
    /// Daily study budget; the configured default applies when absent
    #[serde(
        default,
        alias = "hours_per_day",
        alias = "availableHoursPerDay",
        skip_serializing_if = "Option::is_none"
    )]
    pub hours_per_day: Option<f64>,

    /// Subjects in display order
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

/// Parse subject file contents in the given format
///
/// # Errors
/// Returns an error if the contents are not valid TOML/JSON or do not match the schema.
pub fn parse_subjects_str(content: &str, format: InputFormat) -> Result<SubjectFile, InputError> {
    let file = match format {
        InputFormat::Toml => toml::from_str(content)?,
        InputFormat::Json => serde_json::from_str(content)?,
    };
    Ok(file)
}

/// Read and parse a subject file, choosing the format from its extension
///
/// # Arguments
/// * `path` - Path to a `.toml` or `.json` file
///
/// # Errors
/// Returns an error if the extension is unsupported, the file cannot be read,
/// or its contents cannot be parsed.
pub fn parse_subjects_file<P: AsRef<Path>>(path: P) -> Result<SubjectFile, InputError> {
    let path = path.as_ref();
    let format = InputFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_subjects_str(&content, format)
}
