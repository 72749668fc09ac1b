//! Subject model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Effort estimate used when a subject has no (or a zero) `hours_needed`.
pub const DEFAULT_HOURS_NEEDED: f64 = 10.0;

/// Lowest accepted difficulty.
pub const MIN_DIFFICULTY: u8 = 1;

/// Highest accepted difficulty.
pub const MAX_DIFFICULTY: u8 = 10;

/// A user-defined study subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Subject name (e.g., "Linear Algebra")
    pub name: String,

    /// Comma-separated chapter list (e.g., "Vectors, Matrices, Eigenvalues")
    #[serde(default)]
    pub chapters: String,

    /// Difficulty from 1 (easy) to 10 (hard)
    pub difficulty: u8,

    /// Date after which no sessions for this subject may be scheduled
    #[serde(default, alias = "target_date")]
    pub target_date: Option<NaiveDate>,

    /// Estimated total hours needed; `None` or zero falls back to [`DEFAULT_HOURS_NEEDED`]
    #[serde(default, alias = "hours_needed", skip_serializing_if = "Option::is_none")]
    pub hours_needed: Option<f64>,
}

impl Subject {
    /// Create a subject with a deadline and the default effort estimate
    ///
    /// # Arguments
    /// * `name` - Subject name
    /// * `chapters` - Comma-separated chapter list
    /// * `difficulty` - Difficulty from 1 to 10
    /// * `target_date` - Deadline
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        chapters: impl Into<String>,
        difficulty: u8,
        target_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            chapters: chapters.into(),
            difficulty,
            target_date: Some(target_date),
            hours_needed: None,
        }
    }

    /// Set the effort estimate
    #[must_use]
    pub fn with_hours_needed(mut self, hours: f64) -> Self {
        self.hours_needed = Some(hours);
        self
    }

    /// Ordered topic list parsed from `chapters` (trimmed, empty entries dropped)
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        parse_chapters(&self.chapters)
    }

    /// Effort estimate with the default applied
    #[must_use]
    pub fn effective_hours_needed(&self) -> f64 {
        match self.hours_needed {
            Some(hours) if hours > 0.0 => hours,
            _ => DEFAULT_HOURS_NEEDED,
        }
    }

    /// Allocation weight: `difficulty × effective_hours_needed`
    #[must_use]
    pub fn weight(&self) -> f64 {
        f64::from(self.difficulty) * self.effective_hours_needed()
    }

    /// Difficulty badge for display
    #[must_use]
    pub const fn difficulty_level(&self) -> DifficultyLevel {
        DifficultyLevel::from_difficulty(self.difficulty)
    }
}

/// Split a comma-separated chapter list into trimmed, non-empty topics
#[must_use]
pub fn parse_chapters(chapters: &str) -> Vec<String> {
    chapters
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

/// Coarse difficulty badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyLevel {
    /// Difficulty 1-3
    Easy,
    /// Difficulty 4-7
    Medium,
    /// Difficulty 8 and above
    Hard,
}

impl DifficultyLevel {
    /// Badge for a raw difficulty value
    #[must_use]
    pub const fn from_difficulty(difficulty: u8) -> Self {
        match difficulty {
            0..=3 => Self::Easy,
            4..=7 => Self::Medium,
            _ => Self::Hard,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_topics_trim_and_drop_empty() {
        let subject = Subject::new("Math", " Algebra, ,Calculus ,, Geometry", 5, date(2026, 1, 10));
        assert_eq!(subject.topics(), vec!["Algebra", "Calculus", "Geometry"]);
    }

    #[test]
    fn test_topics_empty_string() {
        let subject = Subject::new("Math", "", 5, date(2026, 1, 10));
        assert!(subject.topics().is_empty());
    }

    #[test]
    fn test_effective_hours_default() {
        let subject = Subject::new("Math", "", 5, date(2026, 1, 10));
        assert!((subject.effective_hours_needed() - DEFAULT_HOURS_NEEDED).abs() < f64::EPSILON);

        let zero = subject.clone().with_hours_needed(0.0);
        assert!((zero.effective_hours_needed() - DEFAULT_HOURS_NEEDED).abs() < f64::EPSILON);

        let set = subject.with_hours_needed(8.0);
        assert!((set.effective_hours_needed() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weight() {
        let subject = Subject::new("Math", "", 5, date(2026, 1, 10)).with_hours_needed(8.0);
        assert!((subject.weight() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_difficulty_levels() {
        assert_eq!(DifficultyLevel::from_difficulty(1), DifficultyLevel::Easy);
        assert_eq!(DifficultyLevel::from_difficulty(3), DifficultyLevel::Easy);
        assert_eq!(DifficultyLevel::from_difficulty(4), DifficultyLevel::Medium);
        assert_eq!(DifficultyLevel::from_difficulty(7), DifficultyLevel::Medium);
        assert_eq!(DifficultyLevel::from_difficulty(8), DifficultyLevel::Hard);
        assert_eq!(DifficultyLevel::Hard.to_string(), "Hard");
    }

    #[test]
    fn test_serde_camel_case_and_aliases() {
        let json = r#"{"name":"Physics","chapters":"Optics","difficulty":7,"targetDate":"2026-03-01","hoursNeeded":12}"#;
        let subject: Subject = serde_json::from_str(json).unwrap();
        assert_eq!(subject.target_date, Some(date(2026, 3, 1)));
        assert_eq!(subject.hours_needed, Some(12.0));

        let snake = r#"{"name":"Physics","difficulty":7,"target_date":"2026-03-01"}"#;
        let subject: Subject = serde_json::from_str(snake).unwrap();
        assert_eq!(subject.target_date, Some(date(2026, 3, 1)));
        assert_eq!(subject.chapters, "");
        assert!(subject.hours_needed.is_none());

        let out = serde_json::to_string(&subject).unwrap();
        assert!(out.contains("\"targetDate\":\"2026-03-01\""));
        assert!(!out.contains("hoursNeeded"));
    }
}
