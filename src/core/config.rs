//! Configuration module for `StudySync`

use crate::core::planner::{HorizonPolicy, PlannerOptions, MAX_HOURS_PER_DAY, MAX_PLAN_DAYS};
use crate::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the `StudySync` config directory
const DIR_VARIABLE: &str = "$STUDY_SYNC";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Planner defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Daily study budget used when a subject file does not set one
    #[serde(default)]
    pub hours_per_day: f64,
    /// Number of days kept in a generated plan
    #[serde(default)]
    pub max_days: usize,
    /// Horizon policy (`shared` or `per-subject`)
    #[serde(default)]
    pub horizon: String,
}

impl PlannerConfig {
    /// Generator options described by this section
    ///
    /// Falls back to the shared horizon and a 7-day plan for unset or invalid values.
    /// An unrecognized horizon is logged before falling back.
    #[must_use]
    pub fn options(&self) -> PlannerOptions {
        let horizon = if self.horizon.trim().is_empty() {
            HorizonPolicy::default()
        } else {
            self.horizon.parse().unwrap_or_else(|e| {
                let fallback = HorizonPolicy::default();
                warn!("planner.horizon: {e}; using {fallback}");
                fallback
            })
        };
        PlannerOptions {
            horizon,
            max_days: if self.max_days == 0 {
                MAX_PLAN_DAYS
            } else {
                self.max_days
            },
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// JSON file holding subjects and saved plans
    #[serde(default)]
    pub store_file: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Planner settings
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override default hours per day
    pub hours_per_day: Option<f64>,
    /// Override horizon policy
    pub horizon: Option<String>,
    /// Override store file
    pub store_file: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

impl Config {
    /// Get the `$STUDY_SYNC` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/studysync`
    /// - macOS: `~/Library/Application Support/studysync`
    /// - Windows: `%APPDATA%\studysync`
    #[must_use]
    pub fn get_studysync_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("studysync")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Used when loading an older config file so newly added fields pick up their
    /// defaults. Empty strings and zero numbers count as missing.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.planner.hours_per_day <= 0.0 && defaults.planner.hours_per_day > 0.0 {
            self.planner.hours_per_day = defaults.planner.hours_per_day;
            changed = true;
        }
        if self.planner.max_days == 0 && defaults.planner.max_days > 0 {
            self.planner.max_days = defaults.planner.max_days;
            changed = true;
        }
        if self.planner.horizon.is_empty() && !defaults.planner.horizon.is_empty() {
            self.planner.horizon.clone_from(&defaults.planner.horizon);
            changed = true;
        }

        if self.paths.store_file.is_empty() && !defaults.paths.store_file.is_empty() {
            self.paths.store_file.clone_from(&defaults.paths.store_file);
            changed = true;
        }
        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the config file is not modified.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(hours) = overrides.hours_per_day {
            self.planner.hours_per_day = hours;
        }
        if let Some(horizon) = &overrides.horizon {
            self.planner.horizon.clone_from(horizon);
        }

        if let Some(store_file) = &overrides.store_file {
            self.paths.store_file.clone_from(store_file);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_studysync_dir`](Self::get_studysync_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_studysync_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$STUDY_SYNC` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_studysync_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults; `$STUDY_SYNC` is expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.store_file = Self::expand_variables(&config.paths.store_file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The defaults
    /// are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// An existing file is merged with defaults (and re-saved if fields were added).
    /// Any read or parse failure falls back to defaults.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `hours_per_day`, `max_days`,
    /// `horizon`, `store_file`, `reports_dir` (dashes accepted in place of underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "hours_per_day" | "hours-per-day" => Some(self.planner.hours_per_day.to_string()),
            "max_days" | "max-days" => Some(self.planner.max_days.to_string()),
            "horizon" => Some(self.planner.horizon.clone()),
            "store_file" | "store-file" => Some(self.paths.store_file.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Only updates the in-memory config; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse
    /// (booleans, positive numbers, known horizon policies).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "hours_per_day" | "hours-per-day" => {
                let hours = value
                    .parse::<f64>()
                    .ok()
                    .filter(|h| h.is_finite() && *h > 0.0 && *h <= MAX_HOURS_PER_DAY)
                    .ok_or_else(|| {
                        format!(
                            "Invalid hours for '{key}': '{value}' (expected more than 0, at most {MAX_HOURS_PER_DAY})"
                        )
                    })?;
                self.planner.hours_per_day = hours;
            }
            "max_days" | "max-days" => {
                let days = value
                    .parse::<usize>()
                    .ok()
                    .filter(|d| *d > 0)
                    .ok_or_else(|| format!("Invalid positive integer for '{key}': '{value}'"))?;
                self.planner.max_days = days;
            }
            "horizon" => {
                let policy: HorizonPolicy = value.parse()?;
                self.planner.horizon = policy.to_string();
            }
            "store_file" | "store-file" => self.paths.store_file = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Only updates the in-memory config; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "hours_per_day" | "hours-per-day" => {
                self.planner.hours_per_day = defaults.planner.hours_per_day;
            }
            "max_days" | "max-days" => self.planner.max_days = defaults.planner.max_days,
            "horizon" => self.planner.horizon.clone_from(&defaults.planner.horizon),
            "store_file" | "store-file" => self
                .paths
                .store_file
                .clone_from(&defaults.paths.store_file),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the config file so the next [`load()`](Config::load) recreates it.
    /// Succeeds if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[planner]")?;
        writeln!(f, "  hours_per_day = {}", self.planner.hours_per_day)?;
        writeln!(f, "  max_days = {}", self.planner.max_days)?;
        writeln!(f, "  horizon = \"{}\"", self.planner.horizon)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  store_file = \"{}\"", self.paths.store_file)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        Ok(())
    }
}
