//! CLI argument definitions for `StudySync`

use chrono::NaiveDate;
use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use study_sync::config::ConfigOverrides;
use study_sync::core::planner::HorizonPolicy;
use study_sync::core::report::ReportFormat;
use study_sync::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `hours_per_day`, `store_file`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum SubjectsSubcommand {
    /// Add a subject to the saved list.
    Add {
        /// Subject name (unique, case-insensitive)
        #[arg(value_name = "NAME")]
        name: String,

        /// Comma-separated chapters studied in rotation
        #[arg(short, long, value_name = "LIST", default_value = "")]
        chapters: String,

        /// Difficulty from 1 (easy) to 10 (hard)
        #[arg(short, long, value_name = "1-10")]
        difficulty: u8,

        /// Deadline (YYYY-MM-DD)
        #[arg(short, long, value_name = "DATE")]
        target_date: NaiveDate,

        /// Estimated hours of work (defaults to 10)
        #[arg(long, value_name = "HOURS")]
        hours_needed: Option<f64>,
    },
    /// List saved subjects.
    List,
    /// Remove a saved subject by name (case-insensitive).
    Remove {
        /// Subject name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Remove all saved subjects.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum PlansSubcommand {
    /// List saved plans, newest first.
    List,
    /// Show a saved plan.
    Show {
        /// Plan id
        #[arg(value_name = "ID")]
        id: u64,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,

        /// Write a report in the given format (markdown, html)
        #[arg(long, value_name = "FORMAT")]
        report: Option<ReportFormat>,

        /// Report output path (defaults to config `reports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Delete a saved plan.
    Delete {
        /// Plan id
        #[arg(value_name = "ID")]
        id: u64,
    },
}

/// Options for the `generate` command
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GenerateArgs {
    /// Subject file (.toml or .json); the saved subject list is used when omitted
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Daily study budget in hours (overrides the file and config)
    #[arg(long, value_name = "HOURS")]
    pub hours_per_day: Option<f64>,

    /// Reference date the plan starts on (YYYY-MM-DD, defaults to today)
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Horizon policy: shared or per-subject
    #[arg(long, value_name = "POLICY")]
    pub horizon: Option<HorizonPolicy>,

    /// Write a report in the given format (markdown, html)
    #[arg(long, value_name = "FORMAT")]
    pub report: Option<ReportFormat>,

    /// Report output path (defaults to config `reports_dir`)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Save the plan to the store
    #[arg(long)]
    pub save: bool,

    /// Print the plan as JSON instead of the text summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Manage the saved subject list.
    ///
    /// If no subcommand is provided, lists saved subjects.
    Subjects {
        #[command(subcommand)]
        subcommand: Option<SubjectsSubcommand>,
    },
    /// Generate a study plan.
    ///
    /// Spreads study sessions over the days before the nearest deadline, weighted
    /// by difficulty and estimated hours.
    Generate(GenerateArgs),
    /// Manage saved plans.
    ///
    /// If no subcommand is provided, lists saved plans.
    Plans {
        #[command(subcommand)]
        subcommand: Option<PlansSubcommand>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "studysync",
    about = "StudySync study plan generator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config store file
    #[arg(long = "config-store-file", value_name = "PATH")]
    pub config_store_file: Option<PathBuf>,

    /// Override config store file (short form)
    #[arg(long = "store-file", value_name = "PATH")]
    pub store_file: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Transforms CLI arguments into a `ConfigOverrides` struct that can be applied to
    /// the loaded configuration. Short-form flags (e.g., `--store-file`) take precedence
    /// over long-form flags (e.g., `--config-store-file`) when both are provided.
    /// `generate --hours-per-day` and `--horizon` also override the planner section.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let (hours_per_day, horizon) = match &self.command {
            Command::Generate(args) => (args.hours_per_day, args.horizon.map(|h| h.to_string())),
            _ => (None, None),
        };

        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            hours_per_day,
            horizon,
            store_file: path_string(self.store_file.as_ref())
                .or_else(|| path_string(self.config_store_file.as_ref())),
            reports_dir: path_string(self.reports_dir.as_ref())
                .or_else(|| path_string(self.config_reports_dir.as_ref())),
        }
    }
}
