//! CLI command handlers for `StudySync`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod config;
pub mod generate;
pub mod plans;
pub mod subjects;

use study_sync::config::Config;
use study_sync::core::store::FileStore;

/// Store configured in `paths.store_file`
pub fn open_store(config: &Config) -> FileStore {
    FileStore::new(&config.paths.store_file)
}
