//! Key-value JSON persistence
//!
//! Subjects and saved plans live under fixed keys in a [`Store`]. The planner never
//! touches a store; callers load inputs from it and save results back.

pub mod file;
pub mod records;

use crate::core::error::StoreError;
use serde_json::Value;
use std::collections::HashMap;

pub use file::FileStore;
pub use records::{
    delete_plan, get_plan, list_plans, load_subjects, save_plan, save_subjects, PlanRecord,
    PLANS_KEY, SUBJECTS_KEY,
};

/// Minimal key-value store holding JSON values
pub trait Store {
    /// Value stored under `key`, if any
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove `key`. Returns `true` if it was present.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<bool, StoreError>;
}

/// In-memory store, mainly for tests and one-shot runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys stored
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.remove(key).is_some())
    }
}
