//! Typed records kept in a [`Store`]

use super::Store;
use crate::core::error::StoreError;
use crate::core::models::{GeneratedPlan, Subject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key holding the current subject list
pub const SUBJECTS_KEY: &str = "studysync_subjects";

/// Key holding saved plans
pub const PLANS_KEY: &str = "studysync_plans";

/// A generated plan saved together with the inputs that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    /// Identifier assigned on save (starts at 1)
    pub id: u64,
    /// When the plan was saved
    pub created_at: DateTime<Utc>,
    /// Daily budget used
    pub available_hours_per_day: f64,
    /// Subjects used
    pub subjects: Vec<Subject>,
    /// The generated plan
    pub plan: GeneratedPlan,
}

impl PlanRecord {
    /// Create an unsaved record (id 0) stamped with the current time
    #[must_use]
    pub fn new(available_hours_per_day: f64, subjects: Vec<Subject>, plan: GeneratedPlan) -> Self {
        Self {
            id: 0,
            created_at: Utc::now(),
            available_hours_per_day,
            subjects,
            plan,
        }
    }
}

fn read_list<T, S>(store: &S, key: &str) -> Result<Vec<T>, StoreError>
where
    T: for<'de> Deserialize<'de>,
    S: Store + ?Sized,
{
    match store.get(key)? {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

fn write_list<T, S>(store: &mut S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: Store + ?Sized,
{
    store.set(key, serde_json::to_value(items)?)
}

/// Load the saved subject list (empty if none)
///
/// # Errors
/// Returns an error if the store cannot be read or holds malformed data.
pub fn load_subjects<S: Store + ?Sized>(store: &S) -> Result<Vec<Subject>, StoreError> {
    read_list(store, SUBJECTS_KEY)
}

/// Replace the saved subject list
///
/// # Errors
/// Returns an error if the store cannot be written.
pub fn save_subjects<S: Store + ?Sized>(
    store: &mut S,
    subjects: &[Subject],
) -> Result<(), StoreError> {
    write_list(store, SUBJECTS_KEY, subjects)
}

/// Save a plan, assigning the next free id. Returns the stored record.
///
/// # Errors
/// Returns an error if the store cannot be read or written.
pub fn save_plan<S: Store + ?Sized>(
    store: &mut S,
    mut record: PlanRecord,
) -> Result<PlanRecord, StoreError> {
    let mut plans: Vec<PlanRecord> = read_list(store, PLANS_KEY)?;
    record.id = plans.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    plans.push(record.clone());
    write_list(store, PLANS_KEY, &plans)?;
    Ok(record)
}

/// All saved plans, newest first
///
/// # Errors
/// Returns an error if the store cannot be read or holds malformed data.
pub fn list_plans<S: Store + ?Sized>(store: &S) -> Result<Vec<PlanRecord>, StoreError> {
    let mut plans: Vec<PlanRecord> = read_list(store, PLANS_KEY)?;
    plans.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Ok(plans)
}

/// Saved plan with the given id
///
/// # Errors
/// Returns an error if the store cannot be read or holds malformed data.
pub fn get_plan<S: Store + ?Sized>(store: &S, id: u64) -> Result<Option<PlanRecord>, StoreError> {
    let plans: Vec<PlanRecord> = read_list(store, PLANS_KEY)?;
    Ok(plans.into_iter().find(|p| p.id == id))
}

/// Delete the saved plan with the given id. Returns `true` if it existed.
///
/// # Errors
/// Returns an error if the store cannot be read or written.
pub fn delete_plan<S: Store + ?Sized>(store: &mut S, id: u64) -> Result<bool, StoreError> {
    let mut plans: Vec<PlanRecord> = read_list(store, PLANS_KEY)?;
    let before = plans.len();
    plans.retain(|p| p.id != id);
    if plans.len() == before {
        return Ok(false);
    }
    write_list(store, PLANS_KEY, &plans)?;
    Ok(true)
}
