//! Submission pipeline: raw log text to persisted entries.
//!
//! A submission is all-or-nothing. The whole log is parsed before anything
//! touches the store, and the resulting batch goes to the store in a single
//! `insert_all` call.

use crate::store::EntryStore;
use crate::{parser, Result, Submission, WorkoutEntry};
use chrono::{DateTime, Utc};

/// Parse `raw`, derive calories, and store the batch for `owner`
///
/// `now` becomes the `occurred_at` of every entry. On a parse error nothing
/// is written and the error is returned as-is.
pub fn submit<S: EntryStore>(
    store: &mut S,
    owner: &str,
    raw: &str,
    now: DateTime<Utc>,
) -> Result<Submission> {
    let parsed = parser::parse(raw)?;

    let entries: Vec<WorkoutEntry> = parsed
        .iter()
        .cloned()
        .map(|p| WorkoutEntry::from_parsed(p, owner, now))
        .collect();

    store.insert_all(&entries)?;

    tracing::info!("Logged {} workouts for {}", entries.len(), owner);

    Ok(Submission {
        success: true,
        message: "Workouts added successfully".to_string(),
        workouts: parsed,
    })
}
