//! CSV export of stored entries.

use crate::store::EntryStore;
use crate::{Result, WorkoutEntry};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    id: String,
    owner_id: &'a str,
    category: &'a str,
    name: &'a str,
    sets: u32,
    reps: u32,
    weight_kg: f64,
    duration_min: f64,
    calories_burned: i64,
    occurred_at: String,
}

impl<'a> From<&'a WorkoutEntry> for CsvRow<'a> {
    fn from(entry: &'a WorkoutEntry) -> Self {
        CsvRow {
            id: entry.id.to_string(),
            owner_id: &entry.owner_id,
            category: &entry.category,
            name: &entry.name,
            sets: entry.sets,
            reps: entry.reps,
            weight_kg: entry.weight_kg,
            duration_min: entry.duration_min,
            calories_burned: entry.calories_burned,
            occurred_at: entry.occurred_at.to_rfc3339(),
        }
    }
}

/// Write entries as CSV with a header row
pub fn write_entries_csv<W: Write>(entries: &[WorkoutEntry], writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for entry in entries {
        writer.serialize(CsvRow::from(entry))?;
    }

    writer.flush()?;
    Ok(())
}

/// Export `owner`'s entries in `[start, end)` to a CSV file at `path`
///
/// The file is replaced if it exists. Returns the number of rows written.
pub fn export_range<S: EntryStore>(
    store: &S,
    owner: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    path: &Path,
) -> Result<usize> {
    let entries = store.find_by_owner_and_range(owner, start, end)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_entries_csv(&entries, &file)?;
    file.sync_all()?;

    tracing::info!("Exported {} entries to {:?}", entries.len(), path);
    Ok(entries.len())
}
