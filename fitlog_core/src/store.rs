//! Entry store contract and the in-memory adapter.
//!
//! The core only needs a handful of queries from whatever persists entries.
//! Range queries are inclusive of `start` and exclusive of `end`, and return
//! entries in insertion order. The aggregate queries have default
//! implementations in terms of `find_by_owner_and_range`; adapters with a real
//! query engine can override them.

use crate::{CategoryBucket, Result, WorkoutEntry};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Storage adapter for workout entries
pub trait EntryStore {
    /// Check whether `owner` is known to the store
    fn owner_exists(&self, owner: &str) -> Result<bool>;

    /// Make `owner` known to the store
    fn register_owner(&mut self, owner: &str) -> Result<()>;

    /// Persist every entry or none of them
    fn insert_all(&mut self, entries: &[WorkoutEntry]) -> Result<()>;

    fn find_by_owner_and_range(
        &self,
        owner: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutEntry>>;

    fn count_by_owner_and_range(
        &self,
        owner: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64> {
        Ok(self.find_by_owner_and_range(owner, start, end)?.len() as u64)
    }

    fn sum_calories_by_owner_and_range(
        &self,
        owner: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64> {
        let entries = self.find_by_owner_and_range(owner, start, end)?;
        Ok(entries.iter().map(|e| e.calories_burned).sum())
    }

    /// Sum calories per category, ordered by each category's first occurrence
    fn sum_calories_grouped_by_category(
        &self,
        owner: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CategoryBucket>> {
        let entries = self.find_by_owner_and_range(owner, start, end)?;
        Ok(group_by_category(&entries))
    }
}

/// Group entries by category, keeping first-occurrence order
pub fn group_by_category(entries: &[WorkoutEntry]) -> Vec<CategoryBucket> {
    let mut buckets: Vec<CategoryBucket> = Vec::new();
    for entry in entries {
        match buckets.iter_mut().find(|b| b.category == entry.category) {
            Some(bucket) => bucket.total_calories += entry.calories_burned,
            None => buckets.push(CategoryBucket {
                category: entry.category.clone(),
                total_calories: entry.calories_burned,
            }),
        }
    }
    buckets
}

/// Vec-backed store kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    owners: HashSet<String>,
    entries: Vec<WorkoutEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already knows `owner`
    pub fn with_owner(owner: &str) -> Self {
        let mut store = Self::default();
        store.owners.insert(owner.to_string());
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntryStore for MemoryStore {
    fn owner_exists(&self, owner: &str) -> Result<bool> {
        Ok(self.owners.contains(owner))
    }

    fn register_owner(&mut self, owner: &str) -> Result<()> {
        self.owners.insert(owner.to_string());
        Ok(())
    }

    fn insert_all(&mut self, entries: &[WorkoutEntry]) -> Result<()> {
        self.entries.extend_from_slice(entries);
        tracing::debug!("Stored {} entries in memory", entries.len());
        Ok(())
    }

    fn find_by_owner_and_range(
        &self,
        owner: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.matches(owner, start, end))
            .cloned()
            .collect())
    }
}
