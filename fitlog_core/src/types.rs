//! Core domain types for the fitlog system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Parsed and stored workout entries
//! - Aggregation buckets (per day, per category)
//! - Result shapes handed to presentation

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Entry Types
// ============================================================================

/// A workout block as read from the log, before calories are derived
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEntry {
    pub category: String,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight_kg: f64,
    pub duration_min: f64,
}

/// A stored workout record
///
/// `calories_burned` is always derived from the weight and duration when the
/// entry is created; there is no way to supply it from outside.
///
/// Older entry files used snake_case keys; those still deserialize.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    pub id: Uuid,
    #[serde(alias = "owner_id")]
    pub owner_id: String,
    pub category: String,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(alias = "weight_kg")]
    pub weight_kg: f64,
    #[serde(alias = "duration_min")]
    pub duration_min: f64,
    #[serde(alias = "calories_burned")]
    pub calories_burned: i64,
    #[serde(alias = "occurred_at")]
    pub occurred_at: DateTime<Utc>,
}

impl WorkoutEntry {
    /// Build a stored entry from a parsed block, computing its calories
    pub fn from_parsed(parsed: ParsedEntry, owner_id: &str, occurred_at: DateTime<Utc>) -> Self {
        let calories_burned = crate::calories::estimate(parsed.weight_kg, parsed.duration_min);
        WorkoutEntry {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            category: parsed.category,
            name: parsed.name,
            sets: parsed.sets,
            reps: parsed.reps,
            weight_kg: parsed.weight_kg,
            duration_min: parsed.duration_min,
            calories_burned,
            occurred_at,
        }
    }

    /// Check whether this entry belongs to `owner` and falls in `[start, end)`
    pub fn matches(&self, owner: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.owner_id == owner && self.occurred_at >= start && self.occurred_at < end
    }
}

// ============================================================================
// Aggregation Buckets
// ============================================================================

/// Calories accumulated over one calendar day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub total_calories: i64,
}

/// Calories accumulated for one category
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryBucket {
    pub category: String,
    pub total_calories: i64,
}

// ============================================================================
// Result Shapes
// ============================================================================

/// Outcome of a successful log submission
#[derive(Clone, Debug, Serialize)]
pub struct Submission {
    pub success: bool,
    pub message: String,
    pub workouts: Vec<ParsedEntry>,
}

/// Entries recorded on one day and their calorie total
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayListing {
    pub todays_workouts: Vec<WorkoutEntry>,
    pub total_calories_burnt: i64,
}

/// Rolling seven-day calorie series, oldest first
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySeries {
    pub weeks: Vec<String>,
    pub calories_burned: Vec<i64>,
}

/// One slice of the category breakdown
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PieSlice {
    pub id: usize,
    pub value: i64,
    pub label: String,
}

/// Dashboard summary for today
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_calories_burnt: i64,
    pub total_workouts: u64,
    pub avg_calories_burnt_per_workout: f64,
    pub total_weeks_calories_burnt: WeeklySeries,
    pub pie_chart_data: Vec<PieSlice>,
}
