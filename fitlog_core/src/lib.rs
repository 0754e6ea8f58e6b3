#![forbid(unsafe_code)]

//! Core domain model and business logic for fitlog.
//!
//! This crate provides:
//! - Domain types (parsed and stored workout entries, buckets, result shapes)
//! - The workout log parser and calorie estimator
//! - The entry store contract with in-memory and JSONL adapters
//! - The submission pipeline and day/week statistics
//! - CSV export, configuration and logging setup

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod parser;
pub mod calories;
pub mod store;
pub mod jsonl;
pub mod submit;
pub mod stats;
pub mod export;

// Re-export commonly used types
pub use error::{Error, ErrorReport, Field, Result, StatusKind};
pub use types::*;
pub use config::Config;
pub use parser::parse;
pub use calories::{estimate, KCAL_PER_MIN_PER_KG};
pub use store::{EntryStore, MemoryStore};
pub use jsonl::JsonlStore;
pub use submit::submit;
pub use stats::StatsAggregator;
pub use export::{export_range, write_entries_csv};
