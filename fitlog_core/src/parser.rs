//! Parser for the semicolon-delimited workout log format.
//!
//! A log is a list of blocks separated by `;`. Each block is five lines, each
//! starting with `#`, in fixed order:
//!
//! ```text
//! #Legs
//! #Squat
//! #3sets10reps
//! #60kg
//! #15min
//! ```
//!
//! Blocks are numbered from 1 by their position among all `;`-separated
//! segments, and errors carry that number. Parsing is fail-fast: the first bad
//! block aborts the whole log.

use crate::error::Field;
use crate::{Error, ParsedEntry, Result};

const LINES_PER_BLOCK: usize = 5;

/// Parse a raw log into entries
///
/// Returns `Error::EmptyInput` if the log holds no blocks at all.
pub fn parse(raw: &str) -> Result<Vec<ParsedEntry>> {
    let mut entries = Vec::new();

    for (index, segment) in raw.trim().split(';').enumerate() {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let block = Block::split(segment, index + 1)?;
        entries.push(block.into_entry()?);
    }

    if entries.is_empty() {
        return Err(Error::EmptyInput);
    }

    tracing::debug!("Parsed {} workout blocks", entries.len());
    Ok(entries)
}

/// One block split into its positional lines, `#` markers removed
#[derive(Debug)]
struct Block<'a> {
    ordinal: usize,
    category: &'a str,
    name: &'a str,
    sets_reps: &'a str,
    weight: &'a str,
    duration: &'a str,
}

impl<'a> Block<'a> {
    fn split(segment: &'a str, ordinal: usize) -> Result<Self> {
        if !segment.starts_with('#') {
            return Err(malformed(ordinal, "block must start with '#'"));
        }

        let lines: Vec<&str> = segment
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.strip_prefix('#').unwrap_or(line).trim())
            .collect();

        if lines.len() < LINES_PER_BLOCK {
            return Err(malformed(
                ordinal,
                format!("expected {} lines, found {}", LINES_PER_BLOCK, lines.len()),
            ));
        }
        if lines.len() > LINES_PER_BLOCK {
            tracing::warn!(
                "Workout {} has {} lines, ignoring everything after line {}",
                ordinal,
                lines.len(),
                LINES_PER_BLOCK
            );
        }

        Ok(Block {
            ordinal,
            category: lines[0],
            name: lines[1],
            sets_reps: lines[2],
            weight: lines[3],
            duration: lines[4],
        })
    }

    fn into_entry(self) -> Result<ParsedEntry> {
        if self.category.is_empty() {
            return Err(malformed(self.ordinal, "category is empty"));
        }
        if self.name.is_empty() {
            return Err(malformed(self.ordinal, "exercise name is empty"));
        }

        let (sets_text, rest) = self.before(self.sets_reps, "sets")?;
        let (reps_text, _) = self.before(rest, "reps")?;
        let sets = self.positive(sets_text, Field::Sets)?;
        let reps = self.positive(reps_text, Field::Reps)?;

        let (weight_text, _) = self.before(self.weight, "kg")?;
        let (duration_text, _) = self.before(self.duration, "min")?;
        let weight_kg = self.finite(weight_text, Field::Weight)?;
        let duration_min = self.finite(duration_text, Field::Duration)?;

        Ok(ParsedEntry {
            category: self.category.to_string(),
            name: self.name.to_string(),
            sets,
            reps,
            weight_kg,
            duration_min,
        })
    }

    /// Split `text` at the first `unit`, returning what precedes and follows it
    fn before(&self, text: &'a str, unit: &str) -> Result<(&'a str, &'a str)> {
        text.split_once(unit)
            .ok_or_else(|| malformed(self.ordinal, format!("missing '{}' in '{}'", unit, text)))
    }

    fn positive(&self, text: &str, field: Field) -> Result<u32> {
        text.trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(Error::InvalidNumeric {
                ordinal: self.ordinal,
                field,
            })
    }

    fn finite(&self, text: &str, field: Field) -> Result<f64> {
        text.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or(Error::InvalidNumeric {
                ordinal: self.ordinal,
                field,
            })
    }
}

fn malformed(ordinal: usize, reason: impl Into<String>) -> Error {
    Error::MalformedBlock {
        ordinal,
        reason: reason.into(),
    }
}
