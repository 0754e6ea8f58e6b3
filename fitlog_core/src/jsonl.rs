//! File-backed entry store.
//!
//! Entries are appended to a JSONL (JSON Lines) file under the data directory
//! with file locking so concurrent processes never interleave a batch. Known
//! owners live in a small JSON file that is replaced atomically.

use crate::store::EntryStore;
use crate::{Error, Result, WorkoutEntry};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const ENTRIES_FILE: &str = "entries.jsonl";
const OWNERS_FILE: &str = "owners.json";

/// JSONL-based entry store rooted at a data directory
#[derive(Clone, Debug)]
pub struct JsonlStore {
    dir: PathBuf,
}

impl JsonlStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn entries_path(&self) -> PathBuf {
        self.dir.join(ENTRIES_FILE)
    }

    pub fn owners_path(&self) -> PathBuf {
        self.dir.join(OWNERS_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Append a whole batch with one write under an exclusive lock
    fn append_batch(&self, entries: &[WorkoutEntry]) -> Result<()> {
        // Serialize everything up front so a bad entry writes nothing
        let mut buf = String::new();
        for entry in entries {
            buf.push_str(&serde_json::to_string(entry)?);
            buf.push('\n');
        }

        self.ensure_dir()?;
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(self.entries_path())?;

        file.lock_exclusive()?;
        let written = append_locked(&file, buf);
        file.unlock()?;
        written?;

        tracing::debug!("Appended {} entries to {:?}", entries.len(), self.entries_path());
        Ok(())
    }

    fn read_entries(&self) -> Result<Vec<WorkoutEntry>> {
        let path = self.entries_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        file.lock_shared()?;

        let reader = BufReader::new(&file);
        let mut entries = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<WorkoutEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry at line {}: {}", line_num + 1, e);
                }
            }
        }

        file.unlock()?;
        tracing::debug!("Read {} entries from {:?}", entries.len(), path);
        Ok(entries)
    }

    fn read_owners(&self) -> Result<BTreeSet<String>> {
        let path = self.owners_path();
        if !path.exists() {
            return Ok(BTreeSet::new());
        }

        let file = File::open(&path)?;
        file.lock_shared()?;
        let mut contents = String::new();
        let read = BufReader::new(&file).read_to_string(&mut contents);
        file.unlock()?;
        read?;

        Ok(serde_json::from_str(&contents)?)
    }

    /// Atomically replace the owners file via a temp file and rename
    fn write_owners(&self, owners: &BTreeSet<String>) -> Result<()> {
        self.ensure_dir()?;

        let temp = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, owners)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(self.owners_path()).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} owners to {:?}", owners.len(), self.owners_path());
        Ok(())
    }
}

/// Append `buf` to a locked file, leaving the file unchanged on failure
///
/// A file that ends in a torn line from an interrupted write gets a newline
/// first, so the new batch starts on a line of its own.
fn append_locked(file: &File, mut buf: String) -> std::io::Result<()> {
    let len = file.metadata()?.len();
    if len > 0 && last_byte(file, len)? != b'\n' {
        tracing::warn!("Entries file ends in a partial line, starting batch on a new line");
        buf.insert(0, '\n');
    }

    let written = write_and_sync(file, buf.as_bytes());
    if written.is_err() {
        file.set_len(len)?;
        file.sync_all()?;
    }
    written
}

fn last_byte(mut file: &File, len: u64) -> std::io::Result<u8> {
    let mut byte = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut byte)?;
    Ok(byte[0])
}

fn write_and_sync(mut file: &File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_all()
}

impl EntryStore for JsonlStore {
    fn owner_exists(&self, owner: &str) -> Result<bool> {
        let owners = self.read_owners().map_err(Error::store)?;
        Ok(owners.contains(owner))
    }

    fn register_owner(&mut self, owner: &str) -> Result<()> {
        let mut owners = self.read_owners().map_err(Error::store)?;
        if owners.insert(owner.to_string()) {
            self.write_owners(&owners).map_err(Error::store)?;
            tracing::info!("Registered owner {}", owner);
        }
        Ok(())
    }

    fn insert_all(&mut self, entries: &[WorkoutEntry]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        self.append_batch(entries).map_err(Error::store)
    }

    fn find_by_owner_and_range(
        &self,
        owner: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutEntry>> {
        let entries = self.read_entries().map_err(Error::store)?;
        Ok(entries
            .into_iter()
            .filter(|e| e.matches(owner, start, end))
            .collect())
    }
}

/// Open a store rooted at `dir`, creating the directory if needed
pub fn open(dir: &Path) -> Result<JsonlStore> {
    let store = JsonlStore::new(dir);
    store.ensure_dir().map_err(Error::store)?;
    Ok(store)
}
