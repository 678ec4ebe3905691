//! Durable storage for the task collection.
//!
//! The collection is kept as a single JSON array under one named entry. Every
//! save replaces the whole entry; loads never fail and fall back to an empty
//! collection when the entry is missing or unreadable.

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::StorageError;
use crate::task::Task;

/// Name of the entry holding the serialized collection.
pub const STORAGE_KEY: &str = "todos";

/// A durable key-value entry holding the full task collection.
pub trait TaskStorage {
    /// Read the stored collection, or an empty one if none can be read.
    fn load(&self) -> Vec<Task>;

    /// Replace the stored collection.
    fn save(&self, tasks: &[Task]) -> Result<(), StorageError>;
}

/// Decode a stored entry. `null`, malformed JSON and shape mismatches all
/// degrade to an empty collection.
fn decode(raw: &str, origin: &str) -> Vec<Task> {
    match serde_json::from_str::<Option<Vec<Task>>>(raw) {
        Ok(tasks) => tasks.unwrap_or_default(),
        Err(e) => {
            warn!("Error parsing {origin}, starting fresh: {e}");
            Vec::new()
        }
    }
}

/// JSON file backend. Writes go through a temp file and a rename so a crash
/// never leaves a half-written entry behind.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Use an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use the default entry file inside a data directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{STORAGE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStorage for JsonFileStorage {
    fn load(&self) -> Vec<Task> {
        if !self.path.exists() {
            return Vec::new();
        }
        match fs::read_to_string(&self.path) {
            Ok(buf) => decode(&buf, &self.path.display().to_string()),
            Err(e) => {
                warn!("Error reading {}, starting fresh: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(tasks)?;
        let tmp = self.path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(&tmp, &self.path)?;
        debug!(count = tasks.len(), path = %self.path.display(), "saved tasks");
        Ok(())
    }
}

/// In-memory backend. Clones share the same entry, so a second store built
/// from a clone sees what the first one saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entry: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw stored value.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            entry: Rc::new(RefCell::new(Some(raw.into()))),
        }
    }

    /// The raw stored value, if anything was saved.
    pub fn raw(&self) -> Option<String> {
        self.entry.borrow().clone()
    }
}

impl TaskStorage for MemoryStorage {
    fn load(&self) -> Vec<Task> {
        match self.entry.borrow().as_deref() {
            Some(raw) => decode(raw, STORAGE_KEY),
            None => Vec::new(),
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let data = serde_json::to_string(tasks)?;
        *self.entry.borrow_mut() = Some(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<Task> {
        let mut done = Task::new(2, "Pay rent", "2024-03-01");
        done.completed = true;
        vec![done, Task::new(1, "Buy milk", "2024-01-01")]
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path());
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_file_save_then_load() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path());
        storage.save(&sample()).unwrap();

        assert!(storage.path().ends_with("todos.json"));
        assert!(!dir.path().join("todos.json.tmp").exists());
        assert_eq!(storage.load(), sample());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/deeper/tasks.json"));
        storage.save(&sample()).unwrap();
        assert_eq!(storage.load().len(), 2);
    }

    #[test]
    fn test_save_replaces_whole_entry() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path());
        storage.save(&sample()).unwrap();
        storage.save(&[]).unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::in_dir(dir.path());
        fs::write(storage.path(), "{not json").unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_shape_mismatch_loads_empty() {
        let storage = MemoryStorage::with_raw(r#"{"tasks": []}"#);
        assert!(storage.load().is_empty());

        let storage = MemoryStorage::with_raw(r#"[{"id": "x", "text": 1}]"#);
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_null_entry_loads_empty() {
        let storage = MemoryStorage::with_raw("null");
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_memory_clones_share_entry() {
        let storage = MemoryStorage::new();
        assert!(storage.raw().is_none());

        let other = storage.clone();
        storage.save(&sample()).unwrap();
        assert_eq!(other.load(), sample());
    }
}
