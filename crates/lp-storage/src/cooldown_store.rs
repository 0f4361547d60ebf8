//! File system storage for comment cooldowns

use chrono::{DateTime, Utc};
use lp_core::comment::CooldownStore;
use lp_core::error::{LunchPickerError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

const COOLDOWN_FILE: &str = "cooldowns.json";

/// Cooldown deadlines persisted as one JSON object on disk
pub struct FileCooldownStore {
    /// Base directory for client state
    base_dir: PathBuf,
    /// Serializes read-modify-write cycles within the process
    lock: Mutex<()>,
}

impl FileCooldownStore {
    /// Create a new store rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            base_dir: base_dir.into(),
            lock: Mutex::new(()),
        };

        store.ensure_dirs()?;
        Ok(store)
    }

    /// Create storage with default directory (~/.lunch-picker)
    pub fn default_location() -> Result<Self> {
        let base_dir = directories::ProjectDirs::from("com", "lunch-picker", "lunch-picker")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".lunch-picker")
            });

        Self::new(base_dir)
    }

    /// Ensure required directories exist
    fn ensure_dirs(&self) -> Result<()> {
        if !self.base_dir.exists() {
            fs::create_dir_all(&self.base_dir).map_err(|e| {
                LunchPickerError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create storage directory: {}", e),
                ))
            })?;
            debug!("Created storage directory: {:?}", self.base_dir);
        }
        Ok(())
    }

    /// Path of the cooldown file
    pub fn file_path(&self) -> PathBuf {
        self.base_dir.join(COOLDOWN_FILE)
    }

    fn temp_path(&self) -> PathBuf {
        self.base_dir.join(format!(".{}.tmp", COOLDOWN_FILE))
    }

    /// Get base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn read_all(&self) -> Result<BTreeMap<String, DateTime<Utc>>> {
        let path = self.file_path();
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(LunchPickerError::Io(e)),
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(deadlines) => Ok(deadlines),
            Err(e) => {
                warn!("Ignoring unreadable cooldown file {:?}: {}", path, e);
                Ok(BTreeMap::new())
            }
        }
    }

    /// Write all deadlines atomically (write to temp, then rename)
    fn write_all(&self, deadlines: &BTreeMap<String, DateTime<Utc>>) -> Result<()> {
        let temp_path = self.temp_path();
        let final_path = self.file_path();

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            LunchPickerError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, deadlines)?;
        writer.flush()?;

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            LunchPickerError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Saved {} cooldowns to {:?}", deadlines.len(), final_path);
        Ok(())
    }
}

impl CooldownStore for FileCooldownStore {
    fn get(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.get(key).copied())
    }

    fn set(&self, key: &str, until: DateTime<Utc>) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now();
        let mut deadlines = self.read_all()?;
        deadlines.retain(|_, deadline| *deadline >= now);
        deadlines.insert(key.to_string(), until);
        self.write_all(&deadlines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use lp_core::comment::CommentCooldown;
    use tempfile::TempDir;

    fn create_test_store() -> (FileCooldownStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCooldownStore::new(temp_dir.path().join("state")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_store_creation() {
        let (store, _temp) = create_test_store();
        assert!(store.base_dir().exists());
        assert!(!store.file_path().exists());
    }

    #[test]
    fn test_get_missing_key() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.get("commentCooldown:p1").unwrap(), None);
    }

    #[test]
    fn test_set_and_get() {
        let (store, _temp) = create_test_store();
        let until = Utc::now() + Duration::seconds(20);

        store.set("commentCooldown:p1", until).unwrap();
        assert_eq!(store.get("commentCooldown:p1").unwrap(), Some(until));
        assert_eq!(store.get("commentCooldown:p2").unwrap(), None);
    }

    #[test]
    fn test_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let until = Utc::now() + Duration::seconds(20);

        FileCooldownStore::new(temp_dir.path())
            .unwrap()
            .set("commentCooldown:p1", until)
            .unwrap();

        let reopened = FileCooldownStore::new(temp_dir.path()).unwrap();
        assert_eq!(reopened.get("commentCooldown:p1").unwrap(), Some(until));
    }

    #[test]
    fn test_expired_entries_are_pruned_on_write() {
        let (store, _temp) = create_test_store();
        let past = Utc::now() - Duration::hours(1);
        store.set("commentCooldown:old", past).unwrap();
        store
            .set("commentCooldown:new", Utc::now() + Duration::seconds(20))
            .unwrap();

        assert_eq!(store.get("commentCooldown:old").unwrap(), None);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let (store, _temp) = create_test_store();
        store.set("commentCooldown:p1", Utc::now()).unwrap();

        assert!(!store.temp_path().exists());
        let content = fs::read_to_string(store.file_path()).unwrap();
        assert!(content.contains("commentCooldown:p1"));
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let (store, _temp) = create_test_store();
        fs::write(store.file_path(), "not json").unwrap();
        assert_eq!(store.get("commentCooldown:p1").unwrap(), None);
    }

    #[test]
    fn test_cooldown_over_file_store() {
        let (store, _temp) = create_test_store();
        let cooldown = CommentCooldown::new(store, Duration::seconds(20));
        let now = Utc::now();

        cooldown.record_submission("p1", now).unwrap();
        assert!(!cooldown.can_submit("p1", now + Duration::seconds(10)).unwrap());
        assert!(cooldown.can_submit("p1", now + Duration::seconds(21)).unwrap());
    }
}
