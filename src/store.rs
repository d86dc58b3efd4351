//! Durable key-value storage for the best score.
//!
//! Values are strings under fixed keys, like a browser's local storage. The
//! file-backed store keeps the whole map in one pretty-printed JSON file.

use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key the best score lives under.
pub const BEST_SCORE_KEY: &str = "dino_sura_best";

pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Read the best score. Missing or malformed values count as 0.
pub fn load_best(store: &dyn ScoreStore) -> u32 {
    match store.get(BEST_SCORE_KEY) {
        None => 0,
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(best) => best,
            Err(_) => {
                log::warn!("ignoring malformed best score {:?}", raw);
                0
            }
        },
    }
}

pub fn save_best(store: &mut dyn ScoreStore, best: u32) -> Result<()> {
    store.set(BEST_SCORE_KEY, &best.to_string())
}

/// In-memory store, for tests, the simulator and `--no-save`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as a JSON object of string values.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; a file
    /// that cannot be read or parsed is logged and treated as empty, and is
    /// replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("starting with an empty store, {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    match fs::read_to_string(path) {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(e.into()),
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "dino_sura_store_{}_{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_missing_best_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(load_best(&store), 0);
    }

    #[test]
    fn test_malformed_best_is_zero() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, "NaN").unwrap();
        assert_eq!(load_best(&store), 0);

        store.set(BEST_SCORE_KEY, "-3").unwrap();
        assert_eq!(load_best(&store), 0);
    }

    #[test]
    fn test_best_tolerates_whitespace() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, " 17\n").unwrap();
        assert_eq!(load_best(&store), 17);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path);
        assert_eq!(load_best(&store), 0);
        save_best(&mut store, 42).expect("save should succeed");

        let reopened = JsonFileStore::open(&path);
        assert_eq!(load_best(&reopened), 42);

        fs::remove_file(&path).expect("cleanup");
    }

    #[test]
    fn test_corrupt_file_opens_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert_eq!(load_best(&store), 0);

        // The next write replaces the corrupt file.
        save_best(&mut store, 5).unwrap();
        assert_eq!(load_best(&JsonFileStore::open(&path)), 5);

        fs::remove_file(&path).expect("cleanup");
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let path = temp_path("keys");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let mut store = JsonFileStore::open(&path);
        save_best(&mut store, 9).unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
        assert_eq!(load_best(&reopened), 9);

        fs::remove_file(&path).expect("cleanup");
    }
}
