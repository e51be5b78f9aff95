use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[cfg(test)]
use std::collections::BTreeMap;
#[cfg(test)]
use std::sync::RwLock;

use crate::input::parse_record;
use crate::point::PointSet;

/// Where input records come from
pub trait Storage {
    fn read(&self, key: &str) -> Result<Vec<u8>>;
    /// Record keys ending in `.json`, sorted.
    fn list(&self) -> Result<Vec<String>>;
    fn exists(&self, key: &str) -> bool;
}

/// In-memory storage for testing
#[cfg(test)]
pub struct MemoryStorage {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn insert(&self, key: &str, data: &[u8]) {
        let mut storage = self.data.write().unwrap();
        storage.insert(key.to_string(), data.to_vec());
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Vec<u8>> {
        let data = self.data.read().unwrap();
        data.get(key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Key not found: {}", key))
    }

    fn list(&self) -> Result<Vec<String>> {
        let data = self.data.read().unwrap();
        Ok(data.keys().filter(|k| k.ends_with(".json")).cloned().collect())
    }

    fn exists(&self, key: &str) -> bool {
        let data = self.data.read().unwrap();
        data.contains_key(key)
    }
}

/// Directory of record files for the CLI
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let path = base_dir.as_ref().to_path_buf();
        if !path.is_dir() {
            anyhow::bail!("Record directory {} does not exist", path.display());
        }
        Ok(Self { base_dir: path })
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.base_dir.join(key);
        std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(".json") {
                    keys.push(name.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn exists(&self, key: &str) -> bool {
        self.base_dir.join(key).exists()
    }
}

/// Reads and parses one record.
pub fn load_record(storage: &dyn Storage, key: &str) -> Result<PointSet> {
    let bytes = storage.read(key)?;
    let text = String::from_utf8(bytes).with_context(|| format!("{} is not UTF-8", key))?;
    parse_record(&text).with_context(|| format!("Invalid record {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{ "keys": { "n": 2, "k": 2 },
        "1": { "base": "10", "value": "3" },
        "2": { "base": "10", "value": "5" } }"#;

    #[test]
    fn test_memory_storage_discovery() {
        let storage = MemoryStorage::new();
        storage.insert("b.json", RECORD.as_bytes());
        storage.insert("a.json", RECORD.as_bytes());
        storage.insert("notes.txt", b"ignored");

        assert_eq!(storage.list().unwrap(), vec!["a.json", "b.json"]);
        assert!(storage.exists("notes.txt"));

        let set = load_record(&storage, "a.json").unwrap();
        assert_eq!(set.n(), 2);
    }

    #[test]
    fn test_load_missing_record() {
        let storage = MemoryStorage::new();
        assert!(load_record(&storage, "missing.json").is_err());
    }

    #[test]
    fn test_file_storage_lists_json_files() {
        let dir = std::env::temp_dir().join(format!("polysecret_storage_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("case2.json"), RECORD).unwrap();
        std::fs::write(dir.join("case1.json"), RECORD).unwrap();
        std::fs::write(dir.join("readme.md"), "x").unwrap();

        let storage = FileStorage::new(&dir).unwrap();
        assert_eq!(storage.list().unwrap(), vec!["case1.json", "case2.json"]);
        assert!(load_record(&storage, "case1.json").is_ok());

        let _ = std::fs::remove_dir_all(&dir);
        assert!(FileStorage::new(&dir).is_err());
    }
}
