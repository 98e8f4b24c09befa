//! Key/value storage behind the session record.
//!
//! - [`MemoryStore`] keeps values in a map (tests, ephemeral sessions)
//! - [`FileStore`] persists a JSON object on disk with atomic saves and an
//!   advisory lock (native only)
//!
//! The GUI provides a browser `localStorage` implementation on wasm32.

use std::collections::HashMap;

use crate::errors::CalcResult;

/// String values by key, the shape of browser local storage
pub trait SessionStore {
    /// `None` when the key is absent
    fn get(&self, key: &str) -> CalcResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> CalcResult<()>;

    /// Removing an absent key is not an error
    fn remove(&mut self, key: &str) -> CalcResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> CalcResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CalcResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CalcResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::BTreeMap;
    use std::fs::{self, File, OpenOptions};
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use fs2::FileExt;

    use super::SessionStore;
    use crate::errors::{CalcError, CalcResult};

    /// JSON object file, one entry per key.
    ///
    /// Writes go through `<file>.tmp` then a rename, under an exclusive
    /// lock held on `<file>.lock`.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> CalcResult<BTreeMap<String, String>> {
            if !self.path.exists() {
                return Ok(BTreeMap::new());
            }
            let contents = fs::read_to_string(&self.path)
                .map_err(|e| CalcError::file_error("read", self.path.display().to_string(), e.to_string()))?;
            if contents.trim().is_empty() {
                return Ok(BTreeMap::new());
            }
            serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid JSON in {}: {}", self.path.display(), e),
            })
        }

        fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> CalcResult<()> {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    CalcError::file_error("create directory", parent.display().to_string(), e.to_string())
                })?;
            }
            let _lock = StoreLock::acquire(&self.path)?;
            // A corrupt file is replaced rather than kept
            let mut values = self.read_all().unwrap_or_default();
            change(&mut values);
            write_atomic(&self.path, &serde_json::to_string_pretty(&values)?)
        }
    }

    impl SessionStore for FileStore {
        fn get(&self, key: &str) -> CalcResult<Option<String>> {
            Ok(self.read_all()?.remove(key))
        }

        fn set(&mut self, key: &str, value: &str) -> CalcResult<()> {
            self.update(|values| {
                values.insert(key.to_string(), value.to_string());
            })
        }

        fn remove(&mut self, key: &str) -> CalcResult<()> {
            if !self.path.exists() {
                return Ok(());
            }
            self.update(|values| {
                values.remove(key);
            })
        }
    }

    /// OS-level exclusive lock, released when dropped
    struct StoreLock {
        _file: File,
    }

    impl StoreLock {
        fn acquire(path: &Path) -> CalcResult<Self> {
            let lock_path = sibling(path, "lock");
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(&lock_path)
                .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;
            file.try_lock_exclusive()
                .map_err(|_| CalcError::file_locked(path.display().to_string()))?;
            Ok(Self { _file: file })
        }
    }

    /// `session.json` -> `session.json.<suffix>`
    fn sibling(path: &Path, suffix: &str) -> PathBuf {
        let mut sibling = path.to_path_buf();
        let extension = sibling
            .extension()
            .map(|e| format!("{}.{}", e.to_string_lossy(), suffix))
            .unwrap_or_else(|| suffix.to_string());
        sibling.set_extension(extension);
        sibling
    }

    fn write_atomic(path: &Path, contents: &str) -> CalcResult<()> {
        let tmp_path = sibling(path, "tmp");

        let mut tmp_file = File::create(&tmp_path).map_err(|e| {
            CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
        })?;
        tmp_file.write_all(contents.as_bytes()).map_err(|e| {
            CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
        })?;
        tmp_file.sync_all().map_err(|e| {
            CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
        })?;

        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_sibling_paths() {
            let path = Path::new("/data/mixte/session.json");
            assert_eq!(sibling(path, "lock"), Path::new("/data/mixte/session.json.lock"));
            assert_eq!(sibling(Path::new("/data/session"), "tmp"), Path::new("/data/session.tmp"));
        }

        #[test]
        fn test_set_get_remove() {
            let dir = tempfile::tempdir().unwrap();
            let mut store = FileStore::new(dir.path().join("nested").join("session.json"));

            assert_eq!(store.get("cm_session").unwrap(), None);
            store.set("cm_session", "{\"a\":1}").unwrap();
            store.set("other", "x").unwrap();
            assert_eq!(store.get("cm_session").unwrap().as_deref(), Some("{\"a\":1}"));

            store.remove("cm_session").unwrap();
            assert_eq!(store.get("cm_session").unwrap(), None);
            assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));
        }

        #[test]
        fn test_atomic_save_leaves_no_tmp_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("session.json");
            let mut store = FileStore::new(&path);
            store.set("k", "v").unwrap();
            assert!(path.exists());
            assert!(!sibling(&path, "tmp").exists());
        }

        #[test]
        fn test_values_survive_a_new_handle() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("session.json");
            FileStore::new(&path).set("k", "v").unwrap();
            assert_eq!(FileStore::new(&path).get("k").unwrap().as_deref(), Some("v"));
        }

        #[test]
        fn test_corrupt_file_reads_as_error_and_is_replaced() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("session.json");
            fs::write(&path, "not json").unwrap();
            let mut store = FileStore::new(&path);
            assert_eq!(store.get("k").unwrap_err().error_code(), "SERIALIZATION_ERROR");
            store.set("k", "v").unwrap();
            assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        }

        #[test]
        fn test_lock_is_exclusive() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("session.json");
            let held = StoreLock::acquire(&path).unwrap();
            let err = FileStore::new(&path).set("k", "v").unwrap_err();
            assert_eq!(err.error_code(), "FILE_LOCKED");
            drop(held);
            assert!(FileStore::new(&path).set("k", "v").is_ok());
        }

        #[test]
        fn test_remove_on_missing_file_is_noop() {
            let dir = tempfile::tempdir().unwrap();
            let mut store = FileStore::new(dir.path().join("session.json"));
            store.remove("cm_session").unwrap();
            assert!(!store.path().exists());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
