use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{validate_key, KeyValueStore, StorageError};

/// One file per slot: `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` for slot files. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match fs::read_to_string(self.slot_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::read(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::write(key, e))?;

        // Write beside the slot and rename over it so a failed write never
        // leaves a truncated file behind.
        let path = self.slot_path(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|e| StorageError::write(key, e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(StorageError::write(key, e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_slot_is_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("weatherFavorites").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("prefs"));

        store.set("temperatureUnit", r#""F""#).unwrap();
        assert_eq!(store.get("temperatureUnit").unwrap().as_deref(), Some(r#""F""#));
        assert!(dir.path().join("prefs").join("temperatureUnit.json").exists());
    }

    #[test]
    fn test_overwrite_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("recentSearches", r#"["Paris"]"#).unwrap();
        store.set("recentSearches", r#"["Tokyo","Paris"]"#).unwrap();

        assert_eq!(
            store.get("recentSearches").unwrap().as_deref(),
            Some(r#"["Tokyo","Paris"]"#)
        );
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", "1"),
            Err(StorageError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let store = FileStore::new(&blocker);
        assert!(matches!(
            store.set("temperatureUnit", r#""C""#),
            Err(StorageError::Write { .. })
        ));
    }
}
