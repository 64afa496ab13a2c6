use dial::store::{Store, StoreError, StoredValue};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Preferences kept as one JSON object, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, StoredValue>,
}

impl FileStore {
    /// Reads `path` if it exists. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            log::info!("No preference file at {}, starting fresh", path.display());
            return Ok(Self::empty(path));
        }

        let contents = fs_err::read_to_string(&path)?;
        let values =
            serde_json::from_str(&contents).map_err(|e| StoreError::Encoding(Box::new(e)))?;
        Ok(Self { path, values })
    }

    /// A store that will write to `path` but starts without values.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs_err::create_dir_all(parent)?;
        }
        let json =
            serde_json::to_string_pretty(&self.values).map_err(|e| StoreError::Encoding(Box::new(e)))?;
        fs_err::write(&self.path, json)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<StoredValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "macroclock-store-{}-{}",
            std::process::id(),
            name
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("nested").join("preferences.json")
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = FileStore::open(scratch("missing")).unwrap();
        assert!(!store.contains("handColor"));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = scratch("reopen");
        let mut store = FileStore::open(&path).unwrap();
        store.set("handColor", StoredValue::from("red")).unwrap();
        store.set("vibrate", StoredValue::from(true)).unwrap();
        store.set("vibrateStart", StoredValue::from(7_i64)).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        let cases = vec![
            ("handColor", Some(StoredValue::from("red"))),
            ("vibrate", Some(StoredValue::from(true))),
            ("vibrateStart", Some(StoredValue::from(7_i64))),
            ("dotColor", None),
        ];

        for (key, expected) in cases {
            assert_eq!(reopened.get(key), expected, "{key}");
        }
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch("corrupt");
        fs_err::create_dir_all(path.parent().unwrap()).unwrap();
        fs_err::write(&path, "not json").unwrap();

        assert!(matches!(
            FileStore::open(&path),
            Err(StoreError::Encoding(_))
        ));
    }
}
