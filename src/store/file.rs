// JSON file store
// Keeps the collection as one pretty-printed JSON array on disk

use std::fs;
use std::path::{Path, PathBuf};

use super::{Collection, Item, ItemStore, StoreError};
use crate::logger;

/// Flat-file backend: `load` reads the whole file, `save` replaces it
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[allow(clippy::missing_const_for_fn)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `bytes` to `<path>.tmp` and rename it over the target so a crash
    /// mid-write never leaves a truncated document behind.
    fn atomic_write(&self, bytes: &[u8]) -> std::io::Result<()> {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("json");
        let tmp = self.path.with_extension(format!("{ext}.tmp"));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)
    }
}

impl ItemStore for JsonFileStore {
    fn ensure_storage_exists(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
                logger::log_storage(&format!("Directory created: {}", dir.display()));
            }
        }

        if !self.path.exists() {
            fs::write(&self.path, b"[]")?;
            logger::log_storage(&format!("File created: {}", self.path.display()));
        }

        Ok(())
    }

    fn load(&self) -> Collection {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                logger::log_storage_error(&format!(
                    "Error reading shopping list file {}: {e}",
                    self.path.display()
                ));
                return Vec::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            logger::log_storage_error(&format!(
                "Error parsing shopping list file {}: {e}",
                self.path.display()
            ));
            Vec::new()
        })
    }

    fn save(&self, items: &[Item]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(items)?;
        self.atomic_write(&bytes)?;
        logger::log_storage("Shopping list updated.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "shopping_list_store_{}_{name}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn item(value: serde_json::Value) -> Item {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_ensure_creates_dir_and_empty_file() {
        let dir = temp_dir("ensure");
        let store = JsonFileStore::new(dir.join("data").join("shopping-list.json"));

        store.ensure_storage_exists().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
        assert!(store.load().is_empty());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let dir = temp_dir("idempotent");
        let store = JsonFileStore::new(dir.join("shopping-list.json"));
        store.ensure_storage_exists().unwrap();
        store
            .save(&[item(json!({"name": "Milk", "quantity": 2, "id": 1}))])
            .unwrap();

        store.ensure_storage_exists().unwrap();
        assert_eq!(store.load().len(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_is_pretty_printed() {
        let dir = temp_dir("pretty");
        let store = JsonFileStore::new(dir.join("shopping-list.json"));
        store.ensure_storage_exists().unwrap();
        store
            .save(&[item(json!({"name": "Milk", "quantity": 2, "id": 1}))])
            .unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "[\n  {\n    \"name\": \"Milk\",\n    \"quantity\": 2,\n    \"id\": 1\n  }\n]"
        );
        assert!(!dir.join("shopping-list.json.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_preserves_order_and_extra_fields() {
        let dir = temp_dir("order");
        let store = JsonFileStore::new(dir.join("shopping-list.json"));
        store.ensure_storage_exists().unwrap();
        let items = vec![
            item(json!({"name": "Bread", "quantity": 1, "id": 5, "aisle": 3})),
            item(json!({"name": "Milk", "quantity": 2, "id": 2})),
        ];
        store.save(&items).unwrap();

        assert_eq!(store.load(), items);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = temp_dir("missing");
        let store = JsonFileStore::new(dir.join("nope.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = temp_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        let store = JsonFileStore::new(dir.join("shopping-list.json"));

        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().is_empty());

        fs::write(store.path(), r#"{"name": "not an array"}"#).unwrap();
        assert!(store.load().is_empty());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = temp_dir("nodir");
        let store = JsonFileStore::new(dir.join("missing").join("shopping-list.json"));
        let err = store.save(&[]).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
