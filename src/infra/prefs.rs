//! JSON-file-backed preference store.
//!
//! Persistence is best-effort: an unreadable or unwritable file degrades to
//! in-memory behavior with a warning, never a failed user interaction.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::application::prefs::PreferenceStore;

#[derive(Debug)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl JsonFilePreferenceStore {
    /// Open the store, loading whatever is currently on disk.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(values) => values,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "preference file unreadable; starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "preference file unreadable; starting empty");
                HashMap::new()
            }
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn persist(&self, values: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(err) = fs::create_dir_all(parent)
        {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to create preference directory");
            return;
        }
        let serialized = match serde_json::to_string_pretty(values) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize preferences");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, serialized) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to write preference file");
        }
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("preference map lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.lock().expect("preference map lock poisoned");
        values.insert(key.to_string(), value.to_string());
        self.persist(&values);
    }
}
