use crate::errors::Error;
use crate::settings::Setting;
use crate::StorageAdapter;
use imgembed_shared::types::Result;
use log::warn;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only settings file. The file holds a flat object of `"key": "t:value"` entries, for
/// instance `{ "convert.max_dim": "u:32" }`. Values set at runtime are kept in memory only.
pub struct JsonStorageAdapter {
    path: PathBuf,
    elements: Mutex<HashMap<String, Setting>>,
}

impl TryFrom<&Path> for JsonStorageAdapter {
    type Error = anyhow::Error;

    fn try_from(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|err| {
            Error::Config(format!("cannot open settings file {}: {err}", path.display()))
        })?;
        if !metadata.is_file() {
            return Err(
                Error::Config(format!("{} is not a regular file", path.display())).into(),
            );
        }

        let adapter = JsonStorageAdapter {
            path: path.to_path_buf(),
            elements: Mutex::new(HashMap::new()),
        };
        adapter.read_file()?;

        Ok(adapter)
    }
}

impl StorageAdapter for JsonStorageAdapter {
    fn get(&self, key: &str) -> Option<Setting> {
        self.elements.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Setting) {
        self.elements.lock().insert(key.to_owned(), value);
    }

    fn all(&self) -> Result<HashMap<String, Setting>> {
        Ok(self.elements.lock().clone())
    }
}

impl JsonStorageAdapter {
    /// Read whole json file and stores the data into self.elements
    fn read_file(&self) -> std::result::Result<(), Error> {
        let buf = fs::read_to_string(&self.path)?;
        let parsed_json: Value = serde_json::from_str(&buf)?;

        let Value::Object(settings) = parsed_json else {
            return Err(Error::Config(format!(
                "{} does not contain a json object",
                self.path.display()
            )));
        };

        let mut lock = self.elements.lock();
        for (key, value) in settings {
            match serde_json::from_value(value) {
                Ok(setting) => {
                    lock.insert(key, setting);
                }
                Err(err) => {
                    warn!("problem reading setting {key} from json: {err}");
                }
            }
        }

        Ok(())
    }
}
