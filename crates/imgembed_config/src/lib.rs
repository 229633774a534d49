//! Settings for the image converter.
//!
//! Defaults are compiled in from `settings.json`. A storage adapter (for instance a json file
//! passed on the command line) may override them for the current run.

mod errors;
pub mod settings;
pub mod storage;

pub use crate::errors::Error;

use crate::settings::{Setting, SettingInfo};
use crate::storage::MemoryStorageAdapter;
use imgembed_shared::types::Result;
use lazy_static::lazy_static;
use log::warn;
use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde_derive::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use wildmatch::WildMatch;

/// Known settings per section, with their type, default and description.
const SETTINGS_JSON: &str = include_str!("./settings.json");

/// Where settings are loaded from and handed to when changed.
pub trait StorageAdapter: Send + Sync {
    fn get(&self, key: &str) -> Option<Setting>;

    /// Takes `&self`; adapters use interior mutability.
    fn set(&self, key: &str, value: Setting);

    /// Every setting the storage holds, loaded at once when the storage is attached.
    fn all(&self) -> Result<HashMap<String, Setting>>;
}

lazy_static! {
    // Memory storage until a json file is attached, nothing persists past the process.
    static ref CONFIG_STORE: RwLock<ConfigStore> = RwLock::new(ConfigStore::default());
}

pub fn config_store() -> RwLockReadGuard<'static, ConfigStore> {
    CONFIG_STORE.read()
}

pub fn config_store_write() -> RwLockWriteGuard<'static, ConfigStore> {
    CONFIG_STORE.write()
}

/// Reads a setting from the global store as the given type:
///
/// ```text
/// let max_dim = config!(uint "convert.max_dim");
/// ```
///
/// Unknown keys read as 0, false or an empty string.
#[macro_export]
macro_rules! config {
    (uint $key:expr) => {
        $crate::config_store()
            .get($key)
            .map_or(0, |setting| setting.to_uint())
    };
    (bool $key:expr) => {
        $crate::config_store()
            .get($key)
            .is_some_and(|setting| setting.to_bool())
    };
    (string $key:expr) => {
        $crate::config_store()
            .get($key)
            .map(|setting| setting.to_text())
            .unwrap_or_default()
    };
}

/// Changes a setting in the global store: `config_set!(bool "convert.strict_exit", true)`
#[macro_export]
macro_rules! config_set {
    (bool $key:expr, $val:expr) => {
        $crate::config_store().set($key, $crate::settings::Setting::Bool($val))
    };
    (string $key:expr, $val:expr) => {
        $crate::config_store().set($key, $crate::settings::Setting::String($val))
    };
}

/// One entry of settings.json
#[derive(Debug, Deserialize)]
struct DeclaredSetting {
    key: String,
    #[serde(rename = "type")]
    kind: String,
    default: String,
    description: String,
}

pub struct ConfigStore {
    /// Current value of every known setting
    values: Mutex<HashMap<String, Setting>>,
    /// Known settings in declaration order
    declared: Vec<SettingInfo>,
    storage: Box<dyn StorageAdapter>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        let declared = match declared_settings() {
            Ok(declared) => declared,
            Err(err) => {
                warn!("config: cannot load default settings: {err}");
                Vec::new()
            }
        };

        let values = declared
            .iter()
            .map(|info| (info.key.clone(), info.default.clone()))
            .collect();

        Self {
            values: Mutex::new(values),
            declared,
            storage: Box::new(MemoryStorageAdapter::new()),
        }
    }
}

impl ConfigStore {
    /// Attaches a storage and takes over every setting it holds. Unknown keys and values of
    /// the wrong type are skipped.
    pub fn set_storage(&mut self, storage: Box<dyn StorageAdapter>) {
        self.storage = storage;

        match self.storage.all() {
            Ok(stored) => {
                let mut values = self.values.lock();
                for (key, value) in stored {
                    if self.accepts(&key, &value) {
                        values.insert(key, value);
                    }
                }
            }
            Err(err) => warn!("config: cannot read settings from storage: {err}"),
        }
    }

    /// Keys matching a wildcard pattern (`?` and `*`), in declaration order
    pub fn find(&self, search: &str) -> Vec<String> {
        let search = WildMatch::new(search);

        self.declared
            .iter()
            .filter(|info| search.matches(&info.key))
            .map(|info| info.key.clone())
            .collect()
    }

    pub fn get_info(&self, key: &str) -> Option<SettingInfo> {
        self.info(key).cloned()
    }

    /// Current value of a known setting. Unknown keys are logged and return `None`.
    pub fn get(&self, key: &str) -> Option<Setting> {
        let value = self.values.lock().get(key).cloned();
        if value.is_none() {
            warn!("config: Setting {key} is not known");
        }
        value
    }

    /// Changes a setting and hands it to the storage. Unknown keys and values of another
    /// type than the default are ignored.
    pub fn set(&self, key: &str, value: Setting) {
        if !self.accepts(key, &value) {
            return;
        }

        self.values.lock().insert(key.to_owned(), value.clone());
        self.storage.set(key, value);
    }

    fn info(&self, key: &str) -> Option<&SettingInfo> {
        self.declared.iter().find(|info| info.key == key)
    }

    fn accepts(&self, key: &str, value: &Setting) -> bool {
        let Some(info) = self.info(key) else {
            warn!("config: Setting {key} is not known");
            return false;
        };

        if info.default.kind() != value.kind() {
            warn!(
                "config: Setting {key} expects type {}, got {}",
                info.default.kind(),
                value.encode()
            );
            return false;
        }

        true
    }
}

/// Parses settings.json into `section.key` infos. The declared type must match the default.
fn declared_settings() -> Result<Vec<SettingInfo>> {
    let sections: BTreeMap<String, Vec<DeclaredSetting>> = serde_json::from_str(SETTINGS_JSON)?;

    let mut declared = Vec::new();
    for (section, entries) in sections {
        for entry in entries {
            let key = format!("{section}.{}", entry.key);
            let default = Setting::from_str(&entry.default)?;
            if default.kind() != entry.kind {
                return Err(Error::Config(format!(
                    "{key} is declared as {} but defaults to {}",
                    entry.kind, entry.default
                ))
                .into());
            }

            declared.push(SettingInfo {
                key,
                description: entry.description,
                default,
            });
        }
    }

    Ok(declared)
}
