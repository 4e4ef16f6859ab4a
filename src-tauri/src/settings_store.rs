use serde_json::{Map, Value};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{SettingsStore, DEBUG_ENV, DEBUG_SETTING, SETTINGS_FILE};

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Settings persisted as one JSON object in `<root>/settings.json`.
pub struct JsonFileSettings {
    path: PathBuf,
    state: Map<String, Value>,
    debug_override: bool,
}

impl JsonFileSettings {
    /// Loads `root_dir/settings.json`. A missing or corrupt file yields empty settings.
    pub fn open(root_dir: &Path, log: fn(&str)) -> Self {
        let debug_override = env::var(DEBUG_ENV).map(|value| is_truthy(&value)).unwrap_or(false);
        Self::open_with_debug(root_dir, debug_override, log)
    }

    pub(crate) fn open_with_debug(root_dir: &Path, debug_override: bool, log: fn(&str)) -> Self {
        let path = root_dir.join(SETTINGS_FILE);
        let state = read_state(&path, log);
        Self {
            path,
            state,
            debug_override,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_state(&self) -> Result<(), String> {
        if let Some(parent_dir) = self.path.parent() {
            fs::create_dir_all(parent_dir).map_err(|error| {
                format!(
                    "Failed to create settings directory {}: {}",
                    parent_dir.display(),
                    error
                )
            })?;
        }

        let serialized = serde_json::to_string_pretty(&self.state)
            .map_err(|error| format!("Failed to serialize settings: {error}"))?;
        fs::write(&self.path, serialized).map_err(|error| {
            format!(
                "Failed to write settings {}: {}",
                self.path.display(),
                error
            )
        })
    }
}

fn read_state(path: &Path, log: fn(&str)) -> Map<String, Value> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Map::new(),
        Err(error) => {
            log(&format!(
                "failed to read settings {}: {}. starting with empty settings",
                path.display(),
                error
            ));
            return Map::new();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            log(&format!(
                "settings {} has non-object root; resetting state",
                path.display()
            ));
            Map::new()
        }
        Err(error) => {
            log(&format!(
                "failed to parse settings {}: {}. resetting state",
                path.display(),
                error
            ));
            Map::new()
        }
    }
}

impl SettingsStore for JsonFileSettings {
    fn get_setting(&self, key: &str) -> Option<Value> {
        self.state.get(key).cloned()
    }

    fn save_setting(&mut self, key: &str, value: Value) -> Result<(), String> {
        self.state.insert(key.to_string(), value);
        self.write_state()
    }

    fn is_debug(&self) -> bool {
        self.debug_override || self.state.get(DEBUG_SETTING) == Some(&Value::Bool(true))
    }
}
