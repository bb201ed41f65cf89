use super::{CONFIG_KEYS, Config};
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys of [`CONFIG_KEYS`] that the YAML file at `path` does not define.
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;

    Ok(CONFIG_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(*k))
        .collect())
}

/// Add every missing key with its default value, leaving the existing ones
/// untouched. Returns the keys that were added.
pub fn fill_missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;
    let missing = missing_keys(path)?;

    if missing.is_empty() {
        return Ok(missing);
    }

    let defaults = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(e.to_string()))?;

    for key in &missing {
        let k = Value::String(key.to_string());
        let v = defaults.get(*key).cloned().unwrap_or(Value::Null);
        map.insert(k, v);
    }

    let serialized =
        serde_yaml::to_string(&map).map_err(|e| AppError::Config(e.to_string()))?;

    // Leave a hint next to the backend switch
    let mut content = String::new();
    for line in serialized.lines() {
        content.push_str(line);
        content.push('\n');
        if line.starts_with("backend:") {
            content.push_str("# backend options: sqlite | csv (csv uses csv_file)\n");
        }
    }

    fs::write(path, content)?;
    Ok(missing)
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

    match yaml {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: expected a key/value mapping",
            path.display()
        ))),
    }
}
