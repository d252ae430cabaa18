//! Store operations behind `config list|get|set|unset|clear|path`, and the
//! `ConfigResult` enum callers use to display results.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::ConfigstoreError;
use crate::store::Configstore;
use crate::types::ConfigAction;

/// Result of a store operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A key's effective value.
    KeyValue { key: String, value: String },
    /// Confirmation that a value was persisted.
    ValueSet { key: String, value: String },
    /// Confirmation that a value was removed.
    ValueUnset { key: String },
    /// Confirmation that every persisted value was removed.
    Cleared,
    /// The backing file location.
    StorePath(PathBuf),
    /// All effective key-value pairs, sorted by key.
    Listing { entries: Vec<(String, String)> },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue { key, value } => write!(f, "{key} = {value}"),
            ConfigResult::ValueSet { key, value } => write!(f, "Set {key} = {value}"),
            ConfigResult::ValueUnset { key } => write!(f, "Unset {key}"),
            ConfigResult::Cleared => write!(f, "Cleared all stored values"),
            ConfigResult::StorePath(path) => write!(f, "{}", path.display()),
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

impl Configstore {
    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(&self, action: &ConfigAction) -> Result<(), ConfigstoreError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle a `ConfigAction` (list / get / set / unset / clear / path).
    pub fn handle(&self, action: &ConfigAction) -> Result<ConfigResult, ConfigstoreError> {
        match action {
            ConfigAction::List => Ok(list_values(self)),
            ConfigAction::Get { key } => {
                let value = self
                    .get(key)
                    .ok_or_else(|| ConfigstoreError::KeyNotFound(key.clone()))?;
                Ok(ConfigResult::KeyValue {
                    key: key.clone(),
                    value: format_value(&value),
                })
            }
            ConfigAction::Set { key, value } => {
                let parsed = parse_cli_value(value);
                self.set(key, &parsed)?;
                Ok(ConfigResult::ValueSet {
                    key: key.clone(),
                    value: format_value(&parsed),
                })
            }
            ConfigAction::Unset { key } => {
                self.delete(key)?;
                Ok(ConfigResult::ValueUnset { key: key.clone() })
            }
            ConfigAction::Clear => {
                self.clear()?;
                Ok(ConfigResult::Cleared)
            }
            ConfigAction::Path => Ok(ConfigResult::StorePath(self.path().to_path_buf())),
        }
    }
}

/// List every effective key-value pair, sorted by key.
pub fn list_values(store: &Configstore) -> ConfigResult {
    let mut entries: Vec<(String, String)> = store
        .all()
        .into_iter()
        .map(|(key, value)| (key, format_value(&value)))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    ConfigResult::Listing { entries }
}

/// Parse a raw command-line value.
/// Valid JSON (`42`, `true`, `null`, `[1,2]`, `"quoted"`) is taken as such;
/// anything else is a plain string.
pub fn parse_cli_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Format a JSON value for display. Strings print bare.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
