//! The store handle.
//!
//! A [`Configstore`] holds only its resolved path, its defaults and its error
//! handler. It never caches file content: every read goes to disk, and every
//! mutation is a read-modify-write of the whole file.
//!
//! ```text
//! Defaults          .defaults(...)
//!        ↑ overridden by
//! Persisted file    <path>
//! ```
//!
//! Defaults are overlaid at read time only. They are never written to the file,
//! so `clear()` erases persisted values and leaves defaults visible.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::builder::ConfigstoreBuilder;
use crate::error::ConfigstoreError;
use crate::merge::shallow_merge;
use crate::persist;
use crate::policy::ErrorHandler;

/// A persistent JSON key-value store.
pub struct Configstore {
    path: PathBuf,
    defaults: Map<String, Value>,
    on_error: ErrorHandler,
}

impl Configstore {
    /// Open a store by application name or file path with default options.
    ///
    /// Accepts `&str`, `String`, `&Path`, `PathBuf` or any other `OsStr`-like
    /// value, so paths that are not valid UTF-8 work too.
    pub fn new(name_or_path: impl AsRef<OsStr>) -> Self {
        Self::builder(name_or_path).build()
    }

    pub fn builder(name_or_path: impl AsRef<OsStr>) -> ConfigstoreBuilder {
        ConfigstoreBuilder::new(name_or_path.as_ref())
    }

    pub(crate) fn from_parts(
        path: PathBuf,
        defaults: Map<String, Value>,
        on_error: ErrorHandler,
    ) -> Self {
        Self {
            path,
            defaults,
            on_error,
        }
    }

    /// The resolved backing file. Fixed for the lifetime of the store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn defaults(&self) -> &Map<String, Value> {
        &self.defaults
    }

    /// Defaults overlaid with the persisted mapping.
    ///
    /// Always a map: a missing or corrupt file reads as empty.
    pub fn all(&self) -> Map<String, Value> {
        shallow_merge(self.defaults.clone(), self.read_persisted())
    }

    /// Number of keys in [`all()`](Self::all).
    pub fn size(&self) -> usize {
        self.all().len()
    }

    /// The persisted value for `key`, else its default, else `None`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.all().remove(key)
    }

    /// Like [`get`](Self::get), deserialized into `T`.
    ///
    /// Returns `None` when the key is absent or its value does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!(key, error = %e, "stored value does not match requested type");
                None
            }
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Persist `value` under `key`.
    ///
    /// Failures go to the error handler; with the default handler they are
    /// returned here.
    pub fn set<V: Serialize>(&self, key: &str, value: V) -> Result<(), ConfigstoreError> {
        let outcome = persist::to_json(key, &value).and_then(|value| {
            let mut map = self.read_persisted();
            map.insert(key.to_string(), value);
            self.write(&map)
        });
        self.settle(outcome)
    }

    /// Persist every entry of `entries` in a single write.
    ///
    /// `entries` must serialize to a JSON object.
    pub fn merge<V: Serialize>(&self, entries: V) -> Result<(), ConfigstoreError> {
        let outcome = persist::to_object("<merge>", &entries).and_then(|entries| {
            let map = shallow_merge(self.read_persisted(), entries);
            self.write(&map)
        });
        self.settle(outcome)
    }

    /// Remove `key` from the file. Defaults for `key` remain visible.
    pub fn delete(&self, key: &str) -> Result<(), ConfigstoreError> {
        let mut map = self.read_persisted();
        if map.remove(key).is_none() {
            return Ok(());
        }
        let outcome = self.write(&map);
        self.settle(outcome)
    }

    /// Erase every persisted value. Defaults remain visible.
    pub fn clear(&self) -> Result<(), ConfigstoreError> {
        let outcome = self.write(&Map::new());
        self.settle(outcome)
    }

    /// Replace the persisted mapping wholesale.
    ///
    /// `mapping` must serialize to a JSON object. Defaults are unaffected.
    pub fn set_all<V: Serialize>(&self, mapping: V) -> Result<(), ConfigstoreError> {
        let outcome = persist::to_object("<all>", &mapping).and_then(|map| self.write(&map));
        self.settle(outcome)
    }

    fn read_persisted(&self) -> Map<String, Value> {
        persist::read_mapping(&self.path)
    }

    fn write(&self, map: &Map<String, Value>) -> Result<(), ConfigstoreError> {
        persist::write_mapping(&self.path, map)
    }

    /// Route a write-path failure through the error handler.
    fn settle(&self, outcome: Result<(), ConfigstoreError>) -> Result<(), ConfigstoreError> {
        match outcome {
            Ok(()) => Ok(()),
            Err(err) => (self.on_error)(err, self),
        }
    }
}

impl fmt::Debug for Configstore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configstore")
            .field("path", &self.path)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
