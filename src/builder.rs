use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::ConfigstoreError;
use crate::file;
use crate::policy::{self, ErrorHandler};
use crate::store::Configstore;
use crate::types::Namespace;

/// Options recognised at construction time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreOptions {
    /// Resolve application names under the system-wide config directory
    /// instead of the per-user one.
    pub global_config_path: bool,
    /// Replace the platform base directory used for name lookups.
    pub base_dir: Option<PathBuf>,
}

/// Builder for a [`Configstore`].
///
/// `name_or_path` is either an application name (`"myapp"`, resolved to
/// `<config dir>/myapp/config.json`) or a file path (`"./settings.json"`,
/// used as-is). Nothing touches the disk until the first write.
pub struct ConfigstoreBuilder {
    name_or_path: OsString,
    defaults: Map<String, Value>,
    options: StoreOptions,
    on_error: ErrorHandler,
}

impl ConfigstoreBuilder {
    pub(crate) fn new(name_or_path: &OsStr) -> Self {
        Self {
            name_or_path: name_or_path.to_os_string(),
            defaults: Map::new(),
            options: StoreOptions::default(),
            on_error: Box::new(policy::rethrow),
        }
    }

    /// Set default values, visible wherever the file has no value for a key.
    ///
    /// Anything other than a JSON object is treated as "no defaults".
    pub fn defaults<V: Into<Value>>(mut self, defaults: V) -> Self {
        self.defaults = match defaults.into() {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                tracing::warn!(defaults = %other, "ignoring non-object defaults");
                Map::new()
            }
        };
        self
    }

    /// Use the system-wide config directory for application names (default: `false`).
    pub fn global_config_path(mut self, global: bool) -> Self {
        self.options.global_config_path = global;
        self
    }

    /// Resolve application names under `dir` instead of the platform directory.
    /// Explicit paths are unaffected.
    pub fn base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.options.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Replace the whole option set at once.
    pub fn options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Install the handler that receives write-path failures.
    ///
    /// The default ([`policy::rethrow`]) hands the error back to the caller.
    /// Return `Ok(())` from the handler to swallow it.
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(ConfigstoreError, &Configstore) -> Result<(), ConfigstoreError> + Send + Sync + 'static,
    {
        self.on_error = Box::new(handler);
        self
    }

    fn effective_namespace(&self) -> Namespace {
        Namespace::from_global_flag(self.options.global_config_path)
    }

    fn effective_path(&self) -> PathBuf {
        file::resolve_store_path(
            &self.name_or_path,
            self.effective_namespace(),
            self.options.base_dir.as_deref(),
        )
    }

    /// Resolve the store path and produce the store.
    pub fn build(self) -> Configstore {
        let path = self.effective_path();
        tracing::trace!(path = %path.display(), "config store resolved");
        Configstore::from_parts(path, self.defaults, self.on_error)
    }
}

impl fmt::Debug for ConfigstoreBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigstoreBuilder")
            .field("name_or_path", &self.name_or_path)
            .field("defaults", &self.defaults)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn defaults_start_empty() {
        let builder = Configstore::builder("myapp");
        assert!(builder.defaults.is_empty());
        assert_eq!(builder.options, StoreOptions::default());
    }

    #[test]
    fn namespace_defaults_to_local() {
        let builder = Configstore::builder("myapp");
        assert_eq!(builder.effective_namespace(), Namespace::Local);
    }

    #[test]
    fn global_flag_selects_global_namespace() {
        let builder = Configstore::builder("myapp").global_config_path(true);
        assert_eq!(builder.effective_namespace(), Namespace::Global);
        assert!(builder.effective_path().starts_with(file::global_config_dir()));
    }

    #[test]
    fn defaults_object_is_kept() {
        let builder = Configstore::builder("myapp").defaults(json!({"foo": "bar"}));
        assert_eq!(builder.defaults["foo"], "bar");
    }

    #[test]
    fn defaults_null_is_empty() {
        let builder = Configstore::builder("myapp").defaults(Value::Null);
        assert!(builder.defaults.is_empty());
    }

    #[test]
    fn defaults_non_object_is_ignored() {
        let builder = Configstore::builder("myapp").defaults(json!([1, 2, 3]));
        assert!(builder.defaults.is_empty());
    }

    #[test]
    fn base_dir_overrides_platform_dir() {
        let dir = TempDir::new().unwrap();
        let builder = Configstore::builder("myapp").base_dir(dir.path());
        assert_eq!(
            builder.effective_path(),
            dir.path().join("myapp").join("config.json")
        );
    }

    #[test]
    fn options_replace_individual_settings() {
        let dir = TempDir::new().unwrap();
        let options = StoreOptions {
            global_config_path: true,
            base_dir: Some(dir.path().to_path_buf()),
        };
        let builder = Configstore::builder("myapp").options(options.clone());
        assert_eq!(builder.options, options);
    }

    #[test]
    fn build_does_not_touch_disk() {
        let dir = TempDir::new().unwrap();
        let store = Configstore::builder("myapp").base_dir(dir.path()).build();
        assert!(!store.path().exists());
        assert!(!dir.path().join("myapp").exists());
    }

    #[test]
    fn debug_omits_handler() {
        let builder = Configstore::builder("myapp");
        let out = format!("{builder:?}");
        assert!(out.contains("myapp"));
        assert!(out.contains(".."));
    }
}
