//! Persistent key-value configuration backed by a JSON file.
//!
//! A [`Configstore`] maps string keys to arbitrary JSON values and writes the
//! whole mapping to disk on every change. Point it at an application name and
//! it finds the platform config directory for you:
//!
//! ```ignore
//! let store = Configstore::builder("myapp")
//!     .defaults(json!({"theme": "dark"}))
//!     .build();
//!
//! store.set("window", &Window { width: 800, height: 600 })?;
//! assert_eq!(store.get("theme"), Some(json!("dark")));
//! ```
//!
//! # Where the file lives
//!
//! | Constructed with | Backing file |
//! |------------------|--------------|
//! | `"myapp"` | `<user config dir>/myapp/config.json` (`~/.config` on Linux) |
//! | `"myapp"` + `.global_config_path(true)` | `<system config dir>/myapp/config.json` (`/etc` on Linux) |
//! | `"./settings.json"`, `"/abs/path/cfg"` | that path, made absolute |
//!
//! A string is treated as a path when it contains a separator or ends in
//! `.json`. [`base_dir()`](ConfigstoreBuilder::base_dir) swaps the platform
//! directory for one you choose (handy for tests and sandboxes). The path is
//! resolved once at construction and nothing is created until the first
//! write.
//!
//! # Reads
//!
//! `get`, `all`, `size` and `has` read the file fresh on every call. There is
//! no cache, so edits made by another process or by hand show up immediately.
//! Reads never fail: a missing, unreadable, empty or malformed file reads as
//! an empty mapping.
//!
//! Defaults sit underneath the file. A key present in the file wins; a key
//! only in the defaults falls through. Defaults are never written, so
//! `clear()` and `delete()` reveal them again.
//!
//! # Writes
//!
//! `set`, `merge`, `delete`, `clear` and `set_all` read the file, change the
//! mapping and write the whole thing back. Each write goes to a temp file in
//! the same directory which is then renamed over the store, so readers see
//! either the old content or the new. Parent directories are created on
//! demand. An existing file keeps its permissions, and a store path that is a
//! symlink is written through to its target.
//!
//! There is no locking. Two processes writing the same store race, and the
//! last writer wins.
//!
//! # Error policy
//!
//! Write failures (a value JSON cannot represent, or an I/O error) are handed
//! to the store's error handler along with the store itself. The default,
//! [`policy::rethrow`], returns the error from the call that failed. Install
//! your own with [`on_error()`](ConfigstoreBuilder::on_error) to log, recover
//! or swallow:
//!
//! ```ignore
//! let store = Configstore::builder("myapp")
//!     .on_error(|err, store| {
//!         eprintln!("could not save {}: {err}", store.path().display());
//!         Ok(())
//!     })
//!     .build();
//! ```
//!
//! # Clap adapter
//!
//! With the `clap` feature (on by default), [`ConfigArgs`] gives your app
//! `config list|get|set|unset|clear|path` subcommands. They convert to a
//! [`ConfigAction`] that [`Configstore::handle()`] executes.

pub mod error;
pub mod policy;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod file;
mod merge;
mod ops;
mod persist;
mod store;

#[cfg(test)]
mod fixtures;

pub use builder::{ConfigstoreBuilder, StoreOptions};
#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use error::ConfigstoreError;
pub use file::{STORE_FILE_NAME, global_config_dir, local_config_dir, resolve_store_path};
pub use ops::ConfigResult;
pub use policy::ErrorHandler;
pub use store::Configstore;
pub use types::{ConfigAction, Namespace};
