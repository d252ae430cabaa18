//! Error policy for the write path.
//!
//! Every failure while persisting (serializing a value, creating the parent
//! directory, writing or renaming the file) is handed to the store's
//! [`ErrorHandler`] together with the store that raised it. Whatever the
//! handler returns becomes the result of the mutating call:
//!
//! - [`rethrow`] (the default) returns the error, so `set` fails.
//! - [`log_and_continue`] logs a warning and returns `Ok(())`.
//! - Any closure with the same signature can inspect the error, touch the
//!   store, and decide.
//!
//! Reads never reach the handler; they recover silently to an empty mapping.

use crate::error::ConfigstoreError;
use crate::store::Configstore;

/// Handler invoked with the failure and the store instance that triggered it.
pub type ErrorHandler =
    Box<dyn Fn(ConfigstoreError, &Configstore) -> Result<(), ConfigstoreError> + Send + Sync>;

/// Default policy: propagate the error to the caller unchanged.
pub fn rethrow(err: ConfigstoreError, _store: &Configstore) -> Result<(), ConfigstoreError> {
    Err(err)
}

/// Log the failure at `warn` level and report success to the caller.
pub fn log_and_continue(err: ConfigstoreError, store: &Configstore) -> Result<(), ConfigstoreError> {
    tracing::warn!(path = %store.path().display(), error = %err, "failed to persist config store");
    Ok(())
}
