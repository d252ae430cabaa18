//! Store path resolution.
//!
//! A store is addressed either by an **application name** or by an explicit
//! **path**. Names are placed under a platform base directory:
//!
//! ```text
//! Local   <user config dir>/<name>/config.json     (~/.config on Linux)
//! Global  <system config dir>/<name>/config.json   (/etc on Linux)
//! ```
//!
//! Anything that looks like a path (contains a separator, or ends in `.json`)
//! is used verbatim, made absolute against the working directory when
//! relative.
//!
//! Resolution never fails and never touches the filesystem. Directories are
//! created lazily by the write path in [`persist`](crate::persist).

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::types::Namespace;

/// File name used inside `<base>/<name>/`.
pub const STORE_FILE_NAME: &str = "config.json";

/// Resolve the backing file for a store.
///
/// `base_override`, when given, replaces the namespace's base directory for
/// name lookups. Explicit paths ignore both `namespace` and `base_override`.
/// Non-UTF-8 paths are accepted as-is.
pub fn resolve_store_path(
    name_or_path: impl AsRef<OsStr>,
    namespace: Namespace,
    base_override: Option<&Path>,
) -> PathBuf {
    let name_or_path = name_or_path.as_ref();
    if looks_like_path(name_or_path) {
        return absolutize(Path::new(name_or_path));
    }

    let base = match base_override {
        Some(dir) => dir.to_path_buf(),
        None => match namespace {
            Namespace::Local => local_config_dir(),
            Namespace::Global => global_config_dir(),
        },
    };

    base.join(name_or_path).join(STORE_FILE_NAME)
}

/// Heuristic: does this string name a file rather than an application?
pub fn looks_like_path(s: impl AsRef<OsStr>) -> bool {
    let s = s.as_ref();
    let lossy = s.to_string_lossy();
    if lossy.contains('/') || lossy.contains('\\') {
        return true;
    }
    Path::new(s)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Per-user config root. Falls back to the temp dir when there is no home.
pub fn local_config_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir)
}

/// System-wide config root.
pub fn global_config_dir() -> PathBuf {
    #[cfg(windows)]
    {
        std::env::var_os("ProgramData")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(r"C:\ProgramData"))
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Preferences")
    }
    #[cfg(not(any(windows, target_os = "macos")))]
    {
        PathBuf::from("/etc")
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}
