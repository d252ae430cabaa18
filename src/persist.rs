//! Store persistence: read and write the backing JSON file.
//!
//! Reads are total. A missing, unreadable, empty or malformed file is an
//! empty mapping. Writes go through a temp file in the target directory that
//! is renamed over the store, so a reader sees either the old or the new
//! content. Parent directories are created as needed.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::ConfigstoreError;

/// Read the persisted mapping at `path`, treating every failure as empty.
pub fn read_mapping(path: &Path) -> Map<String, Value> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::trace!(path = %path.display(), "store file missing, using empty mapping");
            return Map::new();
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "store file unreadable, using empty mapping");
            return Map::new();
        }
    };

    parse_mapping(&content).unwrap_or_else(|| {
        tracing::debug!(path = %path.display(), "store file is not a JSON object, using empty mapping");
        Map::new()
    })
}

/// Pure function: parse file content into a mapping.
/// Returns `None` if the content is not JSON or its top level is not an object.
pub fn parse_mapping(content: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Render a mapping into `writer` as tab-indented JSON with a trailing newline.
pub fn render_mapping<W: Write>(mut writer: W, map: &Map<String, Value>) -> serde_json::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    map.serialize(&mut ser)?;
    writer.write_all(b"\n").map_err(serde_json::Error::io)
}

/// I/O wrapper: render `map` and atomically replace the file at `path`.
///
/// Creates parent directories if needed. When `path` is a symlink, its target
/// is replaced and the link is left in place. An existing file keeps its
/// permissions; a new one gets `0o666` minus the umask.
pub fn write_mapping(path: &Path, map: &Map<String, Value>) -> Result<(), ConfigstoreError> {
    let target = resolve_write_target(path);

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| ConfigstoreError::IoError {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let io_err = |e: io::Error| ConfigstoreError::IoError {
        path: target.clone(),
        source: e,
    };

    let mut tmp = create_temp_in(dir).map_err(io_err)?;
    if let Ok(existing) = fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(io_err)?;
    }

    {
        let mut out = BufWriter::new(&mut tmp);
        render_mapping(&mut out, map).map_err(|e| {
            if e.is_io() {
                io_err(e.into())
            } else {
                ConfigstoreError::Serialize {
                    key: "<all>".into(),
                    source: e,
                }
            }
        })?;
        out.flush().map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(&target).map_err(|e| io_err(e.error))?;

    tracing::debug!(path = %target.display(), keys = map.len(), "store written");
    Ok(())
}

/// The file a write should replace: `path` itself, or the file a symlink at
/// `path` points to (which need not exist yet).
fn resolve_write_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {}
        _ => return path.to_path_buf(),
    }
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    match fs::read_link(path) {
        Ok(link) if link.is_absolute() => link,
        Ok(link) => path.parent().unwrap_or(Path::new(".")).join(link),
        Err(_) => path.to_path_buf(),
    }
}

fn create_temp_in(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".config").suffix(".json.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Mode is passed to open(2), so the process umask still applies.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Convert a caller value to JSON, tagging failures with `key`.
pub fn to_json<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<Value, ConfigstoreError> {
    serde_json::to_value(value).map_err(|e| ConfigstoreError::Serialize {
        key: key.into(),
        source: e,
    })
}

/// Convert a caller value to a JSON object, rejecting any other shape.
pub fn to_object<T: Serialize + ?Sized>(
    key: &str,
    value: &T,
) -> Result<Map<String, Value>, ConfigstoreError> {
    match to_json(key, value)? {
        Value::Object(map) => Ok(map),
        other => Err(ConfigstoreError::NotAnObject {
            key: key.into(),
            found: value_kind(&other),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
