use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::reader::read_source;
use crate::error::LoadError;
use crate::model::{GenericObject, Value};
use crate::sanitize::sanitize_value;

/// Merge every fragment file found under `dir` into one object.
///
/// A fragment with a top-level `section` key contributes that key's entries;
/// any other fragment is stored whole under its file stem. Subdirectories
/// only organize files and are flattened into the same result. A missing
/// `dir` yields an empty object; a `dir` that exists but is not a directory
/// is an error.
pub fn merge_dir(dir: &Path, section: &str) -> Result<GenericObject, LoadError> {
    let mut merged = GenericObject::new();
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(LoadError::Read {
                path: dir.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            });
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no {section} fragments: {} does not exist", dir.display());
            return Ok(merged);
        }
        Err(source) => {
            return Err(LoadError::Read {
                path: dir.to_path_buf(),
                source,
            });
        }
    }

    let mut visited = HashSet::new();
    merge_into(&mut merged, dir, section, &mut visited)?;
    Ok(merged)
}

fn merge_into(
    acc: &mut GenericObject,
    dir: &Path,
    section: &str,
    visited: &mut HashSet<PathBuf>,
) -> Result<(), LoadError> {
    let canonical = fs::canonicalize(dir).map_err(|source| LoadError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    if !visited.insert(canonical) {
        debug!("skipping already merged directory {}", dir.display());
        return Ok(());
    }

    debug!("merging {section} fragments from {}", dir.display());
    for path in sorted_entries(dir)? {
        if path.is_dir() {
            merge_into(acc, &path, section, visited)?;
        } else {
            merge_file(acc, &path, section)?;
        }
    }
    Ok(())
}

/// Directory entries in lexicographic order, hidden entries excluded.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let read_err = |source: io::Error| LoadError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

fn merge_file(acc: &mut GenericObject, path: &Path, section: &str) -> Result<(), LoadError> {
    let (format, bytes) = read_source(path)?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        debug!("skipping empty fragment {}", path.display());
        return Ok(());
    }

    let mut content = match sanitize_value(format.parse::<Value>(&bytes, path)?) {
        Value::Null => return Ok(()),
        Value::Object(obj) => obj,
        _ => {
            return Err(LoadError::InvalidFragment {
                path: path.to_path_buf(),
                reason: "top level must be a mapping".to_string(),
            });
        }
    };
    if content.is_empty() {
        debug!("skipping empty fragment {}", path.display());
        return Ok(());
    }

    debug!("merging fragment {}", path.display());
    match content.shift_remove(section) {
        Some(Value::Object(entries)) => {
            for (key, value) in entries {
                insert(acc, key, value, path, section);
            }
        }
        Some(Value::Null) => {}
        Some(_) => {
            return Err(LoadError::InvalidFragment {
                path: path.to_path_buf(),
                reason: format!("`{section}` must be a mapping"),
            });
        }
        None => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            insert(acc, stem, Value::Object(content), path, section);
        }
    }
    Ok(())
}

fn insert(acc: &mut GenericObject, key: String, value: Value, path: &Path, section: &str) {
    if acc.contains_key(&key) {
        warn!(
            "{section}: `{key}` in {} overrides an earlier definition",
            path.display()
        );
    }
    acc.insert(key, value);
}
