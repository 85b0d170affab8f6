use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::LoadError;

/// Extensions accepted for spec and fragment files, as shown in errors.
pub const ACCEPTED_EXTENSIONS: &str = "yml|yaml|json";

/// A document format the loader can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Format> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Some(Format::Yaml),
            Some("json") => Some(Format::Json),
            _ => None,
        }
    }

    pub fn parse<T: DeserializeOwned>(self, bytes: &[u8], path: &Path) -> Result<T, LoadError> {
        match self {
            Format::Yaml => from_yaml_slice(bytes).map_err(|source| LoadError::Yaml {
                path: path.to_path_buf(),
                source,
            }),
            Format::Json => serde_json::from_slice(bytes).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Parse YAML with `<<` merge keys expanded before `T` sees the tree.
pub fn from_yaml_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_yaml_ng::Error> {
    let mut value: serde_yaml_ng::Value = serde_yaml_ng::from_slice(bytes)?;
    value.apply_merge()?;
    serde_yaml_ng::from_value(value)
}

/// Read `path` and deserialize it into `T`, choosing the format by extension.
///
/// The extension is checked before the file is opened, so an unsupported
/// file is rejected even if it does not exist.
pub fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let (format, bytes) = read_source(path)?;
    format.parse(&bytes, path)
}

/// Detect the format of `path` and read its raw contents.
pub fn read_source(path: &Path) -> Result<(Format, Vec<u8>), LoadError> {
    let format = Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
        accepted: ACCEPTED_EXTENSIONS.to_string(),
    })?;

    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok((format, bytes))
}
