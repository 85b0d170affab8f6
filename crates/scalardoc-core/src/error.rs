use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file '{}' is not a YAML or JSON file, supported extensions are [{accepted}]", path.display())]
    UnsupportedFormat { path: PathBuf, accepted: String },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("failed to parse JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Raw bytes were rejected by every candidate format.
    #[error("failed to parse as YAML or JSON (yaml: {yaml}; json: {json})")]
    UnrecognizedBytes {
        yaml: serde_yaml_ng::Error,
        json: serde_json::Error,
    },

    #[error("invalid fragment {}: {reason}", path.display())]
    InvalidFragment { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("one of spec URL, spec directory or spec bytes must be configured")]
    MissingSource,

    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("failed to serialize: {0}")]
    Json(#[from] serde_json::Error),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}
