use std::fmt;

use super::spec::Spec;

/// Keys of a path item that name an operation.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// A (path, method) pair with an operation documented in the spec.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentedPath {
    pub path: String,
    pub method: String,
}

impl DocumentedPath {
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
        }
    }
}

impl fmt::Display for DocumentedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method.to_uppercase(), self.path)
    }
}

impl Spec {
    /// Flatten `paths` into (path, method) pairs, in document order.
    ///
    /// Path-level keys that are not HTTP methods (`parameters`, `summary`,
    /// `$ref`, extensions) are not operations and are skipped.
    pub fn documented_paths(&self) -> Vec<DocumentedPath> {
        self.paths
            .iter()
            .filter_map(|(path, item)| item.as_object().map(|ops| (path, ops)))
            .flat_map(|(path, ops)| {
                ops.keys()
                    .filter(|method| HTTP_METHODS.contains(&method.to_ascii_lowercase().as_str()))
                    .map(move |method| DocumentedPath::new(path.as_str(), method.as_str()))
            })
            .collect()
    }
}
