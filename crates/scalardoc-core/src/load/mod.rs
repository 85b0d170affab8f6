//! Load an OpenAPI document from a root file plus optional fragment
//! directories, or from raw bytes.

pub mod merge;
pub mod reader;

use std::path::Path;

use log::debug;

use crate::error::LoadError;
use crate::model::{GenericObject, Spec};
use crate::sanitize::sanitize_spec;

pub use merge::merge_dir;
pub use reader::{ACCEPTED_EXTENSIONS, Format, from_yaml_slice, read_file};

/// Conventional name of the root spec file.
pub const DEFAULT_BASE_FILE_NAME: &str = "api.yaml";

/// A fragment directory under the spec root, named after the section it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Paths,
    Schemas,
    Responses,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Paths, Section::Schemas, Section::Responses];

    /// Directory name and section key.
    pub fn name(self) -> &'static str {
        match self {
            Section::Paths => "paths",
            Section::Schemas => "schemas",
            Section::Responses => "responses",
        }
    }

    fn bucket_mut(self, spec: &mut Spec) -> &mut GenericObject {
        match self {
            Section::Paths => &mut spec.paths,
            Section::Schemas => &mut spec.components.schemas,
            Section::Responses => &mut spec.components.responses,
        }
    }
}

/// Load `root/base_file_name` and merge the `paths/`, `schemas/` and
/// `responses/` fragment directories under `root` into it.
pub fn load_from_dir(root: &Path, base_file_name: &str) -> Result<Spec, LoadError> {
    let mut spec: Spec = read_file(&root.join(base_file_name))?;

    for section in Section::ALL {
        let fragments = merge_dir(&root.join(section.name()), section.name())?;
        debug!(
            "merged {} {} fragment(s) from {}",
            fragments.len(),
            section.name(),
            root.display()
        );
        section.bucket_mut(&mut spec).extend(fragments);
    }

    Ok(sanitize_spec(spec))
}

/// Load from `root` using [`DEFAULT_BASE_FILE_NAME`].
pub fn load_from_dir_root(root: &Path) -> Result<Spec, LoadError> {
    load_from_dir(root, DEFAULT_BASE_FILE_NAME)
}

/// Load a self-contained document, trying YAML first and then JSON.
pub fn load_from_bytes(bytes: &[u8]) -> Result<Spec, LoadError> {
    let yaml = match from_yaml_slice::<Spec>(bytes) {
        Ok(spec) => return Ok(sanitize_spec(spec)),
        Err(e) => e,
    };
    debug!("spec bytes are not a YAML spec ({yaml}), trying JSON");

    match serde_json::from_slice::<Spec>(bytes) {
        Ok(spec) => Ok(sanitize_spec(spec)),
        Err(json) => Err(LoadError::UnrecognizedBytes { yaml, json }),
    }
}
