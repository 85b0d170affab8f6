pub mod config;
pub mod error;
pub mod load;
pub mod model;
pub mod render;
pub mod sanitize;

pub use error::{ConfigError, LoadError, RenderError};
pub use load::{load_from_bytes, load_from_dir, load_from_dir_root};
pub use model::{DocumentedPath, GenericObject, Spec, Value};
pub use render::{DocPage, SpecModifier, SpecSource};
