pub mod components;
pub mod paths;
pub mod server;
pub mod spec;
pub mod value;

pub use components::Components;
pub use paths::DocumentedPath;
pub use server::{Server, ServerVariable};
pub use spec::{Contact, ExternalDocumentation, Info, License, Spec, Tag, TagGroup};
pub use value::{GenericObject, Value};

use serde::de::{self, Deserialize, Deserializer};

use crate::sanitize::sanitize_value;

/// Treat an explicit `null` (or an empty YAML node) like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a generic bucket. `null` yields an empty object, and a mapping with
/// non-string keys is accepted and re-keyed by the sanitizer.
pub(crate) fn generic_object<'de, D>(deserializer: D) -> Result<GenericObject, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(GenericObject::new()),
        Some(Value::Object(obj)) => Ok(obj),
        Some(mapping @ Value::Mapping(_)) => match sanitize_value(mapping) {
            Value::Object(obj) => Ok(obj),
            _ => Err(de::Error::custom("expected a mapping")),
        },
        Some(_) => Err(de::Error::custom("expected a mapping")),
    }
}

pub(crate) fn is_empty(obj: &GenericObject) -> bool {
    obj.is_empty()
}
