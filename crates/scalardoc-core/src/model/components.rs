use serde::{Deserialize, Serialize};

use super::value::GenericObject;
use super::{generic_object, is_empty};

/// Components object holding reusable definitions, each bucket keyed by
/// component name.
///
/// `schemas`, `parameters` and `responses` are always emitted, even when
/// empty, since the loader merges fragment directories into them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, deserialize_with = "generic_object")]
    pub schemas: GenericObject,

    #[serde(default, deserialize_with = "generic_object")]
    pub parameters: GenericObject,

    #[serde(default, deserialize_with = "generic_object")]
    pub responses: GenericObject,

    #[serde(
        default,
        deserialize_with = "generic_object",
        skip_serializing_if = "is_empty"
    )]
    pub examples: GenericObject,

    #[serde(
        rename = "requestBodies",
        default,
        deserialize_with = "generic_object",
        skip_serializing_if = "is_empty"
    )]
    pub request_bodies: GenericObject,

    #[serde(
        default,
        deserialize_with = "generic_object",
        skip_serializing_if = "is_empty"
    )]
    pub headers: GenericObject,

    #[serde(
        rename = "securitySchemes",
        default,
        deserialize_with = "generic_object",
        skip_serializing_if = "is_empty"
    )]
    pub security_schemes: GenericObject,

    #[serde(
        default,
        deserialize_with = "generic_object",
        skip_serializing_if = "is_empty"
    )]
    pub links: GenericObject,

    #[serde(
        default,
        deserialize_with = "generic_object",
        skip_serializing_if = "is_empty"
    )]
    pub callbacks: GenericObject,

    #[serde(
        rename = "pathItems",
        default,
        deserialize_with = "generic_object",
        skip_serializing_if = "is_empty"
    )]
    pub path_items: GenericObject,
}

impl Components {
    /// Every bucket, paired with its OpenAPI field name.
    pub fn buckets_mut(&mut self) -> [(&'static str, &mut GenericObject); 10] {
        [
            ("schemas", &mut self.schemas),
            ("parameters", &mut self.parameters),
            ("responses", &mut self.responses),
            ("examples", &mut self.examples),
            ("requestBodies", &mut self.request_bodies),
            ("headers", &mut self.headers),
            ("securitySchemes", &mut self.security_schemes),
            ("links", &mut self.links),
            ("callbacks", &mut self.callbacks),
            ("pathItems", &mut self.path_items),
        ]
    }
}
