//! Re-key every mapping in a document tree by string so it serializes to
//! JSON regardless of how the YAML source typed its keys.

use crate::model::{GenericObject, Spec, Value};

/// Sanitize every generic tree held by the spec.
pub fn sanitize_spec(mut spec: Spec) -> Spec {
    spec.paths = sanitize_object(std::mem::take(&mut spec.paths));
    spec.webhooks = sanitize_object(std::mem::take(&mut spec.webhooks));
    for (_name, bucket) in spec.components.buckets_mut() {
        *bucket = sanitize_object(std::mem::take(bucket));
    }
    spec.security = spec.security.map(sanitize_value);
    spec
}

pub fn sanitize_object(obj: GenericObject) -> GenericObject {
    obj.into_iter()
        .map(|(k, v)| (k, sanitize_value(v)))
        .collect()
}

/// Scalars pass through unchanged; sequences and mappings are rebuilt with
/// sanitized children. Colliding keys after stringification keep the last
/// value.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(sanitize_value).collect()),
        Value::Object(obj) => Value::Object(sanitize_object(obj)),
        Value::Mapping(pairs) => Value::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (sanitize_value(k).to_key_string(), sanitize_value(v)))
                .collect(),
        ),
        scalar => scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(input: &str) -> Value {
        serde_yaml_ng::from_str(input).unwrap()
    }

    fn has_mapping(value: &Value) -> bool {
        match value {
            Value::Mapping(_) => true,
            Value::Sequence(items) => items.iter().any(has_mapping),
            Value::Object(obj) => obj.values().any(has_mapping),
            _ => false,
        }
    }

    const RESPONSES: &str = r#"
get:
  responses:
    200:
      description: ok
      content:
        application/json:
          examples:
            - { 1: one, true: yes-key }
    default:
      description: error
"#;

    #[test]
    fn test_non_string_keys_are_stringified() {
        let value = sanitize_value(yaml(RESPONSES));
        assert!(!has_mapping(&value));

        let responses = &value["get"]["responses"];
        assert_eq!(responses["200"]["description"], Value::from("ok"));
        assert_eq!(responses["default"]["description"], Value::from("error"));

        let example = &responses["200"]["content"]["application/json"]["examples"]
            .as_sequence()
            .unwrap()[0];
        assert_eq!(example["1"], Value::from("one"));
        assert_eq!(example["true"], Value::from("yes-key"));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let once = sanitize_value(yaml(RESPONSES));
        let twice = sanitize_value(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_scalars_pass_through() {
        for input in ["42", "true", "null", "hello", "2.5"] {
            let value = yaml(input);
            assert_eq!(sanitize_value(value.clone()), value);
        }
    }

    #[test]
    fn test_sanitized_tree_serializes_to_json() {
        let value = sanitize_value(yaml(RESPONSES));
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["get"]["responses"]["200"]["description"], "ok");
    }

    #[test]
    fn test_sanitize_spec_covers_components() {
        let mut spec: Spec = serde_yaml_ng::from_str(
            "openapi: 3.0.0\ninfo: { title: T, version: '1' }\n",
        )
        .unwrap();
        spec.components
            .examples
            .insert("Codes".to_string(), yaml("1: one\n2: two\n"));
        spec.paths
            .insert("/x".to_string(), yaml("get:\n  responses:\n    204: {}\n"));

        let spec = sanitize_spec(spec);
        assert_eq!(spec.components.examples["Codes"]["2"], Value::from("two"));
        assert!(spec.paths["/x"]["get"]["responses"].get("204").is_some());
    }
}
