use std::fmt;
use std::ops::Index;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yaml_ng::Number;

/// String-keyed mapping of arbitrary fragment content.
///
/// Keeps source order for output; equality ignores order.
pub type GenericObject = IndexMap<String, Value>;

static NULL: Value = Value::Null;

/// Any value found in an OpenAPI document whose shape is not modelled.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Object(GenericObject),
    /// A mapping with at least one non-string key, as YAML allows.
    /// Never present once a tree has been sanitized.
    Mapping(Vec<(Value, Value)>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&GenericObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut GenericObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Look up `key` in a string-keyed object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Render this value as a mapping key, the way it reads in the source.
    pub fn to_key_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// Missing keys and non-object values index to `Null`.
    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n.into())
    }
}

impl From<GenericObject> for Value {
    fn from(o: GenericObject) -> Self {
        Value::Object(o)
    }
}

impl From<Vec<Value>> for Value {
    fn from(s: Vec<Value>) -> Self {
        Value::Sequence(s)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(seq) => serializer.collect_seq(seq),
            Value::Object(obj) => serializer.collect_map(obj),
            Value::Mapping(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any YAML or JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut pairs: Vec<(Value, Value)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((k, v)) = map.next_entry()? {
            pairs.push((k, v));
        }

        if pairs.iter().all(|(k, _)| matches!(k, Value::String(_))) {
            let obj = pairs
                .into_iter()
                .filter_map(|(k, v)| match k {
                    Value::String(k) => Some((k, v)),
                    _ => None,
                })
                .collect();
            Ok(Value::Object(obj))
        } else {
            Ok(Value::Mapping(pairs))
        }
    }

    // YAML tags (`!foo value`) arrive as enums; the tag is dropped.
    fn visit_enum<A: de::EnumAccess<'de>>(self, data: A) -> Result<Value, A::Error> {
        let (_tag, variant): (String, _) = data.variant()?;
        variant.newtype_variant()
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_integer_keys_become_mapping() {
        let value: Value = serde_yaml_ng::from_str("200: ok\ndefault: error\n").unwrap();
        match value {
            Value::Mapping(pairs) => {
                assert_eq!(pairs.len(), 2);
                assert_eq!(pairs[0].0, Value::from(200u64));
                assert_eq!(pairs[1].0, Value::from("default"));
            }
            other => panic!("expected mapping, got {other:?}"),
        }
    }

    #[test]
    fn test_string_keys_become_object() {
        let value: Value = serde_yaml_ng::from_str("type: object\nrequired: [id]\n").unwrap();
        assert_eq!(value["type"], Value::from("object"));
        assert_eq!(
            value["required"],
            Value::Sequence(vec![Value::from("id")])
        );
        assert!(value["missing"].is_null());
    }

    #[test]
    fn test_json_and_yaml_agree() {
        let from_json: Value =
            serde_json::from_str(r##"{"maxItems": 100, "items": {"$ref": "#/x"}}"##).unwrap();
        let from_yaml: Value =
            serde_yaml_ng::from_str("items:\n  $ref: '#/x'\nmaxItems: 100\n").unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn test_key_strings() {
        assert_eq!(Value::from(404u64).to_key_string(), "404");
        assert_eq!(Value::from(true).to_key_string(), "true");
        assert_eq!(Value::Null.to_key_string(), "null");
        assert_eq!(Value::from(1.5).to_key_string(), "1.5");
        assert_eq!(
            Value::Sequence(vec![Value::from(1u64), Value::from("a")]).to_key_string(),
            r#"[1,"a"]"#
        );
    }

    #[test]
    fn test_serialize_json() {
        let value: Value = serde_yaml_ng::from_str("a: [1, true, null]\nb: x\n").unwrap();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"a":[1,true,null],"b":"x"}"#);
    }
}
