// SPDX-FileCopyrightText: 2026 TermDash Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Format-independent configuration tree.
//!
//! [`ConfigValue`] is what the plugin resolver walks. It deserializes from any
//! self-describing serde format (TOML, JSON, Figment), so nothing downstream
//! depends on a particular file format. Map keys keep their original kind so
//! that non-string keys can be recognised and skipped.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, DeserializeOwned, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TermdashError;

/// Key of a [`ConfigValue::Map`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigKey {
    String(String),
    Integer(i64),
    Bool(bool),
}

impl ConfigKey {
    /// Returns the key text if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigKey::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey::String(s.to_string())
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey::String(s)
    }
}

impl From<i64> for ConfigKey {
    fn from(n: i64) -> Self {
        ConfigKey::Integer(n)
    }
}

/// Ordered map node of the configuration tree.
pub type ConfigMap = BTreeMap<ConfigKey, ConfigValue>;

/// A node in the configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Map(ConfigMap),
}

impl Default for ConfigValue {
    fn default() -> Self {
        ConfigValue::Map(ConfigMap::new())
    }
}

impl ConfigValue {
    /// Returns the map if this node is a mapping.
    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the boolean if this node is exactly a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a string key on a mapping node.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_map()
            .and_then(|m| m.get(&ConfigKey::String(key.to_string())))
    }

    /// Short name of the node's kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "table",
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Integer(n) => write!(f, "{n}"),
            ConfigValue::Float(n) => write!(f, "{n}"),
            ConfigValue::String(s) => write!(f, "{s:?}"),
            ConfigValue::List(items) => write!(f, "<list of {}>", items.len()),
            ConfigValue::Map(m) => write!(f, "<table of {}>", m.len()),
        }
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::List(items.into_iter().map(ConfigValue::from).collect())
            }
            serde_json::Value::Object(obj) => ConfigValue::Map(
                obj.into_iter()
                    .map(|(k, v)| (ConfigKey::String(k), ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for ConfigKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigKey::String(s) => serializer.serialize_str(s),
            ConfigKey::Integer(n) => serializer.serialize_i64(*n),
            ConfigKey::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::Integer(n) => serializer.serialize_i64(*n),
            ConfigValue::Float(n) => serializer.serialize_f64(*n),
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::List(items) => items.serialize(serializer),
            ConfigValue::Map(m) => m.serialize(serializer),
        }
    }
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = ConfigKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, integer, or boolean map key")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ConfigKey, E> {
        Ok(ConfigKey::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ConfigKey, E> {
        Ok(ConfigKey::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ConfigKey, E> {
        i64::try_from(v)
            .map(ConfigKey::Integer)
            .map_err(|_| E::custom(format!("map key {v} is out of range")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ConfigKey, E> {
        Ok(ConfigKey::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ConfigKey, E> {
        Ok(ConfigKey::String(v))
    }
}

impl<'de> Deserialize<'de> for ConfigKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = ConfigValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any configuration value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ConfigValue, E> {
        Ok(match i64::try_from(v) {
            Ok(n) => ConfigValue::Integer(n),
            Err(_) => ConfigValue::Float(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ConfigValue, E> {
        Ok(ConfigValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ConfigValue, E> {
        Ok(ConfigValue::String(v))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<ConfigValue, E> {
        Ok(ConfigValue::String(v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<ConfigValue, E> {
        Ok(ConfigValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<ConfigValue, D::Error> {
        ConfigValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ConfigValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(ConfigValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ConfigValue, A::Error> {
        let mut map = ConfigMap::new();
        while let Some((key, value)) = access.next_entry::<ConfigKey, ConfigValue>()? {
            map.insert(key, value);
        }
        Ok(ConfigValue::Map(map))
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Configuration record handed to a single plugin's factory.
///
/// Built from the plugin's table in the `modules` tree; only string keys
/// survive. Always contains `enabled` when it came from a flattened table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PluginConfig(BTreeMap<String, ConfigValue>);

impl PluginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a mapping node, dropping non-string keys.
    pub fn from_map(map: &ConfigMap) -> Self {
        Self(
            map.iter()
                .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), v.clone())))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) {
        self.0.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the record as a JSON object.
    pub fn to_json(&self) -> Result<serde_json::Value, TermdashError> {
        serde_json::to_value(self).map_err(|e| TermdashError::Config(e.to_string()))
    }

    /// Deserializes the record into a plugin-specific settings struct.
    ///
    /// Unknown keys (including `enabled`) are ignored unless `T` denies them.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, TermdashError> {
        let json = self.to_json()?;
        serde_json::from_value(json).map_err(|e| TermdashError::Config(format!("invalid plugin config: {e}")))
    }
}
