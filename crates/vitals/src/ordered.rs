//! Insertion-ordered string-keyed map
//!
//! Monthly spend and performance metrics are JSON objects whose key order is
//! meaningful to the dashboard (months read left to right), so they keep the
//! order they were written in rather than sorting their keys.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
  entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
  fn default() -> Self {
    Self { entries: Vec::new() }
  }
}

impl<V> OrderedMap<V> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a value, replacing in place when the key already exists
  pub fn insert(&mut self, key: impl Into<String>, value: V) {
    let key = key.into();
    match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
      Some((_, slot)) => *slot = value,
      None => self.entries.push((key, value)),
    }
  }

  pub fn get(&self, key: &str) -> Option<&V> {
    self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
    self.entries.iter().map(|(key, value)| (key.as_str(), value))
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(key, _)| key.as_str())
  }

  pub fn values(&self) -> impl Iterator<Item = &V> {
    self.entries.iter().map(|(_, value)| value)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut map = Self::new();
    for (key, value) in iter {
      map.insert(key, value);
    }
    map
  }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for (key, value) in &self.entries {
      map.serialize_entry(key, value)?;
    }
    map.end()
  }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
  type Value = OrderedMap<V>;

  fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    formatter.write_str("a JSON object")
  }

  fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
    let mut map = OrderedMap::new();
    while let Some((key, value)) = access.next_entry::<String, V>()? {
      map.insert(key, value);
    }
    Ok(map)
  }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
  }
}

impl<V: JsonSchema> JsonSchema for OrderedMap<V> {
  fn schema_name() -> String {
    format!("Map_of_{}", V::schema_name())
  }

  fn json_schema(gen: &mut SchemaGenerator) -> Schema {
    <BTreeMap<String, V>>::json_schema(gen)
  }
}
