//! Flattened entity payloads as they are serialized onto the broker.

use compact_str::CompactString;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// A single value in a [`FlattenedPayload`].
///
/// Date-times are already rendered as ISO-8601 strings by the time they land
/// here, so there is no temporal variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Uuid(Uuid),
    /// A to-one relation flattened inline, or a composite identifier.
    Object(FlattenedPayload),
    /// A to-many relation. Always empty when the entity is routed with
    /// flatten mode off.
    List(Vec<FlattenedPayload>),
}

impl PayloadValue {
    pub fn as_object(&self) -> Option<&FlattenedPayload> {
        match self {
            PayloadValue::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FlattenedPayload]> {
        match self {
            PayloadValue::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PayloadValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<bool> for PayloadValue {
    fn from(value: bool) -> Self {
        PayloadValue::Bool(value)
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        PayloadValue::Int(value)
    }
}

impl From<f64> for PayloadValue {
    fn from(value: f64) -> Self {
        PayloadValue::Float(value)
    }
}

impl From<Decimal> for PayloadValue {
    fn from(value: Decimal) -> Self {
        PayloadValue::Decimal(value)
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        PayloadValue::Text(value)
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        PayloadValue::Text(value.to_string())
    }
}

impl From<Uuid> for PayloadValue {
    fn from(value: Uuid) -> Self {
        PayloadValue::Uuid(value)
    }
}

impl From<FlattenedPayload> for PayloadValue {
    fn from(value: FlattenedPayload) -> Self {
        PayloadValue::Object(value)
    }
}

/// Field name to value mapping produced by flattening one entity.
///
/// Keys keep the order in which fields were first inserted. Inserting an
/// existing key replaces the value but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlattenedPayload(IndexMap<CompactString, PayloadValue>);

impl FlattenedPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, returning the value it replaced, if any.
    pub fn insert(
        &mut self,
        name: impl Into<CompactString>,
        value: impl Into<PayloadValue>,
    ) -> Option<PayloadValue> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&PayloadValue> {
        self.0.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(CompactString::as_str)
    }

    /// Serialize the payload as a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl<K: Into<CompactString>, V: Into<PayloadValue>> FromIterator<(K, V)> for FlattenedPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for FlattenedPayload {
    type Item = (CompactString, PayloadValue);
    type IntoIter = indexmap::map::IntoIter<CompactString, PayloadValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
