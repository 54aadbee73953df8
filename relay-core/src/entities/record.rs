//! Self-describing entities received over the wire.
//!
//! A [`RecordDto`] carries its own field kinds, so it can be turned into an
//! [`Entity`] without a registered type. Values are converted up front: a
//! record that converts successfully never fails a later `read`.

use super::{Entity, FieldKind, TypeDescriptor, Value};
use crate::mapping::MappingError;
use relay_sdk::objects::{FieldDto, RecordDto, Temporal};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::{OffsetDateTime, PrimitiveDateTime};

/// Errors converting a [`RecordDto`] into a [`RecordEntity`].
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record type name is empty")]
    MissingTypeName,

    #[error("nested record is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("field `{type_name}.{field}` is declared more than once")]
    DuplicateField { type_name: String, field: String },

    #[error("field `{type_name}.{field}` of kind {kind:?} cannot hold a JSON {found}")]
    InvalidValue {
        type_name: String,
        field: String,
        kind: FieldKind,
        found: &'static str,
    },

    #[error("field `{type_name}.{field}` is not a valid {temporal:?}: {source}")]
    InvalidTemporal {
        type_name: String,
        field: String,
        temporal: Temporal,
        #[source]
        source: time::error::Parse,
    },
}

/// An entity built from a [`RecordDto`].
#[derive(Debug)]
pub struct RecordEntity {
    descriptor: TypeDescriptor,
    /// One value per declared field, in declaration order.
    values: Vec<Value>,
}

impl Entity for RecordEntity {
    fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        if owner != self.descriptor.name() {
            return Err(MappingError::inaccessible(owner, field, "record has no parent type"));
        }
        self.descriptor
            .declared_fields()
            .iter()
            .position(|f| f.name() == field)
            .and_then(|index| self.values.get(index))
            .cloned()
            .ok_or_else(|| MappingError::inaccessible(owner, field, "no such field"))
    }
}

impl TryFrom<RecordDto> for RecordEntity {
    type Error = RecordError;

    fn try_from(record: RecordDto) -> Result<Self, Self::Error> {
        if record.type_name.is_empty() {
            return Err(RecordError::MissingTypeName);
        }

        let mut seen = HashSet::new();
        let mut descriptor = TypeDescriptor::new(record.type_name.as_str());
        let mut values = Vec::with_capacity(record.fields.len());
        for field in record.fields {
            if !seen.insert(field.name.clone()) {
                return Err(RecordError::DuplicateField {
                    type_name: record.type_name,
                    field: field.name,
                });
            }
            let value = convert_field(&record.type_name, &field)?;
            descriptor = descriptor.field(field.name.as_str(), field.kind);
            values.push(value);
        }

        Ok(Self { descriptor, values })
    }
}

fn convert_field(type_name: &str, field: &FieldDto) -> Result<Value, RecordError> {
    use serde_json::Value as Json;

    let invalid = |found: &'static str| RecordError::InvalidValue {
        type_name: type_name.to_string(),
        field: field.name.clone(),
        kind: field.kind,
        found,
    };

    match (field.kind, &field.value) {
        (_, Json::Null) => Ok(Value::Null),

        (FieldKind::ToOne | FieldKind::EmbeddedId, Json::Object(_)) => {
            Ok(Value::Entity(nested(&field.value)?))
        }
        (FieldKind::ToOne | FieldKind::EmbeddedId, other) => Err(invalid(json_kind(other))),

        (FieldKind::ToMany, Json::Array(items)) => items
            .iter()
            .map(|item| match item {
                Json::Object(_) => nested(item),
                other => Err(invalid(json_kind(other))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Collection),
        (FieldKind::ToMany, other) => Err(invalid(json_kind(other))),

        (FieldKind::Scalar | FieldKind::Identifier, Json::String(text)) => match field.temporal {
            Some(temporal) => parse_temporal(text, temporal).map_err(|source| {
                RecordError::InvalidTemporal {
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                    temporal,
                    source,
                }
            }),
            None => Ok(Value::Text(text.clone())),
        },
        (FieldKind::Scalar | FieldKind::Identifier, _) if field.temporal.is_some() => {
            Err(invalid(json_kind(&field.value)))
        }
        (FieldKind::Scalar | FieldKind::Identifier, Json::Bool(b)) => Ok(Value::Bool(*b)),
        (FieldKind::Scalar | FieldKind::Identifier, Json::Number(n)) => Ok(number(n)),
        (FieldKind::Scalar | FieldKind::Identifier, other) => Err(invalid(json_kind(other))),
    }
}

fn nested(value: &serde_json::Value) -> Result<Arc<dyn Entity>, RecordError> {
    let record = RecordDto::deserialize(value)?;
    Ok(Arc::new(RecordEntity::try_from(record)?))
}

fn number(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else if let Some(u) = n.as_u64() {
        Value::Decimal(Decimal::from(u))
    } else {
        n.as_f64().map_or(Value::Null, Value::Float)
    }
}

fn parse_temporal(text: &str, temporal: Temporal) -> Result<Value, time::error::Parse> {
    match temporal {
        Temporal::LocalDateTime => {
            PrimitiveDateTime::parse(text, &Iso8601::DEFAULT).map(Value::LocalDateTime)
        }
        Temporal::OffsetDateTime => {
            OffsetDateTime::parse(text, &Rfc3339).map(Value::OffsetDateTime)
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
