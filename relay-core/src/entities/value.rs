use super::Entity;
use rust_decimal::Decimal;
use std::sync::Arc;
use time::{OffsetDateTime, PrimitiveDateTime};
use uuid::Uuid;

/// Raw value of an entity field, before normalization.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Uuid(Uuid),
    /// Date-time without zone information.
    LocalDateTime(PrimitiveDateTime),
    /// Date-time with an explicit UTC offset.
    OffsetDateTime(OffsetDateTime),
    /// A single associated entity (or a composite identifier object).
    Entity(Arc<dyn Entity>),
    /// A collection of associated entities.
    Collection(Vec<Arc<dyn Entity>>),
}

impl Value {
    pub fn entity<E: Entity + 'static>(entity: Arc<E>) -> Self {
        Value::Entity(entity)
    }

    pub fn collection<E: Entity + 'static>(items: impl IntoIterator<Item = Arc<E>>) -> Self {
        Value::Collection(
            items
                .into_iter()
                .map(|item| item as Arc<dyn Entity>)
                .collect(),
        )
    }

    /// Short name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Uuid(_) => "uuid",
            Value::LocalDateTime(_) => "local date-time",
            Value::OffsetDateTime(_) => "offset date-time",
            Value::Entity(_) => "entity",
            Value::Collection(_) => "collection",
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Value::Uuid(value)
    }
}

impl From<PrimitiveDateTime> for Value {
    fn from(value: PrimitiveDateTime) -> Self {
        Value::LocalDateTime(value)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(value: OffsetDateTime) -> Self {
        Value::OffsetDateTime(value)
    }
}
