use super::MappingError;
use crate::entities::Value;
use crate::utils::iso8601::{format_local, format_offset};
use relay_sdk::objects::PayloadValue;

/// Convert a plain field value into its payload form.
///
/// Date-times become ISO-8601 strings. Associations are rejected: they are
/// only meaningful in relation fields.
pub(super) fn normalize(field: &str, value: Value) -> Result<PayloadValue, MappingError> {
    Ok(match value {
        Value::Null => PayloadValue::Null,
        Value::Bool(v) => PayloadValue::Bool(v),
        Value::Int(v) => PayloadValue::Int(v),
        Value::Float(v) => PayloadValue::Float(v),
        Value::Decimal(v) => PayloadValue::Decimal(v),
        Value::Text(v) => PayloadValue::Text(v),
        Value::Uuid(v) => PayloadValue::Uuid(v),
        Value::LocalDateTime(v) => PayloadValue::Text(format_local(v)?),
        Value::OffsetDateTime(v) => PayloadValue::Text(format_offset(v)?),
        other @ (Value::Entity(_) | Value::Collection(_)) => {
            return Err(MappingError::UnsupportedValue {
                field: field.into(),
                found: other.kind_name(),
            });
        }
    })
}
