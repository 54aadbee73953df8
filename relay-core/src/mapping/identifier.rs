use super::MappingError;
use super::normalize::normalize;
use crate::entities::{Entity, FieldKind, Value};
use relay_sdk::objects::{FlattenedPayload, PayloadValue};
use tracing::debug;

/// Resolve the identifier value of an entity.
///
/// Uses the entity's identifier accessor when it has one, otherwise the first
/// declared or inherited identifier field (a plain identifier is preferred
/// over a composite one). Any failure degrades to null.
pub fn resolve_id(entity: &dyn Entity) -> PayloadValue {
    let Some(value) = entity.id().or_else(|| scan_identifier(entity)) else {
        return PayloadValue::Null;
    };

    let resolved = match value {
        Value::Entity(composite) => composite_id(composite.as_ref()).map(PayloadValue::Object),
        other => normalize("id", other),
    };

    resolved.unwrap_or_else(|e| {
        debug!(
            entity_type = entity.type_name(),
            error = %e,
            "Identifier could not be rendered, using null"
        );
        PayloadValue::Null
    })
}

/// Flatten the fields declared directly on a composite identifier object.
pub(super) fn composite_id(id: &dyn Entity) -> Result<FlattenedPayload, MappingError> {
    let descriptor = id.descriptor();
    let mut payload = FlattenedPayload::new();
    for field in descriptor.declared_fields() {
        let value = id.read(descriptor.name(), field.name())?;
        payload.insert(field.name(), normalize(field.name(), value)?);
    }
    Ok(payload)
}

fn scan_identifier(entity: &dyn Entity) -> Option<Value> {
    let descriptor = entity.descriptor();
    let (owner, field) = descriptor
        .all_fields()
        .find(|(_, field)| field.kind() == FieldKind::Identifier)
        .or_else(|| {
            descriptor
                .all_fields()
                .find(|(_, field)| field.kind() == FieldKind::EmbeddedId)
        })?;

    match entity.read(owner.name(), field.name()) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(
                entity_type = entity.type_name(),
                field = field.name(),
                error = %e,
                "Identifier field is not readable"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::fixtures::{Customer, DetachedCustomer, OrderLine, Warehouse};

    #[test]
    fn test_accessor_takes_precedence() {
        let warehouse = Warehouse {
            code: "NORTH".to_string(),
        };
        assert_eq!(resolve_id(&warehouse), PayloadValue::from("WH-NORTH"));
    }

    #[test]
    fn test_inherited_identifier_field_is_found() {
        let customer = Customer::new(17, "ACME");
        assert_eq!(resolve_id(customer.as_ref()), PayloadValue::Int(17));
    }

    #[test]
    fn test_composite_identifier_becomes_object() {
        let line = OrderLine::new(5, 2, "SKU-1", 3);
        let id = resolve_id(line.as_ref());
        let object = id.as_object().unwrap();
        assert_eq!(object.get("order_id"), Some(&PayloadValue::Int(5)));
        assert_eq!(object.get("line_no"), Some(&PayloadValue::Int(2)));
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn test_unreadable_identifier_degrades_to_null() {
        assert_eq!(resolve_id(&DetachedCustomer), PayloadValue::Null);
    }
}
