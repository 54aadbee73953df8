use super::MappingError;
use super::identifier::{composite_id, resolve_id};
use super::normalize::normalize;
use crate::entities::{Entity, FieldKind, Value};
use relay_sdk::objects::{FlattenedPayload, PayloadValue};
use tracing::debug;

/// Deepest chain of nested entities followed before giving up.
pub const MAX_DEPTH: usize = 64;

/// Flatten an entity into a field name to value map.
///
/// With `flatten_mode` on, to-one associations are embedded as nested maps
/// and to-many associations as lists of maps. With it off, to-one
/// associations are reduced to their identifier and to-many associations to
/// an empty list, without being read.
///
/// Composite identifiers are always merged into the enclosing map.
pub fn flatten(entity: &dyn Entity, flatten_mode: bool) -> Result<FlattenedPayload, MappingError> {
    Walk {
        flatten_mode,
        path: Vec::new(),
    }
    .entity(entity)
}

struct Walk {
    flatten_mode: bool,
    /// Addresses of the entities currently being flattened, root first.
    path: Vec<usize>,
}

impl Walk {
    fn entity(&mut self, entity: &dyn Entity) -> Result<FlattenedPayload, MappingError> {
        let address = (entity as *const dyn Entity).cast::<()>() as usize;
        if self.path.contains(&address) {
            return Err(MappingError::Cycle {
                type_name: entity.type_name().into(),
            });
        }
        if self.path.len() >= MAX_DEPTH {
            return Err(MappingError::DepthExceeded {
                type_name: entity.type_name().into(),
                depth: MAX_DEPTH,
            });
        }

        self.path.push(address);
        let result = self.fields(entity);
        self.path.pop();
        result
    }

    fn fields(&mut self, entity: &dyn Entity) -> Result<FlattenedPayload, MappingError> {
        let mut payload = FlattenedPayload::new();
        for (owner, field) in entity.descriptor().all_fields() {
            let name = field.name();
            if field.kind() == FieldKind::ToMany && !self.flatten_mode {
                payload.insert(name, PayloadValue::List(Vec::new()));
                continue;
            }
            let value = entity.read(owner.name(), name)?;
            match field.kind() {
                FieldKind::EmbeddedId => merge_embedded_id(&mut payload, name, value)?,
                FieldKind::ToOne => {
                    let value = self.to_one(name, value)?;
                    payload.insert(name, value);
                }
                FieldKind::ToMany => {
                    let value = self.to_many(name, value)?;
                    payload.insert(name, value);
                }
                FieldKind::Scalar | FieldKind::Identifier => {
                    payload.insert(name, normalize(name, value)?);
                }
            }
        }
        Ok(payload)
    }

    fn to_one(&mut self, field: &str, value: Value) -> Result<PayloadValue, MappingError> {
        match value {
            Value::Entity(related) if self.flatten_mode => {
                Ok(PayloadValue::Object(self.entity(related.as_ref())?))
            }
            Value::Entity(related) => Ok(resolve_id(related.as_ref())),
            Value::Null => Ok(PayloadValue::Null),
            other => {
                debug!(field, found = other.kind_name(), "To-one field holds no entity, using null");
                Ok(PayloadValue::Null)
            }
        }
    }

    fn to_many(&mut self, field: &str, value: Value) -> Result<PayloadValue, MappingError> {
        match value {
            Value::Collection(items) => items
                .iter()
                .map(|item| self.entity(item.as_ref()))
                .collect::<Result<Vec<_>, _>>()
                .map(PayloadValue::List),
            Value::Null => Ok(PayloadValue::Null),
            other => {
                debug!(field, found = other.kind_name(), "To-many field holds no collection, using null");
                Ok(PayloadValue::Null)
            }
        }
    }
}

fn merge_embedded_id(
    payload: &mut FlattenedPayload,
    field: &str,
    value: Value,
) -> Result<(), MappingError> {
    match value {
        Value::Entity(id) => {
            for (name, value) in composite_id(id.as_ref())? {
                payload.insert(name, value);
            }
            Ok(())
        }
        Value::Null => Ok(()),
        other => Err(MappingError::UnsupportedValue {
            field: field.into(),
            found: other.kind_name(),
        }),
    }
}
