//! Entity model.
//!
//! Entities are read through an explicit [`TypeDescriptor`] that each entity
//! type registers: its name, its parent type (if any) and its own fields in
//! declaration order, each tagged with a [`FieldKind`]. Values are fetched one
//! field at a time through [`Entity::read`], which is where lazily loaded
//! associations get a chance to fail.

pub mod record;
pub mod value;

#[cfg(test)]
pub(crate) mod fixtures;

pub use record::{RecordEntity, RecordError};
pub use relay_sdk::objects::FieldKind;
pub use value::Value;

use crate::mapping::MappingError;
use compact_str::CompactString;
use std::sync::Arc;

/// A committed entity instance, as seen by the engine.
///
/// The engine only reads through this trait and drops its handle as soon as
/// the entity has been flattened.
pub trait Entity: Send + Sync + std::fmt::Debug {
    /// Descriptor of the entity's runtime type.
    fn descriptor(&self) -> &TypeDescriptor;

    /// Read the field `field` declared on the type named `owner`.
    ///
    /// `owner` disambiguates a field redeclared by a subtype.
    ///
    /// An association must return the same allocation each time the same
    /// related entity is reached; cycles are detected by address. To-many
    /// fields are not read when related entities are reduced to identifiers.
    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError>;

    /// Conventional identifier accessor.
    ///
    /// Types without one return `None` and identifier resolution falls back
    /// to scanning the descriptor for an identifier field.
    fn id(&self) -> Option<Value> {
        None
    }

    /// Simple type name, used as the routing key.
    fn type_name(&self) -> &str {
        self.descriptor().name()
    }
}

/// Declared field of an entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: CompactString,
    kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<CompactString>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}

/// Registered shape of an entity type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: CompactString,
    parent: Option<Arc<TypeDescriptor>>,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
        }
    }

    /// Set the parent type whose fields are inherited.
    pub fn extends(mut self, parent: Arc<TypeDescriptor>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Declare the next field of this type.
    pub fn field(mut self, name: impl Into<CompactString>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor::new(name, kind));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&TypeDescriptor> {
        self.parent.as_deref()
    }

    /// Fields declared by this type only, excluding inherited ones.
    pub fn declared_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// This type and all its ancestors, most-base type first.
    pub fn lineage(&self) -> Vec<&TypeDescriptor> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(ty) = current {
            chain.push(ty);
            current = ty.parent();
        }
        chain.reverse();
        chain
    }

    /// Every declared and inherited field with its declaring type, most-base
    /// type first. Redeclared names appear once per declaring type.
    pub fn all_fields(&self) -> impl Iterator<Item = (&TypeDescriptor, &FieldDescriptor)> {
        self.lineage()
            .into_iter()
            .flat_map(|ty| ty.fields.iter().map(move |field| (ty, field)))
    }
}
