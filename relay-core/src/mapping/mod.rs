//! Entity to payload mapping.
//!
//! - [`flatten`] turns an entity graph into a [`FlattenedPayload`](relay_sdk::objects::FlattenedPayload)
//! - [`resolve_id`] reduces an entity to its identifier value

mod flatten;
mod identifier;
mod normalize;

pub use flatten::flatten;
pub use identifier::resolve_id;

use compact_str::CompactString;
use thiserror::Error;

/// Errors raised while reading an entity graph.
///
/// Any of these abandons the dispatch of the entity being flattened.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The field could not be read from the entity.
    #[error("field `{owner}.{field}` is not readable: {reason}")]
    Inaccessible {
        owner: CompactString,
        field: CompactString,
        reason: String,
    },

    /// A lazily loaded association could not be resolved.
    #[error("association `{owner}.{field}` could not be resolved: {reason}")]
    UnresolvedAssociation {
        owner: CompactString,
        field: CompactString,
        reason: String,
    },

    /// The field holds a value that cannot be carried by the payload.
    #[error("field `{field}` holds a {found} value, which cannot be published as a plain field")]
    UnsupportedValue {
        field: CompactString,
        found: &'static str,
    },

    /// Flattening re-entered an entity that is already being flattened.
    #[error("cyclic reference back to a `{type_name}` entity")]
    Cycle { type_name: CompactString },

    /// The entity graph nests deeper than the flattener follows.
    #[error("entity graph nested deeper than {depth} levels at a `{type_name}` entity")]
    DepthExceeded {
        type_name: CompactString,
        depth: usize,
    },

    /// A date-time value could not be rendered.
    #[error("date-time formatting error: {0}")]
    Format(#[from] time::error::Format),
}

impl MappingError {
    pub fn inaccessible(owner: &str, field: &str, reason: impl Into<String>) -> Self {
        MappingError::Inaccessible {
            owner: owner.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn unresolved(owner: &str, field: &str, reason: impl Into<String>) -> Self {
        MappingError::UnresolvedAssociation {
            owner: owner.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}
