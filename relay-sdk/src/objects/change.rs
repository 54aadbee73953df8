//! Change notifications accepted by the HTTP intake.
//!
//! A notification carries a self-describing record: every field states its
//! kind, so the engine can flatten it without knowing the entity type ahead
//! of time.

use serde::{Deserialize, Serialize};

/// Which kind of committed row-level change produced the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Insert => write!(f, "insert"),
            ChangeKind::Update => write!(f, "update"),
        }
    }
}

/// How a field participates in flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A plain column.
    Scalar,
    /// The primary identifier column.
    Identifier,
    /// A composite identifier whose own fields are promoted to the parent.
    EmbeddedId,
    /// A single associated entity.
    ToOne,
    /// A collection of associated entities.
    ToMany,
}

/// Date-time interpretation for a string field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temporal {
    /// `2024-05-01T10:15:30` with no zone information.
    LocalDateTime,
    /// `2024-05-01T10:15:30+03:00`.
    OffsetDateTime,
}

/// A field of a [`RecordDto`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDto {
    pub name: String,
    #[serde(default = "default_field_kind")]
    pub kind: FieldKind,
    /// Scalars are plain JSON values. `to_one` and `embedded_id` fields hold
    /// a nested record (or null), `to_many` fields an array of records.
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal: Option<Temporal>,
}

fn default_field_kind() -> FieldKind {
    FieldKind::Scalar
}

/// A committed entity in self-describing form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDto {
    /// Simple entity type name, matched case-sensitively against the routing table.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub fields: Vec<FieldDto>,
}

/// Body of `POST /api/v1/changes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeNotification {
    pub kind: ChangeKind,
    pub entity: RecordDto,
}
