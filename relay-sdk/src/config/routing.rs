//! Per entity type routing configuration.

use serde::{Deserialize, Serialize};

/// Where and how changes of one entity type are published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingEntry {
    /// Sent as the `GT2-Interface-ID` header.
    pub routing_id: String,
    /// Destination topic. Not validated; a bad topic fails at send time.
    pub topic: String,
    /// Embed related entities inline (`true`) or reduce them to identifiers
    /// and empty collections (`false`).
    #[serde(default = "default_flatten_mode")]
    pub flatten_mode: bool,
}

fn default_flatten_mode() -> bool {
    true
}

impl RoutingEntry {
    pub fn new(routing_id: impl Into<String>, topic: impl Into<String>, flatten_mode: bool) -> Self {
        Self {
            routing_id: routing_id.into(),
            topic: topic.into(),
            flatten_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_mode_defaults_to_true() {
        let entry: RoutingEntry =
            serde_json::from_str(r#"{"routing_id": "ORD-1", "topic": "orders"}"#).unwrap();
        assert!(entry.flatten_mode);
        assert_eq!(entry, RoutingEntry::new("ORD-1", "orders", true));
    }
}
