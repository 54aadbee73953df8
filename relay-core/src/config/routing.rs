use compact_str::CompactString;
use relay_sdk::config::RoutingEntry;
use std::collections::HashMap;

/// Entity type name to [`RoutingEntry`] lookup.
///
/// Names are matched case-sensitively. A missing name means the entity type
/// is not published.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    entries: HashMap<CompactString, RoutingEntry>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for an entity type.
    pub fn with_entry(mut self, type_name: impl Into<CompactString>, entry: RoutingEntry) -> Self {
        self.entries.insert(type_name.into(), entry);
        self
    }

    pub fn lookup(&self, type_name: &str) -> Option<&RoutingEntry> {
        self.entries.get(type_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<CompactString>> FromIterator<(K, RoutingEntry)> for RoutingTable {
    fn from_iter<I: IntoIterator<Item = (K, RoutingEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = RoutingTable::new().with_entry("Order", RoutingEntry::new("ORD-1", "orders", false));

        assert_eq!(table.lookup("Order").map(|e| e.topic.as_str()), Some("orders"));
        assert!(table.lookup("order").is_none());
        assert!(table.lookup("Shipment").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_empty_topic_is_accepted() {
        let table: RoutingTable = [("Order", RoutingEntry::new("ORD-1", "", true))]
            .into_iter()
            .collect();
        assert_eq!(table.lookup("Order").map(|e| e.topic.as_str()), Some(""));
    }
}
