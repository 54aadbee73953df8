//! Envelope construction: routing headers around a flattened payload.

use crate::utils::iso8601::format_offset;
use relay_sdk::config::RoutingEntry;
use relay_sdk::objects::{
    DATE_TIME_HEADER, DESTINATION_CHANNEL_HEADER, Envelope, FlattenedPayload, Header,
    INTEGRATION_ID_HEADER, INTERFACE_ID_HEADER, SOURCE_SYSTEM, SOURCE_SYSTEM_HEADER,
    TYPE_NAME_HEADER,
};
use time::OffsetDateTime;
use uuid::Uuid;

/// Builds envelopes with the fixed routing header set.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeBuilder {
    include_type_name_header: bool,
}

impl EnvelopeBuilder {
    pub fn new(include_type_name_header: bool) -> Self {
        Self {
            include_type_name_header,
        }
    }

    /// Build the routing headers for one message.
    ///
    /// The header names and order are fixed; the integration id and the
    /// timestamp are fresh on every call.
    pub fn build_headers(
        &self,
        routing_id: &str,
        type_name: &str,
    ) -> Result<Vec<Header>, time::error::Format> {
        let mut headers = vec![
            Header::new(INTEGRATION_ID_HEADER, Uuid::new_v4().to_string()),
            Header::new(SOURCE_SYSTEM_HEADER, SOURCE_SYSTEM),
            Header::new(INTERFACE_ID_HEADER, routing_id.to_owned()),
            Header::new(DESTINATION_CHANNEL_HEADER, bytes::Bytes::new()),
            Header::new(DATE_TIME_HEADER, format_offset(OffsetDateTime::now_utc())?),
        ];
        if self.include_type_name_header {
            headers.push(Header::new(TYPE_NAME_HEADER, type_name.to_owned()));
        }
        Ok(headers)
    }

    /// Wrap a payload for the topic of `entry`. Records carry no key.
    pub fn build(
        &self,
        entry: &RoutingEntry,
        type_name: &str,
        payload: FlattenedPayload,
    ) -> Result<Envelope, time::error::Format> {
        Ok(Envelope {
            topic: entry.topic.clone(),
            key: None,
            payload,
            headers: self.build_headers(&entry.routing_id, type_name)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::format_description::well_known::Rfc3339;

    fn names(headers: &[Header]) -> Vec<&str> {
        headers.iter().map(|h| h.name.as_str()).collect()
    }

    #[test]
    fn test_fixed_header_set() {
        let headers = EnvelopeBuilder::new(false)
            .build_headers("ORD-1", "Order")
            .unwrap();

        assert_eq!(
            names(&headers),
            vec![
                "GT2-Integration-ID",
                "GT2-Source-System",
                "GT2-Interface-ID",
                "GT2-Destination-Channel",
                "GT2-Date-Time",
            ]
        );
        assert!(Uuid::parse_str(headers[0].value_str().unwrap()).is_ok());
        assert_eq!(headers[1].value_str(), Some("MDM"));
        assert_eq!(headers[2].value_str(), Some("ORD-1"));
        assert!(headers[3].value.is_empty());
        let at = headers[4].value_str().unwrap();
        assert!(at.ends_with('Z'));
        assert!(OffsetDateTime::parse(at, &Rfc3339).is_ok());
    }

    #[test]
    fn test_type_name_header_is_appended_last() {
        let headers = EnvelopeBuilder::new(true)
            .build_headers("ORD-1", "Order")
            .unwrap();

        assert_eq!(headers.len(), 6);
        assert_eq!(headers[5].name, "TypeName");
        assert_eq!(headers[5].value_str(), Some("Order"));
    }

    #[test]
    fn test_integration_id_is_fresh_per_call() {
        let builder = EnvelopeBuilder::default();
        let first = builder.build_headers("X", "Order").unwrap();
        let second = builder.build_headers("X", "Order").unwrap();
        assert_ne!(first[0].value, second[0].value);
    }

    #[test]
    fn test_envelope_has_no_key() {
        let entry = RoutingEntry::new("ORD-1", "orders", false);
        let envelope = EnvelopeBuilder::default()
            .build(&entry, "Order", FlattenedPayload::new())
            .unwrap();

        assert_eq!(envelope.topic, "orders");
        assert!(envelope.key.is_none());
        assert_eq!(
            envelope.header(INTERFACE_ID_HEADER).and_then(Header::value_str),
            Some("ORD-1")
        );
    }
}
