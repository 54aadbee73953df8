//! Broker envelope: topic, key, payload and routing headers.

use bytes::Bytes;
use compact_str::CompactString;

use super::payload::FlattenedPayload;

/// Unique identifier of a single published message.
pub const INTEGRATION_ID_HEADER: &str = "GT2-Integration-ID";
/// Name of the system the change originated in.
pub const SOURCE_SYSTEM_HEADER: &str = "GT2-Source-System";
/// Routing identifier of the entity type.
pub const INTERFACE_ID_HEADER: &str = "GT2-Interface-ID";
/// Reserved. Always present, always empty.
pub const DESTINATION_CHANNEL_HEADER: &str = "GT2-Destination-Channel";
/// Publication instant, ISO-8601 with offset.
pub const DATE_TIME_HEADER: &str = "GT2-Date-Time";
/// Entity type name, only sent when enabled in the engine configuration.
pub const TYPE_NAME_HEADER: &str = "TypeName";

/// Value of the [`SOURCE_SYSTEM_HEADER`] header.
pub const SOURCE_SYSTEM: &str = "MDM";

/// A single broker record header.
///
/// Headers are kept in a `Vec`, not a map: the same name may appear twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: CompactString,
    pub value: Bytes,
}

impl Header {
    pub fn new(name: impl Into<CompactString>, value: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The header value as UTF-8, if it is valid UTF-8.
    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }
}

/// Everything the broker client needs to send one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub topic: String,
    /// Always `None`; records are published without a key.
    pub key: Option<String>,
    pub payload: FlattenedPayload,
    pub headers: Vec<Header>,
}

impl Envelope {
    /// First header with the given name.
    pub fn header(&self, name: &str) -> Option<&Header> {
        self.headers.iter().find(|h| h.name == name)
    }
}
