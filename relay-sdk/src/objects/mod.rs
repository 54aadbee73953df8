pub mod change;
pub mod envelope;
pub mod payload;

pub use change::{ChangeKind, ChangeNotification, FieldDto, FieldKind, RecordDto, Temporal};
pub use envelope::{
    DATE_TIME_HEADER, DESTINATION_CHANNEL_HEADER, Envelope, Header, INTEGRATION_ID_HEADER,
    INTERFACE_ID_HEADER, SOURCE_SYSTEM, SOURCE_SYSTEM_HEADER, TYPE_NAME_HEADER,
};
pub use payload::{FlattenedPayload, PayloadValue};
