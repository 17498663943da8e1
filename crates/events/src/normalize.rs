//! Conversion of a raw mapping into the typed record of a known kind.
//!
//! Every function here is pure and total for well-formed input of its kind.
//! Optional fields default to empty values; required fields never do.
//! Decoding runs directly over the borrowed [`RawEvent`]; the record then
//! keeps one copy of it so handlers can reach fields it does not model.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    BusEvent, ChangeStreamEvent, CustomEvent, DataStreamEvent, EventKind, HttpGatewayEvent,
    LogStreamEvent, ObjectStoreEvent, ParseError, PubSubEvent, QueueEvent, RawEvent,
};

/// One typed record per [`EventKind`].
///
/// [`EventKind::Unclassified`] events are carried as [`NormalizedEvent::Custom`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "event", rename_all = "snake_case")]
pub enum NormalizedEvent {
    HttpGateway(HttpGatewayEvent),
    Queue(QueueEvent),
    ObjectStore(ObjectStoreEvent),
    ChangeStream(ChangeStreamEvent),
    DataStream(DataStreamEvent),
    PubSub(PubSubEvent),
    Bus(BusEvent),
    LogStream(LogStreamEvent),
    Custom(CustomEvent),
}

impl NormalizedEvent {
    /// Returns the kind this record was normalized as.
    pub fn kind(&self) -> EventKind {
        match self {
            NormalizedEvent::HttpGateway(_) => EventKind::HttpGateway,
            NormalizedEvent::Queue(_) => EventKind::Queue,
            NormalizedEvent::ObjectStore(_) => EventKind::ObjectStore,
            NormalizedEvent::ChangeStream(_) => EventKind::ChangeStream,
            NormalizedEvent::DataStream(_) => EventKind::DataStream,
            NormalizedEvent::PubSub(_) => EventKind::PubSub,
            NormalizedEvent::Bus(_) => EventKind::Bus,
            NormalizedEvent::LogStream(_) => EventKind::LogStream,
            NormalizedEvent::Custom(_) => EventKind::Unclassified,
        }
    }

    /// Returns the event exactly as delivered.
    pub fn raw(&self) -> &RawEvent {
        match self {
            NormalizedEvent::HttpGateway(event) => event.raw(),
            NormalizedEvent::Queue(event) => event.raw(),
            NormalizedEvent::ObjectStore(event) => event.raw(),
            NormalizedEvent::ChangeStream(event) => event.raw(),
            NormalizedEvent::DataStream(event) => event.raw(),
            NormalizedEvent::PubSub(event) => event.raw(),
            NormalizedEvent::Bus(event) => event.raw(),
            NormalizedEvent::LogStream(event) => event.raw(),
            NormalizedEvent::Custom(event) => &event.data,
        }
    }
}

/// Normalizes `raw` as the record type of `kind`.
///
/// [`EventKind::Unclassified`] always succeeds and wraps the raw mapping.
pub fn normalize(kind: EventKind, raw: &RawEvent) -> Result<NormalizedEvent, ParseError> {
    let event = match kind {
        EventKind::HttpGateway => NormalizedEvent::HttpGateway(normalize_http_gateway(raw)?),
        EventKind::Queue => NormalizedEvent::Queue(normalize_queue(raw)?),
        EventKind::ObjectStore => NormalizedEvent::ObjectStore(normalize_object_store(raw)?),
        EventKind::ChangeStream => NormalizedEvent::ChangeStream(normalize_change_stream(raw)?),
        EventKind::DataStream => NormalizedEvent::DataStream(normalize_data_stream(raw)?),
        EventKind::PubSub => NormalizedEvent::PubSub(normalize_pub_sub(raw)?),
        EventKind::Bus => NormalizedEvent::Bus(normalize_bus(raw)?),
        EventKind::LogStream => NormalizedEvent::LogStream(normalize_log_stream(raw)?),
        EventKind::Unclassified => NormalizedEvent::Custom(normalize_custom(raw)),
    };
    Ok(event)
}

pub fn normalize_http_gateway(raw: &RawEvent) -> Result<HttpGatewayEvent, ParseError> {
    decode(EventKind::HttpGateway, raw)
}

pub fn normalize_queue(raw: &RawEvent) -> Result<QueueEvent, ParseError> {
    decode(EventKind::Queue, raw)
}

pub fn normalize_object_store(raw: &RawEvent) -> Result<ObjectStoreEvent, ParseError> {
    decode(EventKind::ObjectStore, raw)
}

pub fn normalize_change_stream(raw: &RawEvent) -> Result<ChangeStreamEvent, ParseError> {
    decode(EventKind::ChangeStream, raw)
}

/// Record payloads are base64-decoded into raw bytes.
pub fn normalize_data_stream(raw: &RawEvent) -> Result<DataStreamEvent, ParseError> {
    decode(EventKind::DataStream, raw)
}

pub fn normalize_pub_sub(raw: &RawEvent) -> Result<PubSubEvent, ParseError> {
    decode(EventKind::PubSub, raw)
}

pub fn normalize_bus(raw: &RawEvent) -> Result<BusEvent, ParseError> {
    decode(EventKind::Bus, raw)
}

/// Record keys and values are base64-decoded into raw bytes.
pub fn normalize_log_stream(raw: &RawEvent) -> Result<LogStreamEvent, ParseError> {
    decode(EventKind::LogStream, raw)
}

pub fn normalize_custom(raw: &RawEvent) -> CustomEvent {
    CustomEvent::new(raw.clone())
}

/// A typed record that remembers the mapping it was decoded from.
trait Record: DeserializeOwned {
    fn keep_raw(&mut self, raw: RawEvent);
}

macro_rules! impl_record {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Record for $ty {
                fn keep_raw(&mut self, raw: RawEvent) {
                    self.raw = raw;
                }
            }
        )+
    };
}

impl_record!(
    HttpGatewayEvent,
    QueueEvent,
    ObjectStoreEvent,
    ChangeStreamEvent,
    DataStreamEvent,
    PubSubEvent,
    BusEvent,
    LogStreamEvent,
);

fn decode<T: Record>(kind: EventKind, raw: &RawEvent) -> Result<T, ParseError> {
    let mut record = T::deserialize(raw).map_err(|source| ParseError::Malformed { kind, source })?;
    record.keep_raw(raw.clone());
    Ok(record)
}
