//! Event domain for the Lambda event router.
//!
//! This crate defines the closed set of producer shapes ([`EventKind`]), the
//! strongly-typed record for each shape, and the pure [`normalize`] functions
//! that turn an untyped [`RawEvent`] into one of those records. It performs
//! no I/O and knows nothing about routing; the `router` crate decides *which*
//! kind an event is, this crate decides *what* it contains.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`kind`] | [`EventKind`] |
//! | [`normalize`](mod@normalize) | [`NormalizedEvent`] and one normalizer per kind |
//! | [`http`] | API Gateway REST proxy request |
//! | [`queue`] | SQS message batch |
//! | [`object_store`] | S3 notification batch |
//! | [`change_stream`] | DynamoDB Streams batch |
//! | [`data_stream`] | Kinesis batch |
//! | [`pub_sub`] | SNS batch |
//! | [`bus`] | EventBridge envelope |
//! | [`log_stream`] | MSK / self-managed Kafka batch |
//! | [`custom`] | Generic wrapper for unclassified events |
//! | [`wire`] | Serde helpers for AWS wire conventions |
//! | [`errors`] | [`ParseError`] |
//!
//! ## Wire Compatibility
//!
//! Field names are the AWS names, byte for byte. Records serialise back to the
//! same names, with decoded binary fields re-encoded as base64.

pub mod bus;
pub mod change_stream;
pub mod custom;
pub mod data_stream;
pub mod errors;
pub mod http;
pub mod kind;
pub mod log_stream;
pub mod normalize;
pub mod object_store;
pub mod pub_sub;
pub mod queue;
pub mod wire;

/// An untyped event payload exactly as the runtime delivered it.
///
/// Usually a JSON object; any other JSON value is legal and simply matches
/// no producer shape.
pub type RawEvent = serde_json::Value;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use bus::BusEvent;
pub use change_stream::{AttributeMap, ChangeStreamEvent, ChangeStreamRecord, StreamRecord};
pub use custom::CustomEvent;
pub use data_stream::{DataStreamEvent, DataStreamRecord, StreamPayload};
pub use errors::ParseError;
pub use http::{HttpGatewayEvent, MultiValueMap, RequestContext, RequestIdentity, StringMap};
pub use kind::EventKind;
pub use log_stream::{LogStreamEvent, LogStreamRecord};
pub use normalize::{
    normalize, normalize_bus, normalize_change_stream, normalize_custom, normalize_data_stream,
    normalize_http_gateway, normalize_log_stream, normalize_object_store, normalize_pub_sub,
    normalize_queue, NormalizedEvent,
};
pub use object_store::{Bucket, ObjectStoreEntity, ObjectStoreEvent, ObjectStoreRecord, StoredObject};
pub use pub_sub::{Notification, NotificationAttribute, PubSubEvent, PubSubRecord};
pub use queue::{MessageAttribute, QueueEvent, QueueMessage};
