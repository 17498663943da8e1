//! SQS message batch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::wire::null_as_default;
use crate::RawEvent;

/// A batch of queue messages, in delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEvent {
    #[serde(rename = "Records")]
    pub records: Vec<QueueMessage>,
    #[serde(skip)]
    pub(crate) raw: RawEvent,
}

impl QueueEvent {
    /// The batch exactly as delivered, including fields the records do not model.
    pub fn raw(&self) -> &RawEvent {
        &self.raw
    }
}

/// One queue message. The body is text; SQS never delivers binary bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMessage {
    pub message_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub receipt_handle: String,

    pub body: String,

    /// System attributes (`ApproximateReceiveCount`, `SentTimestamp`, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: BTreeMap<String, String>,

    /// Producer-supplied message attributes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_attributes: BTreeMap<String, MessageAttribute>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub md5_of_body: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub event_source: String,

    #[serde(rename = "eventSourceARN", default, deserialize_with = "null_as_default")]
    pub event_source_arn: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub aws_region: String,
}

/// A typed message attribute value.
///
/// `binary_value` is kept as the base64 text SQS delivers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAttribute {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_type: String,
    #[serde(default)]
    pub string_value: Option<String>,
    #[serde(default)]
    pub binary_value: Option<String>,
}
