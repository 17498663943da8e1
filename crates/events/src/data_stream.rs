//! Kinesis data stream record batch.

use serde::{Deserialize, Serialize};

use crate::wire::{base64_bytes, null_as_default};
use crate::RawEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStreamEvent {
    #[serde(rename = "Records")]
    pub records: Vec<DataStreamRecord>,
    #[serde(skip)]
    pub(crate) raw: RawEvent,
}

impl DataStreamEvent {
    /// The batch exactly as delivered, including fields the records do not model.
    pub fn raw(&self) -> &RawEvent {
        &self.raw
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStreamRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_version: String,
    #[serde(rename = "eventID", default, deserialize_with = "null_as_default")]
    pub event_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub invoke_identity_arn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aws_region: String,
    #[serde(rename = "eventSourceARN", default, deserialize_with = "null_as_default")]
    pub event_source_arn: String,
    pub kinesis: StreamPayload,
}

/// The producer's payload plus its shard placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub kinesis_schema_version: String,
    pub partition_key: String,
    pub sequence_number: String,
    /// Payload bytes, decoded from the base64 wire text.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// Epoch seconds with fractional milliseconds, passed through unconverted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub approximate_arrival_timestamp: f64,
}
