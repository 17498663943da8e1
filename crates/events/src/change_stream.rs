//! DynamoDB Streams change record batch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::wire::null_as_default;
use crate::RawEvent;

/// Attribute map in DynamoDB's typed JSON encoding (`{"S": "..."}`,
/// `{"N": "..."}`, ...). Values are kept as raw JSON.
pub type AttributeMap = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeStreamEvent {
    #[serde(rename = "Records")]
    pub records: Vec<ChangeStreamRecord>,
    #[serde(skip)]
    pub(crate) raw: RawEvent,
}

impl ChangeStreamEvent {
    /// The batch exactly as delivered, including fields the records do not model.
    pub fn raw(&self) -> &RawEvent {
        &self.raw
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStreamRecord {
    #[serde(rename = "eventID", default, deserialize_with = "null_as_default")]
    pub event_id: String,
    /// `INSERT`, `MODIFY` or `REMOVE`.
    pub event_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aws_region: String,
    #[serde(rename = "eventSourceARN", default, deserialize_with = "null_as_default")]
    pub event_source_arn: String,
    pub dynamodb: StreamRecord,
}

impl ChangeStreamRecord {
    /// Returns `true` for a `REMOVE` record.
    pub fn is_removal(&self) -> bool {
        self.event_name == "REMOVE"
    }
}

/// Key and pre/post images of the changed item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub keys: AttributeMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_image: AttributeMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub old_image: AttributeMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sequence_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size_bytes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stream_view_type: String,
    /// Epoch seconds, passed through unconverted.
    #[serde(default)]
    pub approximate_creation_date_time: Option<f64>,
}
