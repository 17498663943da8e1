//! S3 event notification batch.

use serde::{Deserialize, Serialize};

use crate::wire::null_as_default;
use crate::RawEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectStoreEvent {
    #[serde(rename = "Records")]
    pub records: Vec<ObjectStoreRecord>,
    #[serde(skip)]
    pub(crate) raw: RawEvent,
}

impl ObjectStoreEvent {
    /// The batch exactly as delivered, including fields the records do not model.
    pub fn raw(&self) -> &RawEvent {
        &self.raw
    }
}

/// One object notification (e.g. `ObjectCreated:Put`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStoreRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub aws_region: String,
    /// ISO-8601 text, passed through unparsed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_time: String,
    pub event_name: String,
    pub s3: ObjectStoreEntity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStoreEntity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub s3_schema_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub configuration_id: String,
    pub bucket: Bucket,
    pub object: StoredObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    /// URL-encoded object key, exactly as delivered.
    pub key: String,
    /// Absent for deletion events.
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,
    #[serde(rename = "eTag", default, deserialize_with = "null_as_default")]
    pub etag: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sequencer: String,
}
