//! EventBridge / CloudWatch Events envelope, including scheduled events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::wire::null_as_default;
use crate::RawEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "detail-type")]
    pub detail_type: String,
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account: String,
    /// ISO-8601 text, passed through unparsed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: Vec<String>,
    /// Producer-defined payload, kept as raw JSON.
    #[serde(default = "empty_detail")]
    pub detail: Value,
    #[serde(skip)]
    pub(crate) raw: RawEvent,
}

impl BusEvent {
    pub fn raw(&self) -> &RawEvent {
        &self.raw
    }

    /// Returns `true` for events produced by a schedule rule.
    pub fn is_scheduled(&self) -> bool {
        self.source == "aws.events" && self.detail_type == "Scheduled Event"
    }
}

fn empty_detail() -> Value {
    Value::Object(serde_json::Map::new())
}
