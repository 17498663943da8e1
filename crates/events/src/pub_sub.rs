//! SNS notification batch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::wire::null_as_default;
use crate::RawEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubSubEvent {
    #[serde(rename = "Records")]
    pub records: Vec<PubSubRecord>,
    #[serde(skip)]
    pub(crate) raw: RawEvent,
}

impl PubSubEvent {
    /// The batch exactly as delivered, including fields the records do not model.
    pub fn raw(&self) -> &RawEvent {
        &self.raw
    }
}

/// SNS uses PascalCase keys throughout, unlike the other record batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PubSubRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_subscription_arn: String,
    pub sns: Notification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Notification {
    #[serde(rename = "Type", default, deserialize_with = "null_as_default")]
    pub notification_type: String,
    pub message_id: String,
    pub topic_arn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    pub message: String,
    /// ISO-8601 text, passed through unparsed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signature_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub signature: String,
    #[serde(rename = "SigningCertUrl", default, deserialize_with = "null_as_default")]
    pub signing_cert_url: String,
    #[serde(rename = "UnsubscribeUrl", default, deserialize_with = "null_as_default")]
    pub unsubscribe_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_attributes: BTreeMap<String, NotificationAttribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationAttribute {
    #[serde(rename = "Type", default, deserialize_with = "null_as_default")]
    pub attribute_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}
