//! MSK / self-managed Kafka record batch.
//!
//! Lambda delivers Kafka records grouped by `"<topic>-<partition>"` key:
//!
//! ```json
//! { "eventSource": "aws:kafka",
//!   "records": { "orders-0": [ { "topic": "orders", "partition": 0, ... } ] } }
//! ```
//!
//! Older producers sent a flat array instead. Both layouts normalize into a
//! single flat list, partition groups concatenated in lexicographic key order.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::wire::{null_as_default, optional_base64_bytes};
use crate::RawEvent;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStreamEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_source_arn: String,
    /// Comma-separated broker list.
    #[serde(default, deserialize_with = "null_as_default")]
    pub bootstrap_servers: String,
    #[serde(deserialize_with = "deserialize_records")]
    pub records: Vec<LogStreamRecord>,
    /// The batch as delivered, partition grouping intact.
    #[serde(skip)]
    pub(crate) raw: RawEvent,
}

impl LogStreamEvent {
    pub fn raw(&self) -> &RawEvent {
        &self.raw
    }

    /// Returns the broker addresses listed in `bootstrapServers`.
    pub fn brokers(&self) -> impl Iterator<Item = &str> {
        self.bootstrap_servers
            .split(',')
            .map(str::trim)
            .filter(|broker| !broker.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStreamRecord {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    /// Milliseconds since the Unix epoch, passed through unconverted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: i64,
    /// `CREATE_TIME` or `LOG_APPEND_TIME`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp_type: String,
    /// Record key bytes; `None` for unkeyed records.
    #[serde(default, with = "optional_base64_bytes")]
    pub key: Option<Vec<u8>>,
    /// Record value bytes; `None` for tombstones.
    #[serde(default, with = "optional_base64_bytes")]
    pub value: Option<Vec<u8>>,
    /// Record headers; Lambda delivers each header value as an array of bytes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: Vec<BTreeMap<String, Vec<u8>>>,
}

fn deserialize_records<'de, D>(deserializer: D) -> Result<Vec<LogStreamRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RecordsVisitor;

    impl<'de> Visitor<'de> for RecordsVisitor {
        type Value = Vec<LogStreamRecord>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a topic-partition keyed map of record arrays, or a record array")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut records = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(record) = seq.next_element()? {
                records.push(record);
            }
            Ok(records)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut partitions = BTreeMap::new();
            while let Some((key, partition)) = map.next_entry::<String, Vec<LogStreamRecord>>()? {
                partitions.insert(key, partition);
            }
            Ok(partitions.into_values().flatten().collect())
        }
    }

    deserializer.deserialize_any(RecordsVisitor)
}
