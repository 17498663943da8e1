//! The closed set of producer shapes an incoming event can take.

use serde::{Deserialize, Serialize};

/// Producer-shape category assigned to a raw event by the classifier.
///
/// The set is closed: adding a producer is a compile-time-checked change that
/// touches every exhaustive `match` over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// API Gateway REST proxy request envelope.
    HttpGateway,
    /// SQS message batch.
    Queue,
    /// S3 notification batch.
    ObjectStore,
    /// DynamoDB Streams change record batch.
    ChangeStream,
    /// Kinesis data stream record batch.
    DataStream,
    /// SNS notification batch.
    PubSub,
    /// EventBridge / CloudWatch Events envelope (including scheduled events).
    Bus,
    /// MSK or self-managed Kafka record batch keyed by topic-partition.
    LogStream,
    /// No known producer shape matched.
    Unclassified,
}

impl EventKind {
    /// Every kind the classifier can positively identify, in classification
    /// precedence order. [`EventKind::Unclassified`] is not included.
    pub const ALL: [EventKind; 8] = [
        EventKind::HttpGateway,
        EventKind::Bus,
        EventKind::Queue,
        EventKind::ObjectStore,
        EventKind::ChangeStream,
        EventKind::DataStream,
        EventKind::PubSub,
        EventKind::LogStream,
    ];

    /// Returns the stable snake_case label used in logs and serialised output.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::HttpGateway => "http_gateway",
            EventKind::Queue => "queue",
            EventKind::ObjectStore => "object_store",
            EventKind::ChangeStream => "change_stream",
            EventKind::DataStream => "data_stream",
            EventKind::PubSub => "pub_sub",
            EventKind::Bus => "bus",
            EventKind::LogStream => "log_stream",
            EventKind::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
