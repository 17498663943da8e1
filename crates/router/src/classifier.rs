//! Structural classification of raw events.
//!
//! Most producer shapes carry no top-level discriminator, and several share a
//! top-level `Records` array, so the kind is inferred from structure. The
//! checks form a fixed, ordered list ([`RULES`]); the first rule that accepts
//! the event decides its kind. Only the first element of `Records` is ever
//! inspected, which keeps classification O(1) in the batch size.
//!
//! An event whose `Records` array is empty, and that has no other
//! distinguishing top-level field, is [`EventKind::Unclassified`].

use events::{EventKind, RawEvent};
use serde_json::{Map, Value};
use tracing::debug;

/// The parts of a raw event the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct Shape<'a> {
    /// Top-level mapping.
    pub top: &'a Map<String, Value>,
    /// First element of the top-level `Records` array, when it is a mapping.
    pub first_record: Option<&'a Map<String, Value>>,
}

/// A named discriminator predicate.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Short label, emitted in trace output when the rule fires.
    pub name: &'static str,
    check: fn(&Shape<'_>) -> Option<EventKind>,
}

impl Rule {
    /// Applies the rule, returning the kind it assigns if it accepts the event.
    pub fn apply(&self, shape: &Shape<'_>) -> Option<EventKind> {
        (self.check)(shape)
    }
}

/// Classification rules in precedence order.
pub const RULES: [Rule; 7] = [
    Rule { name: "http_method_and_path", check: http_method_and_path },
    Rule { name: "bus_envelope", check: bus_envelope },
    Rule { name: "producer_tag", check: producer_tag },
    Rule { name: "change_stream_images", check: change_stream_images },
    Rule { name: "data_stream_payload", check: data_stream_payload },
    Rule { name: "pub_sub_topic", check: pub_sub_topic },
    Rule { name: "log_stream_brokers", check: log_stream_brokers },
];

/// `eventSource` values carried inside batch records.
const RECORD_SOURCES: [(&str, EventKind); 5] = [
    ("aws:sqs", EventKind::Queue),
    ("aws:s3", EventKind::ObjectStore),
    ("aws:kinesis", EventKind::DataStream),
    ("aws:dynamodb", EventKind::ChangeStream),
    ("aws:sns", EventKind::PubSub),
];

/// Top-level `eventSource` values of log-stream batches.
const LOG_STREAM_SOURCES: [&str; 2] = ["aws:kafka", "aws:self-managed-kafka"];

/// Determines the producer shape of `raw`.
pub fn classify(raw: &RawEvent) -> EventKind {
    let Some(top) = raw.as_object() else {
        debug!("event is not a mapping; unclassified");
        return EventKind::Unclassified;
    };

    let shape = Shape {
        top,
        first_record: top
            .get("Records")
            .and_then(Value::as_array)
            .and_then(|records| records.first())
            .and_then(Value::as_object),
    };

    for rule in &RULES {
        if let Some(kind) = rule.apply(&shape) {
            debug!(rule = rule.name, %kind, "event classified");
            return kind;
        }
    }

    debug!("no classification rule matched; unclassified");
    EventKind::Unclassified
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn http_method_and_path(shape: &Shape<'_>) -> Option<EventKind> {
    (shape.top.contains_key("httpMethod") && shape.top.contains_key("path"))
        .then_some(EventKind::HttpGateway)
}

fn bus_envelope(shape: &Shape<'_>) -> Option<EventKind> {
    (shape.top.contains_key("source") && shape.top.contains_key("detail-type"))
        .then_some(EventKind::Bus)
}

fn producer_tag(shape: &Shape<'_>) -> Option<EventKind> {
    if let Some(source) = shape.top.get("eventSource").and_then(Value::as_str) {
        if LOG_STREAM_SOURCES.contains(&source) {
            return Some(EventKind::LogStream);
        }
    }

    // SNS capitalises the key; every other batch producer does not.
    let record = shape.first_record?;
    let source = record
        .get("eventSource")
        .or_else(|| record.get("EventSource"))
        .and_then(Value::as_str)?;

    RECORD_SOURCES
        .iter()
        .find(|(tag, _)| *tag == source)
        .map(|(_, kind)| *kind)
}

fn change_stream_images(shape: &Shape<'_>) -> Option<EventKind> {
    shape
        .first_record?
        .get("dynamodb")
        .is_some_and(Value::is_object)
        .then_some(EventKind::ChangeStream)
}

fn data_stream_payload(shape: &Shape<'_>) -> Option<EventKind> {
    let payload = shape.first_record?.get("kinesis")?.as_object()?;
    (payload.contains_key("partitionKey") && payload.contains_key("data"))
        .then_some(EventKind::DataStream)
}

fn pub_sub_topic(shape: &Shape<'_>) -> Option<EventKind> {
    shape
        .first_record?
        .get("Sns")?
        .as_object()?
        .contains_key("TopicArn")
        .then_some(EventKind::PubSub)
}

fn log_stream_brokers(shape: &Shape<'_>) -> Option<EventKind> {
    if shape.top.contains_key("bootstrapServers") {
        return Some(EventKind::LogStream);
    }
    let first_key = shape.top.get("records")?.as_object()?.keys().next()?;
    is_topic_partition(first_key).then_some(EventKind::LogStream)
}

/// `"<topic>-<partition number>"`, e.g. `"orders-0"`.
fn is_topic_partition(key: &str) -> bool {
    key.rsplit_once('-').is_some_and(|(topic, partition)| {
        !topic.is_empty()
            && !partition.is_empty()
            && partition.bytes().all(|b| b.is_ascii_digit())
    })
}
