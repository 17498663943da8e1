//! A router with one summarizing handler per event kind.
//!
//! Each handler answers with a JSON object describing what it received, which
//! is enough to check routing and normalization of a captured event locally.

use chrono::{DateTime, Utc};
use router::{EventKind, NormalizedEvent, RegistrationError, RouteSpec, Router};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

/// Per-invocation data the hosting runtime would supply.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: String,
    pub received_at: DateTime<Utc>,
}

impl InvocationContext {
    /// Builds a context stamped with the current time. A missing request id
    /// is replaced by a fresh UUID.
    pub fn new(function_name: impl Into<String>, request_id: Option<String>) -> Self {
        Self {
            request_id: request_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            function_name: function_name.into(),
            received_at: Utc::now(),
        }
    }
}

pub type DemoRouter = Router<InvocationContext, Value, anyhow::Error>;

/// Registers `routes` for HTTP and a summarizing handler for every other kind.
pub fn build_router(routes: &[RouteSpec], with_fallback: bool) -> Result<DemoRouter, RegistrationError> {
    let mut builder = DemoRouter::builder();
    for route in routes {
        builder.register(EventKind::HttpGateway, Some(route.clone()), respond)?;
    }
    builder
        .queue(respond)?
        .object_store(respond)?
        .change_stream(respond)?
        .data_stream(respond)?
        .pub_sub(respond)?
        .bus(respond)?
        .log_stream(respond)?;
    if with_fallback {
        builder.fallback(respond)?;
    }
    Ok(builder.build())
}

fn respond(event: NormalizedEvent, ctx: &InvocationContext) -> anyhow::Result<Value> {
    let kind = event.kind();
    Ok(json!({
        "kind": kind,
        "request_id": ctx.request_id,
        "function_name": ctx.function_name,
        "received_at": ctx.received_at,
        "summary": summarize(event)?,
    }))
}

fn summarize(event: NormalizedEvent) -> anyhow::Result<Value> {
    let summary = match event {
        NormalizedEvent::HttpGateway(req) => json!({
            "method": req.http_method,
            "path": req.path,
            "path_parameters": req.path_parameters,
            "query": req.query_string_parameters,
            "body_bytes": req.decoded_body()?.len(),
        }),
        NormalizedEvent::Queue(batch) => json!({
            "messages": batch.records.iter().map(|m| &m.message_id).collect::<Vec<_>>(),
        }),
        NormalizedEvent::ObjectStore(batch) => json!({
            "objects": batch
                .records
                .iter()
                .map(|r| json!({
                    "event": r.event_name,
                    "bucket": r.s3.bucket.name,
                    "key": r.s3.object.key,
                    "size": r.s3.object.size,
                }))
                .collect::<Vec<_>>(),
        }),
        NormalizedEvent::ChangeStream(batch) => json!({
            "changes": batch
                .records
                .iter()
                .map(|r| json!({"event": r.event_name, "keys": r.dynamodb.keys}))
                .collect::<Vec<_>>(),
        }),
        NormalizedEvent::DataStream(batch) => json!({
            "records": batch
                .records
                .iter()
                .map(|r| json!({
                    "partition_key": r.kinesis.partition_key,
                    "sequence_number": r.kinesis.sequence_number,
                    "bytes": r.kinesis.data.len(),
                }))
                .collect::<Vec<_>>(),
        }),
        NormalizedEvent::PubSub(batch) => json!({
            "notifications": batch
                .records
                .iter()
                .map(|r| json!({"topic": r.sns.topic_arn, "subject": r.sns.subject}))
                .collect::<Vec<_>>(),
        }),
        NormalizedEvent::Bus(event) => json!({
            "source": event.source,
            "detail_type": event.detail_type,
            "scheduled": event.is_scheduled(),
        }),
        NormalizedEvent::LogStream(batch) => json!({
            "brokers": batch.brokers().collect::<Vec<_>>(),
            "records": batch
                .records
                .iter()
                .map(|r| format!("{}-{}@{}", r.topic, r.partition, r.offset))
                .collect::<Vec<_>>(),
        }),
        NormalizedEvent::Custom(custom) => json!({
            "fields": custom
                .data
                .as_object()
                .map(|fields| fields.keys().cloned().collect::<Vec<_>>())
                .unwrap_or_default(),
        }),
    };
    Ok(summary)
}
