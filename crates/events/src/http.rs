//! API Gateway REST proxy request.
//!
//! Only the REST (v1) proxy integration payload is modelled. HTTP API (v2)
//! and WebSocket payloads use different envelopes and are classified as
//! something else, usually [`crate::EventKind::Unclassified`].

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::wire::null_as_default;
use crate::{ParseError, RawEvent};

/// Single-valued string map (`headers`, `queryStringParameters`, ...).
pub type StringMap = BTreeMap<String, String>;

/// Multi-valued string map (`multiValueHeaders`, ...).
pub type MultiValueMap = BTreeMap<String, Vec<String>>;

/// An HTTP request delivered through API Gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpGatewayEvent {
    /// Payload format version; `"1.0"` for REST proxy integrations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,

    /// Resource template configured in API Gateway (e.g. `/users/{id}`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource: String,

    /// Concrete request path (e.g. `/users/42`).
    pub path: String,

    /// HTTP method as sent by the client.
    pub http_method: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: StringMap,

    #[serde(default, deserialize_with = "null_as_default")]
    pub multi_value_headers: MultiValueMap,

    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string_parameters: StringMap,

    #[serde(default, deserialize_with = "null_as_default")]
    pub multi_value_query_string_parameters: MultiValueMap,

    /// Path parameters bound by API Gateway, merged with any parameters the
    /// router extracted from the matched route template.
    #[serde(default, deserialize_with = "null_as_default")]
    pub path_parameters: StringMap,

    #[serde(default, deserialize_with = "null_as_default")]
    pub stage_variables: StringMap,

    #[serde(default, deserialize_with = "null_as_default")]
    pub request_context: RequestContext,

    /// Request body text; base64 text when [`Self::is_base64_encoded`] is set.
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub is_base64_encoded: bool,

    #[serde(skip)]
    pub(crate) raw: RawEvent,
}

impl HttpGatewayEvent {
    /// The request exactly as delivered. Fields this record does not model,
    /// such as `requestContext.authorizer`, are read from here.
    pub fn raw(&self) -> &RawEvent {
        &self.raw
    }

    /// Returns the raw body bytes, decoding base64 when the gateway flagged
    /// the body as binary.
    pub fn decoded_body(&self) -> Result<Vec<u8>, ParseError> {
        if self.is_base64_encoded {
            STANDARD
                .decode(self.body.as_bytes())
                .map_err(|source| ParseError::InvalidBase64 { source })
        } else {
            Ok(self.body.clone().into_bytes())
        }
    }

    /// Looks up a header case-insensitively, as HTTP header names require.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Gateway-side metadata about the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operation_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_prefix: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub protocol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub identity: RequestIdentity,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub http_method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_time: String,
    /// Milliseconds since the Unix epoch, passed through unconverted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub request_time_epoch: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
}

/// Caller identity as reported by API Gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestIdentity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cognito_identity_pool_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub account_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cognito_identity_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub caller: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_ip: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cognito_authentication_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cognito_authentication_provider: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_arn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_agent: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub access_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(body: &str, is_base64_encoded: bool) -> HttpGatewayEvent {
        serde_json::from_value(json!({
            "httpMethod": "POST",
            "path": "/upload",
            "headers": {"Content-Type": "application/octet-stream"},
            "queryStringParameters": null,
            "body": body,
            "isBase64Encoded": is_base64_encoded,
        }))
        .unwrap()
    }

    #[test]
    fn test_decoded_body_passes_plain_text_through() {
        assert_eq!(event("hello", false).decoded_body().unwrap(), b"hello");
    }

    #[test]
    fn test_decoded_body_decodes_binary_bodies() {
        assert_eq!(event("aGVsbG8=", true).decoded_body().unwrap(), b"hello");
    }

    #[test]
    fn test_decoded_body_reports_invalid_base64() {
        let err = event("%%%", true).decoded_body().unwrap_err();
        assert!(matches!(err, ParseError::InvalidBase64 { .. }));
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let event = event("", false);
        assert_eq!(event.header("content-type"), Some("application/octet-stream"));
        assert_eq!(event.header("x-missing"), None);
        assert!(event.query_string_parameters.is_empty());
    }
}
