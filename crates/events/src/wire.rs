//! Serde helpers for the AWS wire conventions shared by several records.
//!
//! - Optional containers and strings are frequently sent as JSON `null`
//!   rather than omitted; [`null_as_default`] folds both cases into the
//!   type's default while still rejecting a value of the wrong type.
//! - Binary payloads travel as standard (padded) base64 text;
//!   [`base64_bytes`] and [`optional_base64_bytes`] decode them to raw bytes
//!   and encode them back on serialisation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional field, mapping `null` to `T::default()`.
///
/// Pair with `#[serde(default)]` so that an absent field is also defaulted:
///
/// ```rust
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Request {
///     #[serde(default, deserialize_with = "events::wire::null_as_default")]
///     body: String,
/// }
///
/// let request: Request = serde_json::from_str(r#"{"body": null}"#).unwrap();
/// assert_eq!(request.body, "");
/// ```
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Required base64 text field decoded to bytes.
pub mod base64_bytes {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        use serde::de::Error;
        let text = String::deserialize(deserializer)?;
        STANDARD
            .decode(text.as_bytes())
            .map_err(|e| D::Error::custom(format!("invalid base64 payload: {e}")))
    }
}

/// Optional base64 text field; absent or `null` decodes to `None`.
///
/// Use together with `#[serde(default)]`.
pub mod optional_base64_bytes {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        use serde::de::Error;
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => STANDARD
                .decode(text.as_bytes())
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid base64 payload: {e}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Sample {
        #[serde(default, deserialize_with = "super::null_as_default")]
        label: String,
        #[serde(with = "super::base64_bytes")]
        data: Vec<u8>,
        #[serde(default, with = "super::optional_base64_bytes")]
        key: Option<Vec<u8>>,
    }

    #[test]
    fn test_null_and_absent_fields_default() {
        let sample: Sample = serde_json::from_value(json!({"label": null, "data": ""})).unwrap();
        assert_eq!(sample.label, "");
        assert_eq!(sample.key, None);
    }

    #[test]
    fn test_wrong_type_is_rejected_even_when_optional() {
        let result = serde_json::from_value::<Sample>(json!({"label": 7, "data": ""}));
        assert!(result.is_err());
    }

    #[test]
    fn test_base64_decodes_and_reencodes() {
        let sample: Sample =
            serde_json::from_value(json!({"data": "SGVsbG8gV29ybGQ=", "key": "a2V5"})).unwrap();
        assert_eq!(sample.data, b"Hello World");
        assert_eq!(sample.key.as_deref(), Some(&b"key"[..]));

        let back = serde_json::to_value(&sample).unwrap();
        assert_eq!(back["data"], "SGVsbG8gV29ybGQ=");
        assert_eq!(back["key"], "a2V5");
    }

    #[test]
    fn test_invalid_base64_is_an_error() {
        let err = serde_json::from_value::<Sample>(json!({"data": "not base64!"})).unwrap_err();
        assert!(err.to_string().contains("invalid base64 payload"));
    }
}
