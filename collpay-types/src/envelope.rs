//! The `{success, message, data}` wrapper shared by every API response.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::coerce::lenient_string;
use crate::error::DecodeError;

/// Top-level response body of every Collpay endpoint.
///
/// `data` is kept as raw JSON; its shape depends on the endpoint and is only
/// meaningful when `success` is true.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    /// Parses a raw response body.
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Decodes `data` into the endpoint-specific shape.
    ///
    /// A missing or `null` payload reads as an empty object, so shapes whose
    /// fields all have defaults still decode.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        if self.data.is_null() {
            let empty = serde_json::Value::Object(serde_json::Map::new());
            return Ok(serde_json::from_value(empty)?);
        }
        Ok(T::deserialize(&self.data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        #[serde(default)]
        rate: String,
    }

    #[test]
    fn test_decode_full_envelope() {
        let env =
            Envelope::decode(br#"{"success":true,"message":"ok","data":{"rate":"1.5"}}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.message, "ok");
        assert_eq!(
            env.data_as::<Probe>().unwrap(),
            Probe {
                rate: "1.5".into()
            }
        );
    }

    #[test]
    fn test_missing_message_and_data_default() {
        let env = Envelope::decode(br#"{"success":false}"#).unwrap();
        assert!(!env.success);
        assert_eq!(env.message, "");
        assert_eq!(env.data_as::<Probe>().unwrap(), Probe { rate: String::new() });
    }

    #[test]
    fn test_null_message_reads_as_empty() {
        let env = Envelope::decode(br#"{"success":false,"message":null,"data":null}"#).unwrap();
        assert_eq!(env.message, "");
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(matches!(
            Envelope::decode(b"<html>502</html>"),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_missing_success_flag() {
        assert!(Envelope::decode(br#"{"message":"ok"}"#).is_err());
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let env = Envelope::decode(br#"{"success":true,"data":{"rate":{"nested":true}}}"#).unwrap();
        assert!(env.data_as::<Probe>().is_err());
    }
}
