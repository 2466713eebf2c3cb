//! Wire encoding for method calls and replies.
//!
//! [`JsonMethodCodec`] follows the framework's JSON method codec:
//!
//! | envelope        | encoding                              |
//! |-----------------|---------------------------------------|
//! | call            | `{"method": "<name>", "args": <any>}` |
//! | success reply   | `[<value>]`                           |
//! | error reply     | `[<code>, <message>, <details>]`      |
//! | not implemented | empty payload                         |

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::method::{MethodCall, MethodResponse};

/// Encodes and decodes the envelopes exchanged on a channel.
pub trait MethodCodec: Send + Sync {
    /// Encode an outgoing call.
    ///
    /// # Errors
    ///
    /// Returns an error if the call cannot be serialized.
    fn encode_call(&self, call: &MethodCall) -> Result<Vec<u8>>;

    /// Decode an incoming call.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a valid call envelope.
    fn decode_call(&self, bytes: &[u8]) -> Result<MethodCall>;

    /// Encode a reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the reply cannot be serialized.
    fn encode_response(&self, response: &MethodResponse) -> Result<Vec<u8>>;

    /// Decode a reply.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a valid reply envelope.
    fn decode_response(&self, bytes: &[u8]) -> Result<MethodResponse>;
}

/// JSON method codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMethodCodec;

impl MethodCodec for JsonMethodCodec {
    fn encode_call(&self, call: &MethodCall) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(call)?)
    }

    fn decode_call(&self, bytes: &[u8]) -> Result<MethodCall> {
        let value: Value = serde_json::from_slice(bytes)?;
        if !value.is_object() {
            return Err(Error::decode("method call must be a JSON object"));
        }
        Ok(serde_json::from_value(value)?)
    }

    fn encode_response(&self, response: &MethodResponse) -> Result<Vec<u8>> {
        let envelope = match response {
            MethodResponse::NotImplemented => return Ok(Vec::new()),
            MethodResponse::Success(value) => json!([value]),
            MethodResponse::Error {
                code,
                message,
                details,
            } => json!([code, message, details]),
        };
        Ok(serde_json::to_vec(&envelope)?)
    }

    fn decode_response(&self, bytes: &[u8]) -> Result<MethodResponse> {
        if bytes.is_empty() {
            return Ok(MethodResponse::NotImplemented);
        }

        let Value::Array(mut items) = serde_json::from_slice::<Value>(bytes)? else {
            return Err(Error::decode("reply must be a JSON array"));
        };

        match items.len() {
            1 => Ok(MethodResponse::Success(items.remove(0))),
            3 => {
                let details = items.pop().unwrap_or(Value::Null);
                let message = match items.pop() {
                    Some(Value::String(message)) => Some(message),
                    Some(Value::Null) | None => None,
                    Some(other) => {
                        return Err(Error::decode(format!(
                            "error message must be a string or null, got {other}"
                        )))
                    }
                };
                let Some(Value::String(code)) = items.pop() else {
                    return Err(Error::decode("error code must be a string"));
                };
                Ok(MethodResponse::Error {
                    code,
                    message,
                    details,
                })
            }
            n => Err(Error::decode(format!(
                "reply array must have 1 or 3 elements, got {n}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented_is_empty_payload() {
        let bytes = JsonMethodCodec
            .encode_response(&MethodResponse::NotImplemented)
            .unwrap();
        assert!(bytes.is_empty());
        assert_eq!(
            JsonMethodCodec.decode_response(&bytes).unwrap(),
            MethodResponse::NotImplemented
        );
    }

    #[test]
    fn test_success_envelope() {
        let bytes = JsonMethodCodec
            .encode_response(&MethodResponse::success("iOS 17.4"))
            .unwrap();
        assert_eq!(bytes, br#"["iOS 17.4"]"#);
    }

    #[test]
    fn test_error_envelope() {
        let bytes = JsonMethodCodec
            .encode_response(&MethodResponse::error("BAD_ENVELOPE", "missing field"))
            .unwrap();
        assert_eq!(bytes, br#"["BAD_ENVELOPE","missing field",null]"#);
    }

    #[test]
    fn test_decode_error_envelope_with_null_message() {
        let response = JsonMethodCodec
            .decode_response(br#"["E1",null,{"line":3}]"#)
            .unwrap();
        assert_eq!(
            response,
            MethodResponse::Error {
                code: "E1".to_string(),
                message: None,
                details: json!({"line": 3}),
            }
        );
    }

    #[test]
    fn test_decode_response_rejects_bad_shapes() {
        let cases: [&[u8]; 5] = [
            br#"{"ok":1}"#,
            br#"[]"#,
            br#"[1,2]"#,
            br#"[1,null,null]"#,
            br#"["E",5,null]"#,
        ];
        for bytes in cases {
            let err = JsonMethodCodec.decode_response(bytes).unwrap_err();
            assert!(err.is_decode_error(), "{err}");
        }
    }

    #[test]
    fn test_decode_call_with_args() {
        let call = JsonMethodCodec
            .decode_call(br#"{"method":"getPlatformVersion","args":[1,2]}"#)
            .unwrap();
        assert_eq!(call.method, "getPlatformVersion");
        assert_eq!(call.args, json!([1, 2]));
    }

    #[test]
    fn test_decode_call_rejects_non_objects() {
        let err = JsonMethodCodec.decode_call(br#""getPlatformVersion""#).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn test_decode_call_requires_method() {
        let err = JsonMethodCodec.decode_call(br#"{"args":null}"#).unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn test_encode_call_omits_null_args() {
        let bytes = JsonMethodCodec
            .encode_call(&MethodCall::new("getPlatformVersion"))
            .unwrap();
        assert_eq!(bytes, br#"{"method":"getPlatformVersion"}"#);
    }
}
