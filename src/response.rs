//! Normalized view over every Iamport API response.

use crate::Error;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

/// Result of a single Iamport API call.
///
/// Iamport wraps every payload in a `{code, message, response}` JSON body.
/// The envelope keeps those three fields together with the HTTP status of the response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    status: u16,
    code: Option<i64>,
    message: Option<String>,
    data: Value,
}

impl ResponseEnvelope {
    /// Consumes an HTTP response and parses its body.
    pub async fn from_response(response: reqwest::Response) -> Result<Self, Error> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        Ok(Self::from_parts(status, &bytes))
    }

    /// Builds an envelope from an HTTP status and a raw body.
    ///
    /// A body which is not an Iamport JSON envelope is kept as the message,
    /// so that proxy errors and the like still surface something readable.
    pub fn from_parts(status: u16, body: &[u8]) -> Self {
        // Each field is read on its own, a mistyped one is treated as missing
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(mut map)) => Self {
                status,
                code: map.get("code").and_then(Value::as_i64),
                message: map
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                data: match map.remove("response") {
                    Some(Value::Null) | None => Value::Object(Map::new()),
                    Some(data) => data,
                },
            },
            _ => Self {
                status,
                code: None,
                message: Some(if body.is_empty() {
                    StatusCode::from_u16(status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or("Unknown Error")
                        .to_string()
                } else {
                    String::from_utf8_lossy(body).into_owned()
                }),
                data: Value::Object(Map::new()),
            },
        }
    }

    /// HTTP status of the response.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Iamport result code. `0` means success.
    pub fn code(&self) -> Option<i64> {
        self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The `response` payload. Its shape depends on the endpoint.
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    /// Deserializes the payload into a concrete type.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_value(self.data.clone()).map_err(|e| Error::Other(e.into()))
    }

    /// `true` only for HTTP 200 with result code 0.
    pub fn is_succeed(&self) -> bool {
        self.status == 200 && self.code == Some(0)
    }

    /// The body as Iamport sent it, regardless of the HTTP status.
    pub fn raw(&self) -> Value {
        json!({
            "code": self.code,
            "message": self.message,
            "response": self.data,
        })
    }
}
