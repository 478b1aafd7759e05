// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Normalized result of a dispatched request.

use bytes::Bytes;
use http::StatusCode;
use log::{debug, warn};
use serde_json::{Map, Value};

use crate::constants::*;

/// The `{status, message, data, code}` view shared by every outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// `success` or whatever the server reported; `failed` for local failures.
    pub status: String,
    /// Human readable message.
    pub message: String,
    /// Payload returned by the server, empty on failures.
    pub data: Map<String, Value>,
    /// HTTP status code, or `500` when no response was received.
    pub code: u16,
}

/// How a request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server answered `status: success` with a 2xx code.
    Success {
        /// Message reported by the server.
        message: String,
        /// Data reported by the server.
        data: Map<String, Value>,
        /// HTTP status code.
        code: u16,
    },
    /// The server answered with a well formed envelope that isn't a success.
    ServerFailure {
        /// Status reported by the server.
        status: String,
        /// Message reported by the server.
        message: String,
        /// Data reported by the server.
        data: Map<String, Value>,
        /// HTTP status code.
        code: u16,
    },
    /// The server answered but the body isn't a valid envelope.
    MalformedResponse {
        /// Body as received.
        raw_body: String,
        /// Description of the failure.
        message: String,
        /// HTTP status code.
        code: u16,
    },
    /// No response was received at all.
    TransportFailure {
        /// Description of the transport error.
        cause: String,
    },
}

/// Response returned by [`crate::Client::send_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    outcome: Outcome,
    raw_body: String,
}

impl Response {
    /// Classify a response received from the server.
    ///
    /// `url` is only used to describe non 2xx replies without an envelope.
    pub(crate) fn from_http(url: &str, resp: http::Response<Bytes>) -> Self {
        let status = resp.status();
        let raw_body = String::from_utf8_lossy(resp.body()).into_owned();
        let code = status.as_u16();

        let outcome = match parse_envelope(&raw_body) {
            Some((server_status, message, data)) => {
                if server_status == STATUS_SUCCESS && status.is_success() {
                    Outcome::Success {
                        message,
                        data,
                        code,
                    }
                } else {
                    Outcome::ServerFailure {
                        status: server_status,
                        message,
                        data,
                        code,
                    }
                }
            }
            None => {
                warn!("server replied {code} without a valid envelope");
                let message = if status.is_client_error() || status.is_server_error() {
                    http_error_message(url, status)
                } else {
                    INVALID_JSON_RESPONSE.to_string()
                };
                Outcome::MalformedResponse {
                    raw_body: raw_body.clone(),
                    message,
                    code,
                }
            }
        };
        debug!("response classified as {outcome:?}");

        Self { outcome, raw_body }
    }

    /// Build the response of a request that never got an answer.
    pub(crate) fn transport_failure(cause: impl Into<String>) -> Self {
        let mut cause = cause.into();
        if cause.is_empty() {
            cause = UNKNOWN_ERROR.to_string();
        }
        warn!("request failed without response: {cause}");

        Self {
            outcome: Outcome::TransportFailure { cause },
            raw_body: String::new(),
        }
    }

    /// How the request ended.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Consume the response into its outcome.
    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }

    /// Body as received, empty when no response arrived.
    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    /// Flatten the outcome into an envelope.
    pub fn envelope(&self) -> Envelope {
        match &self.outcome {
            Outcome::Success {
                message,
                data,
                code,
            } => Envelope {
                status: STATUS_SUCCESS.to_string(),
                message: message.clone(),
                data: data.clone(),
                code: *code,
            },
            Outcome::ServerFailure {
                status,
                message,
                data,
                code,
            } => Envelope {
                status: status.clone(),
                message: message.clone(),
                data: data.clone(),
                code: *code,
            },
            Outcome::MalformedResponse { message, code, .. } => Envelope {
                status: STATUS_FAILED.to_string(),
                message: message.clone(),
                data: Map::new(),
                code: *code,
            },
            Outcome::TransportFailure { cause } => Envelope {
                status: STATUS_FAILED.to_string(),
                message: cause.clone(),
                data: Map::new(),
                code: TRANSPORT_FAILURE_CODE,
            },
        }
    }

    /// HTTP status code, `500` when no response was received.
    pub fn code(&self) -> u16 {
        match &self.outcome {
            Outcome::Success { code, .. }
            | Outcome::ServerFailure { code, .. }
            | Outcome::MalformedResponse { code, .. } => *code,
            Outcome::TransportFailure { .. } => TRANSPORT_FAILURE_CODE,
        }
    }

    /// Whether the server reported success with a 2xx code.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// Error message, `None` on success.
    pub fn error(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }

        Some(self.envelope().message)
    }

    /// Data returned by the server, empty unless the server sent an envelope.
    pub fn data(&self) -> Map<String, Value> {
        match &self.outcome {
            Outcome::Success { data, .. } | Outcome::ServerFailure { data, .. } => data.clone(),
            _ => Map::new(),
        }
    }
}

/// Extract `(status, message, data)` from a JSON object carrying both
/// `status` and `message`.
fn parse_envelope(raw_body: &str) -> Option<(String, String, Map<String, Value>)> {
    let Ok(Value::Object(mut body)) = serde_json::from_str::<Value>(raw_body) else {
        return None;
    };

    let status = body.remove("status").filter(|v| !v.is_null())?;
    let message = body.remove("message").filter(|v| !v.is_null())?;
    let data = match body.remove("data") {
        Some(Value::Object(data)) => data,
        _ => Map::new(),
    };

    Some((text(status), text(message), data))
}

fn text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        v => v.to_string(),
    }
}

/// Describe a 4xx or 5xx reply the way HTTP clients usually do.
fn http_error_message(url: &str, status: StatusCode) -> String {
    let label = if status.is_client_error() {
        "Client error"
    } else {
        "Server error"
    };
    let reason = status.canonical_reason().unwrap_or_default();

    format!(
        "{label}: `POST {url}` resulted in a `{} {reason}` response",
        status.as_u16()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    const URL: &str = "https://api.example.com/api/?route=orders|list";

    fn reply(code: u16, body: &str) -> Response {
        let resp = http::Response::builder()
            .status(code)
            .body(Bytes::from(body.to_string()))
            .unwrap();
        Response::from_http(URL, resp)
    }

    #[test]
    fn test_success() {
        let resp = reply(200, r#"{"status":"success","message":"ok","data":{"test":1}}"#);

        assert!(resp.is_success());
        assert_eq!(resp.error(), None);
        assert_eq!(resp.data(), json!({"test": 1}).as_object().cloned().unwrap());
        assert_eq!(
            resp.envelope(),
            Envelope {
                status: "success".to_string(),
                message: "ok".to_string(),
                data: json!({"test": 1}).as_object().cloned().unwrap(),
                code: 200,
            }
        );
    }

    #[test_case(201 ; "created")]
    #[test_case(204 ; "no content")]
    fn test_success_accepts_any_2xx(code: u16) {
        let resp = reply(code, r#"{"status":"success","message":"ok"}"#);
        assert!(resp.is_success());
        assert_eq!(resp.data(), Map::new());
        assert_eq!(resp.code(), code);
    }

    #[test]
    fn test_success_status_with_error_code_is_failure() {
        let resp = reply(404, r#"{"status":"success","message":"odd"}"#);

        assert!(!resp.is_success());
        assert!(matches!(resp.outcome(), Outcome::ServerFailure { code: 404, .. }));
        assert_eq!(resp.error().as_deref(), Some("odd"));
    }

    #[test]
    fn test_server_failure() {
        let resp = reply(
            422,
            r#"{"status":"failed","message":"invalid currency","data":{"field":"currency"}}"#,
        );

        assert!(!resp.is_success());
        assert_eq!(resp.error().as_deref(), Some("invalid currency"));
        assert_eq!(resp.data(), json!({"field": "currency"}).as_object().cloned().unwrap());
        assert_eq!(resp.envelope().status, "failed");
        assert_eq!(resp.code(), 422);
    }

    #[test]
    fn test_server_failure_with_empty_message() {
        let resp = reply(200, r#"{"status":"failed","message":""}"#);
        assert_eq!(resp.error().as_deref(), Some(""));
    }

    #[test]
    fn test_transport_failure_without_cause() {
        let resp = Response::transport_failure("");

        assert_eq!(resp.error().as_deref(), Some("Unknown error"));
        assert_eq!(resp.code(), 500);
    }

    #[test]
    fn test_non_string_fields_are_rendered() {
        let resp = reply(200, r#"{"status":true,"message":42,"data":[1,2]}"#);

        let envelope = resp.envelope();
        assert_eq!(envelope.status, "true");
        assert_eq!(envelope.message, "42");
        assert_eq!(envelope.data, Map::new());
        assert!(!resp.is_success());
    }

    #[test_case("<html>oops</html>" ; "html")]
    #[test_case("" ; "empty")]
    #[test_case(r#"{"status":"success"}"# ; "missing message")]
    #[test_case(r#"{"status":null,"message":"x"}"# ; "null status")]
    #[test_case(r#"["success","ok"]"# ; "array")]
    fn test_malformed_2xx(body: &str) {
        let resp = reply(200, body);

        assert!(!resp.is_success());
        assert_eq!(
            resp.envelope(),
            Envelope {
                status: "failed".to_string(),
                message: "Invalid JSON response".to_string(),
                data: Map::new(),
                code: 200,
            }
        );
        assert_eq!(resp.raw_body(), body);
    }

    #[test_case(404, "Client error: `POST https://api.example.com/api/?route=orders|list` resulted in a `404 Not Found` response")]
    #[test_case(503, "Server error: `POST https://api.example.com/api/?route=orders|list` resulted in a `503 Service Unavailable` response")]
    fn test_malformed_error_reply(code: u16, expected: &str) {
        let resp = reply(code, "upstream exploded");

        assert_eq!(resp.error().as_deref(), Some(expected));
        assert_eq!(resp.code(), code);
        assert_eq!(resp.raw_body(), "upstream exploded");
    }

    #[test_case(304, "" ; "not modified")]
    #[test_case(302, "moved" ; "redirect")]
    #[test_case(101, "" ; "switching protocols")]
    fn test_non_error_status_without_envelope(code: u16, body: &str) {
        let resp = reply(code, body);

        assert!(!resp.is_success());
        assert_eq!(
            resp.envelope(),
            Envelope {
                status: "failed".to_string(),
                message: "Invalid JSON response".to_string(),
                data: Map::new(),
                code,
            }
        );
        assert_eq!(resp.raw_body(), body);
    }

    #[test]
    fn test_transport_failure() {
        let resp = Response::transport_failure("connection refused");

        assert!(!resp.is_success());
        assert_eq!(
            resp.envelope(),
            Envelope {
                status: "failed".to_string(),
                message: "connection refused".to_string(),
                data: Map::new(),
                code: 500,
            }
        );
        assert_eq!(resp.raw_body(), "");
        assert_eq!(
            resp.into_outcome(),
            Outcome::TransportFailure {
                cause: "connection refused".to_string()
            }
        );
    }
}
