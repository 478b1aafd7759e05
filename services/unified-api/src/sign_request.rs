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

use ed25519_dalek::Signer;
use log::debug;
use serde_json::{Map, Value};

use bazaarnexus_core::hash::base64_encode;
use bazaarnexus_core::time::{format_timestamp_millis, now, DateTime};
use bazaarnexus_core::{Error, Result};

use crate::constants::ROUTE_DELIMITER;
use crate::credential::Credential;
use crate::key::signing_key;

/// Everything derived from a single signing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Route with path separators replaced by `|`.
    pub route: String,
    /// Payload serialized with sorted keys, exactly as signed.
    pub canonical_payload: String,
    /// Milliseconds since the unix epoch.
    pub nonce: String,
    /// Base64 Ed25519 signature of the string to sign.
    pub signature: String,
}

/// RequestSigner that implements the BazaarNexus Ed25519 request signature.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign a call to `route` carrying `payload`.
    pub fn sign(
        &self,
        cred: &Credential,
        route: &str,
        payload: &Map<String, Value>,
    ) -> Result<SignedRequest> {
        let key = signing_key(&cred.secret_key)?;

        let route = normalize_route(route);
        let canonical_payload = canonical_payload(payload)?;
        let nonce = format_timestamp_millis(self.time.unwrap_or_else(now));

        let string_to_sign = string_to_sign(&cred.authorize, &route, &canonical_payload, &nonce);
        debug!("calculated string to sign: {string_to_sign}");

        let signature = base64_encode(&key.sign(string_to_sign.as_bytes()).to_bytes());

        Ok(SignedRequest {
            route,
            canonical_payload,
            nonce,
            signature,
        })
    }
}

/// Replace every `\`, `/` and `>` in a route with `|`.
pub fn normalize_route(route: &str) -> String {
    route.replace(['\\', '/', '>'], &ROUTE_DELIMITER.to_string())
}

/// Serialize a payload the way it is signed.
///
/// Object keys are sorted at every depth, `/` and non-ASCII characters are
/// left unescaped, and an empty payload is rendered as `[]`.
pub fn canonical_payload(payload: &Map<String, Value>) -> Result<String> {
    if payload.is_empty() {
        return Ok("[]".to_string());
    }

    let sorted = sort_keys(&Value::Object(payload.clone()));
    serde_json::to_string(&sorted)
        .map_err(|e| Error::unexpected("failed to serialize payload").with_source(e))
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        v => v.clone(),
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// authorize + "\n" +
/// route + "\n" +
/// canonical_payload + "\n" +
/// nonce
/// ```
pub fn string_to_sign(
    authorize: &str,
    route: &str,
    canonical_payload: &str,
    nonce: &str,
) -> String {
    format!("{authorize}\n{route}\n{canonical_payload}\n{nonce}")
}
