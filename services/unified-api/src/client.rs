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

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use http::HeaderValue;
use log::debug;
use percent_encoding::utf8_percent_encode;
use serde_json::{Map, Value};

use bazaarnexus_core::{Context, Error, ProvideCredential, Result};

use crate::constants::*;
use crate::endpoint::normalize_endpoint;
use crate::provide_credential::ConfigCredentialProvider;
use crate::response::Response;
use crate::sign_request::{RequestSigner, SignedRequest};
use crate::{Config, Credential};

/// Client dispatches signed requests to the unified api.
///
/// Cloning is cheap; clones share the endpoint and the last response.
///
/// ```no_run
/// use bazaarnexus_core::Context;
/// use bazaarnexus_unified_api::{Client, Credential};
/// use serde_json::json;
///
/// # async fn example(ctx: Context) -> bazaarnexus_core::Result<()> {
/// let cred = Credential::new("api_key", "<base64 seed>", "user")?;
/// let client = Client::new(ctx, cred).with_endpoint("https://api.example.com/api/index.php");
///
/// let payload = json!({"id": 7}).as_object().cloned().unwrap_or_default();
/// let resp = client.send_request("orders/get", payload).await?;
/// if resp.is_success() {
///     println!("{:?}", resp.data());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    ctx: Context,
    credential: Arc<Credential>,
    signer: Arc<RequestSigner>,
    user_agent: String,
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    endpoint: Option<String>,
    last_response: Option<Response>,
}

impl Client {
    /// Create a client from an already loaded credential.
    pub fn new(ctx: Context, credential: Credential) -> Self {
        Self {
            ctx,
            credential: Arc::new(credential),
            signer: Arc::new(RequestSigner::new()),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Create a client from the first credential `provider` yields.
    pub async fn from_provider(
        ctx: Context,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        let credential = provider
            .provide_credential(&ctx)
            .await?
            .ok_or_else(|| Error::config_invalid("API key and Private Key are required"))?;

        Ok(Self::new(ctx, credential))
    }

    /// Create a client from [`Config`], filling unset fields from the environment.
    ///
    /// The endpoint is set too when configured.
    pub async fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let config = config.from_env(&ctx);
        let endpoint = config.endpoint.clone();

        let client =
            Self::from_provider(ctx, ConfigCredentialProvider::new(Arc::new(config))).await?;
        if let Some(endpoint) = endpoint {
            client.set_endpoint(&endpoint);
        }
        Ok(client)
    }

    /// Set the `user-agent` sent with every request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the endpoint, see [`Client::set_endpoint`].
    pub fn with_endpoint(self, endpoint: &str) -> Self {
        self.set_endpoint(endpoint);
        self
    }

    /// Normalize and store the endpoint every request is posted to.
    pub fn set_endpoint(&self, endpoint: &str) {
        let endpoint = normalize_endpoint(endpoint);
        self.state.lock().expect("lock poisoned").endpoint = Some(endpoint);
    }

    /// Current endpoint, `None` until one is set.
    pub fn endpoint(&self) -> Option<String> {
        self.state.lock().expect("lock poisoned").endpoint.clone()
    }

    /// Credential used to sign requests.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Response of the latest `send_request` call issued through this client
    /// or any of its clones.
    pub fn last_response(&self) -> Option<Response> {
        self.state.lock().expect("lock poisoned").last_response.clone()
    }

    /// Raw body of the latest response, empty before the first call.
    pub fn last_raw_body(&self) -> String {
        self.state
            .lock()
            .expect("lock poisoned")
            .last_response
            .as_ref()
            .map(|resp| resp.raw_body().to_string())
            .unwrap_or_default()
    }

    /// Sign `payload` and post it to `route`.
    ///
    /// Returns `Err` only when the request can't be signed: no endpoint set
    /// or an unusable key. Every other failure, including transport errors,
    /// is reported through the returned [`Response`].
    pub async fn send_request(&self, route: &str, payload: Map<String, Value>) -> Result<Response> {
        let endpoint = self.endpoint().ok_or_else(|| {
            Error::config_invalid("Endpoint not set. Call set_endpoint() before send_request().")
        })?;

        let signed = self.signer.sign(&self.credential, route, &payload)?;
        let url = format!(
            "{endpoint}?{ROUTE_QUERY}={}",
            utf8_percent_encode(&signed.route, &ROUTE_QUERY_ENCODE_SET)
        );
        debug!("sending request to {url}");

        let resp = match self.build_request(&url, signed) {
            Ok(req) => match self.ctx.http_send(req).await {
                Ok(resp) => Response::from_http(&url, resp),
                Err(err) => Response::transport_failure(err.to_string()),
            },
            Err(err) => Response::transport_failure(err.to_string()),
        };

        self.state.lock().expect("lock poisoned").last_response = Some(resp.clone());
        Ok(resp)
    }

    fn build_request(&self, url: &str, signed: SignedRequest) -> Result<http::Request<Bytes>> {
        let mut signature = HeaderValue::from_str(&signed.signature)?;
        signature.set_sensitive(true);

        let req = http::Request::post(url)
            .header(X_BAZAARNEXUS_AUTHORIZE, &self.credential.authorize)
            .header(X_BAZAARNEXUS_APIKEY, &self.credential.api_key)
            .header(X_BAZAARNEXUS_NONCE, &signed.nonce)
            .header(X_BAZAARNEXUS_SIGNATURE, signature)
            .header(X_BAZAARNEXUS_ROUTE, &signed.route)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .body(Bytes::from(signed.canonical_payload))?;

        Ok(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaarnexus_core::hash::base64_encode;
    use bazaarnexus_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    fn credential() -> Credential {
        Credential::new("api_key", &base64_encode(&[8; 32]), "user").unwrap()
    }

    #[test]
    fn test_set_endpoint_normalizes() {
        let client = Client::new(Context::new(), credential());
        assert_eq!(client.endpoint(), None);

        client.set_endpoint("https://api.example.com/api/index.php?debug=1");
        assert_eq!(
            client.endpoint().as_deref(),
            Some("https://api.example.com/api/")
        );
    }

    #[test]
    fn test_clones_share_state() {
        let client = Client::new(Context::new(), credential());
        let clone = client.clone();

        clone.set_endpoint("https://api.example.com/");
        assert_eq!(
            client.endpoint().as_deref(),
            Some("https://api.example.com/")
        );
    }

    #[tokio::test]
    async fn test_send_request_without_endpoint() {
        let client = Client::new(Context::new(), credential());

        let err = client.send_request("ping", Map::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(client.last_response().is_none());
        assert_eq!(client.last_raw_body(), "");
    }

    #[tokio::test]
    async fn test_send_request_without_transport() {
        let client = Client::new(Context::new(), credential()).with_endpoint("https://h/api/");

        let resp = client.send_request("ping", Map::new()).await.unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.code(), 500);
        assert_eq!(
            resp.error().as_deref(),
            Some("HTTP sending not supported: no HTTP client configured")
        );
        assert_eq!(client.last_response(), Some(resp));
    }

    #[tokio::test]
    async fn test_invalid_header_is_a_transport_failure() {
        let cred = Credential::new("api\nkey", &base64_encode(&[8; 32]), "user").unwrap();
        let client = Client::new(Context::new(), cred).with_endpoint("https://h/api/");

        let resp = client.send_request("ping", Map::new()).await.unwrap();
        assert_eq!(resp.code(), 500);
        assert!(!resp.is_success());
    }

    #[tokio::test]
    async fn test_from_config() {
        let ctx = Context::new().with_env(StaticEnv {
            home_dir: None,
            envs: HashMap::from([
                (BAZAARNEXUS_PRIVATE_KEY.to_string(), base64_encode(&[8; 32])),
                (
                    BAZAARNEXUS_ENDPOINT.to_string(),
                    "https://api.example.com/gateway.php".to_string(),
                ),
            ]),
        });

        let config = Config::new().with_api_key("api_key").with_authorize("User");
        let client = Client::from_config(ctx, config).await.unwrap();

        assert_eq!(client.credential(), &credential());
        assert_eq!(
            client.endpoint().as_deref(),
            Some("https://api.example.com/")
        );
    }

    #[tokio::test]
    async fn test_from_config_without_credential() {
        let err = Client::from_config(Context::new(), Config::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
