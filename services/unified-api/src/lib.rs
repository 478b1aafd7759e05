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

//! BazaarNexus unified api client with Ed25519 request signing.
//!
//! Every call is a `POST {endpoint}?route={route}` carrying a JSON payload.
//! The client signs
//!
//! ```text
//! authorize + "\n" + route + "\n" + canonical_payload + "\n" + nonce
//! ```
//!
//! with the caller's Ed25519 key and sends the result in `bazaarnexus-*`
//! headers. Replies are normalized into a [`Response`], whatever the status
//! code or the shape of the body.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bazaarnexus_core::{Context, OsEnv, Result};
//! use bazaarnexus_file_read_tokio::TokioFileRead;
//! use bazaarnexus_http_send_reqwest::ReqwestHttpSend;
//! use bazaarnexus_unified_api::{Client, StaticCredentialProvider};
//! use serde_json::{json, Map};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     // The private key can also be a path to an exported `account.json`.
//!     let provider = StaticCredentialProvider::new("your-api-key", "your-base64-seed", "user");
//!     let client = Client::from_provider(ctx, provider)
//!         .await?
//!         .with_endpoint("https://api.bazaarnexus.example/api/index.php");
//!
//!     let payload: Map<_, _> = json!({"page": 1}).as_object().cloned().unwrap_or_default();
//!     let resp = client.send_request("orders/list", payload).await?;
//!     match resp.error() {
//!         None => println!("orders: {:?}", resp.data()),
//!         Some(err) => eprintln!("request failed with {}: {err}", resp.code()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ```bash
//! export BAZAARNEXUS_API_KEY=your-api-key
//! export BAZAARNEXUS_PRIVATE_KEY=~/.bazaarnexus/account.json
//! export BAZAARNEXUS_AUTHORIZE=user
//! export BAZAARNEXUS_ENDPOINT=https://api.bazaarnexus.example/api/
//! ```
//!
//! [`DefaultCredentialProvider`] reads the variables above;
//! [`Client::from_config`] also picks up the endpoint.

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod key;
pub use key::{load_secret_key, parse_secret_key, public_key};

mod endpoint;
pub use endpoint::normalize_endpoint;

mod sign_request;
pub use sign_request::{
    canonical_payload, normalize_route, string_to_sign, RequestSigner, SignedRequest,
};

mod response;
pub use response::{Envelope, Outcome, Response};

mod client;
pub use client::Client;

mod provide_credential;
pub use provide_credential::*;
