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

//! Signing and sending BazaarNexus API requests.
//!
//! This crate bundles [`bazaarnexus_core`] and the unified api client, and
//! provides a ready to use [`Context`] behind the `default-context` feature.
//!
//! ```no_run
//! use bazaarnexus::unified_api::{Client, Config};
//! use bazaarnexus::{default_context, Result};
//! use serde_json::Map;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::new()
//!         .with_api_key("your-api-key")
//!         .with_private_key("~/.bazaarnexus/account.json")
//!         .with_authorize("user")
//!         .with_endpoint("https://api.bazaarnexus.example/api/");
//!
//!     let client = Client::from_config(default_context()?, config).await?;
//!     let resp = client.send_request("catalog/list", Map::new()).await?;
//!     println!("{:?}", resp.envelope());
//!     Ok(())
//! }
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use bazaarnexus_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_context, DefaultContext, TransportConfig};

/// BazaarNexus unified api: key handling, request signing and dispatching.
pub mod unified_api {
    pub use bazaarnexus_unified_api::*;

    /// Create a client with the default context.
    ///
    /// Credentials and endpoint are read from `BAZAARNEXUS_*` environment
    /// variables.
    #[cfg(feature = "default-context")]
    pub async fn default_client() -> bazaarnexus_core::Result<Client> {
        let ctx = crate::default_context()?;
        Client::from_config(ctx, Config::new()).await
    }
}
