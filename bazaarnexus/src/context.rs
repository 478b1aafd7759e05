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

use std::time::Duration;

use bazaarnexus_core::{Context, Error, OsEnv, Result};
use bazaarnexus_file_read_tokio::TokioFileRead;
use bazaarnexus_http_send_reqwest::ReqwestHttpSend;
use http::HeaderMap;
use log::debug;

/// Settings of the HTTP transport used by [`DefaultContext`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Total time allowed for a request, 20 seconds by default.
    pub timeout: Duration,
    /// Verify the server's TLS certificate, enabled by default.
    pub verify_tls: bool,
    /// `user-agent` applied by the transport.
    ///
    /// The unified api client always sends its own user agent, see
    /// `Client::with_user_agent`.
    pub user_agent: Option<String>,
    /// Headers added to every request.
    pub default_headers: HeaderMap,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            verify_tls: true,
            user_agent: None,
            default_headers: HeaderMap::new(),
        }
    }
}

impl TransportConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set verify_tls
    ///
    /// Disabling verification accepts any certificate, only do it against
    /// local test servers.
    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    /// Set user_agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set default_headers
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }
}

/// DefaultContext assembles a [`Context`] from tokio file reading, a reqwest
/// transport and the OS environment.
#[derive(Debug, Clone, Default)]
pub struct DefaultContext {
    config: TransportConfig,
}

impl DefaultContext {
    /// Create a new DefaultContext.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Build the context.
    pub fn build(self) -> Result<Context> {
        let client = self.build_client()?;

        Ok(Context::new()
            .with_file_read(TokioFileRead)
            .with_http_send(ReqwestHttpSend::new(client))
            .with_env(OsEnv))
    }

    fn build_client(&self) -> Result<reqwest::Client> {
        let cfg = &self.config;
        debug!("building http client with {cfg:?}");

        let mut builder = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .danger_accept_invalid_certs(!cfg.verify_tls)
            .default_headers(cfg.default_headers.clone());
        if let Some(ua) = &cfg.user_agent {
            builder = builder.user_agent(ua);
        }

        builder
            .build()
            .map_err(|e| Error::config_invalid("failed to build http client").with_source(e))
    }
}

/// Create a context with the default transport settings.
pub fn default_context() -> Result<Context> {
    DefaultContext::default().build()
}
