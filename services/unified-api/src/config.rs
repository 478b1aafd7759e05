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

use std::fmt::{Debug, Formatter};

use bazaarnexus_core::utils::Redact;
use bazaarnexus_core::Context;

use crate::constants::*;

/// Config carries all the configuration for the unified api.
#[derive(Clone, Default)]
pub struct Config {
    /// `api_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`BAZAARNEXUS_API_KEY`]
    pub api_key: Option<String>,
    /// `private_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`BAZAARNEXUS_PRIVATE_KEY`]
    ///
    /// Any accepted key form works here: base64 secret key, base64 seed,
    /// path to a `.json` key file or the JSON document itself.
    pub private_key: Option<String>,
    /// `authorize` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`BAZAARNEXUS_AUTHORIZE`]
    pub authorize: Option<String>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`BAZAARNEXUS_ENDPOINT`]
    pub endpoint: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set api_key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set private_key
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Set authorize
    pub fn with_authorize(mut self, authorize: impl Into<String>) -> Self {
        self.authorize = Some(authorize.into());
        self
    }

    /// Set endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(BAZAARNEXUS_API_KEY) {
            self.api_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(BAZAARNEXUS_PRIVATE_KEY) {
            self.private_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(BAZAARNEXUS_AUTHORIZE) {
            self.authorize.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(BAZAARNEXUS_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(Redact::from))
            .field("private_key", &self.private_key.as_ref().map(Redact::secret))
            .field("authorize", &self.authorize)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
