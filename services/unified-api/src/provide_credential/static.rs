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

use crate::Credential;
use async_trait::async_trait;
use bazaarnexus_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides a fixed BazaarNexus credential.
///
/// The private key is normalized on every call, so a `.json` key file path is
/// read through the context each time the credential is provided.
#[derive(Clone)]
pub struct StaticCredentialProvider {
    api_key: String,
    private_key: String,
    authorize: String,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider.
    pub fn new(api_key: &str, private_key: &str, authorize: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            private_key: private_key.to_string(),
            authorize: authorize.to_string(),
        }
    }
}

impl std::fmt::Debug for StaticCredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use bazaarnexus_core::utils::Redact;

        f.debug_struct("StaticCredentialProvider")
            .field("api_key", &Redact::from(&self.api_key))
            .field("private_key", &Redact::secret(&self.private_key))
            .field("authorize", &self.authorize)
            .finish()
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let cred =
            Credential::load(ctx, &self.api_key, &self.private_key, &self.authorize).await?;
        Ok(Some(cred))
    }
}
