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

use crate::constants::*;
use crate::Credential;
use async_trait::async_trait;
use bazaarnexus_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads the credential from environment variables.
///
/// - [`BAZAARNEXUS_API_KEY`]
/// - [`BAZAARNEXUS_PRIVATE_KEY`]
/// - [`BAZAARNEXUS_AUTHORIZE`] (optional)
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let api_key = envs.get(BAZAARNEXUS_API_KEY);
        let private_key = envs.get(BAZAARNEXUS_PRIVATE_KEY);

        match (api_key, private_key) {
            (Some(ak), Some(pk)) => {
                let authorize = envs.get(BAZAARNEXUS_AUTHORIZE).cloned().unwrap_or_default();
                Ok(Some(Credential::load(ctx, ak, pk, authorize).await?))
            }
            _ => Ok(None),
        }
    }
}
