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

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bazaarnexus_core::hash::base64_encode;
use bazaarnexus_core::{Context, ErrorKind, ProvideCredential, ProvideCredentialChain, StaticEnv};
use bazaarnexus_file_read_tokio::TokioFileRead;
use bazaarnexus_unified_api::{
    Config, ConfigCredentialProvider, Credential, DefaultCredentialProvider,
    EnvCredentialProvider, StaticCredentialProvider,
};

#[derive(Debug)]
struct CountingProvider {
    name: &'static str,
    return_credential: bool,
    call_count: Arc<AtomicUsize>,
}

#[async_trait]
impl ProvideCredential for CountingProvider {
    type Credential = Credential;

    async fn provide_credential(
        &self,
        _ctx: &Context,
    ) -> bazaarnexus_core::Result<Option<Self::Credential>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.return_credential {
            Ok(Some(Credential::new(
                format!("{}_key", self.name),
                &base64_encode(&[1; 32]),
                self.name,
            )?))
        } else {
            Ok(None)
        }
    }
}

fn seed() -> String {
    base64_encode(&[11; 32])
}

#[tokio::test]
async fn test_chain_stops_at_first_success() {
    let ctx = Context::new();

    let count1 = Arc::new(AtomicUsize::new(0));
    let count2 = Arc::new(AtomicUsize::new(0));
    let count3 = Arc::new(AtomicUsize::new(0));

    let chain = ProvideCredentialChain::new()
        .push(CountingProvider {
            name: "provider1",
            return_credential: false,
            call_count: count1.clone(),
        })
        .push(CountingProvider {
            name: "provider2",
            return_credential: true,
            call_count: count2.clone(),
        })
        .push(CountingProvider {
            name: "provider3",
            return_credential: true,
            call_count: count3.clone(),
        });

    let cred = chain.provide_credential(&ctx).await.unwrap().unwrap();
    assert_eq!(cred.api_key, "provider2_key");
    assert_eq!(cred.authorize, "provider2");

    assert_eq!(count1.load(Ordering::SeqCst), 1);
    assert_eq!(count2.load(Ordering::SeqCst), 1);
    assert_eq!(count3.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_chain_with_real_providers() {
    let ctx = Context::new().with_env(StaticEnv {
        home_dir: None,
        envs: HashMap::from_iter([
            ("BAZAARNEXUS_API_KEY".to_string(), "env_key".to_string()),
            ("BAZAARNEXUS_PRIVATE_KEY".to_string(), seed()),
        ]),
    });

    let config = Arc::new(Config::new().with_authorize("Reseller"));
    let chain = ProvideCredentialChain::new()
        .push(ConfigCredentialProvider::new(config))
        .push(EnvCredentialProvider::new());

    let cred = chain.provide_credential(&ctx).await.unwrap().unwrap();
    assert_eq!(cred.api_key, "env_key");
    assert_eq!(cred.authorize, "reseller");
    assert_eq!(cred, Credential::new("env_key", &seed(), "reseller").unwrap());
}

#[tokio::test]
async fn test_chain_stops_at_broken_key() {
    let ctx = Context::new();
    let fallback = Arc::new(AtomicUsize::new(0));

    let chain = ProvideCredentialChain::new()
        .push(StaticCredentialProvider::new("key", "bm90IGEga2V5", "user"))
        .push(CountingProvider {
            name: "fallback",
            return_credential: true,
            call_count: fallback.clone(),
        });

    let err = chain.provide_credential(&ctx).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyInvalid);
    assert_eq!(fallback.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_key_file_under_home_dir() {
    let home = tempfile::tempdir().unwrap();
    let mut file = std::fs::File::create(home.path().join("account.json")).unwrap();
    write!(file, "{{\n  \"private_key\": \"{}\"\n}}\n", seed()).unwrap();

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_env(StaticEnv {
            home_dir: Some(PathBuf::from(home.path())),
            envs: HashMap::from_iter([
                ("BAZAARNEXUS_API_KEY".to_string(), "env_key".to_string()),
                (
                    "BAZAARNEXUS_PRIVATE_KEY".to_string(),
                    "~/account.json".to_string(),
                ),
            ]),
        });

    let cred = DefaultCredentialProvider::new()
        .provide_credential(&ctx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cred, Credential::new("env_key", &seed(), "").unwrap());
}

#[tokio::test]
async fn test_empty_chain_returns_none() {
    let ctx = Context::new();
    let chain: ProvideCredentialChain<Credential> = ProvideCredentialChain::new();

    let result = chain.provide_credential(&ctx).await.unwrap();
    assert!(result.is_none());
}
