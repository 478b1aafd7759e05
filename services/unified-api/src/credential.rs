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

use bazaarnexus_core::{utils::Redact, Context, Error, Result, SigningCredential};

use crate::key::{load_secret_key, parse_secret_key, signing_key};

/// Credential for the unified api.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// API key sent in the `bazaarnexus-apikey` header.
    pub api_key: String,
    /// Canonical base64 text of the 64 bytes Ed25519 secret key.
    pub secret_key: String,
    /// Role bound into every signature, always lowercase.
    pub authorize: String,
}

impl Credential {
    /// Create a new credential from inline key material.
    ///
    /// `private_key` accepts every inline form understood by
    /// [`parse_secret_key`]. Use a credential provider to load key files.
    pub fn new(
        api_key: impl Into<String>,
        private_key: &str,
        authorize: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        check_required(&api_key, private_key)?;

        Ok(Self::from_secret_key(
            api_key,
            parse_secret_key(private_key)?,
            authorize,
        ))
    }

    /// Create a new credential, reading `.json` key files through `ctx`.
    pub async fn load(
        ctx: &Context,
        api_key: impl Into<String>,
        private_key: &str,
        authorize: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        check_required(&api_key, private_key)?;

        let secret_key = load_secret_key(ctx, private_key).await?;
        Ok(Self::from_secret_key(api_key, secret_key, authorize))
    }

    /// Build a credential from an already normalized secret key.
    pub(crate) fn from_secret_key(
        api_key: impl Into<String>,
        secret_key: String,
        authorize: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key,
            authorize: authorize.into().to_lowercase(),
        }
    }
}

fn check_required(api_key: &str, private_key: &str) -> Result<()> {
    if api_key.trim().is_empty() || private_key.trim().is_empty() {
        return Err(Error::config_invalid("API key and Private Key are required"));
    }
    Ok(())
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &Redact::from(&self.api_key))
            .field("secret_key", &Redact::secret(&self.secret_key))
            .field("authorize", &self.authorize)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.api_key.is_empty() && signing_key(&self.secret_key).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaarnexus_core::hash::base64_encode;
    use bazaarnexus_core::ErrorKind;

    #[test]
    fn test_credential_normalizes_inputs() {
        let seed = base64_encode(&[3; 32]);
        let cred = Credential::new("BZRX9Q2L7APF5HY3DMKC8TJN", &seed, "Merchant").unwrap();

        assert_eq!(cred.authorize, "merchant");
        assert_ne!(cred.secret_key, seed);
        assert!(cred.is_valid());
    }

    #[test]
    fn test_credential_rejects_bad_key() {
        let err = Credential::new("key", "aGVsbG8=", "user").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyInvalid);
    }

    #[test]
    fn test_credential_requires_api_key_and_private_key() {
        let seed = base64_encode(&[3; 32]);

        let err = Credential::new("", &seed, "user").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = Credential::new("key", "  ", "user").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[tokio::test]
    async fn test_credential_load_from_key_file() {
        use bazaarnexus_file_read_tokio::TokioFileRead;
        use std::io::Write;

        let seed = base64_encode(&[3; 32]);
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"private_key": "{seed}"}}"#).unwrap();

        let ctx = Context::new().with_file_read(TokioFileRead);
        let loaded = Credential::load(&ctx, "key", file.path().to_str().unwrap(), "User")
            .await
            .unwrap();

        assert_eq!(loaded, Credential::new("key", &seed, "user").unwrap());
    }

    #[tokio::test]
    async fn test_credential_load_missing_key_file() {
        use bazaarnexus_file_read_tokio::TokioFileRead;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("account.json");

        let ctx = Context::new().with_file_read(TokioFileRead);
        let err = Credential::load(&ctx, "key", path.to_str().unwrap(), "user")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyInvalid);
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let seed = base64_encode(&[3; 32]);
        let cred = Credential::new("BZRX9Q2L7APF5HY3DMKC8TJN", &seed, "user").unwrap();

        let output = format!("{cred:?}");
        assert!(output.contains("BZR***TJN"));
        assert!(output.contains("secret_key: ***"));
        assert!(!output.contains(&cred.secret_key[..3]));
        assert!(output.contains("user"));
    }

    #[test]
    fn test_hand_built_credential_with_seed_is_invalid() {
        let cred = Credential {
            api_key: "key".to_string(),
            secret_key: base64_encode(&[3; 32]),
            authorize: "user".to_string(),
        };
        assert!(!cred.is_valid());
    }
}
