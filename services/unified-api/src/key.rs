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

//! Ed25519 key material normalization.
//!
//! Accepted inputs:
//!
//! - base64 of the 64 bytes secret key (seed followed by public key)
//! - base64 of the 32 bytes seed
//! - path to a `.json` file shaped like `{"private_key": "<base64>"}`
//! - the same JSON document inline
//!
//! Whatever the input, the output is the canonical base64 text of the 64
//! bytes secret key.

use ed25519_dalek::{SigningKey, KEYPAIR_LENGTH, SECRET_KEY_LENGTH};
use log::debug;
use serde::Deserialize;

use bazaarnexus_core::hash::{base64_decode, base64_encode};
use bazaarnexus_core::{Context, Error, Result};

/// Exported key file layout.
#[derive(Deserialize)]
struct KeyFile {
    private_key: String,
}

/// Load key material into the canonical secret key.
///
/// Values ending in `.json` are read through the context's file reader
/// first, then handed to [`parse_secret_key`].
pub async fn load_secret_key(ctx: &Context, raw: &str) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(Error::key_invalid("Invalid Private Key"));
    }

    if !is_json_path(value) {
        return parse_secret_key(value);
    }

    let path = ctx
        .expand_home_dir(value)
        .ok_or_else(|| Error::key_invalid("Invalid Private Key: home dir not found"))?;
    debug!("loading private key from file: {path}");

    let content = ctx.file_read_as_string(&path).await.map_err(|e| {
        Error::key_invalid(format!("Invalid Private Key: failed to read {path}")).with_source(e)
    })?;
    let content = content.trim();
    if content.is_empty() {
        return Err(Error::key_invalid("Invalid Private Key: key file is empty"));
    }

    parse_secret_key(content)
}

/// Parse inline key material into the canonical secret key.
///
/// This never touches the file system; use [`load_secret_key`] for paths.
///
/// A 64 bytes key is not passed through as is: its public half must be the
/// one derived from its seed, otherwise the key is rejected as
/// [`ErrorKind::KeyInvalid`](bazaarnexus_core::ErrorKind::KeyInvalid).
/// Signing with such a key would only fail later on the server side.
pub fn parse_secret_key(value: &str) -> Result<String> {
    let mut value = value.trim();
    if value.is_empty() {
        return Err(Error::key_invalid("Invalid Private Key"));
    }

    let from_json;
    if let Ok(file) = serde_json::from_str::<KeyFile>(value) {
        from_json = file.private_key;
        value = from_json.trim();
    }

    let bs = base64_decode(value).map_err(|e| {
        Error::key_invalid("Invalid Private Key format: not base64 or JSON").with_source(e)
    })?;

    match bs.len() {
        KEYPAIR_LENGTH => {
            let keypair: &[u8; KEYPAIR_LENGTH] = bs
                .as_slice()
                .try_into()
                .map_err(|_| Error::key_invalid("Invalid Ed25519 Private Key length"))?;
            // Public half must match the seed.
            let key = SigningKey::from_keypair_bytes(keypair).map_err(|e| {
                Error::key_invalid("Invalid Ed25519 Private Key: public key mismatch")
                    .with_source(e)
            })?;
            Ok(base64_encode(&key.to_keypair_bytes()))
        }
        SECRET_KEY_LENGTH => {
            let seed: &[u8; SECRET_KEY_LENGTH] = bs
                .as_slice()
                .try_into()
                .map_err(|_| Error::key_invalid("Invalid Ed25519 Private Key length"))?;
            let key = SigningKey::from_bytes(seed);
            Ok(base64_encode(&key.to_keypair_bytes()))
        }
        n => Err(Error::key_invalid(format!(
            "Invalid Ed25519 Private Key length: {n} bytes"
        ))),
    }
}

/// Decode a canonical secret key back into a signing key.
///
/// Only the 64 bytes form is accepted here, a bare seed is rejected.
pub fn signing_key(secret_key: &str) -> Result<SigningKey> {
    let bs = base64_decode(secret_key)
        .map_err(|e| Error::key_invalid("Invalid Ed25519 Private Key").with_source(e))?;
    let keypair: &[u8; KEYPAIR_LENGTH] = bs.as_slice().try_into().map_err(|_| {
        Error::key_invalid("Invalid Ed25519 Private Key (must be 64-byte secret)")
    })?;

    SigningKey::from_keypair_bytes(keypair)
        .map_err(|e| Error::key_invalid("Invalid Ed25519 Private Key").with_source(e))
}

/// Base64 of the 32 bytes public key matching a canonical secret key.
///
/// This is the value registered on the server side.
pub fn public_key(secret_key: &str) -> Result<String> {
    let key = signing_key(secret_key)?;
    Ok(base64_encode(key.verifying_key().as_bytes()))
}

fn is_json_path(value: &str) -> bool {
    value.len() > ".json".len()
        && value
            .get(value.len() - ".json".len()..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".json"))
}
