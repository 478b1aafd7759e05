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

//! Encoding related utils.

use crate::Error;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;

/// Base64 encode with the standard alphabet and padding.
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Base64 decode.
///
/// Decoding is strict: the input must use the standard alphabet with
/// canonical padding, and must not carry whitespace or trailing bits.
pub fn base64_decode(content: &str) -> crate::Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(content)
        .map_err(|e| Error::unexpected("base64 decode failed").with_source(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_decode_is_strict() {
        assert_eq!(base64_decode("aGVsbG8=").unwrap(), b"hello");

        // Missing padding.
        assert!(base64_decode("aGVsbG8").is_err());
        // Non canonical trailing bits.
        assert!(base64_decode("aGVsbG9=").is_err());
        // Characters outside of the alphabet.
        assert!(base64_decode("aGVs bG8=").is_err());
        assert!(base64_decode("account.json").is_err());
    }

    #[test]
    fn test_base64_encode() {
        assert_eq!(base64_encode(b"hello"), "aGVsbG8=");
        assert_eq!(base64_encode(b""), "");
    }
}
