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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used by the unified api.
pub const BAZAARNEXUS_API_KEY: &str = "BAZAARNEXUS_API_KEY";
pub const BAZAARNEXUS_PRIVATE_KEY: &str = "BAZAARNEXUS_PRIVATE_KEY";
pub const BAZAARNEXUS_AUTHORIZE: &str = "BAZAARNEXUS_AUTHORIZE";
pub const BAZAARNEXUS_ENDPOINT: &str = "BAZAARNEXUS_ENDPOINT";

// Headers attached to every signed request.
pub const X_BAZAARNEXUS_AUTHORIZE: &str = "bazaarnexus-authorize";
pub const X_BAZAARNEXUS_APIKEY: &str = "bazaarnexus-apikey";
pub const X_BAZAARNEXUS_NONCE: &str = "bazaarnexus-nonce";
pub const X_BAZAARNEXUS_SIGNATURE: &str = "bazaarnexus-signature";
pub const X_BAZAARNEXUS_ROUTE: &str = "bazaarnexus-route";

/// Query parameter carrying the normalized route.
pub const ROUTE_QUERY: &str = "route";

/// Delimiter replacing path separators inside a route.
pub const ROUTE_DELIMITER: char = '|';

/// Envelope status of a successful call.
pub const STATUS_SUCCESS: &str = "success";
/// Envelope status used for every locally built failure.
pub const STATUS_FAILED: &str = "failed";

pub const INVALID_JSON_RESPONSE: &str = "Invalid JSON response";
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Status code reported when no response was received.
pub const TRANSPORT_FAILURE_CODE: u16 = 500;

pub const DEFAULT_USER_AGENT: &str = concat!("bazaarnexus-rust/", env!("CARGO_PKG_VERSION"));

/// AsciiSet for the `route` query value.
///
/// - Encode every byte except the unreserved characters and the route delimiter `|`.
pub static ROUTE_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'|');
