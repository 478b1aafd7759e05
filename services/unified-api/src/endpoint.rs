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

use log::debug;
use url::Url;

/// Normalize a base URL into the request target every call is posted to.
///
/// - query, fragment and userinfo are dropped
/// - a trailing file name such as `index.php` is replaced by its directory
/// - the result always ends with exactly one `/`
///
/// Input that can't be parsed as an absolute URL with a host is kept as is,
/// apart from the trailing slash. This never fails.
pub fn normalize_endpoint(raw: &str) -> String {
    let raw = raw.trim();

    let url = match Url::parse(raw) {
        Ok(url) if url.host_str().is_some() => url,
        _ => {
            debug!("endpoint {raw} is not an absolute url, keep it opaque");
            return format!("{}/", raw.trim_end_matches('/'));
        }
    };

    let mut path = url.path();
    if !path.ends_with('/') {
        if let Some((parent, name)) = path.rsplit_once('/') {
            if is_file_name(name) {
                path = parent;
            }
        }
    }
    let path = path.trim_end_matches('/');

    let mut endpoint = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        endpoint.push(':');
        endpoint.push_str(&port.to_string());
    }
    endpoint.push_str(path);
    endpoint.push('/');

    debug!("endpoint normalized from {raw} to {endpoint}");
    endpoint
}

/// A segment ending with `.` followed by ASCII letters or digits.
fn is_file_name(segment: &str) -> bool {
    match segment.rsplit_once('.') {
        Some((_, ext)) => !ext.is_empty() && ext.bytes().all(|b| b.is_ascii_alphanumeric()),
        None => false,
    }
}
