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

// Headers used in spaces requests.
pub const X_AMZ_ACL: &str = "x-amz-acl";
pub const X_AMZ_CONTENT_SHA_256: &str = "x-amz-content-sha256";
pub const X_AMZ_DATE: &str = "x-amz-date";

// Env values used to build the config.
pub const SPACES_ACCESS_KEY_ID: &str = "SPACES_ACCESS_KEY_ID";
pub const SPACES_SECRET_ACCESS_KEY: &str = "SPACES_SECRET_ACCESS_KEY";
pub const SPACES_ENDPOINT: &str = "SPACES_ENDPOINT";
pub const SPACES_REGION: &str = "SPACES_REGION";
pub const SPACES_SPACE: &str = "SPACES_SPACE";

pub const DEFAULT_REGION: &str = "nyc3";
pub const DEFAULT_ENDPOINT: &str = "digitaloceanspaces.com";

/// Service name used in the credential scope.
pub const SERVICE: &str = "s3";
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - `/` is kept as the path segment separator.
pub static AWS_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Same as [`AWS_URI_ENCODE_SET`] but `/` is encoded too, used for query keys and values.
pub static AWS_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
