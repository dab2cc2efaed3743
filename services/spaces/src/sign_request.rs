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

use crate::constants::{
    ALGORITHM, AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, SERVICE, X_AMZ_CONTENT_SHA_256,
    X_AMZ_DATE,
};
use crate::Credential;
use http::header::{self, HeaderName};
use http::HeaderValue;
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use spacesign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use spacesign_core::time::{format_date, format_iso8601, DateTime};
use spacesign_core::{Context, Error, Result, SignRequest, SignedHeaders, SigningRequest};
use std::fmt::Write;

/// RequestSigner that implements AWS SigV4 for the `s3` service.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signer holds nothing but the region. Every call builds its canonical
/// headers from scratch, so one signer can be shared by any number of
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    region: String,
}

impl RequestSigner {
    /// Create a new signer for `region`.
    pub fn new(region: &str) -> Self {
        Self {
            region: region.to_string(),
        }
    }

    /// Region used in the credential scope.
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(
        &self,
        ctx: &Context,
        req: &SigningRequest,
        cred: &Self::Credential,
    ) -> Result<SignedHeaders> {
        let now = ctx.now();
        let date_time = format_iso8601(now);

        let host = HeaderValue::from_str(&req.host)
            .map_err(|e| Error::encoding(format!("invalid host {:?}", req.host)).with_source(e))?;
        let date_header = HeaderValue::try_from(date_time.as_str())?;
        let payload_hash = hex_sha256(&req.payload);

        let extra = extra_headers(req)?;
        let canonical_headers = {
            let mut hs = Vec::with_capacity(extra.len() + 2);
            hs.push((header::HOST, host.clone()));
            hs.push((HeaderName::from_static(X_AMZ_DATE), date_header.clone()));
            hs.extend(extra.iter().cloned());
            hs.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
            hs
        };
        let signed_headers = canonical_headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";");

        // build canonical request and string to sign.
        let creq =
            canonical_request_string(req, &canonical_headers, &signed_headers, &payload_hash)?;
        debug!("calculated canonical request: {creq}");
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20220313/<region>/s3/aws4_request"
        let scope = format!("{}/{}/{}/aws4_request", format_date(now), self.region, SERVICE);
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/s3/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{ALGORITHM}")?;
            writeln!(f, "{date_time}")?;
            writeln!(f, "{scope}")?;
            write!(f, "{encoded_req}")?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(&cred.secret_access_key, now, &self.region);
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{ALGORITHM} Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id, scope, signed_headers, signature
        ))
        .map_err(|e| Error::encoding("failed to create authorization header").with_source(e))?;
        authorization.set_sensitive(true);

        let mut signed = SignedHeaders::new();
        signed.push(header::AUTHORIZATION, authorization);
        signed.push(header::HOST, host);
        signed.push(
            HeaderName::from_static(X_AMZ_CONTENT_SHA_256),
            HeaderValue::try_from(payload_hash)?,
        );
        signed.push(HeaderName::from_static(X_AMZ_DATE), date_header);
        for (k, v) in extra {
            signed.push(k, v);
        }
        Ok(signed)
    }
}

/// Validate and normalize the extra headers, keeping their order.
fn extra_headers(req: &SigningRequest) -> Result<Vec<(HeaderName, HeaderValue)>> {
    let mut hs: Vec<(HeaderName, HeaderValue)> = Vec::with_capacity(req.headers.len());

    for (name, value) in &req.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::encoding(format!("invalid header name {name:?}")).with_source(e))?;
        if name == header::HOST
            || name == header::AUTHORIZATION
            || name.as_str() == X_AMZ_DATE
            || name.as_str() == X_AMZ_CONTENT_SHA_256
        {
            return Err(Error::request_invalid(format!(
                "header {name} is computed by the signer and can't be supplied"
            )));
        }
        if hs.iter().any(|(k, _)| *k == name) {
            return Err(Error::request_invalid(format!(
                "header {name} is supplied more than once"
            )));
        }

        let value =
            HeaderValue::from_str(SigningRequest::header_value_normalize(value)).map_err(|e| {
                Error::encoding(format!("invalid value for header {name}")).with_source(e)
            })?;
        hs.push((name, value));
    }

    Ok(hs)
}

fn canonical_request_string(
    req: &SigningRequest,
    canonical_headers: &[(HeaderName, HeaderValue)],
    signed_headers: &str,
    payload_hash: &str,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", req.method)?;
    // Insert encoded path
    writeln!(f, "{}", canonical_uri(&req.path)?)?;
    // Insert query
    writeln!(
        f,
        "{}",
        SigningRequest::pairs_to_string(canonical_query(&req.query), "=", "&")
    )?;
    // Insert signed headers
    for (k, v) in canonical_headers {
        writeln!(f, "{}:{}", k.as_str(), v.to_str()?)?;
    }
    writeln!(f)?;
    writeln!(f, "{signed_headers}")?;
    write!(f, "{payload_hash}")?;

    Ok(f)
}

/// Percent-encode the path the way SigV4 expects it.
///
/// The path is decoded first so that already encoded input isn't encoded twice.
/// An encoded `/` would come out as a separator, so it's rejected.
pub(crate) fn canonical_uri(path: &str) -> Result<String> {
    if !path.starts_with('/') {
        return Err(Error::request_invalid(format!(
            "path {path:?} must start with '/'"
        )));
    }
    if path.to_ascii_lowercase().contains("%2f") {
        return Err(Error::request_invalid(format!(
            "path {path:?} contains an encoded '/'"
        )));
    }

    let path = percent_decode_str(path)
        .decode_utf8()
        .map_err(|e| Error::encoding(format!("path {path:?} is not valid utf-8")).with_source(e))?;
    Ok(utf8_percent_encode(&path, &AWS_URI_ENCODE_SET).to_string())
}

/// Percent-encode query pairs, sorted by key then value.
pub(crate) fn canonical_query(query: &[(String, String)]) -> Vec<(String, String)> {
    let mut q = query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect::<Vec<_>>();
    q.sort();
    q
}

fn generate_signing_key(secret: &str, time: DateTime, region: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), SERVICE.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
