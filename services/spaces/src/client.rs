use crate::config::is_host_part;
use crate::constants::X_AMZ_ACL;
use crate::sign_request::{canonical_query, canonical_uri};
use crate::types::{CannedAcl, ListObjectsOptions};
use crate::{Config, Credential, RequestSigner};
use bytes::Bytes;
use http::uri::Scheme;
use http::{Method, StatusCode};
use log::debug;
use spacesign_core::{Context, Error, Result, SignRequest, SigningRequest};
use std::fmt::Write;
use std::sync::Arc;

/// Client for bucket level operations on S3-compatible storage.
///
/// Every operation builds a fresh [`SigningRequest`], asks the signer for
/// headers and sends the request through the context's transport. Bodies are
/// returned verbatim, nothing is parsed.
///
/// Hosts are virtual-hosted-style: `{bucket}.{region}.{endpoint}` for bucket
/// operations and `{region}.{endpoint}` for account level ones.
#[derive(Clone, Debug)]
pub struct Client {
    ctx: Context,
    signer: Arc<dyn SignRequest<Credential = Credential>>,
    credential: Credential,
    region: String,
    endpoint: String,
    space: Option<String>,
    scheme: Scheme,
}

impl Client {
    /// Create a client from config, signing with [`RequestSigner`].
    ///
    /// The signer is built for the same region the hosts are built from, so
    /// the credential scope always matches the host a request is sent to.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        config.validate()?;
        let credential = config.credential()?;
        let region = config.region().to_string();

        Ok(Self {
            ctx,
            signer: Arc::new(RequestSigner::new(&region)),
            credential,
            endpoint: config.endpoint().to_string(),
            space: config.space,
            region,
            scheme: Scheme::HTTPS,
        })
    }

    /// Replace the scheme, `https` by default.
    ///
    /// Only useful for local gateways that don't speak TLS.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Region this client signs for.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Default space used by [`Client::list_bucket_contents`].
    pub fn space(&self) -> Option<&str> {
        self.space.as_deref()
    }

    /// Create a bucket, returning the response body.
    ///
    /// Any acl other than [`CannedAcl::Private`] is sent as a signed `x-amz-acl` header.
    pub async fn create_bucket(&self, name: &str, acl: CannedAcl) -> Result<String> {
        let mut req = SigningRequest::new(Method::PUT, self.bucket_host(name)?);
        if acl != CannedAcl::Private {
            req.header_push(X_AMZ_ACL, acl.as_str());
        }

        self.send_as_string(req).await
    }

    /// List all buckets in the region, returning the response body.
    pub async fn list_buckets(&self) -> Result<String> {
        let req = SigningRequest::new(Method::GET, self.regional_host());

        self.send_as_string(req).await
    }

    /// List the objects of the default space, returning the response body.
    ///
    /// Without a default space the listing is sent to the regional host.
    pub async fn list_bucket_contents(&self, opts: &ListObjectsOptions) -> Result<String> {
        let host = match &self.space {
            Some(space) => self.bucket_host(space)?,
            None => self.regional_host(),
        };
        let mut req = SigningRequest::new(Method::GET, host);
        req.query = opts.query_pairs();

        self.send_as_string(req).await
    }

    /// Get the location of a bucket, returning the response body.
    pub async fn get_bucket_region(&self, bucket: &str) -> Result<String> {
        let mut req = SigningRequest::new(Method::GET, self.bucket_host(bucket)?);
        req.query_append("location");

        self.send_as_string(req).await
    }

    /// Get the acl of a bucket, returning the response body.
    pub async fn get_bucket_acl(&self, bucket: &str) -> Result<String> {
        let mut req = SigningRequest::new(Method::GET, self.bucket_host(bucket)?);
        req.query_append("acl");

        self.send_as_string(req).await
    }

    /// Delete a bucket, returning the status code.
    pub async fn delete_bucket(&self, bucket: &str) -> Result<StatusCode> {
        let req = SigningRequest::new(Method::DELETE, self.bucket_host(bucket)?);

        let resp = self.send(req).await?;
        Ok(resp.status())
    }

    fn regional_host(&self) -> String {
        format!("{}.{}", self.region, self.endpoint)
    }

    fn bucket_host(&self, bucket: &str) -> Result<String> {
        if !is_host_part(bucket) {
            return Err(Error::request_invalid(format!(
                "bucket name {bucket:?} can't be used as host label"
            )));
        }
        Ok(format!("{}.{}.{}", bucket, self.region, self.endpoint))
    }

    async fn send_as_string(&self, req: SigningRequest) -> Result<String> {
        let resp = self.send(req).await?;
        Ok(String::from_utf8_lossy(resp.body()).to_string())
    }

    /// Sign and send the request, failing on non-success status.
    async fn send(&self, req: SigningRequest) -> Result<http::Response<Bytes>> {
        let http_req = self.build_request(&req)?;
        let method = http_req.method().clone();
        let uri = http_req.uri().clone();

        let resp = self.ctx.http_send(http_req).await?;
        let status = resp.status();
        debug!("{method} {uri} responded with {status}");

        if !status.is_success() {
            return Err(Error::http_status(
                status,
                String::from_utf8_lossy(resp.body()),
            ));
        }
        Ok(resp)
    }

    /// Build the http request that carries the signed headers.
    ///
    /// The uri is rendered from the same encoded path and query the signer
    /// canonicalizes, so what is sent is what was signed.
    fn build_request(&self, req: &SigningRequest) -> Result<http::Request<Bytes>> {
        let signed = self
            .signer
            .sign_request(&self.ctx, req, &self.credential)?;

        let mut uri = format!("{}://{}{}", self.scheme, req.host, canonical_uri(&req.path)?);
        for (idx, (k, v)) in canonical_query(&req.query).into_iter().enumerate() {
            uri.push(if idx == 0 { '?' } else { '&' });
            uri.push_str(&k);
            if !v.is_empty() {
                write!(uri, "={v}")?;
            }
        }

        let mut http_req = http::Request::builder()
            .method(req.method.clone())
            .uri(uri)
            .body(req.payload.clone())?;
        signed.apply(http_req.headers_mut());

        Ok(http_req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use spacesign_core::{ErrorKind, FixedClock};

    fn test_client(space: Option<&str>) -> Client {
        let ctx = Context::new()
            .with_clock(FixedClock::from_iso8601("20150830T123600Z").expect("valid"));
        let cfg = Config {
            access_key_id: Some("AKIDEXAMPLE".to_string()),
            secret_access_key: Some("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY".to_string()),
            space: space.map(String::from),
            ..Default::default()
        };

        Client::new(ctx, cfg).expect("client must be valid")
    }

    #[test]
    fn test_new_requires_credential() {
        let err = Client::new(Context::new(), Config::default()).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_build_request_uri_and_headers() -> anyhow::Result<()> {
        let client = test_client(None);
        let mut req = SigningRequest::new(Method::GET, client.bucket_host("examplebucket")?);
        req.query_append("acl");

        let http_req = client.build_request(&req)?;

        assert_eq!(
            http_req.uri().to_string(),
            "https://examplebucket.nyc3.digitaloceanspaces.com/?acl"
        );
        assert_eq!(
            http_req.headers()["host"],
            "examplebucket.nyc3.digitaloceanspaces.com"
        );
        assert_eq!(http_req.headers()["x-amz-date"], "20150830T123600Z");
        assert!(http_req.headers().contains_key("authorization"));
        Ok(())
    }

    #[test]
    fn test_build_request_encodes_query() -> anyhow::Result<()> {
        let client = test_client(None).with_scheme(Scheme::HTTP);
        let mut req = SigningRequest::new(Method::GET, client.regional_host());
        req.query = ListObjectsOptions {
            prefix: "photos/2015 summer".to_string(),
            max_keys: 10,
            ..Default::default()
        }
        .query_pairs();

        let http_req = client.build_request(&req)?;

        assert_eq!(
            http_req.uri().to_string(),
            "http://nyc3.digitaloceanspaces.com/?max-keys=10&prefix=photos%2F2015%20summer"
        );
        Ok(())
    }

    #[test]
    fn test_invalid_bucket_name() {
        let client = test_client(None);

        for name in ["", "a/b", "evil.com:443", "a@evil.com", "MyBucket", ".photos"] {
            let err = client.bucket_host(name).expect_err("must fail");
            assert_eq!(err.kind(), ErrorKind::RequestInvalid, "bucket {name:?}");
        }
    }

    #[test]
    fn test_hosts() -> anyhow::Result<()> {
        let client = test_client(Some("photos"));

        assert_eq!(client.regional_host(), "nyc3.digitaloceanspaces.com");
        assert_eq!(
            client.bucket_host("examplebucket")?,
            "examplebucket.nyc3.digitaloceanspaces.com"
        );
        assert_eq!(client.space(), Some("photos"));
        Ok(())
    }
}
