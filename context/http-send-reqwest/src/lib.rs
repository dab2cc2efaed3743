//! [`HttpSend`] implementation backed by [`reqwest`].

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::{Client, Request};
use spacesign_core::{Error, HttpSend, Result};

/// ReqwestHttpSend sends signed requests with a [`reqwest::Client`].
///
/// Any response the service returns is handed back as is, including
/// non-success statuses. Only failures to reach the service or read the
/// body are reported as transport errors.
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request into reqwest request").with_source(e)
        })?;
        debug!("sending {} {}", req.method(), req.url());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport("failed to execute request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
