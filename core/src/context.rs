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

use crate::time::{self, DateTime};
use crate::{Error, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Context carries the collaborators used while signing and sending requests.
///
/// ## Important
///
/// spacesign provides NO default transport. Users MUST configure an [`HttpSend`]
/// before issuing requests, an unconfigured transport returns errors when called.
/// The clock defaults to [`SystemClock`] and the environment to [`NoopEnv`].
///
/// ## Example
///
/// ```
/// use spacesign_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// ```
#[derive(Clone)]
pub struct Context {
    http: Arc<dyn HttpSend>,
    env: Arc<dyn Env>,
    clock: Arc<dyn Clock>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("http", &self.http)
            .field("env", &self.env)
            .field("clock", &self.clock)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with no-op transport and environment.
    pub fn new() -> Self {
        Self {
            http: Arc::new(NoopHttpSend),
            env: Arc::new(NoopEnv),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the HTTP client implementation.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the clock implementation.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Send http request and return the response.
    #[inline]
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }

    /// Send http request and return the response as string.
    ///
    /// Invalid utf-8 sequences in the body are replaced instead of failing the call.
    pub async fn http_send_as_string(
        &self,
        req: http::Request<Bytes>,
    ) -> Result<http::Response<String>> {
        let (parts, body) = self.http.http_send(req).await?.into_parts();
        let body = String::from_utf8_lossy(&body).to_string();
        Ok(http::Response::from_parts(parts, body))
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Returns an hashmap of (variable, value) pairs of strings, for all the
    /// environment variables of the current process.
    #[inline]
    pub fn env_vars(&self) -> HashMap<String, String> {
        self.env.vars()
    }

    /// Current time according to the configured clock.
    #[inline]
    pub fn now(&self) -> DateTime {
        self.clock.now()
    }
}

/// HttpSend is used to send the signed http request.
///
/// Implementations report network level failures as [`crate::ErrorKind::Transport`]
/// and return every response they receive, whatever its status.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Permits parameterizing the environment access.
pub trait Env: Debug + Send + Sync + 'static {
    /// Get an environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns an hashmap of (variable, value) pairs of strings, for all the
    /// environment variables of the current process.
    fn vars(&self) -> HashMap<String, String>;
}

/// Implements Env for the OS context.
#[derive(Debug, Copy, Clone, Default)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key)?.into_string().ok()
    }

    fn vars(&self) -> HashMap<String, String> {
        std::env::vars().collect()
    }
}

/// StaticEnv provides a static env environment.
///
/// This is useful for testing or for providing a fixed environment.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// The environment variables to use.
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn vars(&self) -> HashMap<String, String> {
        self.envs.clone()
    }
}

/// Clock supplies the timestamp a request is signed with.
pub trait Clock: Debug + Send + Sync + 'static {
    /// Current UTC time.
    fn now(&self) -> DateTime;
}

/// SystemClock reads the current time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        time::now()
    }
}

/// FixedClock always returns the same instant.
///
/// Signatures only vary by timestamp, so a fixed clock makes them
/// reproducible in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime);

impl FixedClock {
    /// Create a clock frozen at `t`.
    pub fn new(t: DateTime) -> Self {
        Self(t)
    }

    /// Create a clock frozen at an ISO8601 basic timestamp like `20150830T123600Z`.
    pub fn from_iso8601(s: &str) -> Result<Self> {
        time::parse_iso8601(s).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime {
        self.0
    }
}

/// NoopHttpSend is a no-op implementation that always returns an error.
///
/// This is used when no HTTP client is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::transport(
            "HTTP sending not supported: no HTTP client configured",
        ))
    }
}

/// NoopEnv is a no-op implementation that always returns None/empty.
///
/// This is used when no environment is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _key: &str) -> Option<String> {
        None
    }

    fn vars(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::format_iso8601;
    use crate::ErrorKind;

    #[tokio::test]
    async fn test_noop_http_send_fails_as_transport_error() {
        let ctx = Context::new();
        let req = http::Request::new(Bytes::new());

        let err = ctx.http_send(req).await.expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_fixed_clock() {
        let ctx = Context::new()
            .with_clock(FixedClock::from_iso8601("20150830T123600Z").expect("must be valid"));

        assert_eq!(format_iso8601(ctx.now()), "20150830T123600Z");
        assert_eq!(ctx.now(), ctx.now());
    }

    #[test]
    fn test_static_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([("SPACES_REGION".to_string(), "ams3".to_string())]),
        });

        assert_eq!(ctx.env_var("SPACES_REGION").as_deref(), Some("ams3"));
        assert_eq!(ctx.env_var("SPACES_ENDPOINT"), None);
        assert_eq!(ctx.env_vars().len(), 1);
    }

    #[test]
    fn test_noop_env() {
        let ctx = Context::new();
        assert!(ctx.env_var("HOME").is_none());
        assert!(ctx.env_vars().is_empty());
    }
}
