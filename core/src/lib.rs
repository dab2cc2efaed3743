//! Core components for signing requests to S3-compatible storage.
//!
//! This crate provides the foundational types and traits for the spacesign ecosystem.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending,
//!   environment access and the clock
//! - **Traits**: Abstract interfaces for request signing (`SignRequest`) and
//!   credentials (`SigningCredential`)
//! - **SigningRequest / SignedHeaders**: the input and output of one signing call
//!
//! ## Example
//!
//! ```
//! use spacesign_core::{Context, FixedClock, Result, SignRequest, SignedHeaders, SigningRequest};
//! use http::{HeaderName, HeaderValue, Method};
//!
//! #[derive(Debug)]
//! struct HostOnly;
//!
//! impl SignRequest for HostOnly {
//!     type Credential = ();
//!
//!     fn sign_request(&self, _: &Context, req: &SigningRequest, _: &()) -> Result<SignedHeaders> {
//!         let mut headers = SignedHeaders::new();
//!         headers.push(HeaderName::from_static("host"), HeaderValue::from_str(&req.host)?);
//!         Ok(headers)
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let ctx = Context::new().with_clock(FixedClock::from_iso8601("20150830T123600Z")?);
//! let req = SigningRequest::new(Method::GET, "nyc3.digitaloceanspaces.com");
//! let headers = HostOnly.sign_request(&ctx, &req, &())?;
//! assert_eq!(headers.names(), vec!["host"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time formatting utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Clock;
pub use context::Context;
pub use context::Env;
pub use context::FixedClock;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;
pub use context::SystemClock;

mod api;
pub use api::{SignRequest, SigningCredential};
mod request;
pub use request::{SignedHeaders, SigningRequest};
mod error;
pub use error::{Error, ErrorKind, Result};
