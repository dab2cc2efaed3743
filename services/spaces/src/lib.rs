//! Signing and bucket operations for S3-compatible storage like DigitalOcean Spaces.
//!
//! Requests are authenticated with AWS SigV4, scoped to the `s3` service.
//!
//! ## Example
//!
//! ```no_run
//! use spacesign_core::{Context, OsEnv, Result};
//! use spacesign_http_send_reqwest::ReqwestHttpSend;
//! use spacesign_spaces::{CannedAcl, Client, Config};
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let config = Config::default().from_env(&ctx);
//!
//! let client = Client::new(ctx, config)?;
//! client.create_bucket("examplebucket", CannedAcl::PublicRead).await?;
//! let buckets = client.list_buckets().await?;
//! println!("{buckets}");
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;

mod config;
pub use config::Config;
mod credential;
pub use credential::Credential;
mod sign_request;
pub use sign_request::RequestSigner;
mod types;
pub use types::{CannedAcl, ListObjectsOptions, DEFAULT_MAX_KEYS};
mod client;
pub use client::Client;
