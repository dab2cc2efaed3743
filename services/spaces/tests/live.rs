//! Tests against a real Spaces account.
//!
//! Set `SPACESIGN_TEST=on` together with `SPACES_ACCESS_KEY_ID`,
//! `SPACES_SECRET_ACCESS_KEY` and optionally `SPACES_REGION` to run them.

use anyhow::Result;
use http::StatusCode;
use log::{debug, warn};
use spacesign_core::{Context, ErrorKind, OsEnv};
use spacesign_http_send_reqwest::ReqwestHttpSend;
use spacesign_spaces::{CannedAcl, Client, Config, ListObjectsOptions};
use std::env;

fn init_live_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("SPACESIGN_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let cfg = Config::default().from_env(&ctx);

    let client = Client::new(ctx, cfg)
        .expect("SPACES_ACCESS_KEY_ID and SPACES_SECRET_ACCESS_KEY must be set");
    Some(client)
}

#[tokio::test]
async fn test_live_list_buckets() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("SPACESIGN_TEST is not set, skipped");
        return Ok(());
    };

    let body = client.list_buckets().await?;
    debug!("list buckets: {body}");
    assert!(body.contains("ListAllMyBucketsResult"));
    Ok(())
}

#[tokio::test]
async fn test_live_bucket_lifecycle() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("SPACESIGN_TEST is not set, skipped");
        return Ok(());
    };

    let bucket = format!(
        "spacesign-test-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)?
            .as_secs()
    );

    client.create_bucket(&bucket, CannedAcl::PublicRead).await?;

    let acl = client.get_bucket_acl(&bucket).await?;
    debug!("bucket acl: {acl}");
    assert!(acl.contains("AllUsers"));

    let location = client.get_bucket_region(&bucket).await?;
    assert!(location.contains(client.region()));

    let status = client.delete_bucket(&bucket).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let err = client
        .get_bucket_acl(&bucket)
        .await
        .expect_err("deleted bucket must not be found");
    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    Ok(())
}

#[tokio::test]
async fn test_live_list_bucket_contents() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("SPACESIGN_TEST is not set, skipped");
        return Ok(());
    };
    if client.space().is_none() {
        warn!("SPACES_SPACE is not set, skipped");
        return Ok(());
    }

    let body = client
        .list_bucket_contents(&ListObjectsOptions {
            max_keys: 10,
            ..Default::default()
        })
        .await?;
    assert!(body.contains("ListBucketResult"));
    Ok(())
}
