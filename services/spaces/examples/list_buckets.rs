use anyhow::Result;
use spacesign_core::{Context, OsEnv};
use spacesign_http_send_reqwest::ReqwestHttpSend;
use spacesign_spaces::{Client, Config, ListObjectsOptions};

/// List buckets of the account and, if `SPACES_SPACE` is set, the first keys of that space.
///
/// ```shell
/// SPACES_ACCESS_KEY_ID=... SPACES_SECRET_ACCESS_KEY=... cargo run --example list_buckets
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let config = Config::default().from_env(&ctx);
    let client = Client::new(ctx, config)?;

    println!("{}", client.list_buckets().await?);

    if let Some(space) = client.space() {
        println!("keys of {space}:");
        let body = client
            .list_bucket_contents(&ListObjectsOptions {
                max_keys: 20,
                ..Default::default()
            })
            .await?;
        println!("{body}");
    }

    Ok(())
}
