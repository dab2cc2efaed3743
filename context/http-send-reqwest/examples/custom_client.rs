use bytes::Bytes;
use spacesign_core::{Context, Result};
use spacesign_http_send_reqwest::ReqwestHttpSend;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Timeouts live in the transport, the signer has none.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("spacesign-example/0.1")
        .build()
        .expect("client must be valid");

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    let req = http::Request::builder()
        .method(http::Method::GET)
        .uri("https://nyc3.digitaloceanspaces.com/")
        .body(Bytes::new())?;

    let resp = ctx.http_send_as_string(req).await?;
    println!("status: {}", resp.status());
    println!("{}", resp.body());
    Ok(())
}
