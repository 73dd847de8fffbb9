use gateway_rpc::{ClientConfig, GatewayClient};
use serde_json::{json, Map};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ClientConfig::from_env().map_err(anyhow::Error::msg)?;
    let client = GatewayClient::new(config)?;

    let peer = std::env::args().nth(1).unwrap_or_else(|| "telegram".to_owned());
    let mut data = Map::new();
    data.insert("peer".to_owned(), json!(peer));
    data.insert("limit".to_owned(), json!(5));

    let html = client.get_history_html(data).await?;
    println!("{html}");

    if let Some(found) = client.search(&peer).await? {
        println!("peer: {found}");
    }

    Ok(())
}
