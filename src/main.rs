//! Storefront Relay - Binary Entry Point
//!
//! Starts the realtime broadcast relay on `SOCKET_PORT` (default 4000).

use storefront_relay::{api, RelayConfig, RelayResult, NAME, VERSION};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> RelayResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::from_env()?;
    tracing::info!(service = NAME, version = VERSION, port = config.port, "starting relay");

    api::serve(config).await
}
