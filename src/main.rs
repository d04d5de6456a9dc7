use anyhow::Context;

use novely_client::infra::{settings::Settings, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    telemetry::init(&settings.telemetry);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %settings.api.base_url,
        "starting novely MCP server"
    );

    novely_client::interface::mcp::run(settings).await
}
