use anyhow::{Context, Result};
use surfsup_climate::{ClimateClient, SqliteClimateStore};
use surfsup_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Initialize core
    surfsup_core::init(&config.logging.filter);
    config.ensure_valid()?;

    let store = SqliteClimateStore::open(&config.database.path).with_context(|| {
        format!(
            "Failed to open climate dataset at {}",
            config.database.path.display()
        )
    })?;
    let client = ClimateClient::sqlite(store);

    let addr = config.server.socket_addr()?;
    tracing::info!("SurfsUp API starting on {}", addr);

    surfsup_api::serve(addr, client, surfsup_api::shutdown_signal()).await?;

    tracing::info!("SurfsUp API stopped");
    Ok(())
}
