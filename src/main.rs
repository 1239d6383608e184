use anyhow::Context;
use tracing::{info, Instrument};

use storefront_admin::app_system::{setup_tracing, AdminSystem};
use storefront_admin::config::AdminConfig;
use storefront_admin::store::{JsonFileStorage, KeyValueStore, MemoryStorage};
use storefront_admin::sync::SeedCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AdminConfig::from_env();
    info!(?config, "Starting storefront admin");

    let seed = match &config.seed_file {
        Some(path) => SeedCatalog::from_path(path).with_context(|| format!("loading seed {}", path.display()))?,
        None => SeedCatalog::builtin(),
    };

    match &config.data_file {
        Some(path) => {
            let storage = JsonFileStorage::open(path).with_context(|| format!("opening store {}", path.display()))?;
            run(storage, seed, &config).await
        }
        None => run(MemoryStorage::new(), seed, &config).await,
    }
}

async fn run<S>(storage: S, seed: SeedCatalog, config: &AdminConfig) -> anyhow::Result<()>
where
    S: KeyValueStore + Send + 'static,
{
    let system = AdminSystem::start(storage, seed, config)?;

    let span = tracing::info_span!("dashboard_report");
    let report = async {
        info!("Building dashboard report");
        system.stats.report().await
    }
    .instrument(span)
    .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
