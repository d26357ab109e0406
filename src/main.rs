//! classified-ads server binary.

use anyhow::Context;
use clap::Parser;
use classified_ads::infrastructure::config::{AppConfig, StorageKind};
use classified_ads::infrastructure::logging;
use classified_ads::server;
use std::path::PathBuf;

/// Classified ads service with REST and gRPC APIs.
#[derive(Debug, Parser)]
#[command(name = "classified-ads", version, about)]
struct Cli {
    /// Load environment variables from this file instead of `./.env`.
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Storage backend, overrides `ADS_STORAGE`.
    #[arg(long, value_name = "memory|postgres")]
    storage: Option<StorageKind>,

    /// REST port, overrides `ADS_REST_PORT`.
    #[arg(long, value_name = "PORT")]
    rest_port: Option<u16>,

    /// gRPC port, overrides `ADS_GRPC_PORT`.
    #[arg(long, value_name = "PORT")]
    grpc_port: Option<u16>,
}

impl Cli {
    fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(storage) = self.storage {
            config = config.with_storage(storage);
        }
        if let Some(port) = self.rest_port {
            config = config.with_rest_port(port);
        }
        if let Some(port) = self.grpc_port {
            config = config.with_grpc_port(port);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    AppConfig::load_dotenv(cli.env_file.as_deref()).context("failed to load env file")?;
    let config = cli.apply(AppConfig::from_env().context("failed to load configuration")?);
    config.validate().context("invalid configuration")?;
    logging::init_tracing(config.logging()).context("failed to initialise logging")?;

    tracing::info!(
        storage = %config.storage(),
        rest_port = config.rest_port(),
        grpc_port = config.grpc_port(),
        "starting classified-ads"
    );

    let result = server::run(config).await;
    if let Err(e) = &result {
        tracing::error!(error = ?e, "shutting down services");
    }
    tracing::info!("goodbye");
    result
}
