use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use ua_server::{telemetry, Application};
use ua_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();
    telemetry::init(&config.logging)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting user accounts service");

    let app = Application::build(config).await?;

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
        on_signal.cancel();
    });

    app.run_until_stopped(shutdown).await?;

    info!("User accounts service stopped");
    Ok(())
}
