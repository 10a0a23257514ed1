//! AIS position report receiver

use ais_sync::{
    catcher::Catcher,
    config::AppConfig,
    correlate::AisLog,
    errors::AisSyncError,
    receiver::UdpReceiverBuilder,
    service::{self, SentenceProcessor},
};
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AisSyncError> {
    // Logs go to stderr, stdout carries the decoded reports
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let receiver = UdpReceiverBuilder::bind(&config.receiver).await?;
    let catcher = Catcher::spawn(&config.catcher, receiver.local_addr()?).await?;
    let receiver = receiver.start();

    let processor = SentenceProcessor::new(AisLog::shared());
    let mut stdout = tokio::io::stdout();

    info!("Waiting for AIS messages");

    // Setup signal handling for graceful shutdown
    let shutdown_signal = signal::ctrl_c();

    tokio::select! {
        result = service::run(receiver, &processor, &mut stdout) => {
            if let Err(e) = result {
                error!("Receiver stopped: {}", e);
            }
        }
        _ = shutdown_signal => {
            info!("Received shutdown signal");
        }
    }

    if let Some(catcher) = catcher {
        if let Err(e) = catcher.shutdown().await {
            error!("Failed to stop AIS receiver: {}", e);
        }
    }

    info!(
        "Recorded {} position reports",
        processor.log().read().await.len()
    );

    Ok(())
}
