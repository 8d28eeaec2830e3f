//! Sputnik bot - main entry point.

use anyhow::Result;
use sputnik_channels::{BotService, Channel, CliChannel, IncomingMessage, TelegramChannel};
use sputnik_common::config::Config;
use sputnik_common::logging::init_logging;
use sputnik_core::Router;
use sputnik_providers::Providers;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load_with_env()?;

    // Initialize logging
    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    tracing::info!("Sputnik bot v{}", env!("CARGO_PKG_VERSION"));

    let providers = Providers::new(&config.providers);
    let service = BotService::new(Router::new(providers));
    let (tx, rx) = mpsc::channel::<IncomingMessage>(64);

    let enqueue = move |msg: IncomingMessage| {
        if let Err(e) = tx.try_send(msg) {
            tracing::warn!(error = %e, "Dropping update, queue full");
        }
    };

    if config.telegram_ready() {
        let mut channel = TelegramChannel::new(&config.telegram);
        channel.init().await?;

        let channel = Arc::new(channel);
        let processor = BotService::spawn_processor(service, channel.clone(), rx);

        // Long-polls until the process is stopped
        channel.listen(enqueue).await?;
        processor.await?;
    } else {
        tracing::info!("Telegram not configured, starting CLI channel");

        let channel = Arc::new(CliChannel::new());
        let processor = BotService::spawn_processor(service, channel.clone(), rx);

        channel.listen(enqueue).await?;
        // The listener dropped the sender; let the processor drain and stop
        processor.await?;
    }

    Ok(())
}
