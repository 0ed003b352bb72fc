// src/client/mod.rs

use crate::config::Config;
use anyhow::{Context, Result};
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::broadcast;
use tracing::info;

mod dispatcher;
mod event_loop;

pub use dispatcher::Dispatcher;
pub use event_loop::Client;

/// The main client startup function: wires the interrupt signals to a
/// shutdown channel and runs the event loop until it is told to stop.
pub async fn run(config: Config) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to register SIGINT handler")?;
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => info!("SIGINT received, initiating clean exit."),
            _ = sigterm.recv() => info!("SIGTERM received, initiating clean exit."),
        }
        // The loop observes this at its next checkpoint; a send can only fail
        // if the loop already exited on its own.
        let _ = shutdown_tx.send(());
    });

    let mut client = Client::new(config);
    client.run(shutdown_rx).await
}
