// src/main.rs

//! The main entry point for the relayline client.

use anyhow::Result;
use relayline::client;
use relayline::config::Config;
use std::env;
use std::path::Path;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "relayline.toml";

#[tokio::main]
async fn main() -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let args: Vec<String> = env::args().collect();

    if args.contains(&"--version".to_string()) {
        println!("relayline version {VERSION}");
        return Ok(());
    }

    // Determine the configuration path. It can be provided via a --config
    // flag; otherwise the default path is used when the file exists, and
    // built-in defaults apply when it does not. The client requires no
    // arguments to start.
    let explicit_config = args
        .iter()
        .position(|arg| arg == "--config")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str());

    let config = match explicit_config {
        Some(path) => match Config::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load configuration from \"{path}\": {e}");
                std::process::exit(1);
            }
        },
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            match Config::from_file(DEFAULT_CONFIG_PATH) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Failed to load configuration from \"{DEFAULT_CONFIG_PATH}\": {e}");
                    std::process::exit(1);
                }
            }
        }
        None => Config::default(),
    };

    // Get the log level from the environment variable or the config file.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .compact()
        .with_ansi(true)
        .init();

    info!("Starting relayline {VERSION}");

    if let Err(e) = client::run(config).await {
        error!("Client runtime error: {}", e);
        return Err(e);
    }

    Ok(())
}
