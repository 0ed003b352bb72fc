// src/config.rs

//! Manages client configuration: loading, defaults, and validation.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::time::Duration;

/// Top-level configuration for the client.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// Address of the control socket. Expected to be a local peer.
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Fixed delay between connection attempts while the peer refuses.
    #[serde(default = "default_reconnect_delay", with = "humantime_serde")]
    pub reconnect_delay: Duration,
    /// Cadence of the poll loop.
    #[serde(default = "default_tick_interval", with = "humantime_serde")]
    pub tick_interval: Duration,
    /// Upper bound on bytes consumed by a single read. Bounds per-iteration
    /// latency, not message size.
    #[serde(default = "default_read_chunk_size")]
    pub read_chunk_size: usize,
    #[serde(default)]
    pub handshake: HandshakeConfig,
    #[serde(default)]
    pub rules: RuleConfig,
}

/// Commands emitted once after every successful connect. All off by default.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct HandshakeConfig {
    /// Contacts to mark trusted on connect.
    #[serde(default)]
    pub trust_contacts: Vec<String>,
    #[serde(default)]
    pub get_contacts: bool,
    #[serde(default)]
    pub get_groups: bool,
}

/// Parameters of the built-in auto-reply rule.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RuleConfig {
    /// Trigger phrase, matched case-insensitively against the trimmed
    /// message body.
    #[serde(default = "default_trigger")]
    pub trigger: String,
    /// Prepended to the original message body to form the reply.
    #[serde(default = "default_reply_prefix")]
    pub reply_prefix: String,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            trigger: default_trigger(),
            reply_prefix: default_reply_prefix(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            reconnect_delay: default_reconnect_delay(),
            tick_interval: default_tick_interval(),
            read_chunk_size: default_read_chunk_size(),
            handshake: HandshakeConfig::default(),
            rules: RuleConfig::default(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    24250
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_reconnect_delay() -> Duration {
    Duration::from_secs(3)
}
fn default_tick_interval() -> Duration {
    Duration::from_secs(1)
}
fn default_read_chunk_size() -> usize {
    65536
}
fn default_trigger() -> String {
    "love".to_string()
}
fn default_reply_prefix() -> String {
    "From Russia with ".to_string()
}

impl Config {
    /// Loads and validates a configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML from '{path}'"))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the configured host and port into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address '{}:{}'", self.host, self.port))
    }

    /// Checks cross-field and range constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("'port' must be non-zero"));
        }
        if self.read_chunk_size == 0 {
            return Err(anyhow!("'read_chunk_size' must be greater than zero"));
        }
        if self.rules.trigger.trim().is_empty() {
            return Err(anyhow!("'rules.trigger' must not be empty"));
        }
        self.socket_addr().map(|_| ())
    }
}
