// src/lib.rs

pub mod client;
pub mod config;
pub mod connection;
pub mod core;

// Re-export
pub use crate::core::RelayError;
