// src/core/mod.rs

//! The central module containing the core logic and data structures of relayline.

pub mod commands;
pub mod errors;
pub mod protocol;

pub use commands::OutboundCommand;
pub use errors::RelayError;
pub use protocol::{LineCodec, LineReassembler};
