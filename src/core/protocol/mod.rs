// src/core/protocol/mod.rs

pub mod line_codec;
pub use line_codec::{LineCodec, LineReassembler};
