// src/client/dispatcher.rs

//! Decodes inbound frames and applies the auto-reply rule, producing zero or
//! more outbound commands per frame.

use crate::config::RuleConfig;
use crate::core::OutboundCommand;
use crate::core::commands::InboundFrame;
use tracing::debug;

/// Turns one inbound frame into the outbound commands it warrants.
///
/// The built-in rule replies to a configured trigger phrase; the general
/// contract is 0..N commands per frame.
#[derive(Debug)]
pub struct Dispatcher {
    trigger: String,
    reply_prefix: String,
}

impl Dispatcher {
    pub fn new(rules: &RuleConfig) -> Self {
        Self {
            // Normalized once so matching is a plain comparison per frame.
            trigger: rules.trigger.trim().to_lowercase(),
            reply_prefix: rules.reply_prefix.clone(),
        }
    }

    /// Handles one frame. Malformed peer input is discarded, never fatal:
    /// a frame that fails to parse as JSON, or parses but lacks the
    /// `envelope.source` / `envelope.dataMessage.message` paths, yields no
    /// commands and is logged at debug level at most.
    pub fn handle(&self, frame: &str) -> Vec<OutboundCommand> {
        debug!("Dispatching frame: {}", frame);

        let parsed: InboundFrame = match serde_json::from_str(frame) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("Discarding undecodable frame: {}", e);
                return Vec::new();
            }
        };

        // Non-message control frames (receipts and the like) lack these
        // paths; skipping them silently is the common case.
        let Some((source, message)) = parsed.text_message() else {
            return Vec::new();
        };

        let mut commands = Vec::new();
        if message.trim().to_lowercase() == self.trigger {
            let contacts = source.split_whitespace().map(String::from).collect();
            let reply = format!("{}{}", self.reply_prefix, message);
            commands.push(OutboundCommand::send_message(contacts, reply));
        }
        commands
    }
}
