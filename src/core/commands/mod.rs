// src/core/commands/mod.rs

//! Typed representations of the JSON messages exchanged with the control
//! socket: outbound command objects and the inbound envelope shape.

use crate::core::RelayError;
use serde::{Deserialize, Serialize};

/// One protocol action, serialized as a single externally-tagged JSON object
/// per line, e.g. `{"sendMessage": {"contacts": [...], "message": "..."}}`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OutboundCommand {
    SendMessage(SendMessage),
    Trust(Recipients),
    EndSession(Recipients),
    GetContacts(String),
    GetGroups(String),
}

impl OutboundCommand {
    /// A message reply addressed to one or more contacts.
    pub fn send_message(contacts: Vec<String>, message: impl Into<String>) -> Self {
        OutboundCommand::SendMessage(SendMessage {
            contacts,
            groups: Vec::new(),
            message: message.into(),
        })
    }

    pub fn trust(contacts: Vec<String>) -> Self {
        OutboundCommand::Trust(Recipients { contacts })
    }

    pub fn end_session(contacts: Vec<String>) -> Self {
        OutboundCommand::EndSession(Recipients { contacts })
    }

    /// The daemon expects an empty-string payload for parameterless queries.
    pub fn get_contacts() -> Self {
        OutboundCommand::GetContacts(String::new())
    }

    pub fn get_groups() -> Self {
        OutboundCommand::GetGroups(String::new())
    }

    /// Serializes the command to its single-line wire form, without the
    /// trailing delimiter.
    pub fn to_line(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Payload of a `sendMessage` command.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SendMessage {
    pub contacts: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    pub message: String,
}

/// Contact-list payload shared by `trust` and `endSession`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Recipients {
    pub contacts: Vec<String>,
}

/// The top level of an inbound frame. Every field is optional: control frames
/// such as receipts are valid JSON that simply lacks the paths we act on.
#[derive(Deserialize, Debug, Default)]
pub struct InboundFrame {
    #[serde(default)]
    pub envelope: Option<Envelope>,
}

/// The inbound JSON wrapper carrying sender and message-body fields.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub data_message: Option<DataMessage>,
}

#[derive(Deserialize, Debug, Default)]
pub struct DataMessage {
    #[serde(default)]
    pub message: Option<String>,
}

impl InboundFrame {
    /// Optional-path lookup of `envelope.source` and
    /// `envelope.dataMessage.message`. Returns `None` when either path is
    /// absent, the normal case for non-message control frames.
    pub fn text_message(&self) -> Option<(&str, &str)> {
        let envelope = self.envelope.as_ref()?;
        let source = envelope.source.as_deref()?;
        let message = envelope.data_message.as_ref()?.message.as_deref()?;
        Some((source, message))
    }
}
