use crate::matcher::PilotKey;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::mpsc::Sender;
use tracing::{debug, info};

/// Progress emitted while importing. Informational only; nothing reads it back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ImportEvent {
    Message {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pilot: Option<PilotKey>,
    },
    /// Machine-readable record tagged with a kind such as `g_record_fail`.
    Status { kind: String, payload: Value },
}

impl ImportEvent {
    pub fn message(text: impl Into<String>) -> Self {
        ImportEvent::Message {
            text: text.into(),
            pilot: None,
        }
    }

    pub fn pilot_message(pilot: PilotKey, text: impl Into<String>) -> Self {
        ImportEvent::Message {
            text: text.into(),
            pilot: Some(pilot),
        }
    }

    pub fn status(kind: &str, payload: Value) -> Self {
        ImportEvent::Status {
            kind: kind.to_string(),
            payload,
        }
    }
}

impl fmt::Display for ImportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportEvent::Message { text, .. } => f.write_str(text),
            ImportEvent::Status { kind, payload } => write!(f, "{}|{}", payload, kind),
        }
    }
}

pub trait EventSink {
    fn emit(&self, event: ImportEvent);
}

/// Sends progress to the `tracing` subscriber.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: ImportEvent) {
        info!(target: "gapscore::import", "{}", event);
    }
}

/// Prints progress lines to stdout.
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&self, event: ImportEvent) {
        println!("{}", event);
    }
}

/// Forwards events to a push channel (e.g. a server-sent-events bridge).
pub struct ChannelSink {
    tx: Sender<ImportEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<ImportEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: ImportEvent) {
        if self.tx.send(event).is_err() {
            debug!("Progress channel closed, event dropped");
        }
    }
}
