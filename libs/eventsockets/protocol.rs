//! Wire protocol types
//!
//! Every frame on the wire is a UTF-8 text message holding a JSON object
//! with exactly two fields: `event` (non-empty string, required) and
//! `payload` (any JSON value, optional/nullable). Lifecycle pseudo-events
//! are synthesized locally by the client and share the subscription
//! mechanism with named application events; their reserved names carry a
//! `$` prefix so they can never collide with wire frames.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{EventSocketError, Result};

/// Reserved lifecycle pseudo-event names
pub mod lifecycle {
    /// Transport connection established. Payload is `null`.
    pub const CONNECTION: &str = "$connection";

    /// Transport connection closed. Payload is `null`.
    pub const DISCONNECTION: &str = "$disconnection";

    /// Transport-level error. Payload is an [`ErrorEvent`](super::ErrorEvent).
    pub const ERROR: &str = "$error";

    /// Every well-formed inbound frame, delivered as the full
    /// `{event, payload}` object before the named-event delivery.
    pub const MESSAGE: &str = "$message";
}

/// A single wire frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub event: String,
    #[serde(default)]
    pub payload: Value,
}

impl Frame {
    /// Create a frame for the given event name and payload
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }

    /// Serialize to the wire text format
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| EventSocketError::Serialization(e.to_string()))
    }
}

/// Payload delivered to [`lifecycle::ERROR`] subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub message: String,
    pub details: Value,
}

impl ErrorEvent {
    pub fn new(message: impl Into<String>, details: Value) -> Self {
        Self {
            message: message.into(),
            details,
        }
    }

    /// Render as the JSON value dispatched to subscribers
    pub fn into_value(self) -> Value {
        json!({
            "message": self.message,
            "details": self.details,
        })
    }
}

/// Decode and validate an inbound text frame.
///
/// Returns the full frame object together with its event name. Any failure
/// is a protocol violation: unparsable text, or a missing/empty `event`
/// field.
pub fn decode_frame(text: &str) -> Result<(Value, String)> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| EventSocketError::ProtocolViolation(format!("malformed frame: {}", e)))?;

    let event = value
        .get("event")
        .and_then(Value::as_str)
        .filter(|event| !event.is_empty())
        .ok_or_else(|| EventSocketError::ProtocolViolation("missing event field".to_string()))?
        .to_string();

    Ok((value, event))
}
