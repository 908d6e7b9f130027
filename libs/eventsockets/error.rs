use thiserror::Error;

/// Main error type for eventsockets
///
/// No public client method surfaces these to the caller; failures are
/// handled locally by closing the connection or logging. The type exists
/// for the connection task's internal plumbing and for tests.
#[derive(Error, Debug)]
pub enum EventSocketError {
    /// WebSocket connection error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Connection closed unexpectedly
    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    /// Inbound frame violated the wire protocol
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    /// Outbound payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Channel send error
    #[error("Channel send error: {0}")]
    ChannelSend(String),

    /// Send attempted without an open connection
    #[error("Not connected: {0}")]
    NotConnected(String),
}

/// Result type for eventsockets operations
pub type Result<T> = std::result::Result<T, EventSocketError>;
