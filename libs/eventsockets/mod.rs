//! # EventSockets
//!
//! A named-event publish/subscribe layer over a single WebSocket connection.
//!
//! ## Features
//!
//! - **Named events**: every wire frame is `{"event": ..., "payload": ...}`,
//!   demultiplexed to subscribers by event name
//! - **Membership subscriptions**: `on`/`off` with callback-identity
//!   semantics and an unsubscribe handle
//! - **Lifecycle pseudo-events**: connection open/close, transport errors,
//!   and raw frames share the subscription mechanism under reserved names
//! - **Single connection ownership**: one transport handle per client,
//!   endpoint fixed at construction, no reconnection policy
//!
//! ## Example
//!
//! ```rust,ignore
//! use eventsockets::{lifecycle, ClientConfig, EventSocketClient};
//! use std::sync::Arc;
//!
//! let config = ClientConfig::new("ws://localhost:8080/ws").param("token", "abc123");
//! let mut client = EventSocketClient::new(config);
//!
//! client.on(lifecycle::CONNECTION, Arc::new(|_| println!("connected")));
//! client.on("chat", Arc::new(|payload| println!("chat: {}", payload)));
//!
//! client.connect();
//! client.emit("chat", "hello");
//! ```

pub mod core;
pub mod error;
pub mod protocol;
pub mod registry;

// Re-export core client functionality
pub use self::core::{
    client::EventSocketClient,
    config::{ClientConfig, ParamValue},
    connection_state::{AtomicConnectionState, ConnectionState},
};

// Re-export protocol types
pub use protocol::{lifecycle, ErrorEvent, Frame};

// Re-export subscription machinery
pub use registry::{EventCallback, EventRegistry, Subscription};

pub use error::EventSocketError;

/// Type alias for Result with EventSocketError
pub type Result<T> = std::result::Result<T, error::EventSocketError>;
