//! Core client implementation
//!
//! - [`client`]: the event socket client and its connection task
//! - [`config`]: endpoint configuration (base URL + query parameters)
//! - [`connection_state`]: atomic transport state shared with the task

pub mod client;
pub mod config;
pub mod connection_state;

// Re-export main types
pub use client::EventSocketClient;
pub use config::{ClientConfig, ParamValue};
pub use connection_state::{AtomicConnectionState, ConnectionState};
