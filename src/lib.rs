//! WebSocket Event Client - Demo Workspace
//!
//! Root library for the demo binaries built around the `eventsockets`
//! client library.
//!
//! ## Layout
//!
//! - **bin_common**: common utilities for binary executables
//! - **eventsockets**: the event socket client (re-exported from the
//!   workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use eventsockets_demo::bin_common::{parse_args, resolve_endpoint};
//! use eventsockets_demo::eventsockets::{ClientConfig, EventSocketClient};
//! ```

// Re-export workspace libraries for convenience
pub use eventsockets;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;

    pub use cli::{parse_args, resolve_endpoint, DEFAULT_ENDPOINT, ENDPOINT_ENV_VAR};
}
