//! CLI utilities for binaries
//!
//! Handles endpoint resolution for the demo executables: first positional
//! argument, then the `WS_URL` environment variable, then the default
//! local endpoint.

/// Default endpoint of the companion demo server
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080/ws";

/// Environment variable consulted when no argument is given
pub const ENDPOINT_ENV_VAR: &str = "WS_URL";

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Resolve the WebSocket endpoint from arguments, environment, or default
pub fn resolve_endpoint(args: &[String]) -> String {
    if let Some(url) = args.first() {
        return url.clone();
    }

    std::env::var(ENDPOINT_ENV_VAR).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string())
}
