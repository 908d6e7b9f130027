//! Interactive WebSocket event probe
//!
//! Connects to an event-socket endpoint and provides a manual test
//! surface: lifecycle pseudo-events and raw inbound frames are logged
//! with timestamps, and stdin accepts named events with JSON payloads to
//! emit.
//!
//! Usage:
//!   cargo run --bin ws_probe [ws://host:port/path]
//!
//! Environment:
//!   WS_URL    endpoint when no argument is given
//!   WS_TOKEN  optional token appended as a query parameter

use anyhow::Result;
use chrono::Local;
use eventsockets::{lifecycle, ClientConfig, EventCallback, EventSocketClient};
use eventsockets_demo::bin_common::{parse_args, resolve_endpoint};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Timestamped log line, in the style of the demo console
fn log_line(line: &str) {
    println!("[{}] {}", Local::now().format("%H:%M:%S"), line);
}

fn lifecycle_logger(label: &'static str) -> EventCallback {
    Arc::new(move |value: &Value| {
        if value.is_null() {
            log_line(label);
        } else {
            log_line(&format!("{}: {}", label, value));
        }
    })
}

/// Handle one stdin line. Returns false when the probe should exit.
fn handle_line(client: &mut EventSocketClient, line: &str) -> bool {
    match line {
        "" => true,
        "/quit" => false,
        "/connect" => {
            client.connect();
            true
        }
        "/disconnect" => {
            client.disconnect();
            true
        }
        "/status" => {
            let status = if client.is_connected() {
                "connected"
            } else if client.is_disconnected() {
                "disconnected"
            } else {
                "connecting"
            };
            log_line(&format!("Status: {}", status));
            true
        }
        _ => {
            let (event, payload_text) = match line.split_once(char::is_whitespace) {
                Some((event, rest)) => (event, rest.trim()),
                None => (line, ""),
            };

            let payload: Value = if payload_text.is_empty() {
                Value::Null
            } else {
                match serde_json::from_str(payload_text) {
                    Ok(value) => value,
                    Err(_) => {
                        log_line("Invalid JSON payload");
                        return true;
                    }
                }
            };

            client.emit(event, payload.clone());
            log_line(&format!("Sent event - Name: {}, Payload: {}", event, payload));
            true
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .init();

    let args = parse_args();
    let endpoint = resolve_endpoint(&args);

    let mut config = ClientConfig::new(&endpoint);
    if let Ok(token) = std::env::var("WS_TOKEN") {
        config = config.param("token", token);
    }

    let mut client = EventSocketClient::new(config);

    client.on(lifecycle::CONNECTION, lifecycle_logger("WebSocket connected"));
    client.on(
        lifecycle::DISCONNECTION,
        lifecycle_logger("WebSocket disconnected"),
    );
    client.on(lifecycle::ERROR, lifecycle_logger("WebSocket error"));
    client.on(
        lifecycle::MESSAGE,
        Arc::new(|frame: &Value| {
            log_line(&format!("Message received: {}", frame));
        }) as EventCallback,
    );

    println!("WebSocket event probe");
    println!("  Endpoint: {}", client.endpoint());
    println!("  Commands: <event> [json-payload] | /connect | /disconnect | /status | /quit");
    println!("  Press Ctrl+C to stop\n");

    client.connect();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nShutting down");
                break;
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !handle_line(&mut client, line.trim()) {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    client.disconnect();
    Ok(())
}
