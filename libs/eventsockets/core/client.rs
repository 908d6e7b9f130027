use crate::core::config::ClientConfig;
use crate::core::connection_state::{AtomicConnectionState, ConnectionState};
use crate::error::EventSocketError;
use crate::protocol::{self, lifecycle, ErrorEvent, Frame};
use crate::registry::{EventCallback, EventRegistry, Subscription};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, warn};

/// Internal command messages for connection control
#[derive(Debug)]
enum ConnectionCommand {
    /// Send a serialized frame to the WebSocket
    Send(String),
    /// Close the connection
    Close,
}

/// Handle to a live transport connection.
///
/// Dropping the handle (without `disconnect`) closes the command channel;
/// the connection task notices and shuts the socket down.
struct Connection {
    /// Transport state shared with the connection task
    state: Arc<AtomicConnectionState>,
    /// Command channel into the connection task
    command_tx: Sender<ConnectionCommand>,
}

/// WebSocket client with named-event publish/subscribe semantics
///
/// Wraps a single WebSocket connection and demultiplexes inbound frames by
/// their `event` field. Connection lifecycle transitions are surfaced as
/// reserved pseudo-events (see [`lifecycle`]) through the same subscription
/// mechanism as application events.
///
/// One instance owns at most one connection at a time and is fixed to the
/// endpoint given at construction; a different endpoint requires a new
/// instance. There is no reconnection policy: every connection failure is
/// terminal and a new [`connect`](Self::connect) is the caller's move.
///
/// # Example
///
/// ```rust,ignore
/// let mut client = EventSocketClient::new(
///     ClientConfig::new("ws://localhost:8080/ws").param("token", "abc123"),
/// );
///
/// let subscription = client.on("chat", Arc::new(|payload| {
///     println!("chat: {}", payload);
/// }));
///
/// client.connect();
/// client.emit("chat", "hello");
/// subscription.unsubscribe();
/// ```
pub struct EventSocketClient {
    /// Full endpoint address, parameters included
    endpoint: String,
    /// Subscriber registry shared with the connection task
    registry: Arc<EventRegistry>,
    /// Live connection, if any
    connection: Option<Connection>,
}

impl EventSocketClient {
    /// Create a client for the configured endpoint.
    ///
    /// No connection is made until [`connect`](Self::connect).
    pub fn new(config: ClientConfig) -> Self {
        Self {
            endpoint: config.endpoint(),
            registry: Arc::new(EventRegistry::new()),
            connection: None,
        }
    }

    /// Full endpoint address this instance is bound to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Subscribe `callback` to `event`.
    ///
    /// Multiple distinct callbacks may subscribe to the same name;
    /// registering a clone of the same callback instance twice collapses to
    /// a single registration. The returned [`Subscription`] unsubscribes on
    /// demand; discarding it leaves the registration in place.
    pub fn on(&self, event: &str, callback: EventCallback) -> Subscription {
        self.registry.on(event, Arc::clone(&callback));
        Subscription::new(Arc::clone(&self.registry), event.to_string(), callback)
    }

    /// Unsubscribe `callback` from `event`.
    ///
    /// No-op if the callback was never registered under that name.
    pub fn off(&self, event: &str, callback: &EventCallback) {
        self.registry.off(event, callback);
    }

    /// Send a named event with a payload.
    ///
    /// When no open connection exists the frame is dropped with a logged
    /// diagnostic; it is not queued and no error reaches the caller.
    pub fn emit<P: Serialize>(&self, event: &str, payload: P) {
        let connection = match &self.connection {
            Some(connection) if connection.state.is_open() => connection,
            _ => {
                error!("WebSocket is not open, dropping frame for '{}'", event);
                return;
            }
        };

        let payload = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to serialize payload for '{}': {}", event, e);
                return;
            }
        };

        let text = match Frame::new(event, payload).encode() {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to encode frame for '{}': {}", event, e);
                return;
            }
        };

        if connection
            .command_tx
            .send(ConnectionCommand::Send(text))
            .is_err()
        {
            error!("Connection task is gone, dropping frame for '{}'", event);
        }
    }

    /// Open a connection to the endpoint.
    ///
    /// A no-op when the current connection is already open. Must be called
    /// from within a Tokio runtime: all socket I/O runs on a spawned task,
    /// which invokes subscriber callbacks as frames and lifecycle
    /// transitions arrive.
    pub fn connect(&mut self) {
        if let Some(connection) = &self.connection {
            if connection.state.is_open() {
                warn!("WebSocket is already connected");
                return;
            }
        }

        let state = Arc::new(AtomicConnectionState::new(ConnectionState::Connecting));
        let (command_tx, command_rx) = unbounded();

        let endpoint = self.endpoint.clone();
        let registry = Arc::clone(&self.registry);
        let task_state = Arc::clone(&state);

        tokio::spawn(async move {
            run_connection(endpoint, registry, task_state, command_rx).await;
        });

        self.connection = Some(Connection { state, command_tx });
    }

    /// Close the current connection, if any, and clear the handle.
    ///
    /// Idempotent: calling it while already disconnected is a safe no-op.
    pub fn disconnect(&mut self) {
        if let Some(connection) = self.connection.take() {
            // A handle that is already closing or closed is left alone; the
            // connection task owns the final transition.
            let _ = connection
                .state
                .compare_exchange(ConnectionState::Connecting, ConnectionState::Closing);
            let _ = connection
                .state
                .compare_exchange(ConnectionState::Open, ConnectionState::Closing);

            let _ = connection.command_tx.send(ConnectionCommand::Close);
        }
    }

    /// True iff a transport handle exists and reports an open state
    pub fn is_connected(&self) -> bool {
        self.connection
            .as_ref()
            .map_or(false, |connection| connection.state.is_open())
    }

    /// True iff no transport handle exists, or it is closing/closed.
    ///
    /// Not the complement of [`is_connected`](Self::is_connected): while a
    /// handshake is in flight both predicates are false.
    pub fn is_disconnected(&self) -> bool {
        self.connection
            .as_ref()
            .map_or(true, |connection| connection.state.is_closed_or_closing())
    }
}

type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Connection task: handshake, then the message loop until the connection
/// ends for any reason.
async fn run_connection(
    endpoint: String,
    registry: Arc<EventRegistry>,
    state: Arc<AtomicConnectionState>,
    command_rx: Receiver<ConnectionCommand>,
) {
    let ws_stream = match connect_async(endpoint.as_str()).await {
        Ok((ws_stream, _)) => ws_stream,
        Err(e) => {
            error!("Failed to connect to {}: {}", endpoint, e);
            dispatch_error(&registry, e.to_string());
            state.set(ConnectionState::Closed);
            registry.dispatch(lifecycle::DISCONNECTION, &Value::Null);
            return;
        }
    };

    // disconnect() issued while the handshake was in flight: close without
    // ever reporting the connection as established.
    if state.get() == ConnectionState::Closing {
        debug!("Connection to {} closed before it opened", endpoint);
        state.set(ConnectionState::Closed);
        registry.dispatch(lifecycle::DISCONNECTION, &Value::Null);
        return;
    }

    debug!("Connected to {}", endpoint);
    state.set(ConnectionState::Open);
    registry.dispatch(lifecycle::CONNECTION, &Value::Null);

    let (mut write, mut read) = ws_stream.split();

    message_loop(&mut write, &mut read, &registry, &command_rx).await;

    // However the loop ended, the connection is done.
    state.set(ConnectionState::Closed);
    registry.dispatch(lifecycle::DISCONNECTION, &Value::Null);
    debug!("Connection to {} closed", endpoint);
}

/// Outcome of one inbound transport message
enum Inbound {
    /// Frame dispatched, or transparent control frame
    Continue,
    /// Server initiated the close handshake
    Closed,
}

/// Main message processing loop
async fn message_loop(
    write: &mut SplitSink<WsStream, Message>,
    read: &mut SplitStream<WsStream>,
    registry: &Arc<EventRegistry>,
    command_rx: &Receiver<ConnectionCommand>,
) {
    // Outbound commands are polled on a short ticker; commands stay in the
    // channel until drained here, so none are lost to select cancellation.
    let mut ticker = tokio::time::interval(Duration::from_millis(25));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // Handle incoming messages
            msg = read.next() => {
                match msg {
                    Some(Ok(msg)) => match handle_inbound(registry, msg) {
                        Ok(Inbound::Continue) => {}
                        Ok(Inbound::Closed) => {
                            debug!("Close frame received");
                            let _ = write.close().await;
                            return;
                        }
                        Err(e) => {
                            // Protocol violation: terminate the connection.
                            // The bad frame reaches no subscriber and no
                            // error pseudo-event fires; the close sequence
                            // reports the disconnection.
                            warn!("Invalid inbound frame, closing connection: {}", e);
                            let _ = write.close().await;
                            return;
                        }
                    },
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        dispatch_error(registry, e.to_string());
                        return;
                    }
                    None => {
                        debug!("WebSocket stream ended");
                        return;
                    }
                }
            }

            // Drain pending outbound commands
            _ = ticker.tick() => {
                loop {
                    match command_rx.try_recv() {
                        Ok(ConnectionCommand::Send(text)) => {
                            if let Err(e) = write.send(Message::Text(text)).await {
                                error!("Failed to send frame: {}", e);
                                dispatch_error(registry, e.to_string());
                                return;
                            }
                        }
                        Ok(ConnectionCommand::Close) => {
                            debug!("Received close command");
                            let _ = write.close().await;
                            return;
                        }
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Disconnected) => {
                            // Client handle dropped or replaced this
                            // connection.
                            debug!("Command channel closed, closing connection");
                            let _ = write.close().await;
                            return;
                        }
                    }
                }
            }
        }
    }
}

/// Validate and dispatch one inbound transport message.
///
/// Well-formed frames are delivered twice: the full `{event, payload}`
/// object to `$message` subscribers first, then the payload alone to
/// subscribers of the carried event name.
fn handle_inbound(
    registry: &EventRegistry,
    msg: Message,
) -> Result<Inbound, EventSocketError> {
    match msg {
        Message::Text(text) => {
            let (frame, event) = protocol::decode_frame(&text)?;

            registry.dispatch(lifecycle::MESSAGE, &frame);

            let payload = frame.get("payload").cloned().unwrap_or(Value::Null);
            registry.dispatch(&event, &payload);

            Ok(Inbound::Continue)
        }
        Message::Binary(_) => Err(EventSocketError::ProtocolViolation(
            "binary frame on a text protocol".to_string(),
        )),
        Message::Close(_) => Ok(Inbound::Closed),
        // Ping/pong are answered by the transport layer
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => Ok(Inbound::Continue),
    }
}

/// Deliver a transport error to `$error` subscribers
fn dispatch_error(registry: &EventRegistry, details: String) {
    let payload = ErrorEvent::new("WebSocket error occurred", Value::String(details)).into_value();
    registry.dispatch(lifecycle::ERROR, &payload);
}
