//! Common test utilities for eventsockets integration tests
//!
//! Provides a scriptable mock WebSocket server: it records every text
//! frame received from clients and can push arbitrary (well-formed or
//! deliberately broken) messages to every connected client.

use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Notify};
use tokio_tungstenite::tungstenite::Message;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// A scriptable mock WebSocket server for testing
pub struct MockWsServer {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<String>>>,
    outbound: broadcast::Sender<Message>,
    shutdown: Arc<Notify>,
}

impl MockWsServer {
    /// Create and start a new mock WebSocket server
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));
        let (outbound, _) = broadcast::channel(64);
        let shutdown = Arc::new(Notify::new());

        let accept_received = Arc::clone(&received);
        let accept_outbound = outbound.clone();
        let accept_shutdown = Arc::clone(&shutdown);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    result = listener.accept() => {
                        match result {
                            Ok((stream, _)) => {
                                let received = Arc::clone(&accept_received);
                                // Subscribe before the handshake so frames
                                // pushed right after the client connects are
                                // never missed.
                                let outbound_rx = accept_outbound.subscribe();
                                let shutdown = Arc::clone(&accept_shutdown);
                                tokio::spawn(async move {
                                    Self::handle_connection(stream, received, outbound_rx, shutdown)
                                        .await;
                                });
                            }
                            Err(e) => {
                                eprintln!("Accept error: {}", e);
                                break;
                            }
                        }
                    }
                    _ = accept_shutdown.notified() => {
                        break;
                    }
                }
            }
        });

        Self {
            addr,
            received,
            outbound,
            shutdown,
        }
    }

    async fn handle_connection(
        stream: tokio::net::TcpStream,
        received: Arc<Mutex<Vec<String>>>,
        mut outbound_rx: broadcast::Receiver<Message>,
        shutdown: Arc<Notify>,
    ) {
        use futures::{SinkExt, StreamExt};
        use tokio_tungstenite::accept_async;

        let ws_stream = match accept_async(stream).await {
            Ok(ws) => ws,
            Err(e) => {
                eprintln!("WebSocket handshake failed: {}", e);
                return;
            }
        };

        let (mut write, mut read) = ws_stream.split();

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            received.lock().push(text);
                        }
                        Some(Ok(Message::Ping(data))) => {
                            if write.send(Message::Pong(data)).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) => break,
                        Some(Ok(_)) => {}
                        Some(Err(_)) | None => break,
                    }
                }
                out = outbound_rx.recv() => {
                    match out {
                        Ok(msg) => {
                            if write.send(msg).await.is_err() {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(_)) => {}
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
                _ = shutdown.notified() => {
                    break;
                }
            }
        }
    }

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// Push a raw text message to every connected client
    pub fn send_text(&self, text: impl Into<String>) {
        let _ = self.outbound.send(Message::Text(text.into()));
    }

    /// Push a binary message to every connected client
    pub fn send_binary(&self, data: Vec<u8>) {
        let _ = self.outbound.send(Message::Binary(data));
    }

    /// Text frames received from clients so far
    pub fn received(&self) -> Vec<String> {
        self.received.lock().clone()
    }

    /// Shutdown the server
    pub fn shutdown(&self) {
        self.shutdown.notify_waiters();
    }
}

impl Drop for MockWsServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Poll `predicate` until it holds or `timeout` elapses
pub async fn wait_until(predicate: impl Fn() -> bool, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if predicate() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    predicate()
}

/// Default timeout for condition polling in tests
pub const WAIT: Duration = Duration::from_secs(2);

/// Settle time used to assert that nothing further happens
pub const SETTLE: Duration = Duration::from_millis(150);
