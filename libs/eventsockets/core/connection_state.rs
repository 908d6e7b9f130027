//! Connection state tracking
//!
//! Lock-free state cell shared between the client handle and its
//! connection task. The four states mirror the readyState values a
//! WebSocket handle reports.

use std::sync::atomic::{AtomicU8, Ordering};

/// State of the underlying transport handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    /// Handshake in flight
    Connecting = 0,
    /// Connection established, frames may flow
    Open = 1,
    /// Close initiated but not yet complete
    Closing = 2,
    /// Connection fully closed
    Closed = 3,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ConnectionState::Connecting,
            1 => ConnectionState::Open,
            2 => ConnectionState::Closing,
            _ => ConnectionState::Closed,
        }
    }
}

/// Atomic connection state
#[derive(Debug)]
pub struct AtomicConnectionState {
    state: AtomicU8,
}

impl AtomicConnectionState {
    pub fn new(initial: ConnectionState) -> Self {
        Self {
            state: AtomicU8::new(initial as u8),
        }
    }

    /// Get current state
    #[inline]
    pub fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Set current state
    #[inline]
    pub fn set(&self, state: ConnectionState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Transition to `new` only if the state is still `current`.
    ///
    /// Returns the previous state on success, the actual state on failure.
    pub fn compare_exchange(
        &self,
        current: ConnectionState,
        new: ConnectionState,
    ) -> std::result::Result<ConnectionState, ConnectionState> {
        self.state
            .compare_exchange(
                current as u8,
                new as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(ConnectionState::from_u8)
            .map_err(ConnectionState::from_u8)
    }

    /// Check if the transport is open
    #[inline]
    pub fn is_open(&self) -> bool {
        self.get() == ConnectionState::Open
    }

    /// Check if the transport is closing or closed
    #[inline]
    pub fn is_closed_or_closing(&self) -> bool {
        matches!(
            self.get(),
            ConnectionState::Closing | ConnectionState::Closed
        )
    }
}
