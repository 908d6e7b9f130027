//! Client configuration
//!
//! The endpoint is fixed for the lifetime of a client instance: a base
//! `ws://`/`wss://` URL plus connection-time parameters (tokens, session
//! ids) rendered into the address as query parameters.

use std::fmt;

/// A connection-time query parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(value) => write!(f, "{}", value),
            ParamValue::Int(value) => write!(f, "{}", value),
            ParamValue::Float(value) => write!(f, "{}", value),
            ParamValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Connection configuration for [`EventSocketClient`](crate::EventSocketClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    url: String,
    params: Vec<(String, ParamValue)>,
}

impl ClientConfig {
    /// Create a configuration for the given WebSocket URL
    /// (e.g. `ws://example.com/socket`)
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// Append a query parameter (e.g. `token` for query-string auth)
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Base URL without parameters
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Render the full endpoint address with parameters attached
    pub fn endpoint(&self) -> String {
        if self.params.is_empty() {
            return self.url.clone();
        }

        let query = self
            .params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.url, query)
    }
}
