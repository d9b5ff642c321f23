//! # Config
//!
//! HTTP transport configuration. This is the only thing a caller can tune
//! about how requests reach the endpoint.

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};

/// HTTP transport configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Timeout of a single HTTP request, in seconds.
    pub request_timeout_secs: u64,
    /// Maximum size of a request body, in bytes.
    pub max_request_size: u32,
    /// Maximum size of a response body, in bytes.
    pub max_response_size: u32,
    /// Extra headers sent with every request, e.g. authorization.
    pub headers: HashMap<String, String>,
    /// Sets `TCP_NODELAY` on connections.
    pub tcp_no_delay: bool,
    /// Requests and responses longer than this are truncated in logs.
    pub max_log_length: u32,
}

impl TransportConfig {
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 60,
            max_request_size: 10 * 1024 * 1024,
            max_response_size: 10 * 1024 * 1024,
            headers: HashMap::new(),
            tcp_no_delay: true,
            max_log_length: 4096,
        }
    }
}
