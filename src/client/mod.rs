//! # Client
//!
//! Connector for RSK JSON-RPC endpoints. Only HTTP(S) endpoints can be dialed.

use crate::config::TransportConfig;
use crate::errors::ConnectionError;
use jsonrpsee::http_client::{HeaderMap, HttpClient};
use std::fmt;
use url::Url;

mod context;
mod rpc_api;

pub use context::{CallContext, Canceller};
pub use rpc_api::is_empty_code;

/// RSK RPC client, bound to a single endpoint.
///
/// The handle is reusable: calls can be made sequentially or concurrently
/// from multiple tasks by reference.
pub struct RskClient {
    /// Underlying JSON-RPC client.
    inner: HttpClient,
    endpoint: Url,
}

impl RskClient {
    /// Returns the underlying JSON-RPC client, for calls this crate doesn't
    /// wrap.
    pub fn rpc_client(&self) -> &HttpClient {
        &self.inner
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl fmt::Debug for RskClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RskClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

/// Connects a client to the given URL.
///
/// # Parameters
///
/// - `raw_url`: Endpoint URL. Scheme must be `http` or `https`
/// - `transport`: HTTP transport configuration
///
/// # Returns
///
/// A client on success, [`ConnectionError`] if URL is malformed, its scheme
/// is not HTTP(S) or transport can't be built. Connections are opened lazily,
/// so an unreachable endpoint is only reported by the first call.
pub fn dial(raw_url: &str, transport: &TransportConfig) -> Result<RskClient, ConnectionError> {
    let endpoint = match Url::parse(raw_url) {
        Ok(u) => u,
        Err(source) => {
            return Err(ConnectionError::InvalidUrl {
                url: raw_url.to_owned(),
                source,
            })
        }
    };

    match endpoint.scheme() {
        "http" | "https" => (),
        scheme => return Err(ConnectionError::UnsupportedScheme(scheme.to_owned())),
    };

    let inner = dial_http(&endpoint, transport)?;
    tracing::debug!("Dialed RSK endpoint {endpoint}");

    Ok(RskClient { inner, endpoint })
}

/// Creates a new JSON-RPC client that talks to `endpoint` over HTTP.
fn dial_http(endpoint: &Url, transport: &TransportConfig) -> Result<HttpClient, ConnectionError> {
    let headers = HeaderMap::try_from(&transport.headers)
        .map_err(|e| ConnectionError::InvalidHeader(e.to_string()))?;

    tracing::trace!("Building HTTP transport with config {transport:?}");

    HttpClient::builder()
        .request_timeout(transport.request_timeout())
        .max_request_size(transport.max_request_size)
        .max_response_size(transport.max_response_size)
        .set_headers(headers)
        .set_tcp_no_delay(transport.tcp_no_delay)
        .set_max_logging_length(transport.max_log_length)
        .build(endpoint.as_str())
        .map_err(ConnectionError::Transport)
}
