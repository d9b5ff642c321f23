//! # Errors
//!
//! Errors that can be returned from dialing, calling and hex conversions.

use thiserror::Error;

/// Errors that happen while building a client for an endpoint. Nothing is
/// retried; these are handed to the caller as is.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Invalid endpoint URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("URL scheme {0} is not supported, only http and https can be dialed")]
    UnsupportedScheme(String),
    #[error("Invalid HTTP header: {0}")]
    InvalidHeader(String),
    #[error("Couldn't build HTTP transport: {0}")]
    Transport(jsonrpsee::core::ClientError),
}

/// Errors of a single remote call.
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("RPC call failed: {0}")]
    Call(#[from] jsonrpsee::core::ClientError),
    #[error("Call is cancelled")]
    Cancelled,
    #[error("Call deadline exceeded")]
    DeadlineExceeded,
}

/// Mock node errors.
#[derive(Error, Debug)]
pub enum NodeError {
    #[error("RPC server returned an error: {0}")]
    Rpc(String),
}
