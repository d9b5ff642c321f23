//! # RSK RPC Compatibility
//!
//! This library dials RSK JSON-RPC endpoints over HTTP and reads contract
//! code. RSK nodes don't follow the `pending` block tag semantics generic
//! Ethereum clients expect for `eth_getCode`, so pending code is read with the
//! `latest` tag instead.
//!
//! Transport, framing and request handling are done by
//! [jsonrpsee](https://github.com/paritytech/jsonrpsee). A mock RSK node is
//! also provided, so applications can test against it without a real node.

pub mod client;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod rpc;
pub mod types;
pub mod utils;

// Re-imports.
pub use client::*;
pub use config::TransportConfig;
pub use errors::*;
pub use types::*;

// Testing only imports. These won't be compiled in to target binary.
#[cfg(test)]
pub mod test_common;
