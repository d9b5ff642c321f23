//! # RPC Interface
//!
//! `eth` namespace interface of this crate, and a mock RSK node that serves
//! it over HTTP. The mock node answers `eth_getCode` from an in-memory
//! [`Ledger`] and can be spawned multiple times; each one has an independent
//! ledger.

use crate::errors::NodeError;
use crate::ledger::Ledger;
use crate::types::{Address, BlockTag, Bytes};
use jsonrpsee::core::async_trait;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::types::{error::INVALID_PARAMS_CODE, ErrorObjectOwned};
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

mod traits;

pub use traits::{EthApiClient, EthApiServer};

/// Mock node options.
#[derive(Clone, Debug)]
pub struct NodeOptions {
    /// Host to listen on.
    pub host: String,
    /// Port to listen on. If is 0, a random port is requested from OS.
    pub port: u16,
    /// Every response is delayed by this much.
    pub response_delay: Duration,
    /// Answer `0x00` instead of `0x` for accounts without code, like RSKJ.
    pub rskj_empty_code: bool,
    /// Ledger to serve. A new empty one is used if `None`.
    pub ledger: Option<Ledger>,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 0,
            response_delay: Duration::ZERO,
            rskj_empty_code: false,
            ledger: None,
        }
    }
}

/// A received `eth_getCode` request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeRequest {
    pub address: Address,
    pub block: BlockTag,
}

/// Handle of a running mock node.
pub struct MockRpc {
    pub socket_address: SocketAddr,
    pub handle: ServerHandle,
    /// Ledger served by the node. Changes are visible to the next request.
    pub ledger: Ledger,
    requests: Arc<Mutex<Vec<CodeRequest>>>,
}

impl MockRpc {
    /// Returns the HTTP URL of the node.
    pub fn url(&self) -> String {
        format!("http://{}", self.socket_address)
    }

    /// Returns every `eth_getCode` request received so far, in order.
    pub fn requests(&self) -> Vec<CodeRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stops the node and waits until it is shut down.
    pub async fn stop(self) {
        if self.handle.stop().is_ok() {
            self.handle.stopped().await;
        }
    }
}

/// Spawns a mock RSK node.
///
/// # Returns
///
/// Node handle on success, [`NodeError`] if server can't be bound to the
/// given host and port.
pub async fn spawn_rpc_server(options: NodeOptions) -> Result<MockRpc, NodeError> {
    let url = format!("{}:{}", options.host, options.port);

    let server = match Server::builder().build(url.as_str()).await {
        Ok(s) => s,
        Err(e) => return Err(NodeError::Rpc(e.to_string())),
    };

    let socket_address = match server.local_addr() {
        Ok(a) => a,
        Err(e) => return Err(NodeError::Rpc(e.to_string())),
    };

    let ledger = options.ledger.unwrap_or_default();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let node = MockNode {
        ledger: ledger.clone(),
        requests: requests.clone(),
        response_delay: options.response_delay,
        rskj_empty_code: options.rskj_empty_code,
    };

    let handle = server.start(node.into_rpc());
    tracing::debug!("Mock RSK node started at {socket_address}");

    // Run server, till' it's shut down manually.
    tokio::spawn(handle.clone().stopped());

    Ok(MockRpc {
        socket_address,
        handle,
        ledger,
        requests,
    })
}

/// Server side state of a mock node.
struct MockNode {
    ledger: Ledger,
    requests: Arc<Mutex<Vec<CodeRequest>>>,
    response_delay: Duration,
    rskj_empty_code: bool,
}

#[async_trait]
impl EthApiServer for MockNode {
    async fn get_code(&self, address: Address, block: BlockTag) -> Result<Bytes, ErrorObjectOwned> {
        tracing::trace!("eth_getCode called for {address} at {block}");

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CodeRequest { address, block });

        if !self.response_delay.is_zero() {
            tokio::time::sleep(self.response_delay).await;
        }

        // Historical state isn't kept, only the tip can be served.
        if !block.is_tip() {
            return Err(ErrorObjectOwned::owned(
                INVALID_PARAMS_CODE,
                format!("State of block {block} is not available"),
                None::<()>,
            ));
        }

        match self.ledger.code(&address) {
            Some(code) => Ok(code),
            None if self.rskj_empty_code => Ok(Bytes::from(vec![0x00])),
            None => Ok(Bytes::default()),
        }
    }
}
