//! # Traits
//!
//! `eth` namespace methods used by this crate. The macro generates both the
//! client side (`EthApiClient`, implemented for any jsonrpsee client) and the
//! server side (`EthApiServer`, implemented by the mock node).

use crate::types::{Address, BlockTag, Bytes};
use jsonrpsee::proc_macros::rpc;
use jsonrpsee::types::ErrorObjectOwned;

#[rpc(client, server, namespace = "eth")]
pub trait EthApi {
    /// Returns code at `address`, as seen in `block`.
    #[method(name = "getCode")]
    async fn get_code(&self, address: Address, block: BlockTag)
        -> Result<Bytes, ErrorObjectOwned>;
}
