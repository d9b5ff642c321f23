//! # RPC API
//!
//! Contract code queries. RSK nodes don't serve `eth_getCode` for the
//! `pending` tag the way Ethereum clients expect, so pending code is asked for
//! with the `latest` tag, which is the chain tip.

use super::{CallContext, RskClient};
use crate::errors::RpcError;
use crate::rpc::EthApiClient;
use crate::types::{Address, BlockTag, Bytes};

impl RskClient {
    /// Returns the contract code of `account` in the pending state.
    ///
    /// Sends a single `eth_getCode` request with the `latest` tag. Returned
    /// code is empty if account has no code. Call is aborted if `ctx` is
    /// cancelled or its deadline passes.
    pub async fn pending_code_at(
        &self,
        ctx: &CallContext,
        account: &Address,
    ) -> Result<Bytes, RpcError> {
        self.code_at(ctx, account, BlockTag::Latest).await
    }

    /// Returns the contract code of `account` as seen in `block`.
    pub async fn code_at(
        &self,
        ctx: &CallContext,
        account: &Address,
        block: BlockTag,
    ) -> Result<Bytes, RpcError> {
        tracing::trace!("Requesting code of {account} at block {block}");

        let code = ctx.run(self.inner.get_code(*account, block)).await?;

        tracing::trace!("Account {account} has {} bytes of code", code.len());

        Ok(code)
    }

    /// Checks if a contract is deployed at `account` in the pending state.
    ///
    /// RSKJ answers `0x00` instead of `0x` for accounts without code, so both
    /// are treated as "not deployed".
    pub async fn is_contract_deployed(
        &self,
        ctx: &CallContext,
        account: &Address,
    ) -> Result<bool, RpcError> {
        let code = self.pending_code_at(ctx, account).await?;

        Ok(!is_empty_code(&code))
    }
}

/// Returns `true` if `code` means "no code", in either Ethereum or RSKJ form.
pub fn is_empty_code(code: &[u8]) -> bool {
    code.is_empty() || code == [0x00]
}
