//! # Code Ledger
//!
//! In-memory account code store of the mock node. Only the chain tip is
//! tracked: deploying or removing code takes effect immediately.
//!
//! Clones share the same store, so a test can keep a handle while the server
//! reads from another.

use crate::types::{Address, Bytes};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

/// Mock RSK ledger.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    /// Deployed code per account.
    codes: Arc<RwLock<HashMap<Address, Bytes>>>,
}

impl Ledger {
    /// Creates a new empty ledger.
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }

    /// Sets code of `address`. Previous code of the address, if any, is
    /// returned.
    pub fn deploy(&self, address: Address, code: impl Into<Bytes>) -> Option<Bytes> {
        let code = code.into();
        tracing::trace!("Deploying {} bytes of code to {address}", code.len());

        self.codes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address, code)
    }

    /// Removes code of `address`.
    pub fn remove(&self, address: &Address) -> Option<Bytes> {
        tracing::trace!("Removing code of {address}");

        self.codes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(address)
    }

    /// Returns code of `address`, or `None` if there isn't any.
    pub fn code(&self, address: &Address) -> Option<Bytes> {
        self.codes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(address)
            .cloned()
    }

    /// Returns number of accounts with code.
    pub fn len(&self) -> usize {
        self.codes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
