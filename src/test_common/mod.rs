//! # Common Utilities for Unit Tests
//!
//! This crate compiles for test targets and provides common utilities for it.
//!
//! This crate is in `src/` directory because unit tests can't access `tests/`
//! directory.

use crate::types::{Address, Bytes};

/// An account without code.
#[allow(unused)]
pub fn sample_account() -> Address {
    Address::new([
        0xcd, 0x2a, 0x3d, 0x9f, 0x93, 0x8e, 0x13, 0xcd, 0x94, 0x7e, 0xc0, 0x5a, 0xbc, 0x7f, 0xe7,
        0x34, 0xdf, 0x8d, 0xd8, 0x26,
    ])
}

/// Address of [`sample_contract`].
#[allow(unused)]
pub fn sample_contract_address() -> Address {
    "0x0000000000000000000000000000000001000008"
        .parse()
        .unwrap()
}

/// Runtime code of a tiny contract that returns 42.
#[allow(unused)]
pub fn sample_contract() -> Bytes {
    "0x602a60005260206000f3".parse().unwrap()
}
