//! # Types
//!
//! Account and bytecode types come from `alloy-primitives`; both use `0x`
//! prefixed hex as their text and JSON forms. Block tags are defined here.

pub use alloy_primitives::{Address, Bytes};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// State qualifier of a state query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockTag {
    /// Chain tip. RSK nodes serve pending state queries through this tag.
    #[default]
    Latest,
    Pending,
    Earliest,
    Number(u64),
}

impl BlockTag {
    /// Returns `true` if tag refers to the chain tip, rather than a historical
    /// block.
    pub fn is_tip(&self) -> bool {
        matches!(self, BlockTag::Latest | BlockTag::Pending)
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Latest => f.write_str("latest"),
            BlockTag::Pending => f.write_str("pending"),
            BlockTag::Earliest => f.write_str("earliest"),
            BlockTag::Number(n) => write!(f, "0x{n:x}"),
        }
    }
}

/// Parses a block tag name or a block number, either as a `0x` prefixed
/// quantity or as a decimal. Signs are not allowed.
impl FromStr for BlockTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => return Ok(BlockTag::Latest),
            "pending" => return Ok(BlockTag::Pending),
            "earliest" => return Ok(BlockTag::Earliest),
            _ => (),
        };

        let (digits, radix) = match s.strip_prefix("0x") {
            Some(quantity) => (quantity, 16),
            None => (s, 10),
        };

        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(format!("Invalid block tag {s:?}"));
        }

        u64::from_str_radix(digits, radix)
            .map(BlockTag::Number)
            .map_err(|e| format!("Invalid block tag {s:?}: {e}"))
    }
}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BlockTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;

        s.parse().map_err(de::Error::custom)
    }
}
