//! Contains the `Amount` type, which represents amounts of tokens transferred.
use core::ops::Deref;
use core::str::FromStr;

use derive_more::{Display, From, Into};
use interchain_primitives::prelude::*;
use interchain_primitives::serializers;
use primitive_types::U256;

use super::error::TokenTransferError;

/// A type for representing token transfer amounts.
///
/// Travels as a decimal string in JSON.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    PartialOrd,
    Ord,
    Display,
    From,
    Into,
    serde::Serialize,
    serde::Deserialize,
)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Amount(
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    #[serde(serialize_with = "serializers::serialize")]
    #[serde(deserialize_with = "deserialize")]
    U256,
);

impl Deref for Amount {
    type Target = [u64; 4];

    fn deref(&self) -> &Self::Target {
        &self.0 .0
    }
}

impl From<[u64; 4]> for Amount {
    fn from(value: [u64; 4]) -> Self {
        Self(U256(value))
    }
}

impl Amount {
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl AsRef<U256> for Amount {
    fn as_ref(&self) -> &U256 {
        &self.0
    }
}

impl FromStr for Amount {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = U256::from_dec_str(s).map_err(TokenTransferError::InvalidAmount)?;
        Ok(Self(amount))
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Self(v.into())
    }
}

fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    U256::from_dec_str(<String>::deserialize(deserializer)?.as_str())
        .map_err(serde::de::Error::custom)
}
