use interchain_primitives::prelude::*;

use crate::error::IdentifierError;

/// The sequence number of a packet enforces ordering among packets from the same source.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence(u64);

impl core::str::FromStr for Sequence {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self::from)
            .map_err(|e| IdentifierError::InvalidSequence {
                value: s.to_string(),
                description: e.to_string(),
            })
    }
}

impl Sequence {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the next sequence number, saturating at `u64::MAX`.
    pub fn increment(&self) -> Sequence {
        Sequence(self.0.saturating_add(1))
    }

    /// Encodes the sequence number into 8 big-endian bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_be_bytes().to_vec()
    }

    /// Decodes 8 big-endian bytes into a sequence number.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, IdentifierError> {
        let array: [u8; 8] = bytes
            .try_into()
            .map_err(|_| IdentifierError::InvalidSequence {
                value: format!("{bytes:?}"),
                description: "expected 8 big-endian bytes".to_string(),
            })?;
        Ok(Self(u64::from_be_bytes(array)))
    }
}

impl From<u64> for Sequence {
    fn from(seq: u64) -> Self {
        Sequence(seq)
    }
}

impl From<Sequence> for u64 {
    fn from(s: Sequence) -> u64 {
        s.0
    }
}

impl core::fmt::Display for Sequence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}", self.0)
    }
}
