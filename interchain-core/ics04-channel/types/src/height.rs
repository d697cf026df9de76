//! Defines the block height type of a counterparty chain.

use core::cmp::Ordering;
use core::num::ParseIntError;
use core::str::FromStr;

use displaydoc::Display;
use interchain_primitives::prelude::*;

use crate::error::ClientError;

/// A block height, made of a revision number and the height within that
/// revision. Heights are ordered by revision first.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Height {
    revision_number: u64,
    revision_height: u64,
}

impl Height {
    pub fn new(revision_number: u64, revision_height: u64) -> Result<Self, ClientError> {
        if revision_height == 0 {
            return Err(ClientError::InvalidHeight);
        }

        Ok(Self {
            revision_number,
            revision_height,
        })
    }

    pub fn min(revision_number: u64) -> Self {
        Self {
            revision_number,
            revision_height: 1,
        }
    }

    pub fn revision_number(&self) -> u64 {
        self.revision_number
    }

    pub fn revision_height(&self) -> u64 {
        self.revision_height
    }

    pub fn add(&self, delta: u64) -> Height {
        Height {
            revision_number: self.revision_number,
            revision_height: self.revision_height.saturating_add(delta),
        }
    }

    pub fn increment(&self) -> Height {
        self.add(1)
    }

    pub fn sub(&self, delta: u64) -> Result<Height, ClientError> {
        if self.revision_height <= delta {
            return Err(ClientError::InvalidHeightResult);
        }

        Ok(Height {
            revision_number: self.revision_number,
            revision_height: self.revision_height - delta,
        })
    }
}

impl PartialOrd for Height {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Height {
    fn cmp(&self, other: &Self) -> Ordering {
        self.revision_number
            .cmp(&other.revision_number)
            .then(self.revision_height.cmp(&other.revision_height))
    }
}

impl core::fmt::Debug for Height {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        f.debug_struct("Height")
            .field("revision", &self.revision_number)
            .field("height", &self.revision_height)
            .finish()
    }
}

/// Custom format in the form `{revision_number}-{revision_height}`.
impl core::fmt::Display for Height {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum HeightError {
    /// cannot convert into a `Height` type from string `{height}`: `{error}`
    HeightConversion {
        height: String,
        error: ParseIntError,
    },
    /// attempted to parse an invalid zero height
    ZeroHeight,
    /// the height(`{raw_height}`) is not a valid format, this format must be used: \[revision_number\]-\[revision_height\]
    InvalidFormat { raw_height: String },
}

#[cfg(feature = "std")]
impl std::error::Error for HeightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            HeightError::HeightConversion { error: e, .. } => Some(e),
            _ => None,
        }
    }
}

impl FromStr for Height {
    type Err = HeightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rev_number_str, rev_height_str) =
            s.split_once('-')
                .ok_or_else(|| HeightError::InvalidFormat {
                    raw_height: s.to_owned(),
                })?;

        let parse = |part: &str| {
            part.parse::<u64>()
                .map_err(|e| HeightError::HeightConversion {
                    height: s.to_owned(),
                    error: e,
                })
        };

        Height::new(parse(rev_number_str)?, parse(rev_height_str)?)
            .map_err(|_| HeightError::ZeroHeight)
    }
}
