//! Error types raised by host identifiers and host storage.

use displaydoc::Display;
use interchain_primitives::prelude::*;

/// Errors that originate from host implementations.
#[derive(Debug, Display)]
pub enum HostError {
    /// invalid data: `{description}`
    InvalidData { description: String },
    /// missing data: `{description}`
    MissingData { description: String },
    /// failed to store data: `{description}`
    FailedToStoreData { description: String },
    /// failed to retrieve data from store: `{description}`
    FailedToRetrieveFromStore { description: String },
    /// failed to parse data: `{description}`
    FailedToParseData { description: String },
    /// other error: `{description}`
    Other { description: String },
}

impl HostError {
    pub fn invalid_data<T: ToString>(description: T) -> Self {
        Self::InvalidData {
            description: description.to_string(),
        }
    }

    pub fn missing_data<T: ToString>(description: T) -> Self {
        Self::MissingData {
            description: description.to_string(),
        }
    }

    pub fn failed_to_store<T: ToString>(description: T) -> Self {
        Self::FailedToStoreData {
            description: description.to_string(),
        }
    }

    pub fn failed_to_retrieve<T: ToString>(description: T) -> Self {
        Self::FailedToRetrieveFromStore {
            description: description.to_string(),
        }
    }

    pub fn failed_to_parse<T: ToString>(description: T) -> Self {
        Self::FailedToParseData {
            description: description.to_string(),
        }
    }
}

/// Errors that arise when parsing identifiers.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Display, PartialEq, Eq)]
pub enum IdentifierError {
    /// identifier `{id}` has invalid length; must be between [`{min}`,`{max}`]
    InvalidLength { id: String, min: u64, max: u64 },
    /// identifier `{id}` can only contain alphanumeric characters or `.`, `_`, `+`, `-`, `#`, `[`, `]`, `<`, `>`
    InvalidCharacter { id: String },
    /// identifier `{id}` must be `{prefix}` followed by a dash and a decimal counter
    InvalidPrefix { id: String, prefix: String },
    /// failed to parse `{value}` as a packet sequence: `{description}`
    InvalidSequence { value: String, description: String },
}

#[cfg(feature = "std")]
impl std::error::Error for IdentifierError {}

#[cfg(feature = "std")]
impl std::error::Error for HostError {}
