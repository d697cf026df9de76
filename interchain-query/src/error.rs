//! Defines the query error type

use displaydoc::Display;
use interchain_app_transfer::types::error::TokenTransferError;
use interchain_core_handler_types::error::{ContextError, ErrorKind};
use interchain_core_host_types::error::IdentifierError;
use interchain_primitives::prelude::*;

/// The error type of the query surface.
#[derive(Debug, Display)]
pub enum QueryError {
    /// invalid argument: `{0}`
    InvalidArgument(String),
    /// not found: `{0}`
    NotFound(String),
    /// context error: `{0}`
    Context(ContextError),
    /// transfer error: `{0}`
    Transfer(TokenTransferError),
}

impl QueryError {
    pub fn invalid_argument<T: ToString>(description: T) -> Self {
        Self::InvalidArgument(description.to_string())
    }

    pub fn not_found<T: ToString>(description: T) -> Self {
        Self::NotFound(description.to_string())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Context(e) => Some(e),
            Self::Transfer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IdentifierError> for QueryError {
    fn from(e: IdentifierError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}

/// Lookups that fail because an object is absent surface as `NotFound`.
impl From<ContextError> for QueryError {
    fn from(e: ContextError) -> Self {
        match e.kind() {
            ErrorKind::NotFound => Self::NotFound(e.to_string()),
            ErrorKind::InvalidInput => Self::InvalidArgument(e.to_string()),
            _ => Self::Context(e),
        }
    }
}

impl From<TokenTransferError> for QueryError {
    fn from(e: TokenTransferError) -> Self {
        match e {
            TokenTransferError::ContextError(e) => e.into(),
            e => Self::Transfer(e),
        }
    }
}
