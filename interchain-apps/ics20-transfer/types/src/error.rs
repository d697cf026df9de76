//! Defines the token transfer error type
use core::convert::Infallible;
use core::str::Utf8Error;

use displaydoc::Display;
use interchain_core_channel_types::acknowledgement::StatusValue;
use interchain_core_channel_types::error::PacketError;
use interchain_core_handler_types::error::{ContextError, ErrorKind};
use interchain_core_host_types::error::IdentifierError;
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_primitives::prelude::*;
use uint::FromDecStrErr;

#[derive(Display, Debug)]
pub enum TokenTransferError {
    /// context error: `{0}`
    ContextError(ContextError),
    /// invalid identifier: `{0}`
    InvalidIdentifier(IdentifierError),
    /// insufficient funds: tried to send `{send_attempt}`, sender only has `{available_funds}`
    InsufficientFunds {
        send_attempt: String,
        available_funds: String,
    },
    /// destination channel not found in the counterparty of port_id `{port_id}` and channel_id `{channel_id}`
    DestinationChannelNotFound {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// base denomination is empty
    EmptyBaseDenom,
    /// invalid port id in trace at position: `{pos}`, validation error: `{validation_error}`
    InvalidTracePortId {
        pos: u64,
        validation_error: IdentifierError,
    },
    /// invalid channel id in trace at position: `{pos}`, validation error: `{validation_error}`
    InvalidTraceChannelId {
        pos: u64,
        validation_error: IdentifierError,
    },
    /// trace length must be even but got: `{len}`
    InvalidTraceLength { len: u64 },
    /// invalid amount error: `{0}`
    InvalidAmount(FromDecStrErr),
    /// transfer amount must be positive
    ZeroAmount,
    /// invalid coin string: `{coin}`
    InvalidCoin { coin: String },
    /// missing sender address
    EmptySender,
    /// missing receiver address
    EmptyReceiver,
    /// failed to parse as AccountId
    ParseAccountFailure,
    /// no denomination trace found for hash `{hash}`
    MissingDenomTrace { hash: String },
    /// failed to deserialize packet data
    PacketDataDeserialization,
    /// failed to deserialize acknowledgement
    AckDeserialization,
    /// invalid port: `{port_id}`, expected `{exp_port_id}`
    InvalidPort {
        port_id: PortId,
        exp_port_id: PortId,
    },
    /// invalid channel version: `{version}`, expected `{expected}`
    InvalidVersion { version: String, expected: String },
    /// amount overflow for denom `{denom}`
    AmountOverflow { denom: String },
    /// escrow invariant violated for denom `{denom}`: escrowed `{escrowed}`, released `{requested}`
    EscrowInvariantViolation {
        denom: String,
        escrowed: String,
        requested: String,
    },
    /// no authorization found for granter `{granter}` and grantee `{grantee}`
    NoAuthorizationFound { granter: String, grantee: String },
    /// receiver `{receiver}` is not on the allow list of the authorization
    InvalidAddress { receiver: String },
    /// spend limit exceeded for denom `{denom}`: requested `{requested}`, remaining `{remaining}`
    InsufficientSpendLimit {
        denom: String,
        requested: String,
        remaining: String,
    },
    /// invalid authorization: `{reason}`
    InvalidAuthorization { reason: String },
    /// decoding raw bytes as UTF8 string error: `{0}`
    Utf8Decode(Utf8Error),
    /// other error: `{0}`
    Other(String),
}

impl TokenTransferError {
    /// Classifies the error the same way core errors are classified.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ContextError(e) => e.kind(),
            Self::EscrowInvariantViolation { .. } => ErrorKind::InvariantViolation,
            Self::NoAuthorizationFound { .. }
            | Self::MissingDenomTrace { .. }
            | Self::DestinationChannelNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidIdentifier(_)
            | Self::EmptyBaseDenom
            | Self::InvalidTracePortId { .. }
            | Self::InvalidTraceChannelId { .. }
            | Self::InvalidTraceLength { .. }
            | Self::InvalidAmount(_)
            | Self::ZeroAmount
            | Self::InvalidCoin { .. }
            | Self::EmptySender
            | Self::EmptyReceiver
            | Self::ParseAccountFailure
            | Self::PacketDataDeserialization
            | Self::AckDeserialization
            | Self::InvalidPort { .. }
            | Self::InvalidVersion { .. }
            | Self::InvalidAuthorization { .. }
            | Self::Utf8Decode(_) => ErrorKind::InvalidInput,
            Self::InsufficientFunds { .. }
            | Self::AmountOverflow { .. }
            | Self::InvalidAddress { .. }
            | Self::InsufficientSpendLimit { .. }
            | Self::Other(_) => ErrorKind::Application,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TokenTransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::ContextError(e) => Some(e),
            Self::InvalidIdentifier(e)
            | Self::InvalidTracePortId {
                validation_error: e,
                ..
            }
            | Self::InvalidTraceChannelId {
                validation_error: e,
                ..
            } => Some(e),
            Self::InvalidAmount(e) => Some(e),
            Self::Utf8Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Infallible> for TokenTransferError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

impl From<ContextError> for TokenTransferError {
    fn from(err: ContextError) -> TokenTransferError {
        Self::ContextError(err)
    }
}

impl From<PacketError> for TokenTransferError {
    fn from(err: PacketError) -> TokenTransferError {
        Self::ContextError(err.into())
    }
}

impl From<IdentifierError> for TokenTransferError {
    fn from(err: IdentifierError) -> TokenTransferError {
        Self::InvalidIdentifier(err)
    }
}

impl From<TokenTransferError> for StatusValue {
    fn from(err: TokenTransferError) -> Self {
        StatusValue::new_or_unknown(err)
    }
}

/// Module callbacks report application failures to the packet handlers as
/// packet errors.
impl From<TokenTransferError> for PacketError {
    fn from(err: TokenTransferError) -> Self {
        match err {
            TokenTransferError::ContextError(ContextError::PacketError(e)) => e,
            e @ TokenTransferError::EscrowInvariantViolation { .. } => {
                PacketError::AppInvariantViolation {
                    description: e.to_string(),
                }
            }
            e => PacketError::AppModule {
                description: e.to_string(),
            },
        }
    }
}
