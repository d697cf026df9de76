//! Defines the channel, packet and light-client error types.

use displaydoc::Display;
use interchain_core_host_types::error::{HostError, IdentifierError};
use interchain_core_host_types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use interchain_primitives::prelude::*;
use interchain_primitives::{DecodingError, Timestamp, TimestampError};

use crate::channel::State;
use crate::commitment::PacketCommitment;
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};
use crate::Height;

/// Errors returned by an injected light-client verifier.
#[derive(Debug, Display)]
pub enum ClientError {
    /// heights must have a non-zero revision height
    InvalidHeight,
    /// height subtraction would produce a zero or negative height
    InvalidHeightResult,
    /// no light client tracks connection `{0}`
    MissingClient(ConnectionId),
    /// client for connection `{0}` is frozen
    FrozenClient(ConnectionId),
    /// missing consensus state at height `{0}`
    MissingConsensusState(Height),
    /// proof height `{proof_height}` is newer than the latest client height `{latest_height}`
    InvalidProofHeight {
        latest_height: Height,
        proof_height: Height,
    },
    /// empty commitment proof
    EmptyProof,
    /// membership of `{path}` could not be verified: `{description}`
    FailedMembershipVerification { path: String, description: String },
    /// non-membership of `{path}` could not be verified: `{description}`
    FailedNonMembershipVerification { path: String, description: String },
    /// timestamp error: `{0}`
    Timestamp(TimestampError),
    /// other client error: `{description}`
    Other { description: String },
}

impl From<TimestampError> for ClientError {
    fn from(e: TimestampError) -> Self {
        Self::Timestamp(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Timestamp(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Display)]
pub enum ChannelError {
    /// host error: `{0}`
    Host(HostError),
    /// client error: `{0}`
    Client(ClientError),
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
    /// decoding error: `{0}`
    Decoding(DecodingError),
    /// channel `{channel_id}` does not exist
    NonexistentChannel { channel_id: ChannelId },
    /// channel `{channel_id}` already exists
    ChannelAlreadyExists { channel_id: ChannelId },
    /// invalid channel state: expected `{expected}`, actual `{actual}`
    InvalidState { expected: State, actual: State },
    /// channel `{channel_id}` is bound to port `{actual}`, not `{expected}`
    MismatchedPort {
        channel_id: ChannelId,
        expected: PortId,
        actual: PortId,
    },
    /// invalid counterparty: expected `{expected}`, actual `{actual}`
    MismatchedCounterparty { expected: String, actual: String },
    /// missing counterparty channel identifier
    MissingCounterpartyChannel,
    /// invalid connection hops length: expected `{expected}`, actual `{actual}`
    InvalidConnectionHopsLength { expected: u64, actual: u64 },
    /// application module error: `{description}`
    AppModule { description: String },
}

#[derive(Debug, Display)]
pub enum PacketError {
    /// channel error: `{0}`
    Channel(ChannelError),
    /// identifier error: `{0}`
    InvalidIdentifier(IdentifierError),
    /// decoding error: `{0}`
    Decoding(DecodingError),
    /// packet sequence cannot be 0
    ZeroPacketSequence,
    /// empty packet data
    EmptyPacketData,
    /// empty acknowledgement
    EmptyAcknowledgement,
    /// empty acknowledgement status
    EmptyAcknowledgementStatus,
    /// empty signer
    EmptySigner,
    /// packet destination `{port_id}/{channel_id}` does not match the channel counterparty
    MismatchedDestination {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// packet with timeout height `{timeout_height}` has expired at height `{chain_height}`
    ExpiredPacketHeight {
        timeout_height: TimeoutHeight,
        chain_height: Height,
    },
    /// packet with timeout timestamp `{timeout_timestamp}` has expired at `{chain_timestamp}`
    ExpiredPacketTimestamp {
        timeout_timestamp: TimeoutTimestamp,
        chain_timestamp: Timestamp,
    },
    /// packet with timeout height `{timeout_height}` and timeout timestamp `{timeout_timestamp}` has not timed out at height `{chain_height}` and time `{chain_timestamp}`
    PacketTimeoutNotReached {
        timeout_height: TimeoutHeight,
        chain_height: Height,
        timeout_timestamp: TimeoutTimestamp,
        chain_timestamp: Timestamp,
    },
    /// invalid packet sequence `{actual}`, expected `{expected}`
    MismatchedPacketSequence { expected: Sequence, actual: Sequence },
    /// packet `{sequence}` was already received
    PacketAlreadyReceived { sequence: Sequence },
    /// packet `{sequence}` was already acknowledged or timed out
    PacketAlreadyResolved { sequence: Sequence },
    /// commitment for packet `{sequence}` does not match: expected `{expected}`, actual `{actual}`
    MismatchedPacketCommitment {
        sequence: Sequence,
        expected: PacketCommitment,
        actual: PacketCommitment,
    },
    /// a commitment for packet `{sequence}` already exists
    DuplicateCommitment { sequence: Sequence },
    /// a receipt for packet `{sequence}` already exists
    DuplicateReceipt { sequence: Sequence },
    /// an acknowledgement for packet `{sequence}` already exists
    DuplicateAcknowledgement { sequence: Sequence },
    /// missing commitment for packet `{sequence}`
    MissingPacketCommitment { sequence: Sequence },
    /// missing acknowledgement for packet `{sequence}`
    MissingPacketAcknowledgement { sequence: Sequence },
    /// application module error: `{description}`
    AppModule { description: String },
    /// application state corrupted: `{description}`
    AppInvariantViolation { description: String },
}

impl From<HostError> for ChannelError {
    fn from(e: HostError) -> Self {
        Self::Host(e)
    }
}

impl From<ClientError> for ChannelError {
    fn from(e: ClientError) -> Self {
        Self::Client(e)
    }
}

impl From<IdentifierError> for ChannelError {
    fn from(e: IdentifierError) -> Self {
        Self::InvalidIdentifier(e)
    }
}

impl From<DecodingError> for ChannelError {
    fn from(e: DecodingError) -> Self {
        Self::Decoding(e)
    }
}

impl From<ChannelError> for PacketError {
    fn from(e: ChannelError) -> Self {
        Self::Channel(e)
    }
}

impl From<HostError> for PacketError {
    fn from(e: HostError) -> Self {
        Self::Channel(ChannelError::Host(e))
    }
}

impl From<ClientError> for PacketError {
    fn from(e: ClientError) -> Self {
        Self::Channel(ChannelError::Client(e))
    }
}

impl From<IdentifierError> for PacketError {
    fn from(e: IdentifierError) -> Self {
        Self::InvalidIdentifier(e)
    }
}

impl From<DecodingError> for PacketError {
    fn from(e: DecodingError) -> Self {
        Self::Decoding(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChannelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Host(e) => Some(e),
            Self::Client(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            Self::Decoding(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PacketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Channel(e) => Some(e),
            Self::InvalidIdentifier(e) => Some(e),
            Self::Decoding(e) => Some(e),
            _ => None,
        }
    }
}
