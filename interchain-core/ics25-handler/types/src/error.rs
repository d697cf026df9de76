//! Defines the top-level context error and its classification.

use derive_more::From;
use displaydoc::Display;
use interchain_core_channel_types::error::{ChannelError, ClientError, PacketError};
use interchain_core_host_types::error::HostError;
use interchain_core_router_types::error::RouterError;
use interchain_primitives::prelude::*;

/// Top-level error
#[derive(Debug, Display, From)]
pub enum ContextError {
    /// host error: {0}
    HostError(HostError),
    /// light client error: {0}
    ClientError(ClientError),
    /// channel error: {0}
    ChannelError(ChannelError),
    /// packet error: {0}
    PacketError(PacketError),
    /// routing error: {0}
    RouterError(RouterError),
}

/// Broad classes of failure a caller can act on.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// malformed input rejected before any state change
    InvalidInput,
    /// the requested object does not exist
    NotFound,
    /// the submitted proof did not verify
    ProofVerification,
    /// a duplicate or stale submission
    Rejected,
    /// a protocol invariant was broken
    InvariantViolation,
    /// the application refused the operation
    Application,
    /// the host failed to serve the request
    Host,
}

impl ErrorKind {
    /// Only invariant violations indicate corrupted state; every other
    /// kind leaves the chain consistent and may be retried or reported.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ErrorKind::InvariantViolation)
    }
}

impl ContextError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::HostError(e) => host_kind(e),
            Self::ClientError(e) => client_kind(e),
            Self::ChannelError(e) => channel_kind(e),
            Self::PacketError(e) => packet_kind(e),
            Self::RouterError(e) => router_kind(e),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind().is_fatal()
    }
}

fn host_kind(e: &HostError) -> ErrorKind {
    match e {
        HostError::MissingData { .. } => ErrorKind::NotFound,
        HostError::InvalidData { .. } | HostError::FailedToParseData { .. } => {
            ErrorKind::InvalidInput
        }
        _ => ErrorKind::Host,
    }
}

fn client_kind(e: &ClientError) -> ErrorKind {
    match e {
        ClientError::MissingClient(_) => ErrorKind::NotFound,
        ClientError::InvalidHeight
        | ClientError::InvalidHeightResult
        | ClientError::Timestamp(_) => ErrorKind::InvalidInput,
        ClientError::FrozenClient(_)
        | ClientError::MissingConsensusState(_)
        | ClientError::InvalidProofHeight { .. }
        | ClientError::EmptyProof
        | ClientError::FailedMembershipVerification { .. }
        | ClientError::FailedNonMembershipVerification { .. } => ErrorKind::ProofVerification,
        ClientError::Other { .. } => ErrorKind::Host,
    }
}

fn channel_kind(e: &ChannelError) -> ErrorKind {
    match e {
        ChannelError::Host(e) => host_kind(e),
        ChannelError::Client(e) => client_kind(e),
        ChannelError::NonexistentChannel { .. } => ErrorKind::NotFound,
        ChannelError::ChannelAlreadyExists { .. } => ErrorKind::InvariantViolation,
        ChannelError::AppModule { .. } => ErrorKind::Application,
        ChannelError::InvalidIdentifier(_)
        | ChannelError::Decoding(_)
        | ChannelError::InvalidState { .. }
        | ChannelError::MismatchedPort { .. }
        | ChannelError::MismatchedCounterparty { .. }
        | ChannelError::MissingCounterpartyChannel
        | ChannelError::InvalidConnectionHopsLength { .. } => ErrorKind::InvalidInput,
    }
}

fn packet_kind(e: &PacketError) -> ErrorKind {
    match e {
        PacketError::Channel(e) => channel_kind(e),
        PacketError::PacketAlreadyReceived { .. } | PacketError::PacketAlreadyResolved { .. } => {
            ErrorKind::Rejected
        }
        PacketError::DuplicateCommitment { .. }
        | PacketError::DuplicateReceipt { .. }
        | PacketError::DuplicateAcknowledgement { .. }
        | PacketError::AppInvariantViolation { .. } => ErrorKind::InvariantViolation,
        PacketError::MissingPacketCommitment { .. }
        | PacketError::MissingPacketAcknowledgement { .. } => ErrorKind::NotFound,
        PacketError::AppModule { .. } => ErrorKind::Application,
        PacketError::InvalidIdentifier(_)
        | PacketError::Decoding(_)
        | PacketError::ZeroPacketSequence
        | PacketError::EmptyPacketData
        | PacketError::EmptyAcknowledgement
        | PacketError::EmptyAcknowledgementStatus
        | PacketError::EmptySigner
        | PacketError::MismatchedDestination { .. }
        | PacketError::ExpiredPacketHeight { .. }
        | PacketError::ExpiredPacketTimestamp { .. }
        | PacketError::PacketTimeoutNotReached { .. }
        | PacketError::MismatchedPacketSequence { .. }
        | PacketError::MismatchedPacketCommitment { .. } => ErrorKind::InvalidInput,
    }
}

fn router_kind(e: &RouterError) -> ErrorKind {
    match e {
        RouterError::Host(e) => host_kind(e),
        RouterError::MissingModule(_) | RouterError::UnboundChannel { .. } => ErrorKind::NotFound,
        RouterError::DuplicateModule(_) | RouterError::ChannelAlreadyBound { .. } => {
            ErrorKind::InvalidInput
        }
    }
}

impl From<ContextError> for PacketError {
    fn from(context_error: ContextError) -> Self {
        match context_error {
            ContextError::PacketError(e) => e,
            ContextError::ChannelError(e) => e.into(),
            ContextError::ClientError(e) => e.into(),
            ContextError::HostError(e) => e.into(),
            ContextError::RouterError(e) => PacketError::AppModule {
                description: e.to_string(),
            },
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HostError(e) => Some(e),
            Self::ClientError(e) => Some(e),
            Self::ChannelError(e) => Some(e),
            Self::PacketError(e) => Some(e),
            Self::RouterError(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use interchain_core_host_types::identifiers::{ChannelId, Sequence};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(PacketError::PacketAlreadyReceived { sequence: Sequence::from(1) }.into(), ErrorKind::Rejected)]
    #[case(PacketError::PacketAlreadyResolved { sequence: Sequence::from(1) }.into(), ErrorKind::Rejected)]
    #[case(PacketError::DuplicateReceipt { sequence: Sequence::from(1) }.into(), ErrorKind::InvariantViolation)]
    #[case(PacketError::ZeroPacketSequence.into(), ErrorKind::InvalidInput)]
    #[case(ChannelError::NonexistentChannel { channel_id: ChannelId::zero() }.into(), ErrorKind::NotFound)]
    #[case(PacketError::from(ChannelError::NonexistentChannel { channel_id: ChannelId::zero() }).into(), ErrorKind::NotFound)]
    #[case(ClientError::EmptyProof.into(), ErrorKind::ProofVerification)]
    #[case(PacketError::AppModule { description: "boom".to_string() }.into(), ErrorKind::Application)]
    fn errors_are_classified(#[case] err: ContextError, #[case] expected: ErrorKind) {
        assert_eq!(err.kind(), expected);
        assert_eq!(err.is_fatal(), expected == ErrorKind::InvariantViolation);
    }
}
