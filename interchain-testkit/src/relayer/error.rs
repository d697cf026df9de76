use derive_more::From;
use displaydoc::Display;
use interchain_app_transfer::types::error::TokenTransferError;
use interchain_core_channel::types::error::ClientError;
use interchain_core_handler_types::error::ContextError;
use interchain_core_host_types::identifiers::Sequence;

#[derive(Debug, Display, From)]
pub enum RelayerError {
    /// transaction processing by modules failed error: `{0}`
    TransactionFailed(ContextError),
    /// transfer application error: `{0}`
    Transfer(TokenTransferError),
    /// light client error: `{0}`
    Client(ClientError),
    /// no packet was sent by the last transaction
    #[from(ignore)]
    MissingPacket,
    /// no acknowledgement was written for packet with sequence `{sequence}`
    #[from(ignore)]
    MissingAcknowledgement { sequence: Sequence },
}

#[cfg(feature = "std")]
impl std::error::Error for RelayerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::TransactionFailed(e) => Some(e),
            Self::Transfer(e) => Some(e),
            Self::Client(e) => Some(e),
            _ => None,
        }
    }
}
