//! Host context traits of the packet lifecycle engine.

use interchain_core_channel_types::channel::ChannelEnd;
use interchain_core_channel_types::commitment::{AcknowledgementCommitment, PacketCommitment};
use interchain_core_channel_types::packet::Receipt;
use interchain_core_channel_types::Height;
use interchain_core_handler_types::error::ContextError;
use interchain_core_handler_types::events::IbcEvent;
use interchain_core_host_types::identifiers::{ChannelId, ConnectionId, Sequence};
use interchain_core_host_types::path::{
    AckPath, ChannelEndPath, CommitmentPath, ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use interchain_primitives::prelude::*;
use interchain_primitives::Timestamp;

use crate::client::LightClient;

/// Context to be implemented by the host that provides all "read-only" methods.
///
/// Trait used for the top-level `validate` entrypoints.
pub trait ValidationContext {
    type LightClient: LightClient;

    /// Returns the light client tracking the counterparty of `connection_id`.
    fn light_client(&self, connection_id: &ConnectionId)
        -> Result<Self::LightClient, ContextError>;

    /// Returns the current height of the local chain.
    fn host_height(&self) -> Result<Height, ContextError>;

    /// Returns the current timestamp of the local chain.
    fn host_timestamp(&self) -> Result<Timestamp, ContextError>;

    /// Returns the `ChannelEnd` stored under `channel_end_path`.
    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ContextError>;

    fn get_next_sequence_send(&self, seq_send_path: &SeqSendPath)
        -> Result<Sequence, ContextError>;

    fn get_next_sequence_recv(&self, seq_recv_path: &SeqRecvPath)
        -> Result<Sequence, ContextError>;

    fn get_next_sequence_ack(&self, seq_ack_path: &SeqAckPath) -> Result<Sequence, ContextError>;

    fn get_packet_commitment(
        &self,
        commitment_path: &CommitmentPath,
    ) -> Result<Option<PacketCommitment>, ContextError>;

    fn get_packet_receipt(&self, receipt_path: &ReceiptPath)
        -> Result<Option<Receipt>, ContextError>;

    fn get_packet_acknowledgement(
        &self,
        ack_path: &AckPath,
    ) -> Result<Option<AcknowledgementCommitment>, ContextError>;

    /// Returns every packet commitment stored for `channel_id` as
    /// `(store key, commitment)` pairs, in ascending key order.
    fn packet_commitment_entries(
        &self,
        channel_id: &ChannelId,
    ) -> Result<Vec<(Vec<u8>, PacketCommitment)>, ContextError>;
}

/// Context to be implemented by the host that provides all "write" methods.
///
/// Trait used for the top-level `execute` entrypoints.
pub trait ExecutionContext: ValidationContext {
    /// Stores the given channel_end at a path associated with the channel id.
    fn store_channel(
        &mut self,
        channel_end_path: &ChannelEndPath,
        channel_end: ChannelEnd,
    ) -> Result<(), ContextError>;

    fn store_next_sequence_send(
        &mut self,
        seq_send_path: &SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ContextError>;

    fn store_next_sequence_recv(
        &mut self,
        seq_recv_path: &SeqRecvPath,
        seq: Sequence,
    ) -> Result<(), ContextError>;

    fn store_next_sequence_ack(
        &mut self,
        seq_ack_path: &SeqAckPath,
        seq: Sequence,
    ) -> Result<(), ContextError>;

    fn store_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ContextError>;

    fn delete_packet_commitment(&mut self, commitment_path: &CommitmentPath)
        -> Result<(), ContextError>;

    fn store_packet_receipt(
        &mut self,
        receipt_path: &ReceiptPath,
        receipt: Receipt,
    ) -> Result<(), ContextError>;

    fn store_packet_acknowledgement(
        &mut self,
        ack_path: &AckPath,
        ack_commitment: AcknowledgementCommitment,
    ) -> Result<(), ContextError>;

    /// Removes a stored acknowledgement. The handlers never call this; it
    /// serves host retention policies.
    fn delete_packet_acknowledgement(&mut self, ack_path: &AckPath) -> Result<(), ContextError>;

    /// Emits an event for relayers and indexers.
    fn emit_ibc_event(&mut self, event: IbcEvent) -> Result<(), ContextError>;

    /// Logging facility
    fn log_message(&mut self, message: String) -> Result<(), ContextError>;
}
