//! Implementation of the host context traits for the mock store.

use interchain_core_channel::context::{ExecutionContext, ValidationContext};
use interchain_core_channel::types::channel::ChannelEnd;
use interchain_core_channel::types::commitment::{AcknowledgementCommitment, PacketCommitment};
use interchain_core_channel::types::error::{ChannelError, ClientError};
use interchain_core_channel::types::packet::Receipt;
use interchain_core_channel::types::Height;
use interchain_core_handler_types::error::ContextError;
use interchain_core_handler_types::events::IbcEvent;
use interchain_core_host_types::error::HostError;
use interchain_core_host_types::identifiers::{ChannelId, ConnectionId, Sequence};
use interchain_core_host_types::path::{
    AckPath, ChannelEndPath, CommitmentPath, ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use interchain_primitives::prelude::*;
use interchain_primitives::Timestamp;
use interchain_query::context::QueryContext;

use super::types::MockIbcStore;
use crate::testapp::ibc::clients::mock::MockLightClient;

fn missing_sequence(kind: &str, channel_id: &ChannelId) -> ContextError {
    HostError::missing_data(format!("{kind} sequence of channel `{channel_id}`")).into()
}

impl ValidationContext for MockIbcStore {
    type LightClient = MockLightClient;

    fn light_client(&self, connection_id: &ConnectionId) -> Result<MockLightClient, ContextError> {
        self.clients
            .get(connection_id)
            .cloned()
            .ok_or_else(|| ClientError::MissingClient(connection_id.clone()).into())
    }

    fn host_height(&self) -> Result<Height, ContextError> {
        Ok(self.state.lock().host_height)
    }

    fn host_timestamp(&self) -> Result<Timestamp, ContextError> {
        Ok(self.state.lock().host_timestamp)
    }

    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ContextError> {
        self.state
            .lock()
            .channels
            .get(&channel_end_path.0)
            .cloned()
            .ok_or_else(|| {
                ChannelError::NonexistentChannel {
                    channel_id: channel_end_path.0.clone(),
                }
                .into()
            })
    }

    fn get_next_sequence_send(
        &self,
        seq_send_path: &SeqSendPath,
    ) -> Result<Sequence, ContextError> {
        self.state
            .lock()
            .next_sequence_send
            .get(&seq_send_path.0)
            .copied()
            .ok_or_else(|| missing_sequence("send", &seq_send_path.0))
    }

    fn get_next_sequence_recv(
        &self,
        seq_recv_path: &SeqRecvPath,
    ) -> Result<Sequence, ContextError> {
        self.state
            .lock()
            .next_sequence_recv
            .get(&seq_recv_path.0)
            .copied()
            .ok_or_else(|| missing_sequence("receive", &seq_recv_path.0))
    }

    fn get_next_sequence_ack(&self, seq_ack_path: &SeqAckPath) -> Result<Sequence, ContextError> {
        self.state
            .lock()
            .next_sequence_ack
            .get(&seq_ack_path.0)
            .copied()
            .ok_or_else(|| missing_sequence("ack", &seq_ack_path.0))
    }

    fn get_packet_commitment(
        &self,
        commitment_path: &CommitmentPath,
    ) -> Result<Option<PacketCommitment>, ContextError> {
        Ok(self
            .state
            .lock()
            .packet_commitments
            .get(&commitment_path.to_key())
            .cloned())
    }

    fn get_packet_receipt(
        &self,
        receipt_path: &ReceiptPath,
    ) -> Result<Option<Receipt>, ContextError> {
        Ok(self
            .state
            .lock()
            .packet_receipts
            .get(&receipt_path.to_key())
            .copied())
    }

    fn get_packet_acknowledgement(
        &self,
        ack_path: &AckPath,
    ) -> Result<Option<AcknowledgementCommitment>, ContextError> {
        Ok(self
            .state
            .lock()
            .packet_acknowledgements
            .get(&ack_path.to_key())
            .cloned())
    }

    fn packet_commitment_entries(
        &self,
        channel_id: &ChannelId,
    ) -> Result<Vec<(Vec<u8>, PacketCommitment)>, ContextError> {
        let prefix = ChannelEndPath::new(channel_id).commitments_prefix();
        Ok(self
            .state
            .lock()
            .packet_commitments
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .map(|(key, commitment)| (key.clone(), commitment.clone()))
            .collect())
    }
}

impl ExecutionContext for MockIbcStore {
    fn store_channel(
        &mut self,
        channel_end_path: &ChannelEndPath,
        channel_end: ChannelEnd,
    ) -> Result<(), ContextError> {
        self.state
            .lock()
            .channels
            .insert(channel_end_path.0.clone(), channel_end);
        Ok(())
    }

    fn store_next_sequence_send(
        &mut self,
        seq_send_path: &SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.state
            .lock()
            .next_sequence_send
            .insert(seq_send_path.0.clone(), seq);
        Ok(())
    }

    fn store_next_sequence_recv(
        &mut self,
        seq_recv_path: &SeqRecvPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.state
            .lock()
            .next_sequence_recv
            .insert(seq_recv_path.0.clone(), seq);
        Ok(())
    }

    fn store_next_sequence_ack(
        &mut self,
        seq_ack_path: &SeqAckPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.state
            .lock()
            .next_sequence_ack
            .insert(seq_ack_path.0.clone(), seq);
        Ok(())
    }

    fn store_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ContextError> {
        self.state
            .lock()
            .packet_commitments
            .insert(commitment_path.to_key(), commitment);
        Ok(())
    }

    fn delete_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
    ) -> Result<(), ContextError> {
        self.state
            .lock()
            .packet_commitments
            .remove(&commitment_path.to_key());
        Ok(())
    }

    fn store_packet_receipt(
        &mut self,
        receipt_path: &ReceiptPath,
        receipt: Receipt,
    ) -> Result<(), ContextError> {
        self.state
            .lock()
            .packet_receipts
            .insert(receipt_path.to_key(), receipt);
        Ok(())
    }

    fn store_packet_acknowledgement(
        &mut self,
        ack_path: &AckPath,
        ack_commitment: AcknowledgementCommitment,
    ) -> Result<(), ContextError> {
        self.state
            .lock()
            .packet_acknowledgements
            .insert(ack_path.to_key(), ack_commitment);
        Ok(())
    }

    fn delete_packet_acknowledgement(&mut self, ack_path: &AckPath) -> Result<(), ContextError> {
        self.state
            .lock()
            .packet_acknowledgements
            .remove(&ack_path.to_key());
        Ok(())
    }

    fn emit_ibc_event(&mut self, event: IbcEvent) -> Result<(), ContextError> {
        self.state.lock().events.push(event);
        Ok(())
    }

    fn log_message(&mut self, message: String) -> Result<(), ContextError> {
        self.state.lock().logs.push(message);
        Ok(())
    }
}

impl QueryContext for MockIbcStore {
    fn channel_ends(&self) -> Result<Vec<(ChannelId, ChannelEnd)>, ContextError> {
        Ok(self
            .state
            .lock()
            .channels
            .iter()
            .map(|(channel_id, channel_end)| (channel_id.clone(), channel_end.clone()))
            .collect())
    }
}
