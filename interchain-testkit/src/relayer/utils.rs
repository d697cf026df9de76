//! Message builders and event scanners used to move packets between two
//! [`TestContext`]s.

use interchain_core_channel::client::LightClient;
use interchain_core_channel::context::ValidationContext;
use interchain_core_channel::types::acknowledgement::Acknowledgement;
use interchain_core_channel::types::channel::Order;
use interchain_core_channel::types::msgs::{MsgAcknowledgement, MsgRecvPacket, MsgTimeout};
use interchain_core_channel::types::packet::Packet;
use interchain_core_handler_types::error::ContextError;
use interchain_core_handler_types::events::IbcEvent;
use interchain_core_host_types::identifiers::ChannelId;
use interchain_core_host_types::path::{
    AckPath, ChannelEndPath, CommitmentPath, Path, ReceiptPath, SeqRecvPath,
};
use interchain_primitives::prelude::*;

use crate::context::TestContext;
use crate::fixtures::core::signer::dummy_relayer;
use crate::relayer::error::RelayerError;
use crate::testapp::ibc::clients::mock::{mock_proof, MockLightClient};

/// Packets sent on the chain, oldest first.
pub fn sent_packets(events: &[IbcEvent]) -> Vec<Packet> {
    events
        .iter()
        .filter_map(|event| match event {
            IbcEvent::SendPacket(e) => Some(e.packet().clone()),
            _ => None,
        })
        .collect()
}

/// The acknowledgement the chain wrote for `packet`, if any.
pub fn written_acknowledgement(events: &[IbcEvent], packet: &Packet) -> Option<Acknowledgement> {
    events.iter().rev().find_map(|event| match event {
        IbcEvent::WriteAcknowledgement(e) if e.packet() == packet => {
            Some(e.acknowledgement().clone())
        }
        _ => None,
    })
}

/// The light client `ctx` runs against the counterparty of `channel_id`.
pub fn client_of_channel(
    ctx: &TestContext,
    channel_id: &ChannelId,
) -> Result<MockLightClient, RelayerError> {
    let channel_end = ctx.ibc_store.channel_end(&ChannelEndPath::new(channel_id))?;
    let connection_id = channel_end
        .connection_id()
        .map_err(ContextError::from)?
        .clone();
    Ok(ctx.ibc_store.light_client(&connection_id)?)
}

/// Builds the message delivering `packet` to its destination `ctx_b`.
pub fn build_msg_recv_packet(
    ctx_b: &TestContext,
    packet: Packet,
) -> Result<MsgRecvPacket, RelayerError> {
    let client_on_b = client_of_channel(ctx_b, &packet.chan_id_on_b)?;
    let proof = mock_proof(&Path::from(CommitmentPath::new(
        &packet.chan_id_on_a,
        packet.seq_on_a,
    )))?;

    Ok(MsgRecvPacket {
        packet,
        proof_commitment_on_a: proof,
        proof_height_on_a: client_on_b.latest_height(),
        signer: dummy_relayer(),
    })
}

/// Builds the message returning `acknowledgement` to the source `ctx_a` of
/// `packet`.
pub fn build_msg_acknowledgement(
    ctx_a: &TestContext,
    packet: Packet,
    acknowledgement: Acknowledgement,
) -> Result<MsgAcknowledgement, RelayerError> {
    let client_on_a = client_of_channel(ctx_a, &packet.chan_id_on_a)?;
    let proof = mock_proof(&Path::from(AckPath::new(
        &packet.chan_id_on_b,
        packet.seq_on_a,
    )))?;

    Ok(MsgAcknowledgement {
        packet,
        acknowledgement,
        proof_acked_on_b: proof,
        proof_height_on_b: client_on_a.latest_height(),
        signer: dummy_relayer(),
    })
}

/// Builds the message timing `packet` out on its source `ctx_a`, proving
/// against the current state of the destination `ctx_b`.
pub fn build_msg_timeout(
    ctx_a: &TestContext,
    ctx_b: &TestContext,
    packet: Packet,
) -> Result<MsgTimeout, RelayerError> {
    let client_on_a = client_of_channel(ctx_a, &packet.chan_id_on_a)?;
    let ordering = ctx_a.channel_end(&packet.chan_id_on_a)?.ordering;

    let next_seq_recv_on_b = ctx_b
        .ibc_store
        .get_next_sequence_recv(&SeqRecvPath::new(&packet.chan_id_on_b))?;

    let path = match ordering {
        Order::Ordered => Path::from(SeqRecvPath::new(&packet.chan_id_on_b)),
        Order::Unordered => Path::from(ReceiptPath::new(&packet.chan_id_on_b, packet.seq_on_a)),
    };
    let proof = mock_proof(&path)?;

    Ok(MsgTimeout {
        packet,
        next_seq_recv_on_b,
        proof_unreceived_on_b: proof,
        proof_height_on_b: client_on_a.latest_height(),
        signer: dummy_relayer(),
    })
}
