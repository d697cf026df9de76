use interchain_core_channel_types::channel::Counterparty;
use interchain_core_channel_types::error::{ChannelError, PacketError};
use interchain_core_channel_types::events::SendPacket;
use interchain_core_channel_types::packet::Packet;
use interchain_core_handler_types::error::ContextError;
use interchain_core_handler_types::events::{IbcEvent, MessageEvent};
use interchain_core_host_types::path::{ChannelEndPath, SeqSendPath};
use interchain_primitives::prelude::*;

use super::open_channel_end;
use crate::client::LightClient;
use crate::context::{ExecutionContext, ValidationContext};
use crate::store;

/// Send the given packet, including all necessary validation.
///
/// Equivalent to calling [`send_packet_validate`], followed by [`send_packet_execute`]
pub fn send_packet<Ctx>(ctx_a: &mut Ctx, packet: Packet) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    send_packet_validate(ctx_a, &packet)?;
    send_packet_execute(ctx_a, packet)
}

/// Validate that sending the given packet would succeed.
///
/// The packet must carry the channel's next send sequence, and must not be
/// expired already from the point of view of the counterparty, as tracked by
/// the light client.
pub fn send_packet_validate<Ctx>(ctx_a: &Ctx, packet: &Packet) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    packet.validate_basic()?;

    let counterparty = Counterparty::new(
        packet.port_id_on_b.clone(),
        Some(packet.chan_id_on_b.clone()),
    );
    let chan_end_on_a = open_channel_end(
        ctx_a,
        &packet.port_id_on_a,
        &packet.chan_id_on_a,
        &counterparty,
    )
    .map_err(|e| match e {
        ContextError::ChannelError(ChannelError::MismatchedCounterparty { .. }) => {
            PacketError::MismatchedDestination {
                port_id: packet.port_id_on_b.clone(),
                channel_id: packet.chan_id_on_b.clone(),
            }
            .into()
        }
        e => e,
    })?;

    let conn_id_on_a = chan_end_on_a.connection_id()?;
    let client = ctx_a.light_client(conn_id_on_a)?;

    let latest_height_on_b = client.latest_height();
    if packet.timeout_height_on_b.has_expired(latest_height_on_b) {
        return Err(PacketError::ExpiredPacketHeight {
            timeout_height: packet.timeout_height_on_b,
            chain_height: latest_height_on_b,
        }
        .into());
    }

    let latest_timestamp_on_b = client.consensus_timestamp(&latest_height_on_b)?;
    if packet
        .timeout_timestamp_on_b
        .has_expired(&latest_timestamp_on_b)
    {
        return Err(PacketError::ExpiredPacketTimestamp {
            timeout_timestamp: packet.timeout_timestamp_on_b,
            chain_timestamp: latest_timestamp_on_b,
        }
        .into());
    }

    let next_seq_send_on_a = ctx_a.get_next_sequence_send(&SeqSendPath::new(&packet.chan_id_on_a))?;
    if packet.seq_on_a != next_seq_send_on_a {
        return Err(PacketError::MismatchedPacketSequence {
            expected: next_seq_send_on_a,
            actual: packet.seq_on_a,
        }
        .into());
    }

    if store::get_commitment(ctx_a, &packet.chan_id_on_a, packet.seq_on_a)?.is_some() {
        return Err(PacketError::DuplicateCommitment {
            sequence: packet.seq_on_a,
        }
        .into());
    }

    Ok(())
}

/// Commits the packet and advances the channel's send sequence.
///
/// Assumes [`send_packet_validate`] passed for `packet`.
pub fn send_packet_execute<Ctx>(ctx_a: &mut Ctx, packet: Packet) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let chan_end_on_a = ctx_a.channel_end(&ChannelEndPath::new(&packet.chan_id_on_a))?;

    {
        let seq_send_path_on_a = SeqSendPath::new(&packet.chan_id_on_a);
        let next_seq_send_on_a = ctx_a.get_next_sequence_send(&seq_send_path_on_a)?;

        ctx_a.store_next_sequence_send(&seq_send_path_on_a, next_seq_send_on_a.increment())?;
        store::set_commitment(ctx_a, &packet)?;
    }

    tracing::info!(
        sequence = %packet.seq_on_a,
        channel_id = %packet.chan_id_on_a,
        "packet committed"
    );

    {
        ctx_a.log_message("success: packet send".to_string())?;
        let conn_id_on_a = chan_end_on_a.connection_id()?.clone();
        let event = IbcEvent::SendPacket(SendPacket::new(
            packet,
            chan_end_on_a.ordering,
            conn_id_on_a,
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(event)?;
    }

    Ok(())
}
