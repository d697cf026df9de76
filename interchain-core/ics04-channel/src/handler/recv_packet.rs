use interchain_core_channel_types::channel::{Counterparty, Order};
use interchain_core_channel_types::commitment::compute_packet_commitment;
use interchain_core_channel_types::error::PacketError;
use interchain_core_channel_types::events::{ReceivePacket, WriteAcknowledgement};
use interchain_core_channel_types::msgs::MsgRecvPacket;
use interchain_core_handler_types::error::ContextError;
use interchain_core_handler_types::events::{IbcEvent, MessageEvent};
use interchain_core_host_types::path::{ChannelEndPath, CommitmentPath, Path, SeqRecvPath};
use interchain_core_router::module::Module;
use interchain_primitives::prelude::*;

use super::{emit_module_extras, open_channel_end};
use crate::client::LightClient;
use crate::context::{ExecutionContext, ValidationContext};
use crate::store;

/// Validates a packet delivery.
///
/// Replays are rejected here: a receipt already present on an unordered
/// channel, or a sequence below `nextSequenceRecv` on an ordered one. The
/// application has nothing to validate since `on_recv_packet_execute` cannot
/// fail the delivery.
pub fn recv_packet_validate<ValCtx>(ctx_b: &ValCtx, msg: &MsgRecvPacket) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    msg.validate_basic()?;

    let packet = &msg.packet;
    tracing::debug!(
        sequence = %packet.seq_on_a,
        channel_id = %packet.chan_id_on_b,
        "validating packet receive"
    );

    let counterparty = Counterparty::new(
        packet.port_id_on_a.clone(),
        Some(packet.chan_id_on_a.clone()),
    );
    let chan_end_on_b = open_channel_end(
        ctx_b,
        &packet.port_id_on_b,
        &packet.chan_id_on_b,
        &counterparty,
    )?;

    let latest_height = ctx_b.host_height()?;
    if packet.timeout_height_on_b.has_expired(latest_height) {
        return Err(PacketError::ExpiredPacketHeight {
            timeout_height: packet.timeout_height_on_b,
            chain_height: latest_height,
        }
        .into());
    }

    let latest_timestamp = ctx_b.host_timestamp()?;
    if packet.timeout_timestamp_on_b.has_expired(&latest_timestamp) {
        return Err(PacketError::ExpiredPacketTimestamp {
            timeout_timestamp: packet.timeout_timestamp_on_b,
            chain_timestamp: latest_timestamp,
        }
        .into());
    }

    match chan_end_on_b.ordering {
        Order::Ordered => {
            let next_seq_recv =
                ctx_b.get_next_sequence_recv(&SeqRecvPath::new(&packet.chan_id_on_b))?;
            if packet.seq_on_a < next_seq_recv {
                tracing::warn!(sequence = %packet.seq_on_a, "packet already received");
                return Err(PacketError::PacketAlreadyReceived {
                    sequence: packet.seq_on_a,
                }
                .into());
            }
            if packet.seq_on_a > next_seq_recv {
                return Err(PacketError::MismatchedPacketSequence {
                    expected: next_seq_recv,
                    actual: packet.seq_on_a,
                }
                .into());
            }
        }
        Order::Unordered => {
            if store::has_receipt(ctx_b, &packet.chan_id_on_b, packet.seq_on_a)? {
                tracing::warn!(sequence = %packet.seq_on_a, "packet already received");
                return Err(PacketError::PacketAlreadyReceived {
                    sequence: packet.seq_on_a,
                }
                .into());
            }
        }
    }

    if store::has_acknowledgement(ctx_b, &packet.chan_id_on_b, packet.seq_on_a)? {
        return Err(PacketError::DuplicateAcknowledgement {
            sequence: packet.seq_on_a,
        }
        .into());
    }

    // Verify the proof of the packet commitment in the counterparty store.
    {
        let client = ctx_b.light_client(chan_end_on_b.connection_id()?)?;
        client.validate_proof_height(&msg.proof_height_on_a)?;

        let expected_commitment_on_a = compute_packet_commitment(
            &packet.data,
            &packet.timeout_height_on_b,
            &packet.timeout_timestamp_on_b,
        );
        let commitment_path_on_a = CommitmentPath::new(&packet.chan_id_on_a, packet.seq_on_a);

        client.verify_membership(
            &msg.proof_height_on_a,
            &msg.proof_commitment_on_a,
            &Path::Commitment(commitment_path_on_a),
            expected_commitment_on_a.into_vec(),
        )?;
    }

    Ok(())
}

/// Records the delivery, runs the application and writes its
/// acknowledgement.
pub fn recv_packet_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgRecvPacket,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let chan_end_on_b = ctx_b.channel_end(&ChannelEndPath::new(&msg.packet.chan_id_on_b))?;

    match chan_end_on_b.ordering {
        Order::Unordered => {
            store::set_receipt(ctx_b, &msg.packet.chan_id_on_b, msg.packet.seq_on_a)?;
        }
        Order::Ordered => {
            let seq_recv_path_on_b = SeqRecvPath::new(&msg.packet.chan_id_on_b);
            let next_seq_recv = ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?;
            if msg.packet.seq_on_a != next_seq_recv {
                return Err(PacketError::MismatchedPacketSequence {
                    expected: next_seq_recv,
                    actual: msg.packet.seq_on_a,
                }
                .into());
            }
            ctx_b.store_next_sequence_recv(&seq_recv_path_on_b, next_seq_recv.increment())?;
        }
    }

    let (extras, acknowledgement) = module.on_recv_packet_execute(&msg.packet, &msg.signer);

    store::set_acknowledgement(
        ctx_b,
        &msg.packet.chan_id_on_b,
        msg.packet.seq_on_a,
        &acknowledgement,
    )?;

    tracing::info!(
        sequence = %msg.packet.seq_on_a,
        channel_id = %msg.packet.chan_id_on_b,
        "packet received and acknowledgement written"
    );

    // emit events and logs
    {
        ctx_b.log_message("success: packet receive".to_string())?;
        ctx_b.log_message("success: packet write acknowledgement".to_string())?;

        let conn_id_on_b = chan_end_on_b.connection_id()?.clone();
        let event = IbcEvent::ReceivePacket(ReceivePacket::new(
            msg.packet.clone(),
            chan_end_on_b.ordering,
            conn_id_on_b.clone(),
        ));
        ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_b.emit_ibc_event(event)?;
        let event = IbcEvent::WriteAcknowledgement(WriteAcknowledgement::new(
            msg.packet,
            acknowledgement,
            conn_id_on_b,
        ));
        ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_b.emit_ibc_event(event)?;

        emit_module_extras(ctx_b, extras)?;
    }

    Ok(())
}
