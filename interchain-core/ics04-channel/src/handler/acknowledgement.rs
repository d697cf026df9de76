use interchain_core_channel_types::channel::{Counterparty, Order};
use interchain_core_channel_types::commitment::{compute_ack_commitment, compute_packet_commitment};
use interchain_core_channel_types::error::PacketError;
use interchain_core_channel_types::events::AcknowledgePacket;
use interchain_core_channel_types::msgs::MsgAcknowledgement;
use interchain_core_handler_types::error::ContextError;
use interchain_core_handler_types::events::{IbcEvent, MessageEvent};
use interchain_core_host_types::path::{AckPath, ChannelEndPath, Path, SeqAckPath};
use interchain_core_router::module::Module;
use interchain_primitives::prelude::*;

use super::{emit_module_extras, open_channel_end};
use crate::client::LightClient;
use crate::context::{ExecutionContext, ValidationContext};
use crate::store;

pub fn acknowledgement_packet_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    msg: &MsgAcknowledgement,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_a, msg)?;

    module
        .on_acknowledgement_packet_validate(&msg.packet, &msg.acknowledgement, &msg.signer)
        .map_err(ContextError::PacketError)
}

/// Deletes the packet commitment and hands the acknowledgement to the
/// application.
pub fn acknowledgement_packet_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgAcknowledgement,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let packet = &msg.packet;
    let chan_end_on_a = ctx_a.channel_end(&ChannelEndPath::new(&packet.chan_id_on_a))?;

    if store::get_commitment(ctx_a, &packet.chan_id_on_a, packet.seq_on_a)?.is_none() {
        return Err(PacketError::PacketAlreadyResolved {
            sequence: packet.seq_on_a,
        }
        .into());
    }

    // state changes
    {
        store::delete_commitment(ctx_a, &packet.chan_id_on_a, packet.seq_on_a)?;

        if let Order::Ordered = chan_end_on_a.ordering {
            let seq_ack_path_on_a = SeqAckPath::new(&packet.chan_id_on_a);
            let next_seq_ack = ctx_a.get_next_sequence_ack(&seq_ack_path_on_a)?;
            ctx_a.store_next_sequence_ack(&seq_ack_path_on_a, next_seq_ack.increment())?;
        }
    }

    let (extras, cb_result) =
        module.on_acknowledgement_packet_execute(packet, &msg.acknowledgement, &msg.signer);

    cb_result?;

    tracing::info!(
        sequence = %packet.seq_on_a,
        channel_id = %packet.chan_id_on_a,
        "packet acknowledged"
    );

    // emit events and logs
    {
        ctx_a.log_message("success: packet acknowledgement".to_string())?;

        let conn_id_on_a = chan_end_on_a.connection_id()?.clone();
        let event = IbcEvent::AcknowledgePacket(AcknowledgePacket::new(
            packet.clone(),
            chan_end_on_a.ordering,
            conn_id_on_a,
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(event)?;

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgAcknowledgement) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    let packet = &msg.packet;
    tracing::debug!(
        sequence = %packet.seq_on_a,
        channel_id = %packet.chan_id_on_a,
        "validating packet acknowledgement"
    );

    let counterparty = Counterparty::new(
        packet.port_id_on_b.clone(),
        Some(packet.chan_id_on_b.clone()),
    );
    let chan_end_on_a = open_channel_end(
        ctx_a,
        &packet.port_id_on_a,
        &packet.chan_id_on_a,
        &counterparty,
    )?;

    // A missing commitment means the packet was already acknowledged or
    // timed out.
    let Some(commitment_on_a) = store::get_commitment(ctx_a, &packet.chan_id_on_a, packet.seq_on_a)?
    else {
        tracing::warn!(sequence = %packet.seq_on_a, "packet already resolved");
        return Err(PacketError::PacketAlreadyResolved {
            sequence: packet.seq_on_a,
        }
        .into());
    };

    let expected_commitment_on_a = compute_packet_commitment(
        &packet.data,
        &packet.timeout_height_on_b,
        &packet.timeout_timestamp_on_b,
    );
    if commitment_on_a != expected_commitment_on_a {
        return Err(PacketError::MismatchedPacketCommitment {
            sequence: packet.seq_on_a,
            expected: expected_commitment_on_a,
            actual: commitment_on_a,
        }
        .into());
    }

    if let Order::Ordered = chan_end_on_a.ordering {
        let next_seq_ack = ctx_a.get_next_sequence_ack(&SeqAckPath::new(&packet.chan_id_on_a))?;
        if packet.seq_on_a != next_seq_ack {
            return Err(PacketError::MismatchedPacketSequence {
                expected: next_seq_ack,
                actual: packet.seq_on_a,
            }
            .into());
        }
    }

    // Verify the proof of the acknowledgement in the counterparty store.
    {
        let client = ctx_a.light_client(chan_end_on_a.connection_id()?)?;
        client.validate_proof_height(&msg.proof_height_on_b)?;

        let ack_commitment = compute_ack_commitment(&msg.acknowledgement);
        let ack_path_on_b = AckPath::new(&packet.chan_id_on_b, packet.seq_on_a);

        client.verify_membership(
            &msg.proof_height_on_b,
            &msg.proof_acked_on_b,
            &Path::Ack(ack_path_on_b),
            ack_commitment.into_vec(),
        )?;
    }

    Ok(())
}
