use interchain_core_channel_types::channel::{Counterparty, Order};
use interchain_core_channel_types::commitment::compute_packet_commitment;
use interchain_core_channel_types::error::PacketError;
use interchain_core_channel_types::events::{ChannelClosed, TimeoutPacket};
use interchain_core_channel_types::msgs::MsgTimeout;
use interchain_core_handler_types::error::ContextError;
use interchain_core_handler_types::events::{IbcEvent, MessageEvent};
use interchain_core_host_types::path::{ChannelEndPath, Path, ReceiptPath, SeqRecvPath};
use interchain_core_router::module::Module;
use interchain_primitives::prelude::*;

use super::{emit_module_extras, open_channel_end};
use crate::client::LightClient;
use crate::context::{ExecutionContext, ValidationContext};
use crate::store;

pub fn timeout_packet_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    msg: &MsgTimeout,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_a, msg)?;

    module
        .on_timeout_packet_validate(&msg.packet, &msg.signer)
        .map_err(ContextError::PacketError)
}

/// Deletes the packet commitment and lets the application revert the send.
///
/// A timeout on an ordered channel also closes the channel, since no later
/// packet can be delivered in order.
pub fn timeout_packet_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgTimeout,
) -> Result<(), ContextError>
where
    ExecCtx: ExecutionContext,
{
    let packet = &msg.packet;
    let chan_end_path_on_a = ChannelEndPath::new(&packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    if store::get_commitment(ctx_a, &packet.chan_id_on_a, packet.seq_on_a)?.is_none() {
        return Err(PacketError::PacketAlreadyResolved {
            sequence: packet.seq_on_a,
        }
        .into());
    }

    store::delete_commitment(ctx_a, &packet.chan_id_on_a, packet.seq_on_a)?;

    let (extras, cb_result) = module.on_timeout_packet_execute(packet, &msg.signer);

    cb_result?;

    let conn_id_on_a = chan_end_on_a.connection_id()?.clone();

    if let Order::Ordered = chan_end_on_a.ordering {
        let mut closed_chan_end_on_a = chan_end_on_a.clone();
        closed_chan_end_on_a.close();
        ctx_a.store_channel(&chan_end_path_on_a, closed_chan_end_on_a)?;

        tracing::info!(
            channel_id = %packet.chan_id_on_a,
            "ordered channel closed after packet timeout"
        );
    }

    tracing::info!(
        sequence = %packet.seq_on_a,
        channel_id = %packet.chan_id_on_a,
        "packet timed out"
    );

    // emit events and logs
    {
        ctx_a.log_message("success: packet timeout".to_string())?;

        let event = IbcEvent::TimeoutPacket(TimeoutPacket::new(
            packet.clone(),
            chan_end_on_a.ordering,
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(event)?;

        if let Order::Ordered = chan_end_on_a.ordering {
            ctx_a.log_message("success: channel closed".to_string())?;

            let event = IbcEvent::ChannelClosed(ChannelClosed::new(
                packet.port_id_on_a.clone(),
                packet.chan_id_on_a.clone(),
                chan_end_on_a.remote.port_id.clone(),
                chan_end_on_a.remote.channel_id.clone(),
                conn_id_on_a,
                chan_end_on_a.ordering,
            ));
            ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
            ctx_a.emit_ibc_event(event)?;
        }

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(())
}

fn validate<Ctx>(ctx_a: &Ctx, msg: &MsgTimeout) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    let packet = &msg.packet;
    tracing::debug!(
        sequence = %packet.seq_on_a,
        channel_id = %packet.chan_id_on_a,
        "validating packet timeout"
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

    let client = ctx_a.light_client(chan_end_on_a.connection_id()?)?;
    client.validate_proof_height(&msg.proof_height_on_b)?;

    // The proof must come from a counterparty state in which the packet has
    // already expired.
    let timestamp_at_proof_height = client.consensus_timestamp(&msg.proof_height_on_b)?;
    if !packet.timed_out(&timestamp_at_proof_height, msg.proof_height_on_b) {
        return Err(PacketError::PacketTimeoutNotReached {
            timeout_height: packet.timeout_height_on_b,
            chain_height: msg.proof_height_on_b,
            timeout_timestamp: packet.timeout_timestamp_on_b,
            chain_timestamp: timestamp_at_proof_height,
        }
        .into());
    }

    match chan_end_on_a.ordering {
        Order::Ordered => {
            if packet.seq_on_a < msg.next_seq_recv_on_b {
                return Err(PacketError::PacketAlreadyReceived {
                    sequence: packet.seq_on_a,
                }
                .into());
            }
            let seq_recv_path_on_b = SeqRecvPath::new(&packet.chan_id_on_b);

            client.verify_membership(
                &msg.proof_height_on_b,
                &msg.proof_unreceived_on_b,
                &Path::SeqRecv(seq_recv_path_on_b),
                msg.next_seq_recv_on_b.to_vec(),
            )?;
        }
        Order::Unordered => {
            let receipt_path_on_b = ReceiptPath::new(&packet.chan_id_on_b, packet.seq_on_a);

            client.verify_non_membership(
                &msg.proof_height_on_b,
                &msg.proof_unreceived_on_b,
                &Path::Receipt(receipt_path_on_b),
            )?;
        }
    }

    Ok(())
}
