use interchain_app_transfer_types::error::TokenTransferError;
use interchain_app_transfer_types::events::TransferEvent;
use interchain_app_transfer_types::msgs::MsgTransfer;
use interchain_app_transfer_types::packet::PacketData;
use interchain_app_transfer_types::{is_sender_chain_source, PrefixedCoin, MODULE_ID_STR};
use interchain_core_channel::context::{ExecutionContext, ValidationContext};
use interchain_core_channel::handler::{send_packet_execute, send_packet_validate};
use interchain_core_channel::types::packet::Packet;
use interchain_core_handler_types::error::ContextError;
use interchain_core_handler_types::events::{IbcEvent, MessageEvent};
use interchain_core_host_types::path::{ChannelEndPath, SeqSendPath};
use interchain_core_router::types::event::ModuleEvent;
use interchain_primitives::prelude::*;

use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};
use crate::escrow::{escrow_token_execute, escrow_token_validate};

/// Initiate a token transfer. Equivalent to calling [`send_transfer_validate`], followed by [`send_transfer_execute`].
pub fn send_transfer<SendPacketCtx, TokenCtx>(
    send_packet_ctx_a: &mut SendPacketCtx,
    token_ctx_a: &mut TokenCtx,
    msg: MsgTransfer,
) -> Result<(), TokenTransferError>
where
    SendPacketCtx: ExecutionContext,
    TokenCtx: TokenTransferExecutionContext,
{
    send_transfer_validate(send_packet_ctx_a, token_ctx_a, &msg)?;
    send_transfer_execute(send_packet_ctx_a, token_ctx_a, msg)
}

/// Validates the token transfer. If this succeeds, then it is legal to initiate the transfer with [`send_transfer_execute`].
pub fn send_transfer_validate<SendPacketCtx, TokenCtx>(
    send_packet_ctx_a: &SendPacketCtx,
    token_ctx_a: &TokenCtx,
    msg: &MsgTransfer,
) -> Result<(), TokenTransferError>
where
    SendPacketCtx: ValidationContext,
    TokenCtx: TokenTransferValidationContext,
{
    msg.validate_basic()?;
    token_ctx_a.can_send_coins()?;

    let token = resolve_token(token_ctx_a, &msg.packet_data.token)?;

    let sender: TokenCtx::AccountId = msg
        .packet_data
        .sender
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    if is_sender_chain_source(
        msg.port_id_on_a.clone(),
        msg.chan_id_on_a.clone(),
        &token.denom,
    ) {
        escrow_token_validate(
            token_ctx_a,
            &sender,
            &msg.port_id_on_a,
            &msg.chan_id_on_a,
            &token,
            &msg.packet_data.memo,
        )?;
    } else {
        token_ctx_a.burn_coins_validate(&sender, &token, &msg.packet_data.memo)?;
    }

    let packet = build_packet(send_packet_ctx_a, msg, token)?;

    send_packet_validate(send_packet_ctx_a, &packet)?;

    Ok(())
}

/// Executes the token transfer. A prior call to [`send_transfer_validate`] MUST have succeeded.
pub fn send_transfer_execute<SendPacketCtx, TokenCtx>(
    send_packet_ctx_a: &mut SendPacketCtx,
    token_ctx_a: &mut TokenCtx,
    msg: MsgTransfer,
) -> Result<(), TokenTransferError>
where
    SendPacketCtx: ExecutionContext,
    TokenCtx: TokenTransferExecutionContext,
{
    let token = resolve_token(token_ctx_a, &msg.packet_data.token)?;

    let sender = msg
        .packet_data
        .sender
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    if is_sender_chain_source(
        msg.port_id_on_a.clone(),
        msg.chan_id_on_a.clone(),
        &token.denom,
    ) {
        escrow_token_execute(
            token_ctx_a,
            &sender,
            &msg.port_id_on_a,
            &msg.chan_id_on_a,
            &token,
            &msg.packet_data.memo,
        )?;
    } else {
        token_ctx_a.burn_coins_execute(&sender, &token, &msg.packet_data.memo)?;
    }

    let packet = build_packet(send_packet_ctx_a, &msg, token.clone())?;

    send_packet_execute(send_packet_ctx_a, packet)?;

    {
        send_packet_ctx_a.log_message(format!(
            "fungible token transfer: {} --({})--> {}",
            msg.packet_data.sender, token, msg.packet_data.receiver
        ))?;

        let transfer_event = TransferEvent {
            sender: msg.packet_data.sender,
            receiver: msg.packet_data.receiver,
            amount: token.amount,
            denom: token.denom,
            memo: msg.packet_data.memo,
        };
        send_packet_ctx_a.emit_ibc_event(ModuleEvent::from(transfer_event).into())?;

        send_packet_ctx_a
            .emit_ibc_event(IbcEvent::Message(MessageEvent::Module(MODULE_ID_STR.to_string())))?;
    }

    Ok(())
}

/// Replaces a voucher written as `ibc/{HASH}` by its full denomination trace.
fn resolve_token<TokenCtx>(
    token_ctx: &TokenCtx,
    token: &PrefixedCoin,
) -> Result<PrefixedCoin, TokenTransferError>
where
    TokenCtx: TokenTransferValidationContext,
{
    let Some(hash) = token.denom.voucher_hash() else {
        return Ok(token.clone());
    };

    let denom = token_ctx
        .get_denom_trace(hash)?
        .ok_or_else(|| TokenTransferError::MissingDenomTrace {
            hash: hash.to_string(),
        })?;

    Ok(PrefixedCoin::new(denom, token.amount))
}

/// Builds the packet carrying `token` to the counterparty of the source
/// channel, at the channel's next send sequence.
fn build_packet<SendPacketCtx>(
    send_packet_ctx_a: &SendPacketCtx,
    msg: &MsgTransfer,
    token: PrefixedCoin,
) -> Result<Packet, TokenTransferError>
where
    SendPacketCtx: ValidationContext,
{
    let chan_end_on_a = send_packet_ctx_a.channel_end(&ChannelEndPath::new(&msg.chan_id_on_a))?;
    chan_end_on_a
        .verify_port_matches(&msg.chan_id_on_a, &msg.port_id_on_a)
        .map_err(ContextError::from)?;

    let port_id_on_b = chan_end_on_a.remote.port_id.clone();
    let chan_id_on_b = chan_end_on_a.remote.channel_id.clone().ok_or_else(|| {
        TokenTransferError::DestinationChannelNotFound {
            port_id: msg.port_id_on_a.clone(),
            channel_id: msg.chan_id_on_a.clone(),
        }
    })?;

    let seq_on_a = send_packet_ctx_a.get_next_sequence_send(&SeqSendPath::new(&msg.chan_id_on_a))?;

    let data = PacketData {
        token,
        sender: msg.packet_data.sender.clone(),
        receiver: msg.packet_data.receiver.clone(),
        memo: msg.packet_data.memo.clone(),
    }
    .to_json_bytes()?;

    Ok(Packet {
        seq_on_a,
        port_id_on_a: msg.port_id_on_a.clone(),
        chan_id_on_a: msg.chan_id_on_a.clone(),
        port_id_on_b,
        chan_id_on_b,
        data,
        timeout_height_on_b: msg.timeout_height_on_b,
        timeout_timestamp_on_b: msg.timeout_timestamp_on_b,
    })
}
