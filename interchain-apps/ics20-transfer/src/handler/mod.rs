//! Implements the processing logic of token transfer messages.
mod on_recv_packet;
mod send_transfer;

pub use on_recv_packet::*;
pub use send_transfer::*;

use interchain_app_transfer_types::error::TokenTransferError;
use interchain_app_transfer_types::is_sender_chain_source;
use interchain_app_transfer_types::packet::PacketData;
use interchain_core_channel::types::packet::Packet;

use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};
use crate::escrow::{unescrow_token_execute, unescrow_token_validate};

/// Returns the tokens of a failed or timed out transfer to its sender:
/// escrowed tokens are released, burned vouchers are minted back.
pub fn refund_packet_token_execute(
    ctx_a: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
    data: &PacketData,
) -> Result<(), TokenTransferError> {
    let sender = data
        .sender
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    if is_sender_chain_source(
        packet.port_id_on_a.clone(),
        packet.chan_id_on_a.clone(),
        &data.token.denom,
    ) {
        unescrow_token_execute(
            ctx_a,
            &sender,
            &packet.port_id_on_a,
            &packet.chan_id_on_a,
            &data.token,
        )
    }
    // mint vouchers back to sender
    else {
        ctx_a.mint_coins_execute(&sender, &data.token)
    }
}

pub fn refund_packet_token_validate(
    ctx_a: &impl TokenTransferValidationContext,
    packet: &Packet,
    data: &PacketData,
) -> Result<(), TokenTransferError> {
    let sender = data
        .sender
        .clone()
        .try_into()
        .map_err(|_| TokenTransferError::ParseAccountFailure)?;

    if is_sender_chain_source(
        packet.port_id_on_a.clone(),
        packet.chan_id_on_a.clone(),
        &data.token.denom,
    ) {
        unescrow_token_validate(
            ctx_a,
            &sender,
            &packet.port_id_on_a,
            &packet.chan_id_on_a,
            &data.token,
        )
    } else {
        ctx_a.mint_coins_validate(&sender, &data.token)
    }
}
