use interchain_app_transfer_types::error::TokenTransferError;
use interchain_app_transfer_types::events::DenomTraceEvent;
use interchain_app_transfer_types::packet::PacketData;
use interchain_app_transfer_types::{is_receiver_chain_source, TracePrefix};
use interchain_core_channel::types::packet::Packet;
use interchain_core_router::types::module::ModuleExtras;
use interchain_primitives::prelude::*;

use crate::context::TokenTransferExecutionContext;
use crate::escrow::{unescrow_token_execute, unescrow_token_validate};

/// Credits the receiver of an incoming transfer.
///
/// A token coming home is released from the escrow of the receiving channel;
/// any other token is minted as a voucher carrying the receiving end's trace
/// prefix. Validation and execution both run here since a failed receive
/// still completes, with an error acknowledgement.
pub fn process_recv_packet_execute<Ctx: TokenTransferExecutionContext>(
    ctx_b: &mut Ctx,
    packet: &Packet,
    data: PacketData,
) -> Result<ModuleExtras, (ModuleExtras, TokenTransferError)> {
    ctx_b
        .can_receive_coins()
        .map_err(|err| (ModuleExtras::empty(), err))?;

    let receiver_account = data.receiver.clone().try_into().map_err(|_| {
        (
            ModuleExtras::empty(),
            TokenTransferError::ParseAccountFailure,
        )
    })?;

    let extras = if is_receiver_chain_source(
        packet.port_id_on_a.clone(),
        packet.chan_id_on_a.clone(),
        &data.token.denom,
    ) {
        // sender chain is not the source, unescrow tokens
        let prefix = TracePrefix::new(packet.port_id_on_a.clone(), packet.chan_id_on_a.clone());
        let coin = {
            let mut c = data.token;
            c.denom.remove_trace_prefix(&prefix);
            c
        };

        unescrow_token_validate(
            ctx_b,
            &receiver_account,
            &packet.port_id_on_b,
            &packet.chan_id_on_b,
            &coin,
        )
        .map_err(|token_err| (ModuleExtras::empty(), token_err))?;
        unescrow_token_execute(
            ctx_b,
            &receiver_account,
            &packet.port_id_on_b,
            &packet.chan_id_on_b,
            &coin,
        )
        .map_err(|token_err| (ModuleExtras::empty(), token_err))?;

        ModuleExtras::empty()
    } else {
        // sender chain is the source, mint vouchers
        let prefix = TracePrefix::new(packet.port_id_on_b.clone(), packet.chan_id_on_b.clone());
        let coin = {
            let mut c = data.token;
            c.denom.add_trace_prefix(prefix);
            c
        };

        let trace_hash = coin.denom.trace_hash();
        let extras = {
            let denom_trace_event = DenomTraceEvent {
                trace_hash: trace_hash.clone(),
                denom: coin.denom.clone(),
            };
            ModuleExtras {
                events: vec![denom_trace_event.into()],
                log: Vec::new(),
            }
        };

        ctx_b
            .mint_coins_validate(&receiver_account, &coin)
            .map_err(|token_err| (ModuleExtras::empty(), token_err))?;

        ctx_b
            .mint_coins_execute(&receiver_account, &coin)
            .map_err(|token_err| (ModuleExtras::empty(), token_err))?;

        if let Some(hash) = trace_hash {
            ctx_b
                .store_denom_trace(hash, coin.denom)
                .map_err(|token_err| (ModuleExtras::empty(), token_err))?;
        }

        extras
    };

    Ok(extras)
}
