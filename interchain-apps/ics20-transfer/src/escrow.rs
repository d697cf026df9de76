//! Escrow moves that keep the total-escrow counter in step with the bank.
//!
//! Every escrow adds the amount to the counter of the coin's local
//! denomination and every release subtracts it, in the same transaction as
//! the bank move. A release larger than the counter means the counter and
//! the escrow accounts diverged.

use interchain_app_transfer_types::error::TokenTransferError;
use interchain_app_transfer_types::{Amount, Memo, PrefixedCoin, VERSION};
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_primitives::prelude::*;
use sha2::{Digest, Sha256};
use subtle_encoding::hex;

use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};

/// Number of hash bytes kept in an escrow address.
const ESCROW_ADDRESS_LEN: usize = 20;

/// Deterministic address of the escrow account of `port_id/channel_id`.
///
/// First 20 bytes of `sha256("ics20-1" ‖ 0x00 ‖ "{port}/{channel}")`, hex encoded.
pub fn escrow_address(port_id: &PortId, channel_id: &ChannelId) -> String {
    let mut hasher = Sha256::new();
    hasher.update(VERSION.as_bytes());
    hasher.update([0u8]);
    hasher.update(format!("{port_id}/{channel_id}").as_bytes());
    let digest = hasher.finalize();

    String::from_utf8_lossy(&hex::encode(&digest[..ESCROW_ADDRESS_LEN])).into_owned()
}

pub fn escrow_token_validate<Ctx>(
    ctx: &Ctx,
    from_account: &Ctx::AccountId,
    port_id: &PortId,
    channel_id: &ChannelId,
    coin: &PrefixedCoin,
    memo: &Memo,
) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    increased_total(ctx, coin)?;
    ctx.escrow_coins_validate(from_account, port_id, channel_id, coin, memo)
}

pub fn escrow_token_execute<Ctx>(
    ctx: &mut Ctx,
    from_account: &Ctx::AccountId,
    port_id: &PortId,
    channel_id: &ChannelId,
    coin: &PrefixedCoin,
    memo: &Memo,
) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferExecutionContext,
{
    let total = increased_total(ctx, coin)?;
    ctx.escrow_coins_execute(from_account, port_id, channel_id, coin, memo)?;
    ctx.store_total_escrow(&coin.denom.ibc_denom(), total)?;

    tracing::debug!(denom = %coin.denom, amount = %coin.amount, total = %total, "escrowed tokens");

    Ok(())
}

pub fn unescrow_token_validate<Ctx>(
    ctx: &Ctx,
    to_account: &Ctx::AccountId,
    port_id: &PortId,
    channel_id: &ChannelId,
    coin: &PrefixedCoin,
) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    decreased_total(ctx, coin)?;
    ctx.unescrow_coins_validate(to_account, port_id, channel_id, coin)
}

pub fn unescrow_token_execute<Ctx>(
    ctx: &mut Ctx,
    to_account: &Ctx::AccountId,
    port_id: &PortId,
    channel_id: &ChannelId,
    coin: &PrefixedCoin,
) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferExecutionContext,
{
    let total = decreased_total(ctx, coin)?;
    ctx.unescrow_coins_execute(to_account, port_id, channel_id, coin)?;
    ctx.store_total_escrow(&coin.denom.ibc_denom(), total)?;

    tracing::debug!(denom = %coin.denom, amount = %coin.amount, total = %total, "released escrowed tokens");

    Ok(())
}

fn increased_total<Ctx>(ctx: &Ctx, coin: &PrefixedCoin) -> Result<Amount, TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    let denom = coin.denom.ibc_denom();
    ctx.get_total_escrow(&denom)?
        .checked_add(coin.amount)
        .ok_or(TokenTransferError::AmountOverflow { denom })
}

fn decreased_total<Ctx>(ctx: &Ctx, coin: &PrefixedCoin) -> Result<Amount, TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    let denom = coin.denom.ibc_denom();
    let escrowed = ctx.get_total_escrow(&denom)?;
    escrowed.checked_sub(coin.amount).ok_or_else(|| {
        tracing::error!(%denom, %escrowed, requested = %coin.amount, "escrow counter underflow");
        TokenTransferError::EscrowInvariantViolation {
            denom,
            escrowed: escrowed.to_string(),
            requested: coin.amount.to_string(),
        }
    })
}
