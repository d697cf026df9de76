//! The authorization gate: grants let a grantee move a granter's tokens
//! through a given channel, within a spend limit and to allowed receivers.

use interchain_app_transfer_types::authz::TransferAuthorization;
use interchain_app_transfer_types::error::TokenTransferError;
use interchain_app_transfer_types::events::{GrantEvent, RevokeEvent};
use interchain_app_transfer_types::msgs::{MsgExec, MsgGrant, MsgRevoke};
use interchain_core_channel::context::{ExecutionContext, ValidationContext};
use interchain_core_router::types::event::ModuleEvent;
use interchain_primitives::prelude::*;

use crate::context::{
    TokenTransferExecutionContext, TokenTransferValidationContext, TransferAuthzExecutionContext,
    TransferAuthzValidationContext,
};
use crate::handler::{send_transfer_execute, send_transfer_validate};

/// Installs the authorization of `msg`, replacing any previous grant of the
/// same pair together with what was left of its spend limits.
pub fn grant<Ctx, AuthzCtx>(
    ctx: &mut Ctx,
    authz_ctx: &mut AuthzCtx,
    msg: MsgGrant,
) -> Result<(), TokenTransferError>
where
    Ctx: ExecutionContext,
    AuthzCtx: TransferAuthzExecutionContext,
{
    msg.validate_basic()?;

    let allocations = msg.authorization.allocations.len();
    authz_ctx.store_authorization(msg.granter.clone(), msg.grantee.clone(), msg.authorization)?;

    tracing::info!(granter = %msg.granter, grantee = %msg.grantee, allocations, "transfer authorization granted");

    let event = GrantEvent {
        granter: msg.granter,
        grantee: msg.grantee,
        allocations,
    };
    ctx.emit_ibc_event(ModuleEvent::from(event).into())?;

    Ok(())
}

pub fn revoke<Ctx, AuthzCtx>(
    ctx: &mut Ctx,
    authz_ctx: &mut AuthzCtx,
    msg: MsgRevoke,
) -> Result<(), TokenTransferError>
where
    Ctx: ExecutionContext,
    AuthzCtx: TransferAuthzExecutionContext,
{
    msg.validate_basic()?;

    if authz_ctx
        .get_authorization(&msg.granter, &msg.grantee)?
        .is_none()
    {
        return Err(TokenTransferError::NoAuthorizationFound {
            granter: msg.granter.to_string(),
            grantee: msg.grantee.to_string(),
        });
    }

    authz_ctx.delete_authorization(&msg.granter, &msg.grantee)?;

    tracing::info!(granter = %msg.granter, grantee = %msg.grantee, "transfer authorization revoked");

    let event = RevokeEvent {
        granter: msg.granter,
        grantee: msg.grantee,
    };
    ctx.emit_ibc_event(ModuleEvent::from(event).into())?;

    Ok(())
}

/// Runs the transfer of `msg` on behalf of its granter. Equivalent to calling
/// [`exec_transfer_validate`], followed by [`exec_transfer_execute`].
pub fn exec_transfer<SendPacketCtx, Ctx>(
    send_packet_ctx_a: &mut SendPacketCtx,
    ctx: &mut Ctx,
    msg: MsgExec,
) -> Result<(), TokenTransferError>
where
    SendPacketCtx: ExecutionContext,
    Ctx: TokenTransferExecutionContext + TransferAuthzExecutionContext,
{
    exec_transfer_validate(send_packet_ctx_a, ctx, &msg)?;
    exec_transfer_execute(send_packet_ctx_a, ctx, msg)
}

/// Checks the grant covers the transfer, then validates the transfer itself.
pub fn exec_transfer_validate<SendPacketCtx, Ctx>(
    send_packet_ctx_a: &SendPacketCtx,
    ctx: &Ctx,
    msg: &MsgExec,
) -> Result<(), TokenTransferError>
where
    SendPacketCtx: ValidationContext,
    Ctx: TokenTransferValidationContext + TransferAuthzValidationContext,
{
    msg.validate_basic()?;

    let authorization = spent_authorization(ctx, msg)?;
    tracing::debug!(
        granter = %msg.granter(),
        grantee = %msg.grantee,
        allocations = authorization.allocations.len(),
        "transfer covered by authorization"
    );

    send_transfer_validate(send_packet_ctx_a, ctx, &msg.msg)
}

/// Deducts the transfer from the spend limit and runs it. A prior call to
/// [`exec_transfer_validate`] MUST have succeeded.
pub fn exec_transfer_execute<SendPacketCtx, Ctx>(
    send_packet_ctx_a: &mut SendPacketCtx,
    ctx: &mut Ctx,
    msg: MsgExec,
) -> Result<(), TokenTransferError>
where
    SendPacketCtx: ExecutionContext,
    Ctx: TokenTransferExecutionContext + TransferAuthzExecutionContext,
{
    let authorization = spent_authorization(ctx, &msg)?;
    ctx.store_authorization(msg.granter().clone(), msg.grantee.clone(), authorization)?;

    send_transfer_execute(send_packet_ctx_a, ctx, msg.msg)
}

/// Returns the authorization of the pair with the transfer of `msg` already
/// deducted from the matching allocation.
fn spent_authorization<Ctx>(
    ctx: &Ctx,
    msg: &MsgExec,
) -> Result<TransferAuthorization, TokenTransferError>
where
    Ctx: TransferAuthzValidationContext,
{
    let granter = msg.granter();
    let transfer = &msg.msg;
    let not_found = || TokenTransferError::NoAuthorizationFound {
        granter: granter.to_string(),
        grantee: msg.grantee.to_string(),
    };

    let mut authorization = ctx
        .get_authorization(granter, &msg.grantee)?
        .ok_or_else(not_found)?;

    let allocation = authorization
        .allocation_mut(&transfer.port_id_on_a, &transfer.chan_id_on_a)
        .ok_or_else(not_found)?;

    let receiver = transfer.packet_data.receiver.as_str();
    if !allocation.is_receiver_allowed(receiver) {
        return Err(TokenTransferError::InvalidAddress {
            receiver: receiver.to_string(),
        });
    }

    let token = &transfer.packet_data.token;
    allocation.spend(&token.denom.to_string(), token.amount)?;

    Ok(authorization)
}
