//! Queries over the state of the transfer application.

use interchain_app_transfer::context::TokenTransferValidationContext;
use interchain_app_transfer::types::{Amount, PrefixedDenom, VOUCHER_DENOM_PREFIX};
use interchain_primitives::prelude::*;

use crate::error::QueryError;

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct QueryTotalEscrowRequest {
    /// The local denomination: a base denomination or `ibc/{HASH}`.
    pub denom: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryTotalEscrowResponse {
    pub amount: Amount,
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct QueryDenomTraceRequest {
    /// The hash part of a voucher denomination, with or without the `ibc/` prefix.
    pub hash: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDenomTraceResponse {
    pub denom: PrefixedDenom,
}

/// Queries the total amount of a denomination held in escrow across every
/// channel. A denomination that was never escrowed reports zero.
pub fn query_total_escrow<Ctx>(
    ctx: &Ctx,
    request: &QueryTotalEscrowRequest,
) -> Result<QueryTotalEscrowResponse, QueryError>
where
    Ctx: TokenTransferValidationContext,
{
    if request.denom.trim().is_empty() {
        return Err(QueryError::invalid_argument("denomination cannot be empty"));
    }

    Ok(QueryTotalEscrowResponse {
        amount: ctx.get_total_escrow(&request.denom)?,
    })
}

/// Resolves a voucher hash back to its full denomination trace.
pub fn query_denom_trace<Ctx>(
    ctx: &Ctx,
    request: &QueryDenomTraceRequest,
) -> Result<QueryDenomTraceResponse, QueryError>
where
    Ctx: TokenTransferValidationContext,
{
    let hash = request
        .hash
        .strip_prefix(VOUCHER_DENOM_PREFIX)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(&request.hash);
    if hash.is_empty() {
        return Err(QueryError::invalid_argument("denomination hash cannot be empty"));
    }

    let denom = ctx
        .get_denom_trace(hash)?
        .ok_or_else(|| QueryError::not_found(format!("denomination trace for hash {hash}")))?;

    Ok(QueryDenomTraceResponse { denom })
}
