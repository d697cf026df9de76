//! Defines the main context traits of the transfer application

use interchain_app_transfer_types::authz::TransferAuthorization;
use interchain_app_transfer_types::error::TokenTransferError;
use interchain_app_transfer_types::{Amount, Memo, PrefixedCoin, PrefixedDenom};
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_primitives::prelude::*;
use interchain_primitives::Signer;

/// Methods required in token transfer validation, to be implemented by the host
///
/// Bank methods receive coins with their full denomination trace. The host
/// keeps balances under [`PrefixedDenom::ibc_denom`].
pub trait TokenTransferValidationContext {
    type AccountId: TryFrom<Signer>;

    /// get_port returns the portID for the transfer module.
    fn get_port(&self) -> Result<PortId, TokenTransferError>;

    /// Returns Ok() if the host chain supports sending coins.
    fn can_send_coins(&self) -> Result<(), TokenTransferError>;

    /// Returns Ok() if the host chain supports receiving coins.
    fn can_receive_coins(&self) -> Result<(), TokenTransferError>;

    /// Validates that the tokens can be escrowed successfully, covering both
    /// the debit of the sender and the credit of the escrow account.
    fn escrow_coins_validate(
        &self,
        from_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &PrefixedCoin,
        memo: &Memo,
    ) -> Result<(), TokenTransferError>;

    /// Validates that the tokens can be unescrowed successfully. A receive
    /// runs this before any write, so it must also reject a credit the
    /// receiver cannot hold.
    fn unescrow_coins_validate(
        &self,
        to_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError>;

    /// Validates the receiver account and the coin input
    fn mint_coins_validate(
        &self,
        account: &Self::AccountId,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError>;

    /// Validates the sender account and the coin input
    fn burn_coins_validate(
        &self,
        account: &Self::AccountId,
        coin: &PrefixedCoin,
        memo: &Memo,
    ) -> Result<(), TokenTransferError>;

    /// Total amount of `denom` currently held in escrow across all channels.
    /// Zero when nothing was ever escrowed.
    fn get_total_escrow(&self, denom: &str) -> Result<Amount, TokenTransferError>;

    /// Resolves a voucher hash back to its full denomination trace.
    fn get_denom_trace(&self, hash: &str) -> Result<Option<PrefixedDenom>, TokenTransferError>;
}

/// Methods required in token transfer execution, to be implemented by the host
pub trait TokenTransferExecutionContext: TokenTransferValidationContext {
    /// Escrows the tokens
    fn escrow_coins_execute(
        &mut self,
        from_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &PrefixedCoin,
        memo: &Memo,
    ) -> Result<(), TokenTransferError>;

    /// Unescrows the tokens
    fn unescrow_coins_execute(
        &mut self,
        to_account: &Self::AccountId,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError>;

    /// Mints vouchers into a user account
    fn mint_coins_execute(
        &mut self,
        account: &Self::AccountId,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError>;

    /// Burns vouchers from a user account
    fn burn_coins_execute(
        &mut self,
        account: &Self::AccountId,
        coin: &PrefixedCoin,
        memo: &Memo,
    ) -> Result<(), TokenTransferError>;

    fn store_total_escrow(&mut self, denom: &str, amount: Amount)
        -> Result<(), TokenTransferError>;

    fn store_denom_trace(
        &mut self,
        hash: String,
        denom: PrefixedDenom,
    ) -> Result<(), TokenTransferError>;
}

/// Read access to transfer authorizations, keyed by `(granter, grantee)`.
pub trait TransferAuthzValidationContext {
    fn get_authorization(
        &self,
        granter: &Signer,
        grantee: &Signer,
    ) -> Result<Option<TransferAuthorization>, TokenTransferError>;
}

pub trait TransferAuthzExecutionContext: TransferAuthzValidationContext {
    /// Installs `authorization`, replacing any previous one for the pair.
    fn store_authorization(
        &mut self,
        granter: Signer,
        grantee: Signer,
        authorization: TransferAuthorization,
    ) -> Result<(), TokenTransferError>;

    fn delete_authorization(
        &mut self,
        granter: &Signer,
        grantee: &Signer,
    ) -> Result<(), TokenTransferError>;
}
