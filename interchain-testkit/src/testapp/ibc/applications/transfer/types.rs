use alloc::collections::BTreeMap;

use interchain_app_transfer::types::authz::TransferAuthorization;
use interchain_app_transfer::types::error::TokenTransferError;
use interchain_app_transfer::types::{Amount, PrefixedDenom};
use interchain_core_host_types::identifiers::PortId;
use interchain_primitives::prelude::*;
use interchain_primitives::Signer;

/// A transfer application over an in-memory bank.
///
/// Balances are kept per account and local denomination, the way
/// [`PrefixedDenom::ibc_denom`] names them. Escrow accounts are ordinary
/// accounts of the bank.
#[derive(Clone, Debug)]
pub struct MockTransferModule {
    pub port_id: PortId,
    pub balances: BTreeMap<(String, String), Amount>,
    pub total_escrow: BTreeMap<String, Amount>,
    pub denom_traces: BTreeMap<String, PrefixedDenom>,
    pub authorizations: BTreeMap<(Signer, Signer), TransferAuthorization>,
    pub send_enabled: bool,
    pub receive_enabled: bool,
}

impl Default for MockTransferModule {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransferModule {
    pub fn new() -> Self {
        Self {
            port_id: PortId::transfer(),
            balances: BTreeMap::new(),
            total_escrow: BTreeMap::new(),
            denom_traces: BTreeMap::new(),
            authorizations: BTreeMap::new(),
            send_enabled: true,
            receive_enabled: true,
        }
    }

    /// Credits `account` with `amount` of the local denomination `denom`.
    pub fn fund(&mut self, account: &str, denom: &str, amount: Amount) {
        let balance = self
            .balances
            .entry((account.to_string(), denom.to_string()))
            .or_default();
        *balance = balance.checked_add(amount).unwrap_or(*balance);
    }

    pub fn balance(&self, account: &str, denom: &str) -> Amount {
        self.balances
            .get(&(account.to_string(), denom.to_string()))
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn credit(
        &mut self,
        account: &str,
        denom: &str,
        amount: Amount,
    ) -> Result<(), TokenTransferError> {
        let credited = self.check_credit(account, denom, amount)?;
        self.balances
            .insert((account.to_string(), denom.to_string()), credited);
        Ok(())
    }

    pub(crate) fn debit(
        &mut self,
        account: &str,
        denom: &str,
        amount: Amount,
    ) -> Result<(), TokenTransferError> {
        let remaining = self.check_funds(account, denom, amount)?;
        self.balances
            .insert((account.to_string(), denom.to_string()), remaining);
        Ok(())
    }

    /// The balance reached once `amount` is added to it.
    pub(crate) fn check_credit(
        &self,
        account: &str,
        denom: &str,
        amount: Amount,
    ) -> Result<Amount, TokenTransferError> {
        self.balance(account, denom)
            .checked_add(amount)
            .ok_or_else(|| TokenTransferError::AmountOverflow {
                denom: denom.to_string(),
            })
    }

    /// Moves `amount` between two accounts. Both sides are checked before
    /// either balance changes.
    pub(crate) fn move_funds(
        &mut self,
        from: &str,
        to: &str,
        denom: &str,
        amount: Amount,
    ) -> Result<(), TokenTransferError> {
        self.check_move(from, to, denom, amount)?;
        self.debit(from, denom, amount)?;
        self.credit(to, denom, amount)
    }

    pub(crate) fn check_move(
        &self,
        from: &str,
        to: &str,
        denom: &str,
        amount: Amount,
    ) -> Result<(), TokenTransferError> {
        self.check_funds(from, denom, amount)?;
        self.check_credit(to, denom, amount)?;
        Ok(())
    }

    /// The balance left after `amount` is taken out of it.
    pub(crate) fn check_funds(
        &self,
        account: &str,
        denom: &str,
        amount: Amount,
    ) -> Result<Amount, TokenTransferError> {
        let available = self.balance(account, denom);
        available
            .checked_sub(amount)
            .ok_or_else(|| TokenTransferError::InsufficientFunds {
                send_attempt: format!("{amount}{denom}"),
                available_funds: format!("{available}{denom}"),
            })
    }
}
