//! Transfer authorizations a granter hands to a grantee.
//!
//! Each allocation scopes the grant to one source channel, caps what can be
//! spent per denomination and optionally restricts the receivers.

use alloc::collections::BTreeSet;

use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_primitives::prelude::*;

use crate::error::TokenTransferError;
use crate::{Amount, BaseCoin};

/// Spending rights over a single `(source_port, source_channel)`.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Allocation {
    pub source_port: PortId,
    pub source_channel: ChannelId,
    /// Remaining amount per denomination. A denomination without an entry
    /// cannot be spent.
    pub spend_limit: Vec<BaseCoin>,
    /// Receivers the grantee may send to. Empty allows any receiver.
    pub allow_list: Vec<String>,
}

impl Allocation {
    pub fn matches(&self, port_id: &PortId, channel_id: &ChannelId) -> bool {
        &self.source_port == port_id && &self.source_channel == channel_id
    }

    pub fn is_receiver_allowed(&self, receiver: &str) -> bool {
        self.allow_list.is_empty() || self.allow_list.iter().any(|allowed| allowed == receiver)
    }

    /// Remaining limit for `denom`; zero when the allocation has none.
    pub fn remaining(&self, denom: &str) -> Amount {
        self.spend_limit
            .iter()
            .find(|coin| coin.denom.as_str() == denom)
            .map(|coin| coin.amount)
            .unwrap_or_else(Amount::zero)
    }

    /// Deducts `amount` of `denom` from the spend limit. The entry stays in
    /// place when it reaches zero.
    pub fn spend(&mut self, denom: &str, amount: Amount) -> Result<(), TokenTransferError> {
        let remaining = self.remaining(denom);
        let insufficient = || TokenTransferError::InsufficientSpendLimit {
            denom: denom.to_string(),
            requested: amount.to_string(),
            remaining: remaining.to_string(),
        };

        let coin = self
            .spend_limit
            .iter_mut()
            .find(|coin| coin.denom.as_str() == denom)
            .ok_or_else(insufficient)?;
        coin.amount = coin.amount.checked_sub(amount).ok_or_else(insufficient)?;

        Ok(())
    }

    fn validate_basic(&self) -> Result<(), TokenTransferError> {
        let invalid = |reason: String| TokenTransferError::InvalidAuthorization { reason };

        let mut denoms = BTreeSet::new();
        for coin in &self.spend_limit {
            if coin.amount.is_zero() {
                return Err(invalid(format!(
                    "spend limit for `{}` must be positive",
                    coin.denom
                )));
            }
            if !denoms.insert(coin.denom.as_str()) {
                return Err(invalid(format!("duplicate denom `{}`", coin.denom)));
            }
        }

        let mut receivers = BTreeSet::new();
        for receiver in &self.allow_list {
            if !receivers.insert(receiver.as_str()) {
                return Err(invalid(format!(
                    "duplicate entry `{receiver}` in allow list"
                )));
            }
        }

        Ok(())
    }
}

/// Authorization to send transfers on behalf of a granter.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransferAuthorization {
    pub allocations: Vec<Allocation>,
}

impl TransferAuthorization {
    pub fn new(allocations: Vec<Allocation>) -> Self {
        Self { allocations }
    }

    pub fn allocation(&self, port_id: &PortId, channel_id: &ChannelId) -> Option<&Allocation> {
        self.allocations
            .iter()
            .find(|allocation| allocation.matches(port_id, channel_id))
    }

    pub fn allocation_mut(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Option<&mut Allocation> {
        self.allocations
            .iter_mut()
            .find(|allocation| allocation.matches(port_id, channel_id))
    }

    pub fn validate_basic(&self) -> Result<(), TokenTransferError> {
        if self.allocations.is_empty() {
            return Err(TokenTransferError::InvalidAuthorization {
                reason: "allocations cannot be empty".to_string(),
            });
        }

        let mut channels = BTreeSet::new();
        for allocation in &self.allocations {
            if !channels.insert((&allocation.source_port, &allocation.source_channel)) {
                return Err(TokenTransferError::InvalidAuthorization {
                    reason: format!(
                        "duplicate allocation for `{}/{}`",
                        allocation.source_port, allocation.source_channel
                    ),
                });
            }
            allocation.validate_basic()?;
        }

        Ok(())
    }
}
