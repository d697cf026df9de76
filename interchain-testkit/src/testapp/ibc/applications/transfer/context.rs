use interchain_app_transfer::context::{
    TokenTransferExecutionContext, TokenTransferValidationContext, TransferAuthzExecutionContext,
    TransferAuthzValidationContext,
};
use interchain_app_transfer::escrow::escrow_address;
use interchain_app_transfer::types::authz::TransferAuthorization;
use interchain_app_transfer::types::error::TokenTransferError;
use interchain_app_transfer::types::{Amount, Memo, PrefixedCoin, PrefixedDenom};
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_primitives::prelude::*;
use interchain_primitives::Signer;

use super::types::MockTransferModule;

impl TokenTransferValidationContext for MockTransferModule {
    type AccountId = Signer;

    fn get_port(&self) -> Result<PortId, TokenTransferError> {
        Ok(self.port_id.clone())
    }

    fn can_send_coins(&self) -> Result<(), TokenTransferError> {
        if self.send_enabled {
            Ok(())
        } else {
            Err(TokenTransferError::Other("sending coins is disabled".to_string()))
        }
    }

    fn can_receive_coins(&self) -> Result<(), TokenTransferError> {
        if self.receive_enabled {
            Ok(())
        } else {
            Err(TokenTransferError::Other(
                "receiving coins is disabled".to_string(),
            ))
        }
    }

    fn escrow_coins_validate(
        &self,
        from_account: &Signer,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &PrefixedCoin,
        _memo: &Memo,
    ) -> Result<(), TokenTransferError> {
        self.check_move(
            from_account.as_str(),
            &escrow_address(port_id, channel_id),
            &coin.denom.ibc_denom(),
            coin.amount,
        )
    }

    fn unescrow_coins_validate(
        &self,
        to_account: &Signer,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError> {
        self.check_move(
            &escrow_address(port_id, channel_id),
            to_account.as_str(),
            &coin.denom.ibc_denom(),
            coin.amount,
        )
    }

    fn mint_coins_validate(
        &self,
        account: &Signer,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError> {
        self.check_credit(account.as_str(), &coin.denom.ibc_denom(), coin.amount)
            .map(|_| ())
    }

    fn burn_coins_validate(
        &self,
        account: &Signer,
        coin: &PrefixedCoin,
        _memo: &Memo,
    ) -> Result<(), TokenTransferError> {
        self.check_funds(account.as_str(), &coin.denom.ibc_denom(), coin.amount)
            .map(|_| ())
    }

    fn get_total_escrow(&self, denom: &str) -> Result<Amount, TokenTransferError> {
        Ok(self.total_escrow.get(denom).copied().unwrap_or_default())
    }

    fn get_denom_trace(&self, hash: &str) -> Result<Option<PrefixedDenom>, TokenTransferError> {
        Ok(self.denom_traces.get(hash).cloned())
    }
}

impl TokenTransferExecutionContext for MockTransferModule {
    fn escrow_coins_execute(
        &mut self,
        from_account: &Signer,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &PrefixedCoin,
        _memo: &Memo,
    ) -> Result<(), TokenTransferError> {
        self.move_funds(
            from_account.as_str(),
            &escrow_address(port_id, channel_id),
            &coin.denom.ibc_denom(),
            coin.amount,
        )
    }

    fn unescrow_coins_execute(
        &mut self,
        to_account: &Signer,
        port_id: &PortId,
        channel_id: &ChannelId,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError> {
        self.move_funds(
            &escrow_address(port_id, channel_id),
            to_account.as_str(),
            &coin.denom.ibc_denom(),
            coin.amount,
        )
    }

    fn mint_coins_execute(
        &mut self,
        account: &Signer,
        coin: &PrefixedCoin,
    ) -> Result<(), TokenTransferError> {
        self.credit(account.as_str(), &coin.denom.ibc_denom(), coin.amount)
    }

    fn burn_coins_execute(
        &mut self,
        account: &Signer,
        coin: &PrefixedCoin,
        _memo: &Memo,
    ) -> Result<(), TokenTransferError> {
        self.debit(account.as_str(), &coin.denom.ibc_denom(), coin.amount)
    }

    fn store_total_escrow(
        &mut self,
        denom: &str,
        amount: Amount,
    ) -> Result<(), TokenTransferError> {
        self.total_escrow.insert(denom.to_string(), amount);
        Ok(())
    }

    fn store_denom_trace(
        &mut self,
        hash: String,
        denom: PrefixedDenom,
    ) -> Result<(), TokenTransferError> {
        self.denom_traces.insert(hash, denom);
        Ok(())
    }
}

impl TransferAuthzValidationContext for MockTransferModule {
    fn get_authorization(
        &self,
        granter: &Signer,
        grantee: &Signer,
    ) -> Result<Option<TransferAuthorization>, TokenTransferError> {
        Ok(self
            .authorizations
            .get(&(granter.clone(), grantee.clone()))
            .cloned())
    }
}

impl TransferAuthzExecutionContext for MockTransferModule {
    fn store_authorization(
        &mut self,
        granter: Signer,
        grantee: Signer,
        authorization: TransferAuthorization,
    ) -> Result<(), TokenTransferError> {
        self.authorizations.insert((granter, grantee), authorization);
        Ok(())
    }

    fn delete_authorization(
        &mut self,
        granter: &Signer,
        grantee: &Signer,
    ) -> Result<(), TokenTransferError> {
        self.authorizations
            .remove(&(granter.clone(), grantee.clone()));
        Ok(())
    }
}
