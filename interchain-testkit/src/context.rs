use core::time::Duration;

use interchain_app_transfer::authz::{exec_transfer, grant, revoke};
use interchain_app_transfer::handler::send_transfer;
use interchain_app_transfer::module::on_channel_bind_validate;
use interchain_app_transfer::types::msgs::{MsgExec, MsgGrant, MsgRevoke, MsgTransfer};
use interchain_app_transfer::types::{Amount, MODULE_ID_STR};
use interchain_core_channel::context::ValidationContext;
use interchain_core_channel::types::channel::ChannelEnd;
use interchain_core_channel::types::commitment::PacketCommitment;
use interchain_core_channel::types::Height;
use interchain_core_handler::entrypoint::{dispatch, install_channel};
use interchain_core_handler_types::error::ContextError;
use interchain_core_handler_types::events::IbcEvent;
use interchain_core_handler_types::msgs::MsgEnvelope;
use interchain_core_host_types::identifiers::{ChannelId, ConnectionId, Sequence};
use interchain_core_host_types::path::{ChannelEndPath, CommitmentPath};
use interchain_primitives::prelude::*;
use interchain_primitives::Timestamp;

use crate::fixtures::core::channel::MockChannelConfig;
use crate::fixtures::core::context::MockContextConfig;
use crate::relayer::error::RelayerError;
use crate::testapp::ibc::applications::transfer::types::MockTransferModule;
use crate::testapp::ibc::clients::mock::MockLightClient;
use crate::testapp::ibc::core::router::MockRouter;
use crate::testapp::ibc::core::types::MockIbcStore;

/// A context implementing the dependencies necessary for testing the
/// packet-relay core and the transfer application on one chain.
#[derive(Debug)]
pub struct TestContext {
    /// Name of the chain, used in logs only.
    pub chain_id: String,

    /// Time between two consecutive blocks.
    pub block_time: Duration,

    /// An object that stores all relay related data.
    pub ibc_store: MockIbcStore,

    /// A router that can route messages to the appropriate application.
    pub ibc_router: MockRouter,
}

/// Returns a TestContext with bare minimum initialization: no clients and
/// no channels are present, and the chain has Height(5).
impl Default for TestContext {
    fn default() -> Self {
        MockContextConfig::builder().build()
    }
}

impl TestContext {
    pub fn latest_height(&self) -> Height {
        self.ibc_store.host_height()
    }

    pub fn latest_timestamp(&self) -> Timestamp {
        self.ibc_store.host_timestamp()
    }

    pub fn advance_block(&mut self) {
        self.ibc_store.advance_block(self.block_time);
    }

    pub fn advance_blocks(&mut self, count: u64) {
        for _ in 0..count {
            self.advance_block();
        }
    }

    /// Advances blocks until the chain reaches `target_height`. Does nothing
    /// if the chain is already past it.
    pub fn advance_block_up_to(&mut self, target_height: Height) {
        while self.latest_height() < target_height {
            self.advance_block();
        }
    }

    pub fn with_light_client(mut self, connection_id: ConnectionId, client: MockLightClient) -> Self {
        self.ibc_store.add_client(connection_id, client);
        self
    }

    /// Catches every tracking light client up with its chain.
    pub fn sync_clients(&mut self) {
        for client in self.ibc_store.clients.values_mut() {
            client.sync();
        }
    }

    /// Installs an open channel end and binds it to the module named in
    /// `config`. The transfer application checks the port and version first.
    pub fn install_channel(&mut self, config: MockChannelConfig) -> Result<(), RelayerError> {
        let channel_end = config.channel_end().map_err(ContextError::from)?;

        if config.module_id.as_str() == MODULE_ID_STR {
            on_channel_bind_validate(
                self.ibc_router.transfer(),
                &config.port_id,
                &channel_end.version,
            )?;
        }

        install_channel(
            &mut self.ibc_store,
            &mut self.ibc_router,
            config.channel_id,
            channel_end,
            config.module_id,
        )?;

        Ok(())
    }

    /// Associates a channel to this context.
    pub fn with_channel(mut self, config: MockChannelConfig) -> Result<Self, RelayerError> {
        self.install_channel(config)?;
        Ok(self)
    }

    pub fn with_packet_commitment(
        self,
        channel_id: &ChannelId,
        sequence: Sequence,
        commitment: PacketCommitment,
    ) -> Self {
        self.ibc_store
            .state
            .lock()
            .packet_commitments
            .insert(CommitmentPath::new(channel_id, sequence).to_key(), commitment);
        self
    }

    pub fn with_recv_sequence(self, channel_id: &ChannelId, sequence: Sequence) -> Self {
        self.ibc_store
            .state
            .lock()
            .next_sequence_recv
            .insert(channel_id.clone(), sequence);
        self
    }

    pub fn with_send_sequence(self, channel_id: &ChannelId, sequence: Sequence) -> Self {
        self.ibc_store
            .state
            .lock()
            .next_sequence_send
            .insert(channel_id.clone(), sequence);
        self
    }

    /// A datagram passes from the relayer to the host chain.
    ///
    /// The message is applied atomically and a new block is produced when it
    /// succeeds.
    pub fn deliver(&mut self, msg: impl Into<MsgEnvelope>) -> Result<(), RelayerError> {
        let msg = msg.into();
        tracing::debug!(chain_id = %self.chain_id, type_url = %msg.type_url(), "delivering message");

        self.atomically(|store, router| dispatch(store, router, msg))
            .map_err(RelayerError::TransactionFailed)?;

        self.advance_block();
        Ok(())
    }

    /// Sends a token transfer from this chain.
    pub fn send_transfer(&mut self, msg: MsgTransfer) -> Result<(), RelayerError> {
        self.atomically(|store, router| send_transfer(store, router.transfer_mut(), msg))?;
        self.advance_block();
        Ok(())
    }

    pub fn grant(&mut self, msg: MsgGrant) -> Result<(), RelayerError> {
        self.atomically(|store, router| grant(store, router.transfer_mut(), msg))?;
        Ok(())
    }

    pub fn revoke(&mut self, msg: MsgRevoke) -> Result<(), RelayerError> {
        self.atomically(|store, router| revoke(store, router.transfer_mut(), msg))?;
        Ok(())
    }

    /// Sends a transfer on behalf of a granter.
    pub fn exec(&mut self, msg: MsgExec) -> Result<(), RelayerError> {
        self.atomically(|store, router| exec_transfer(store, router.transfer_mut(), msg))?;
        self.advance_block();
        Ok(())
    }

    /// Runs `f` against the store and the router, rolling both back if it
    /// fails.
    fn atomically<T, E>(
        &mut self,
        f: impl FnOnce(&mut MockIbcStore, &mut MockRouter) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: core::fmt::Display,
    {
        let store_snapshot = self.ibc_store.snapshot();
        let router_snapshot = self.ibc_router.clone();

        f(&mut self.ibc_store, &mut self.ibc_router).map_err(|e| {
            tracing::debug!(chain_id = %self.chain_id, error = %e, "transaction rolled back");
            self.ibc_store.restore(store_snapshot);
            self.ibc_router = router_snapshot;
            e
        })
    }

    pub fn transfer(&self) -> &MockTransferModule {
        self.ibc_router.transfer()
    }

    pub fn transfer_mut(&mut self) -> &mut MockTransferModule {
        self.ibc_router.transfer_mut()
    }

    /// Credits `account` with `amount` of the local denomination `denom`.
    pub fn fund(&mut self, account: &str, denom: &str, amount: impl Into<Amount>) {
        self.transfer_mut().fund(account, denom, amount.into());
    }

    pub fn balance(&self, account: &str, denom: &str) -> Amount {
        self.transfer().balance(account, denom)
    }

    pub fn channel_end(&self, channel_id: &ChannelId) -> Result<ChannelEnd, ContextError> {
        self.ibc_store.channel_end(&ChannelEndPath::new(channel_id))
    }

    pub fn get_events(&self) -> Vec<IbcEvent> {
        self.ibc_store.events()
    }

    pub fn get_logs(&self) -> Vec<String> {
        self.ibc_store.logs()
    }
}

#[cfg(test)]
mod tests {
    use interchain_core_channel::types::channel::Order;
    use interchain_core_channel::types::Version;
    use interchain_core_router::types::error::RouterError;
    use interchain_core_router::types::module::ModuleId;

    use super::*;

    #[test]
    fn default_context_starts_at_height_five() {
        let mut ctx = TestContext::default();
        assert_eq!(ctx.latest_height(), Height::new(0, 5).unwrap());

        let before = ctx.latest_timestamp();
        ctx.advance_blocks(2);
        assert_eq!(ctx.latest_height(), Height::new(0, 7).unwrap());
        assert_eq!(
            ctx.latest_timestamp().duration_since(&before),
            Some(ctx.block_time * 2)
        );
    }

    #[test]
    fn installed_channel_starts_all_sequences_at_one() {
        let mut ctx = TestContext::default();
        ctx.install_channel(
            MockChannelConfig::builder()
                .ordering(Order::Ordered)
                .build(),
        )
        .unwrap();

        let state = ctx.ibc_store.snapshot();
        for sequences in [
            &state.next_sequence_send,
            &state.next_sequence_recv,
            &state.next_sequence_ack,
        ] {
            assert_eq!(sequences.get(&ChannelId::zero()), Some(&Sequence::from(1)));
        }
        assert_eq!(
            ctx.channel_end(&ChannelId::zero()).unwrap().ordering,
            Order::Ordered
        );
    }

    #[test]
    fn channel_cannot_be_installed_twice() {
        let mut ctx = TestContext::default();
        ctx.install_channel(MockChannelConfig::builder().build())
            .unwrap();

        let err = ctx
            .install_channel(MockChannelConfig::builder().build())
            .unwrap_err();
        assert!(matches!(err, RelayerError::TransactionFailed(_)));
    }

    #[test]
    fn channel_to_unknown_module_is_refused() {
        let mut ctx = TestContext::default();
        let err = ctx
            .install_channel(
                MockChannelConfig::builder()
                    .module_id(ModuleId::new("oracle"))
                    .build(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            RelayerError::TransactionFailed(ContextError::RouterError(RouterError::MissingModule(_)))
        ));
        assert!(ctx.channel_end(&ChannelId::zero()).is_err());
    }

    #[test]
    fn transfer_refuses_foreign_versions() {
        let mut ctx = TestContext::default();
        let err = ctx
            .install_channel(
                MockChannelConfig::builder()
                    .version(Version::new("ics721-1".to_string()))
                    .build(),
            )
            .unwrap_err();

        assert!(matches!(err, RelayerError::Transfer(_)));
    }
}
