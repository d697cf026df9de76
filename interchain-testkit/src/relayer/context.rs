use interchain_app_transfer::types::msgs::{MsgExec, MsgTransfer};
use interchain_core_channel::types::acknowledgement::Acknowledgement;
use interchain_core_channel::types::channel::Order;
use interchain_core_channel::types::packet::Packet;
use interchain_core_host_types::identifiers::{ChannelId, ConnectionId};

use crate::context::TestContext;
use crate::fixtures::core::channel::MockChannelConfig;
use crate::relayer::error::RelayerError;
use crate::relayer::utils::{
    build_msg_acknowledgement, build_msg_recv_packet, build_msg_timeout, sent_packets,
    written_acknowledgement,
};
use crate::testapp::ibc::clients::mock::MockLightClient;

/// Two chains connected over `connection-0`, each running a light client
/// that tracks the other, and a relayer moving packets between them.
#[derive(Debug)]
pub struct RelayerContext {
    ctx_a: TestContext,
    ctx_b: TestContext,
}

impl RelayerContext {
    pub fn new(ctx_a: TestContext, ctx_b: TestContext) -> Self {
        let client_on_a = MockLightClient::tracking(ctx_b.ibc_store.shared_state());
        let client_on_b = MockLightClient::tracking(ctx_a.ibc_store.shared_state());

        Self {
            ctx_a: ctx_a.with_light_client(ConnectionId::zero(), client_on_a),
            ctx_b: ctx_b.with_light_client(ConnectionId::zero(), client_on_b),
        }
    }

    pub fn get_ctx_a(&self) -> &TestContext {
        &self.ctx_a
    }

    pub fn get_ctx_b(&self) -> &TestContext {
        &self.ctx_b
    }

    pub fn get_ctx_a_mut(&mut self) -> &mut TestContext {
        &mut self.ctx_a
    }

    pub fn get_ctx_b_mut(&mut self) -> &mut TestContext {
        &mut self.ctx_b
    }

    /// Installs a pair of transfer channel ends with the given ordering,
    /// `channel-{n}` on both chains where `n` is the number of channels
    /// chain A already has.
    pub fn create_transfer_channel(
        &mut self,
        ordering: Order,
    ) -> Result<ChannelId, RelayerError> {
        let channel_id = ChannelId::new(self.ctx_a.ibc_store.snapshot().channels.len() as u64);

        let config = MockChannelConfig::builder()
            .channel_id(channel_id.clone())
            .counterparty_channel_id(Some(channel_id.clone()))
            .ordering(ordering)
            .build();
        self.ctx_a.install_channel(config.clone())?;
        self.ctx_b.install_channel(config)?;

        Ok(channel_id)
    }

    pub fn sync_clients(&mut self) {
        self.ctx_a.sync_clients();
        self.ctx_b.sync_clients();
    }

    /// Sends a transfer from chain A and returns the packet carrying it.
    pub fn send_transfer_on_a(&mut self, msg: MsgTransfer) -> Result<Packet, RelayerError> {
        Self::send_transfer(&mut self.ctx_a, msg)
    }

    pub fn send_transfer_on_b(&mut self, msg: MsgTransfer) -> Result<Packet, RelayerError> {
        Self::send_transfer(&mut self.ctx_b, msg)
    }

    /// Sends a transfer from chain A on behalf of a granter.
    pub fn exec_transfer_on_a(&mut self, msg: MsgExec) -> Result<Packet, RelayerError> {
        let sent_before = sent_packets(&self.ctx_a.get_events()).len();
        self.ctx_a.exec(msg)?;
        Self::packet_sent_after(&self.ctx_a, sent_before)
    }

    /// Delivers a packet sent by chain A to chain B and returns the
    /// acknowledgement chain B wrote.
    pub fn packet_recv_on_b(&mut self, packet: Packet) -> Result<Acknowledgement, RelayerError> {
        Self::packet_recv(&mut self.ctx_b, packet)
    }

    pub fn packet_recv_on_a(&mut self, packet: Packet) -> Result<Acknowledgement, RelayerError> {
        Self::packet_recv(&mut self.ctx_a, packet)
    }

    /// Returns chain B's acknowledgement of `packet` to chain A.
    pub fn packet_ack_on_a(
        &mut self,
        packet: Packet,
        acknowledgement: Acknowledgement,
    ) -> Result<(), RelayerError> {
        Self::packet_ack(&mut self.ctx_a, packet, acknowledgement)
    }

    pub fn packet_ack_on_b(
        &mut self,
        packet: Packet,
        acknowledgement: Acknowledgement,
    ) -> Result<(), RelayerError> {
        Self::packet_ack(&mut self.ctx_b, packet, acknowledgement)
    }

    /// Times out on chain A a packet chain B never received.
    pub fn packet_timeout_on_a(&mut self, packet: Packet) -> Result<(), RelayerError> {
        Self::packet_timeout(&mut self.ctx_a, &self.ctx_b, packet)
    }

    pub fn packet_timeout_on_b(&mut self, packet: Packet) -> Result<(), RelayerError> {
        Self::packet_timeout(&mut self.ctx_b, &self.ctx_a, packet)
    }

    /// Receives `packet` on chain B and brings the acknowledgement back to
    /// chain A.
    pub fn relay_a_to_b(&mut self, packet: Packet) -> Result<Acknowledgement, RelayerError> {
        let ack = self.packet_recv_on_b(packet.clone())?;
        self.packet_ack_on_a(packet, ack.clone())?;
        Ok(ack)
    }

    pub fn relay_b_to_a(&mut self, packet: Packet) -> Result<Acknowledgement, RelayerError> {
        let ack = self.packet_recv_on_a(packet.clone())?;
        self.packet_ack_on_b(packet, ack.clone())?;
        Ok(ack)
    }

    fn send_transfer(ctx: &mut TestContext, msg: MsgTransfer) -> Result<Packet, RelayerError> {
        let sent_before = sent_packets(&ctx.get_events()).len();
        ctx.send_transfer(msg)?;
        Self::packet_sent_after(ctx, sent_before)
    }

    fn packet_sent_after(ctx: &TestContext, sent_before: usize) -> Result<Packet, RelayerError> {
        sent_packets(&ctx.get_events())
            .into_iter()
            .nth(sent_before)
            .ok_or(RelayerError::MissingPacket)
    }

    fn packet_recv(ctx_b: &mut TestContext, packet: Packet) -> Result<Acknowledgement, RelayerError> {
        ctx_b.sync_clients();

        let msg = build_msg_recv_packet(ctx_b, packet.clone())?;
        ctx_b.deliver(msg)?;

        written_acknowledgement(&ctx_b.get_events(), &packet).ok_or(
            RelayerError::MissingAcknowledgement {
                sequence: packet.seq_on_a,
            },
        )
    }

    fn packet_ack(
        ctx_a: &mut TestContext,
        packet: Packet,
        acknowledgement: Acknowledgement,
    ) -> Result<(), RelayerError> {
        ctx_a.sync_clients();

        let msg = build_msg_acknowledgement(ctx_a, packet, acknowledgement)?;
        ctx_a.deliver(msg)
    }

    fn packet_timeout(
        ctx_a: &mut TestContext,
        ctx_b: &TestContext,
        packet: Packet,
    ) -> Result<(), RelayerError> {
        ctx_a.sync_clients();

        let msg = build_msg_timeout(ctx_a, ctx_b, packet)?;
        ctx_a.deliver(msg)
    }
}
