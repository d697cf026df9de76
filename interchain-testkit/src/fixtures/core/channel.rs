use interchain_app_transfer::types::{MODULE_ID_STR, VERSION};
use interchain_core_channel::types::channel::{ChannelEnd, Counterparty, Order, State};
use interchain_core_channel::types::error::ChannelError;
use interchain_core_channel::types::packet::Packet;
use interchain_core_channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use interchain_core_channel::types::Version;
use interchain_core_host_types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use interchain_core_router::types::module::ModuleId;
use interchain_primitives::prelude::*;
use typed_builder::TypedBuilder;

/// Configuration of a channel end installed on a mock chain.
#[derive(TypedBuilder, Clone, Debug)]
pub struct MockChannelConfig {
    #[builder(default = ChannelId::zero())]
    pub channel_id: ChannelId,
    #[builder(default = PortId::transfer())]
    pub port_id: PortId,
    #[builder(default = PortId::transfer())]
    pub counterparty_port_id: PortId,
    #[builder(default = Some(ChannelId::zero()))]
    pub counterparty_channel_id: Option<ChannelId>,
    #[builder(default = Order::Unordered)]
    pub ordering: Order,
    #[builder(default = State::Open)]
    pub state: State,
    #[builder(default = ConnectionId::zero())]
    pub connection_id: ConnectionId,
    #[builder(default = Version::new(VERSION.to_string()))]
    pub version: Version,
    #[builder(default = ModuleId::new(MODULE_ID_STR))]
    pub module_id: ModuleId,
}

impl MockChannelConfig {
    pub fn channel_end(&self) -> Result<ChannelEnd, ChannelError> {
        ChannelEnd::new(
            self.state,
            self.ordering,
            self.port_id.clone(),
            Counterparty::new(
                self.counterparty_port_id.clone(),
                self.counterparty_channel_id.clone(),
            ),
            vec![self.connection_id.clone()],
            self.version.clone(),
        )
    }
}

/// Configuration of a [`Packet`], for testing purposes only!
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = Packet))]
pub struct PacketConfig {
    #[builder(default = Sequence::from(1))]
    pub seq_on_a: Sequence,
    #[builder(default = PortId::transfer())]
    pub port_id_on_a: PortId,
    #[builder(default = ChannelId::zero())]
    pub chan_id_on_a: ChannelId,
    #[builder(default = PortId::transfer())]
    pub port_id_on_b: PortId,
    #[builder(default = ChannelId::zero())]
    pub chan_id_on_b: ChannelId,
    #[builder(default = b"payload".to_vec())]
    pub data: Vec<u8>,
    #[builder(default = TimeoutHeight::Never)]
    pub timeout_height_on_b: TimeoutHeight,
    #[builder(default = TimeoutTimestamp::Never)]
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

impl From<PacketConfig> for Packet {
    fn from(config: PacketConfig) -> Self {
        Packet {
            seq_on_a: config.seq_on_a,
            port_id_on_a: config.port_id_on_a,
            chan_id_on_a: config.chan_id_on_a,
            port_id_on_b: config.port_id_on_b,
            chan_id_on_b: config.chan_id_on_b,
            data: config.data,
            timeout_height_on_b: config.timeout_height_on_b,
            timeout_timestamp_on_b: config.timeout_timestamp_on_b,
        }
    }
}
