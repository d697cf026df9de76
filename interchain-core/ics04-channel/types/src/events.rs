//! Structured events emitted by the packet lifecycle handlers.

use interchain_core_host_types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};

use crate::acknowledgement::Acknowledgement;
use crate::channel::Order;
use crate::packet::Packet;
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};

pub const SEND_PACKET_EVENT: &str = "send_packet";
pub const RECEIVE_PACKET_EVENT: &str = "recv_packet";
pub const WRITE_ACK_EVENT: &str = "write_acknowledgement";
pub const ACK_PACKET_EVENT: &str = "acknowledge_packet";
pub const TIMEOUT_EVENT: &str = "timeout_packet";
pub const CHANNEL_CLOSED_EVENT: &str = "channel_close";

/// Generates the accessors shared by every event that carries a packet.
macro_rules! packet_accessors {
    () => {
        pub fn packet(&self) -> &Packet {
            &self.packet
        }

        pub fn seq_on_a(&self) -> &Sequence {
            &self.packet.seq_on_a
        }

        pub fn port_id_on_a(&self) -> &PortId {
            &self.packet.port_id_on_a
        }

        pub fn chan_id_on_a(&self) -> &ChannelId {
            &self.packet.chan_id_on_a
        }

        pub fn port_id_on_b(&self) -> &PortId {
            &self.packet.port_id_on_b
        }

        pub fn chan_id_on_b(&self) -> &ChannelId {
            &self.packet.chan_id_on_b
        }

        pub fn timeout_height_on_b(&self) -> &TimeoutHeight {
            &self.packet.timeout_height_on_b
        }

        pub fn timeout_timestamp_on_b(&self) -> &TimeoutTimestamp {
            &self.packet.timeout_timestamp_on_b
        }
    };
}

/// Emitted when a packet is committed on the sending chain.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendPacket {
    packet: Packet,
    channel_ordering: Order,
    src_connection_id: ConnectionId,
}

impl SendPacket {
    pub fn new(packet: Packet, channel_ordering: Order, src_connection_id: ConnectionId) -> Self {
        Self {
            packet,
            channel_ordering,
            src_connection_id,
        }
    }

    packet_accessors!();

    pub fn packet_data(&self) -> &[u8] {
        &self.packet.data
    }

    pub fn channel_ordering(&self) -> &Order {
        &self.channel_ordering
    }

    pub fn conn_id_on_a(&self) -> &ConnectionId {
        &self.src_connection_id
    }

    pub fn event_type(&self) -> &str {
        SEND_PACKET_EVENT
    }
}

/// Emitted when a packet is accepted on the receiving chain.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceivePacket {
    packet: Packet,
    channel_ordering: Order,
    dst_connection_id: ConnectionId,
}

impl ReceivePacket {
    pub fn new(packet: Packet, channel_ordering: Order, dst_connection_id: ConnectionId) -> Self {
        Self {
            packet,
            channel_ordering,
            dst_connection_id,
        }
    }

    packet_accessors!();

    pub fn packet_data(&self) -> &[u8] {
        &self.packet.data
    }

    pub fn channel_ordering(&self) -> &Order {
        &self.channel_ordering
    }

    pub fn conn_id_on_b(&self) -> &ConnectionId {
        &self.dst_connection_id
    }

    pub fn event_type(&self) -> &str {
        RECEIVE_PACKET_EVENT
    }
}

/// Emitted when the receiving chain stores an acknowledgement.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteAcknowledgement {
    packet: Packet,
    acknowledgement: Acknowledgement,
    dst_connection_id: ConnectionId,
}

impl WriteAcknowledgement {
    pub fn new(
        packet: Packet,
        acknowledgement: Acknowledgement,
        dst_connection_id: ConnectionId,
    ) -> Self {
        Self {
            packet,
            acknowledgement,
            dst_connection_id,
        }
    }

    packet_accessors!();

    pub fn acknowledgement(&self) -> &Acknowledgement {
        &self.acknowledgement
    }

    pub fn conn_id_on_b(&self) -> &ConnectionId {
        &self.dst_connection_id
    }

    pub fn event_type(&self) -> &str {
        WRITE_ACK_EVENT
    }
}

/// Emitted when the sending chain processes an acknowledgement and deletes
/// the packet commitment.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcknowledgePacket {
    packet: Packet,
    channel_ordering: Order,
    src_connection_id: ConnectionId,
}

impl AcknowledgePacket {
    pub fn new(packet: Packet, channel_ordering: Order, src_connection_id: ConnectionId) -> Self {
        Self {
            packet,
            channel_ordering,
            src_connection_id,
        }
    }

    packet_accessors!();

    pub fn channel_ordering(&self) -> &Order {
        &self.channel_ordering
    }

    pub fn conn_id_on_a(&self) -> &ConnectionId {
        &self.src_connection_id
    }

    pub fn event_type(&self) -> &str {
        ACK_PACKET_EVENT
    }
}

/// Emitted when the sending chain proves a packet timed out.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeoutPacket {
    packet: Packet,
    channel_ordering: Order,
}

impl TimeoutPacket {
    pub fn new(packet: Packet, channel_ordering: Order) -> Self {
        Self {
            packet,
            channel_ordering,
        }
    }

    packet_accessors!();

    pub fn channel_ordering(&self) -> &Order {
        &self.channel_ordering
    }

    pub fn event_type(&self) -> &str {
        TIMEOUT_EVENT
    }
}

/// Emitted when a timeout closes an ordered channel.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelClosed {
    port_id_on_a: PortId,
    chan_id_on_a: ChannelId,
    port_id_on_b: PortId,
    maybe_chan_id_on_b: Option<ChannelId>,
    conn_id_on_a: ConnectionId,
    channel_ordering: Order,
}

impl ChannelClosed {
    pub fn new(
        port_id_on_a: PortId,
        chan_id_on_a: ChannelId,
        port_id_on_b: PortId,
        maybe_chan_id_on_b: Option<ChannelId>,
        conn_id_on_a: ConnectionId,
        channel_ordering: Order,
    ) -> Self {
        Self {
            port_id_on_a,
            chan_id_on_a,
            port_id_on_b,
            maybe_chan_id_on_b,
            conn_id_on_a,
            channel_ordering,
        }
    }

    pub fn port_id_on_a(&self) -> &PortId {
        &self.port_id_on_a
    }

    pub fn chan_id_on_a(&self) -> &ChannelId {
        &self.chan_id_on_a
    }

    pub fn port_id_on_b(&self) -> &PortId {
        &self.port_id_on_b
    }

    pub fn chan_id_on_b(&self) -> Option<&ChannelId> {
        self.maybe_chan_id_on_b.as_ref()
    }

    pub fn conn_id_on_a(&self) -> &ConnectionId {
        &self.conn_id_on_a
    }

    pub fn channel_ordering(&self) -> &Order {
        &self.channel_ordering
    }

    pub fn event_type(&self) -> &str {
        CHANNEL_CLOSED_EVENT
    }
}
