//! Messages a relayer submits to move a packet through its lifecycle.

use interchain_primitives::prelude::*;

use crate::packet::Packet;

mod acknowledgement;
mod recv_packet;
mod timeout;

pub use acknowledgement::*;
pub use recv_packet::*;
pub use timeout::*;

/// All relay messages that carry a packet.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum PacketMsg {
    Recv(MsgRecvPacket),
    Ack(MsgAcknowledgement),
    Timeout(MsgTimeout),
}

impl PacketMsg {
    pub fn packet(&self) -> &Packet {
        match self {
            PacketMsg::Recv(msg) => &msg.packet,
            PacketMsg::Ack(msg) => &msg.packet,
            PacketMsg::Timeout(msg) => &msg.packet,
        }
    }

    pub fn type_url(&self) -> String {
        match self {
            PacketMsg::Recv(_) => RECV_PACKET_TYPE_URL.to_string(),
            PacketMsg::Ack(_) => ACKNOWLEDGEMENT_TYPE_URL.to_string(),
            PacketMsg::Timeout(_) => TIMEOUT_TYPE_URL.to_string(),
        }
    }
}
