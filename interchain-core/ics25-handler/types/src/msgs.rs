use interchain_core_channel_types::msgs::{MsgAcknowledgement, MsgRecvPacket, MsgTimeout, PacketMsg};
use interchain_primitives::prelude::*;
use interchain_primitives::Signer;

/// Enumeration of all messages the dispatcher routes.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum MsgEnvelope {
    Packet(PacketMsg),
}

impl MsgEnvelope {
    pub fn signer(&self) -> Signer {
        match self {
            MsgEnvelope::Packet(msg) => match msg {
                PacketMsg::Recv(msg) => msg.signer.clone(),
                PacketMsg::Ack(msg) => msg.signer.clone(),
                PacketMsg::Timeout(msg) => msg.signer.clone(),
            },
        }
    }

    pub fn type_url(&self) -> String {
        match self {
            MsgEnvelope::Packet(msg) => msg.type_url(),
        }
    }
}

impl From<MsgRecvPacket> for MsgEnvelope {
    fn from(msg: MsgRecvPacket) -> Self {
        Self::Packet(msg.into())
    }
}

impl From<MsgAcknowledgement> for MsgEnvelope {
    fn from(msg: MsgAcknowledgement) -> Self {
        Self::Packet(msg.into())
    }
}

impl From<MsgTimeout> for MsgEnvelope {
    fn from(msg: MsgTimeout) -> Self {
        Self::Packet(msg.into())
    }
}
