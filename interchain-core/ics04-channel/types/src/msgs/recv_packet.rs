use interchain_primitives::Signer;

use crate::commitment::CommitmentProofBytes;
use crate::error::PacketError;
use crate::packet::Packet;
use crate::Height;

pub const RECV_PACKET_TYPE_URL: &str = "/interchain.core.channel.v1.MsgRecvPacket";

/// Delivers a packet to the receiving chain, together with a proof that the
/// sending chain committed to it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgRecvPacket {
    /// The packet to be received
    pub packet: Packet,
    /// Proof of packet commitment on the sending chain
    pub proof_commitment_on_a: CommitmentProofBytes,
    /// Height at which the commitment proof was taken
    pub proof_height_on_a: Height,
    /// The relayer submitting the message
    pub signer: Signer,
}

impl MsgRecvPacket {
    pub fn new(
        packet: Packet,
        proof_commitment_on_a: CommitmentProofBytes,
        proof_height_on_a: Height,
        signer: Signer,
    ) -> Self {
        Self {
            packet,
            proof_commitment_on_a,
            proof_height_on_a,
            signer,
        }
    }

    pub fn validate_basic(&self) -> Result<(), PacketError> {
        self.packet.validate_basic()?;

        if self.signer.is_empty() {
            return Err(PacketError::EmptySigner);
        }

        Ok(())
    }
}
