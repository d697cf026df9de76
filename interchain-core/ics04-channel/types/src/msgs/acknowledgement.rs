use interchain_primitives::Signer;

use crate::acknowledgement::Acknowledgement;
use crate::commitment::CommitmentProofBytes;
use crate::error::PacketError;
use crate::packet::Packet;
use crate::Height;

pub const ACKNOWLEDGEMENT_TYPE_URL: &str = "/interchain.core.channel.v1.MsgAcknowledgement";

/// Returns the receiving chain's acknowledgement to the sending chain.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgAcknowledgement {
    pub packet: Packet,
    pub acknowledgement: Acknowledgement,
    /// Proof of the acknowledgement on the receiving chain
    pub proof_acked_on_b: CommitmentProofBytes,
    pub proof_height_on_b: Height,
    pub signer: Signer,
}

impl MsgAcknowledgement {
    pub fn validate_basic(&self) -> Result<(), PacketError> {
        self.packet.validate_basic()?;

        if self.signer.is_empty() {
            return Err(PacketError::EmptySigner);
        }

        Ok(())
    }
}
