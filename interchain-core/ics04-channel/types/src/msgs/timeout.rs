use interchain_core_host_types::identifiers::Sequence;
use interchain_primitives::Signer;

use crate::commitment::CommitmentProofBytes;
use crate::error::PacketError;
use crate::packet::Packet;
use crate::Height;

pub const TIMEOUT_TYPE_URL: &str = "/interchain.core.channel.v1.MsgTimeout";

/// Proves that a packet was never received before its timeout.
///
/// On unordered channels the proof shows absence of the packet receipt. On
/// ordered channels it shows the counterparty's `next_seq_recv_on_b`, which
/// must not have moved past the packet.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgTimeout {
    pub packet: Packet,
    pub next_seq_recv_on_b: Sequence,
    pub proof_unreceived_on_b: CommitmentProofBytes,
    pub proof_height_on_b: Height,
    pub signer: Signer,
}

impl MsgTimeout {
    pub fn validate_basic(&self) -> Result<(), PacketError> {
        self.packet.validate_basic()?;

        if self.signer.is_empty() {
            return Err(PacketError::EmptySigner);
        }

        Ok(())
    }
}
