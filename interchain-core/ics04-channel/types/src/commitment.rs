//! Packet and acknowledgement commitments, and the opaque proofs that
//! attest to them.

use core::fmt::{Display, Error as FmtError, Formatter};

use interchain_primitives::prelude::*;
use subtle_encoding::{Encoding, Hex};

use crate::acknowledgement::Acknowledgement;
use crate::error::ClientError;
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};

/// Packet commitment
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PacketCommitment(Vec<u8>);

impl PacketCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for PacketCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for PacketCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Display for PacketCommitment {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write_hex(f, &self.0)
    }
}

/// Acknowledgement commitment to be stored
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcknowledgementCommitment(Vec<u8>);

impl AcknowledgementCommitment {
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for AcknowledgementCommitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for AcknowledgementCommitment {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Display for AcknowledgementCommitment {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write_hex(f, &self.0)
    }
}

/// Opaque proof bytes produced by the counterparty's store and checked by a
/// light client. Proofs are never empty.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, PartialEq, Eq)]
pub struct CommitmentProofBytes {
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "interchain_primitives::serializers::ser_hex_upper")
    )]
    bytes: Vec<u8>,
}

impl core::fmt::Debug for CommitmentProofBytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("CommitmentProofBytes(")?;
        write_hex(f, &self.bytes)?;
        f.write_str(")")
    }
}

impl AsRef<[u8]> for CommitmentProofBytes {
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

impl TryFrom<Vec<u8>> for CommitmentProofBytes {
    type Error = ClientError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            Err(ClientError::EmptyProof)
        } else {
            Ok(Self { bytes })
        }
    }
}

impl From<CommitmentProofBytes> for Vec<u8> {
    fn from(p: CommitmentProofBytes) -> Vec<u8> {
        p.bytes
    }
}

fn write_hex(f: &mut Formatter<'_>, bytes: &[u8]) -> Result<(), FmtError> {
    let encoded = Hex::upper_case().encode(bytes);
    f.write_str(core::str::from_utf8(&encoded).map_err(|_| FmtError)?)
}

/// Computes the commitment for a packet.
///
/// An unset timeout height is committed as `{0, 0}` and an unset timeout
/// timestamp as `0`.
pub fn compute_packet_commitment(
    packet_data: &[u8],
    timeout_height: &TimeoutHeight,
    timeout_timestamp: &TimeoutTimestamp,
) -> PacketCommitment {
    let mut hash_input = [0; 8 * 3 + 32];

    hash_input[..8].copy_from_slice(&timeout_timestamp.nanoseconds().to_be_bytes());
    hash_input[8..16].copy_from_slice(&timeout_height.commitment_revision_number().to_be_bytes());
    hash_input[16..24].copy_from_slice(&timeout_height.commitment_revision_height().to_be_bytes());
    hash_input[24..].copy_from_slice(&hash(packet_data));

    hash(&hash_input).to_vec().into()
}

/// Computes the commitment for an acknowledgement.
pub fn compute_ack_commitment(ack: &Acknowledgement) -> AcknowledgementCommitment {
    hash(ack.as_ref()).to_vec().into()
}

fn hash(data: &[u8]) -> [u8; 32] {
    use sha2::Digest;

    sha2::Sha256::digest(data).into()
}
