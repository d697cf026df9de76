//! Defines the store paths of the packet-relay core.
//!
//! Every path has two renderings. `Display` gives a readable form used in logs
//! and errors. [`Path::to_key`] gives the byte key a host writes under and a
//! counterparty proves against:
//!
//! ```text
//! channel_id ‖ tag                  (channel end, next-sequence counters)
//! channel_id ‖ tag ‖ sequence (BE)  (commitment, receipt, acknowledgement)
//! ```
//!
//! Tags sit below every legal identifier character, so the key prefix of
//! `channel-1` never matches keys of `channel-10`, and iterating a
//! `channel_id ‖ tag` prefix visits sequences in numeric order.

use derive_more::{Display, From};
use interchain_primitives::prelude::*;
use interchain_primitives::DecodingError;

use crate::identifiers::{ChannelId, Sequence};

pub const CHANNEL_PREFIX: &str = "channels";
pub const CHANNEL_END_PREFIX: &str = "channelEnds";
pub const SEQUENCE_PREFIX: &str = "sequences";
pub const NEXT_SEQ_SEND_PREFIX: &str = "nextSequenceSend";
pub const NEXT_SEQ_RECV_PREFIX: &str = "nextSequenceRecv";
pub const NEXT_SEQ_ACK_PREFIX: &str = "nextSequenceAck";
pub const PACKET_COMMITMENT_PREFIX: &str = "commitments";
pub const PACKET_ACK_PREFIX: &str = "acks";
pub const PACKET_RECEIPT_PREFIX: &str = "receipts";

/// Discriminates the kind of value stored under a channel-scoped key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KeyTag {
    Commitment = 0x01,
    Receipt = 0x02,
    Ack = 0x03,
    NextSequenceSend = 0x04,
    NextSequenceRecv = 0x05,
    NextSequenceAck = 0x06,
    ChannelEnd = 0x07,
}

impl KeyTag {
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

fn channel_key(channel_id: &ChannelId, tag: KeyTag) -> Vec<u8> {
    let mut key = Vec::with_capacity(channel_id.as_bytes().len() + 9);
    key.extend_from_slice(channel_id.as_bytes());
    key.push(tag.as_byte());
    key
}

fn packet_key(channel_id: &ChannelId, tag: KeyTag, sequence: Sequence) -> Vec<u8> {
    let mut key = channel_key(channel_id, tag);
    key.extend_from_slice(&sequence.to_vec());
    key
}

/// Decodes the sequence out of a key that starts with `prefix`.
///
/// Rejects keys with a different prefix, a suffix that is not exactly 8
/// bytes, and sequence `0`, which is never allocated.
pub fn sequence_from_key(prefix: &[u8], key: &[u8]) -> Result<Sequence, DecodingError> {
    let suffix = key
        .strip_prefix(prefix)
        .ok_or_else(|| DecodingError::InvalidKey {
            description: format!("key {key:?} does not start with prefix {prefix:?}"),
        })?;

    let sequence = Sequence::from_be_slice(suffix).map_err(|e| DecodingError::InvalidKey {
        description: e.to_string(),
    })?;

    if sequence.is_zero() {
        return Err(DecodingError::InvalidKey {
            description: "packet sequence cannot be 0".to_string(),
        });
    }

    Ok(sequence)
}

/// The Path enum abstracts out the different sub-paths.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, From, Display)]
pub enum Path {
    ChannelEnd(ChannelEndPath),
    SeqSend(SeqSendPath),
    SeqRecv(SeqRecvPath),
    SeqAck(SeqAckPath),
    Commitment(CommitmentPath),
    Ack(AckPath),
    Receipt(ReceiptPath),
}

impl Path {
    /// Returns the byte key this path is stored and proven under.
    pub fn to_key(&self) -> Vec<u8> {
        match self {
            Path::ChannelEnd(p) => p.to_key(),
            Path::SeqSend(p) => p.to_key(),
            Path::SeqRecv(p) => p.to_key(),
            Path::SeqAck(p) => p.to_key(),
            Path::Commitment(p) => p.to_key(),
            Path::Ack(p) => p.to_key(),
            Path::Receipt(p) => p.to_key(),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{CHANNEL_END_PREFIX}/{CHANNEL_PREFIX}/{_0}")]
pub struct ChannelEndPath(pub ChannelId);

impl ChannelEndPath {
    pub fn new(channel_id: &ChannelId) -> ChannelEndPath {
        ChannelEndPath(channel_id.clone())
    }

    pub fn to_key(&self) -> Vec<u8> {
        channel_key(&self.0, KeyTag::ChannelEnd)
    }

    /// The key prefix shared by every packet commitment of this channel.
    pub fn commitments_prefix(&self) -> Vec<u8> {
        channel_key(&self.0, KeyTag::Commitment)
    }

    /// The key prefix shared by every packet receipt of this channel.
    pub fn receipts_prefix(&self) -> Vec<u8> {
        channel_key(&self.0, KeyTag::Receipt)
    }

    /// The key prefix shared by every packet acknowledgement of this channel.
    pub fn acks_prefix(&self) -> Vec<u8> {
        channel_key(&self.0, KeyTag::Ack)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{NEXT_SEQ_SEND_PREFIX}/{CHANNEL_PREFIX}/{_0}")]
pub struct SeqSendPath(pub ChannelId);

impl SeqSendPath {
    pub fn new(channel_id: &ChannelId) -> SeqSendPath {
        SeqSendPath(channel_id.clone())
    }

    pub fn to_key(&self) -> Vec<u8> {
        channel_key(&self.0, KeyTag::NextSequenceSend)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{NEXT_SEQ_RECV_PREFIX}/{CHANNEL_PREFIX}/{_0}")]
pub struct SeqRecvPath(pub ChannelId);

impl SeqRecvPath {
    pub fn new(channel_id: &ChannelId) -> SeqRecvPath {
        SeqRecvPath(channel_id.clone())
    }

    pub fn to_key(&self) -> Vec<u8> {
        channel_key(&self.0, KeyTag::NextSequenceRecv)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{NEXT_SEQ_ACK_PREFIX}/{CHANNEL_PREFIX}/{_0}")]
pub struct SeqAckPath(pub ChannelId);

impl SeqAckPath {
    pub fn new(channel_id: &ChannelId) -> SeqAckPath {
        SeqAckPath(channel_id.clone())
    }

    pub fn to_key(&self) -> Vec<u8> {
        channel_key(&self.0, KeyTag::NextSequenceAck)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(
    fmt = "{PACKET_COMMITMENT_PREFIX}/{CHANNEL_PREFIX}/{channel_id}/{SEQUENCE_PREFIX}/{sequence}"
)]
pub struct CommitmentPath {
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl CommitmentPath {
    pub fn new(channel_id: &ChannelId, sequence: Sequence) -> CommitmentPath {
        CommitmentPath {
            channel_id: channel_id.clone(),
            sequence,
        }
    }

    pub fn to_key(&self) -> Vec<u8> {
        packet_key(&self.channel_id, KeyTag::Commitment, self.sequence)
    }

    /// Rebuilds a commitment path from a raw store key of `channel_id`.
    pub fn from_key(channel_id: &ChannelId, key: &[u8]) -> Result<Self, DecodingError> {
        let prefix = ChannelEndPath::new(channel_id).commitments_prefix();
        let sequence = sequence_from_key(&prefix, key)?;
        Ok(Self::new(channel_id, sequence))
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{PACKET_ACK_PREFIX}/{CHANNEL_PREFIX}/{channel_id}/{SEQUENCE_PREFIX}/{sequence}")]
pub struct AckPath {
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl AckPath {
    pub fn new(channel_id: &ChannelId, sequence: Sequence) -> AckPath {
        AckPath {
            channel_id: channel_id.clone(),
            sequence,
        }
    }

    pub fn to_key(&self) -> Vec<u8> {
        packet_key(&self.channel_id, KeyTag::Ack, self.sequence)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(
    fmt = "{PACKET_RECEIPT_PREFIX}/{CHANNEL_PREFIX}/{channel_id}/{SEQUENCE_PREFIX}/{sequence}"
)]
pub struct ReceiptPath {
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl ReceiptPath {
    pub fn new(channel_id: &ChannelId, sequence: Sequence) -> ReceiptPath {
        ReceiptPath {
            channel_id: channel_id.clone(),
            sequence,
        }
    }

    pub fn to_key(&self) -> Vec<u8> {
        packet_key(&self.channel_id, KeyTag::Receipt, self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn chan(n: u64) -> ChannelId {
        ChannelId::new(n)
    }

    #[rstest]
    #[case(Path::ChannelEnd(ChannelEndPath::new(&chan(0))), "channelEnds/channels/channel-0")]
    #[case(Path::SeqSend(SeqSendPath::new(&chan(0))), "nextSequenceSend/channels/channel-0")]
    #[case(Path::SeqRecv(SeqRecvPath::new(&chan(0))), "nextSequenceRecv/channels/channel-0")]
    #[case(Path::SeqAck(SeqAckPath::new(&chan(0))), "nextSequenceAck/channels/channel-0")]
    #[case(
        Path::Commitment(CommitmentPath::new(&chan(0), 1.into())),
        "commitments/channels/channel-0/sequences/1"
    )]
    #[case(
        Path::Ack(AckPath::new(&chan(0), 1.into())),
        "acks/channels/channel-0/sequences/1"
    )]
    #[case(
        Path::Receipt(ReceiptPath::new(&chan(0), 1.into())),
        "receipts/channels/channel-0/sequences/1"
    )]
    fn path_display(#[case] path: Path, #[case] expected: &str) {
        assert_eq!(path.to_string(), expected);
    }

    #[test]
    fn commitment_key_layout() {
        let key = CommitmentPath::new(&chan(7), 258.into()).to_key();
        let mut expected = b"channel-7".to_vec();
        expected.push(0x01);
        expected.extend_from_slice(&[0, 0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(key, expected);
    }

    #[test]
    fn distinct_kinds_never_collide() {
        let seq = Sequence::from(1);
        let keys = [
            CommitmentPath::new(&chan(1), seq).to_key(),
            ReceiptPath::new(&chan(1), seq).to_key(),
            AckPath::new(&chan(1), seq).to_key(),
            SeqSendPath::new(&chan(1)).to_key(),
            SeqRecvPath::new(&chan(1)).to_key(),
            SeqAckPath::new(&chan(1)).to_key(),
            ChannelEndPath::new(&chan(1)).to_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn channel_prefix_does_not_capture_longer_ids() {
        let prefix = ChannelEndPath::new(&chan(1)).commitments_prefix();
        let other = CommitmentPath::new(&chan(10), 1.into()).to_key();
        assert!(!other.starts_with(&prefix));
        assert!(CommitmentPath::from_key(&chan(1), &other).is_err());
    }

    #[test]
    fn commitment_key_roundtrip_rejects_zero() {
        let path = CommitmentPath::new(&chan(3), 42.into());
        assert_eq!(CommitmentPath::from_key(&chan(3), &path.to_key()).unwrap(), path);

        let zero = CommitmentPath::new(&chan(3), 0.into()).to_key();
        assert!(CommitmentPath::from_key(&chan(3), &zero).is_err());
    }
}
