//! Defines the packet type and the packet receipt.

use interchain_core_host_types::identifiers::{ChannelId, PortId, Sequence};
use interchain_primitives::prelude::*;
use interchain_primitives::Timestamp;

use crate::error::PacketError;
use crate::timeout::{TimeoutHeight, TimeoutTimestamp};
use crate::Height;

/// Packet receipt, written when a packet is received over an unordered
/// channel. Only the `Ok` marker is ever stored.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Receipt {
    Ok,
}

impl Receipt {
    const OK_BYTE: u8 = 0x01;

    pub fn to_vec(&self) -> Vec<u8> {
        match self {
            Self::Ok => vec![Self::OK_BYTE],
        }
    }
}

impl core::fmt::Display for Receipt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Receipt::Ok => write!(f, "Ok"),
        }
    }
}

/// The packet type; this is what applications send to one another.
///
/// Each application defines the structure of the `data` field.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Hash, PartialEq, Eq)]
pub struct Packet {
    pub seq_on_a: Sequence,
    pub port_id_on_a: PortId,
    pub chan_id_on_a: ChannelId,
    pub port_id_on_b: PortId,
    pub chan_id_on_b: ChannelId,
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "interchain_primitives::serializers::ser_hex_upper")
    )]
    pub data: Vec<u8>,
    pub timeout_height_on_b: TimeoutHeight,
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

struct PacketData<'a>(&'a [u8]);

impl<'a> core::fmt::Debug for PacketData<'a> {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(formatter, "{:?}", self.0)
    }
}

impl core::fmt::Debug for Packet {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        formatter
            .debug_struct("Packet")
            .field("sequence", &self.seq_on_a)
            .field("source_port", &self.port_id_on_a)
            .field("source_channel", &self.chan_id_on_a)
            .field("destination_port", &self.port_id_on_b)
            .field("destination_channel", &self.chan_id_on_b)
            .field("data", &PacketData(&self.data))
            .field("timeout_height", &self.timeout_height_on_b)
            .field("timeout_timestamp", &self.timeout_timestamp_on_b)
            .finish()
    }
}

impl Packet {
    /// Checks whether the packet has timed out relative to the given state of
    /// the destination chain. A packet with neither timeout set never times
    /// out.
    pub fn timed_out(&self, dst_chain_ts: &Timestamp, dst_chain_height: Height) -> bool {
        self.timeout_height_on_b.has_expired(dst_chain_height)
            || self.timeout_timestamp_on_b.has_expired(dst_chain_ts)
    }

    /// Stateless checks shared by every message carrying a packet.
    pub fn validate_basic(&self) -> Result<(), PacketError> {
        if self.seq_on_a.is_zero() {
            return Err(PacketError::ZeroPacketSequence);
        }

        if self.data.is_empty() {
            return Err(PacketError::EmptyPacketData);
        }

        Ok(())
    }
}

/// Custom display output to omit the packet data
impl core::fmt::Display for Packet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "seq:{}, path:{}/{}->{}/{}, toh:{}, tos:{}",
            self.seq_on_a,
            self.port_id_on_a,
            self.chan_id_on_a,
            self.port_id_on_b,
            self.chan_id_on_b,
            self.timeout_height_on_b,
            self.timeout_timestamp_on_b
        )
    }
}

/// Identifies a stored packet value (commitment or acknowledgement) in
/// query results.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct PacketState {
    pub port_id: PortId,
    pub chan_id: ChannelId,
    pub seq: Sequence,
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "interchain_primitives::serializers::ser_hex_upper")
    )]
    pub data: Vec<u8>,
}

impl core::fmt::Display for PacketState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "seq:{}, path:{}/{}, data:{}",
            self.seq,
            self.port_id,
            self.chan_id,
            interchain_primitives::utils::PrettySlice(&self.data)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(timeout_height: TimeoutHeight, timeout_timestamp: TimeoutTimestamp) -> Packet {
        Packet {
            seq_on_a: Sequence::from(1),
            port_id_on_a: PortId::transfer(),
            chan_id_on_a: ChannelId::new(0),
            port_id_on_b: PortId::transfer(),
            chan_id_on_b: ChannelId::new(1),
            data: b"payload".to_vec(),
            timeout_height_on_b: timeout_height,
            timeout_timestamp_on_b: timeout_timestamp,
        }
    }

    #[test]
    fn timed_out_on_either_bound() {
        let ts = Timestamp::from_nanoseconds(100);
        let height = Height::new(0, 10).unwrap();

        let by_height = packet(Height::new(0, 10).unwrap().into(), TimeoutTimestamp::Never);
        assert!(by_height.timed_out(&ts, height));

        let by_time = packet(TimeoutHeight::Never, TimeoutTimestamp::from(100));
        assert!(by_time.timed_out(&ts, height));

        let neither = packet(TimeoutHeight::Never, TimeoutTimestamp::Never);
        assert!(!neither.timed_out(&Timestamp::from_nanoseconds(u64::MAX), height));
    }

    #[test]
    fn zero_sequence_and_empty_data_are_rejected() {
        let mut pkt = packet(TimeoutHeight::Never, TimeoutTimestamp::Never);
        assert!(pkt.validate_basic().is_ok());

        pkt.seq_on_a = Sequence::from(0);
        assert!(matches!(
            pkt.validate_basic(),
            Err(PacketError::ZeroPacketSequence)
        ));

        pkt.seq_on_a = Sequence::from(1);
        pkt.data.clear();
        assert!(matches!(
            pkt.validate_basic(),
            Err(PacketError::EmptyPacketData)
        ));
    }
}
