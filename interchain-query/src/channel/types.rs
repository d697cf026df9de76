//! Request and response types of the channel and packet queries.

use interchain_core_channel::store::{PageRequest, PageResponse};
use interchain_core_channel::types::channel::ChannelEnd;
use interchain_core_channel::types::packet::PacketState;
use interchain_core_channel::types::Height;
use interchain_core_host_types::identifiers::{ChannelId, Sequence};
use interchain_primitives::prelude::*;

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct QueryChannelRequest {
    pub port_id: String,
    pub channel_id: String,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryChannelResponse {
    pub channel: ChannelEnd,
    pub height: Height,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdentifiedChannelEnd {
    pub channel_id: ChannelId,
    pub channel_end: ChannelEnd,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryChannelsResponse {
    pub channels: Vec<IdentifiedChannelEnd>,
    pub height: Height,
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct QueryNextSequenceSendRequest {
    pub port_id: String,
    pub channel_id: String,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryNextSequenceSendResponse {
    pub next_sequence_send: Sequence,
    pub height: Height,
}

/// Names a single packet of a channel.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct QueryPacketRequest {
    pub port_id: String,
    pub channel_id: String,
    pub sequence: u64,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryPacketCommitmentResponse {
    pub commitment: Vec<u8>,
    pub height: Height,
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryPacketCommitmentsRequest {
    pub port_id: String,
    pub channel_id: String,
    pub pagination: Option<PageRequest>,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryPacketCommitmentsResponse {
    pub commitments: Vec<PacketState>,
    pub pagination: PageResponse,
    pub height: Height,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryPacketAcknowledgementResponse {
    pub acknowledgement: Vec<u8>,
    pub height: Height,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryPacketReceiptResponse {
    pub received: bool,
    pub height: Height,
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct QueryUnreceivedPacketsRequest {
    pub port_id: String,
    pub channel_id: String,
    pub packet_commitment_sequences: Vec<u64>,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryUnreceivedPacketsResponse {
    pub sequences: Vec<Sequence>,
    pub height: Height,
}
