//! Provides utility functions for querying channel and packet state.

mod types;

pub use types::*;

use core::str::FromStr;

use interchain_core_channel::context::ValidationContext;
use interchain_core_channel::store;
use interchain_core_channel::types::channel::ChannelEnd;
use interchain_core_host_types::identifiers::{ChannelId, PortId, Sequence};
use interchain_core_host_types::path::{ChannelEndPath, SeqSendPath};
use interchain_primitives::prelude::*;

use crate::context::QueryContext;
use crate::error::QueryError;

/// Queries for a specific channel by the given channel and port ids.
pub fn query_channel<I>(
    ibc_ctx: &I,
    request: &QueryChannelRequest,
) -> Result<QueryChannelResponse, QueryError>
where
    I: ValidationContext,
{
    let (_, _, channel) = channel_of(ibc_ctx, &request.port_id, &request.channel_id)?;

    Ok(QueryChannelResponse {
        channel,
        height: ibc_ctx.host_height()?,
    })
}

/// Queries for all existing channels.
pub fn query_channels<I>(ibc_ctx: &I) -> Result<QueryChannelsResponse, QueryError>
where
    I: QueryContext,
{
    let channels = ibc_ctx
        .channel_ends()?
        .into_iter()
        .map(|(channel_id, channel_end)| IdentifiedChannelEnd {
            channel_id,
            channel_end,
        })
        .collect();

    Ok(QueryChannelsResponse {
        channels,
        height: ibc_ctx.host_height()?,
    })
}

/// Queries for the sequence the next packet sent on a channel will carry.
pub fn query_next_sequence_send<I>(
    ibc_ctx: &I,
    request: &QueryNextSequenceSendRequest,
) -> Result<QueryNextSequenceSendResponse, QueryError>
where
    I: ValidationContext,
{
    let (_, channel_id, _) = channel_of(ibc_ctx, &request.port_id, &request.channel_id)?;

    let next_sequence_send = ibc_ctx.get_next_sequence_send(&SeqSendPath::new(&channel_id))?;

    Ok(QueryNextSequenceSendResponse {
        next_sequence_send,
        height: ibc_ctx.host_height()?,
    })
}

/// Queries for the commitment of a packet that was sent and not yet
/// acknowledged or timed out.
pub fn query_packet_commitment<I>(
    ibc_ctx: &I,
    request: &QueryPacketRequest,
) -> Result<QueryPacketCommitmentResponse, QueryError>
where
    I: ValidationContext,
{
    let (channel_id, sequence) = packet_of(ibc_ctx, request)?;

    let commitment = store::get_commitment(ibc_ctx, &channel_id, sequence)?.ok_or_else(|| {
        QueryError::not_found(format!(
            "packet commitment for sequence {sequence} on channel {channel_id}"
        ))
    })?;

    Ok(QueryPacketCommitmentResponse {
        commitment: commitment.into_vec(),
        height: ibc_ctx.host_height()?,
    })
}

/// Queries for one page of the commitments held for a channel.
pub fn query_packet_commitments<I>(
    ibc_ctx: &I,
    request: &QueryPacketCommitmentsRequest,
) -> Result<QueryPacketCommitmentsResponse, QueryError>
where
    I: ValidationContext,
{
    let (_, channel_id, _) = channel_of(ibc_ctx, &request.port_id, &request.channel_id)?;

    let page = request.pagination.clone().unwrap_or_default();
    let (commitments, pagination) =
        store::list_unacknowledged_commitments(ibc_ctx, &channel_id, &page)?;

    Ok(QueryPacketCommitmentsResponse {
        commitments,
        pagination,
        height: ibc_ctx.host_height()?,
    })
}

/// Queries for the acknowledgement commitment written when a packet was received.
pub fn query_packet_acknowledgement<I>(
    ibc_ctx: &I,
    request: &QueryPacketRequest,
) -> Result<QueryPacketAcknowledgementResponse, QueryError>
where
    I: ValidationContext,
{
    let (channel_id, sequence) = packet_of(ibc_ctx, request)?;

    let acknowledgement = store::get_acknowledgement(ibc_ctx, &channel_id, sequence)?
        .ok_or_else(|| {
            QueryError::not_found(format!(
                "packet acknowledgement for sequence {sequence} on channel {channel_id}"
            ))
        })?;

    Ok(QueryPacketAcknowledgementResponse {
        acknowledgement: acknowledgement.into_vec(),
        height: ibc_ctx.host_height()?,
    })
}

/// Queries whether a packet has been received. A missing receipt is a
/// regular answer, not an error.
pub fn query_packet_receipt<I>(
    ibc_ctx: &I,
    request: &QueryPacketRequest,
) -> Result<QueryPacketReceiptResponse, QueryError>
where
    I: ValidationContext,
{
    let (channel_id, sequence) = packet_of(ibc_ctx, request)?;

    Ok(QueryPacketReceiptResponse {
        received: store::has_receipt(ibc_ctx, &channel_id, sequence)?,
        height: ibc_ctx.host_height()?,
    })
}

/// Filters the given sequences down to those the channel has no receipt for.
pub fn query_unreceived_packets<I>(
    ibc_ctx: &I,
    request: &QueryUnreceivedPacketsRequest,
) -> Result<QueryUnreceivedPacketsResponse, QueryError>
where
    I: ValidationContext,
{
    let port_id = PortId::from_str(&request.port_id)?;
    let channel_id = ChannelId::from_str(&request.channel_id)?;
    let candidates: Vec<Sequence> = request
        .packet_commitment_sequences
        .iter()
        .map(|seq| Sequence::from(*seq))
        .collect();
    if candidates.iter().any(Sequence::is_zero) {
        return Err(QueryError::invalid_argument("packet sequence cannot be 0"));
    }

    lookup_channel(ibc_ctx, &port_id, &channel_id)?;

    let sequences = store::list_unreceived_packets(ibc_ctx, &channel_id, &candidates)?;

    Ok(QueryUnreceivedPacketsResponse {
        sequences,
        height: ibc_ctx.host_height()?,
    })
}

/// Parses the identifiers of a request and loads the channel they name.
fn channel_of<I>(
    ibc_ctx: &I,
    port_id: &str,
    channel_id: &str,
) -> Result<(PortId, ChannelId, ChannelEnd), QueryError>
where
    I: ValidationContext,
{
    let port_id = PortId::from_str(port_id)?;
    let channel_id = ChannelId::from_str(channel_id)?;
    let channel_end = lookup_channel(ibc_ctx, &port_id, &channel_id)?;

    Ok((port_id, channel_id, channel_end))
}

/// Validates a single-packet request in order: identifiers, sequence, channel.
fn packet_of<I>(
    ibc_ctx: &I,
    request: &QueryPacketRequest,
) -> Result<(ChannelId, Sequence), QueryError>
where
    I: ValidationContext,
{
    let port_id = PortId::from_str(&request.port_id)?;
    let channel_id = ChannelId::from_str(&request.channel_id)?;

    let sequence = Sequence::from(request.sequence);
    if sequence.is_zero() {
        return Err(QueryError::invalid_argument("packet sequence cannot be 0"));
    }

    lookup_channel(ibc_ctx, &port_id, &channel_id)?;

    Ok((channel_id, sequence))
}

/// A channel stored under `channel_id` but bound to another port is reported
/// as missing.
fn lookup_channel<I>(
    ibc_ctx: &I,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> Result<ChannelEnd, QueryError>
where
    I: ValidationContext,
{
    let channel_end = ibc_ctx.channel_end(&ChannelEndPath::new(channel_id))?;

    if &channel_end.port_id != port_id {
        tracing::debug!(%port_id, %channel_id, bound_port = %channel_end.port_id, "channel queried under the wrong port");
        return Err(QueryError::not_found(format!(
            "channel {channel_id} on port {port_id}"
        )));
    }

    Ok(channel_end)
}
