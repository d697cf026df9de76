//! Packet commitment store operations.
//!
//! These functions are the only writers of commitments, receipts and
//! acknowledgements. They turn a second write to an occupied slot into a
//! `Duplicate*` error, which the error taxonomy treats as fatal: the
//! lifecycle handlers reject replays before they get here.

use interchain_core_channel_types::acknowledgement::Acknowledgement;
use interchain_core_channel_types::commitment::{
    compute_ack_commitment, compute_packet_commitment, AcknowledgementCommitment,
    PacketCommitment,
};
use interchain_core_channel_types::error::PacketError;
use interchain_core_channel_types::packet::{Packet, PacketState, Receipt};
use interchain_core_handler_types::error::ContextError;
use interchain_core_host_types::identifiers::{ChannelId, Sequence};
use interchain_core_host_types::path::{AckPath, ChannelEndPath, CommitmentPath, ReceiptPath};
use interchain_primitives::prelude::*;

use crate::context::{ExecutionContext, ValidationContext};

/// Page size used when a request leaves `limit` at zero.
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// Cursor-based pagination over a channel's key space.
///
/// `key` is the full store key of the last entry of the previous page and is
/// exclusive. `offset` is only honoured when `key` is unset.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub key: Option<Vec<u8>>,
    pub offset: u64,
    pub limit: u64,
    pub count_total: bool,
}

impl PageRequest {
    pub fn all() -> Self {
        Self {
            limit: u64::MAX,
            ..Default::default()
        }
    }

    pub fn effective_limit(&self) -> u64 {
        if self.limit == 0 {
            DEFAULT_PAGE_LIMIT
        } else {
            self.limit
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageResponse {
    /// Cursor for the next page; `None` on the last page.
    pub next_key: Option<Vec<u8>>,
    /// Total number of entries, when requested.
    pub total: Option<u64>,
}

/// Slices one page out of `entries`, which must be sorted by key.
pub fn paginate<T>(entries: Vec<(Vec<u8>, T)>, page: &PageRequest) -> (Vec<(Vec<u8>, T)>, PageResponse) {
    let total = page.count_total.then_some(entries.len() as u64);
    let limit = usize::try_from(page.effective_limit()).unwrap_or(usize::MAX);

    let remaining: Vec<_> = match &page.key {
        Some(cursor) => entries
            .into_iter()
            .skip_while(|(key, _)| key.as_slice() <= cursor.as_slice())
            .collect(),
        None => entries
            .into_iter()
            .skip(usize::try_from(page.offset).unwrap_or(usize::MAX))
            .collect(),
    };

    let has_more = remaining.len() > limit;
    let items: Vec<_> = remaining.into_iter().take(limit).collect();
    let next_key = if has_more {
        items.last().map(|(key, _)| key.clone())
    } else {
        None
    };

    (items, PageResponse { next_key, total })
}

/// Writes the commitment of `packet` under its source channel and sequence.
pub fn set_commitment<Ctx>(ctx: &mut Ctx, packet: &Packet) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    let commitment_path = CommitmentPath::new(&packet.chan_id_on_a, packet.seq_on_a);
    if ctx.get_packet_commitment(&commitment_path)?.is_some() {
        return Err(PacketError::DuplicateCommitment {
            sequence: packet.seq_on_a,
        }
        .into());
    }

    let commitment = compute_packet_commitment(
        &packet.data,
        &packet.timeout_height_on_b,
        &packet.timeout_timestamp_on_b,
    );
    ctx.store_packet_commitment(&commitment_path, commitment)
}

pub fn get_commitment<Ctx>(
    ctx: &Ctx,
    channel_id: &ChannelId,
    sequence: Sequence,
) -> Result<Option<PacketCommitment>, ContextError>
where
    Ctx: ValidationContext,
{
    ctx.get_packet_commitment(&CommitmentPath::new(channel_id, sequence))
}

/// Callers must only delete a commitment after a verified acknowledgement or
/// a verified timeout.
pub fn delete_commitment<Ctx>(
    ctx: &mut Ctx,
    channel_id: &ChannelId,
    sequence: Sequence,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    ctx.delete_packet_commitment(&CommitmentPath::new(channel_id, sequence))
}

pub fn has_receipt<Ctx>(
    ctx: &Ctx,
    channel_id: &ChannelId,
    sequence: Sequence,
) -> Result<bool, ContextError>
where
    Ctx: ValidationContext,
{
    Ok(ctx
        .get_packet_receipt(&ReceiptPath::new(channel_id, sequence))?
        .is_some())
}

/// Receipts are write-once and never deleted.
pub fn set_receipt<Ctx>(
    ctx: &mut Ctx,
    channel_id: &ChannelId,
    sequence: Sequence,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    if has_receipt(ctx, channel_id, sequence)? {
        return Err(PacketError::DuplicateReceipt { sequence }.into());
    }
    ctx.store_packet_receipt(&ReceiptPath::new(channel_id, sequence), Receipt::Ok)
}

pub fn get_acknowledgement<Ctx>(
    ctx: &Ctx,
    channel_id: &ChannelId,
    sequence: Sequence,
) -> Result<Option<AcknowledgementCommitment>, ContextError>
where
    Ctx: ValidationContext,
{
    ctx.get_packet_acknowledgement(&AckPath::new(channel_id, sequence))
}

pub fn has_acknowledgement<Ctx>(
    ctx: &Ctx,
    channel_id: &ChannelId,
    sequence: Sequence,
) -> Result<bool, ContextError>
where
    Ctx: ValidationContext,
{
    Ok(get_acknowledgement(ctx, channel_id, sequence)?.is_some())
}

/// Stores the commitment of `ack`; acknowledgements are write-once.
pub fn set_acknowledgement<Ctx>(
    ctx: &mut Ctx,
    channel_id: &ChannelId,
    sequence: Sequence,
    ack: &Acknowledgement,
) -> Result<(), ContextError>
where
    Ctx: ExecutionContext,
{
    if has_acknowledgement(ctx, channel_id, sequence)? {
        return Err(PacketError::DuplicateAcknowledgement { sequence }.into());
    }
    ctx.store_packet_acknowledgement(
        &AckPath::new(channel_id, sequence),
        compute_ack_commitment(ack),
    )
}

/// Returns the candidates for which no receipt exists, in the given order.
/// Sequence `0` is never valid and fails the whole request.
pub fn list_unreceived_packets<Ctx>(
    ctx: &Ctx,
    channel_id: &ChannelId,
    candidates: &[Sequence],
) -> Result<Vec<Sequence>, ContextError>
where
    Ctx: ValidationContext,
{
    if candidates.iter().any(Sequence::is_zero) {
        return Err(PacketError::ZeroPacketSequence.into());
    }

    let mut unreceived = Vec::new();
    for sequence in candidates {
        if !has_receipt(ctx, channel_id, *sequence)? {
            unreceived.push(*sequence);
        }
    }
    Ok(unreceived)
}

/// Enumerates one page of the commitments currently held for `channel_id`,
/// in sequence order.
pub fn list_unacknowledged_commitments<Ctx>(
    ctx: &Ctx,
    channel_id: &ChannelId,
    page: &PageRequest,
) -> Result<(Vec<PacketState>, PageResponse), ContextError>
where
    Ctx: ValidationContext,
{
    let channel_end = ctx.channel_end(&ChannelEndPath::new(channel_id))?;
    let entries = ctx.packet_commitment_entries(channel_id)?;
    let (items, response) = paginate(entries, page);

    let states = items
        .into_iter()
        .map(|(key, commitment)| {
            let path = CommitmentPath::from_key(channel_id, &key).map_err(PacketError::from)?;
            Ok(PacketState {
                port_id: channel_end.port_id.clone(),
                chan_id: channel_id.clone(),
                seq: path.sequence,
                data: commitment.into_vec(),
            })
        })
        .collect::<Result<Vec<_>, ContextError>>()?;

    Ok((states, response))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn entries(n: u8) -> Vec<(Vec<u8>, u8)> {
        (1..=n).map(|i| (vec![i], i)).collect()
    }

    #[rstest]
    #[case(PageRequest { limit: 2, ..Default::default() }, vec![1, 2], Some(vec![2]))]
    #[case(PageRequest { key: Some(vec![2]), limit: 2, ..Default::default() }, vec![3, 4], Some(vec![4]))]
    #[case(PageRequest { key: Some(vec![4]), limit: 2, ..Default::default() }, vec![5], None)]
    #[case(PageRequest { offset: 3, limit: 10, ..Default::default() }, vec![4, 5], None)]
    #[case(PageRequest::default(), vec![1, 2, 3, 4, 5], None)]
    fn pages_follow_the_cursor(
        #[case] page: PageRequest,
        #[case] expected: Vec<u8>,
        #[case] next_key: Option<Vec<u8>>,
    ) {
        let (items, response) = paginate(entries(5), &page);
        assert_eq!(items.into_iter().map(|(_, v)| v).collect::<Vec<_>>(), expected);
        assert_eq!(response.next_key, next_key);
        assert_eq!(response.total, None);
    }

    #[test]
    fn total_counts_every_entry() {
        let page = PageRequest {
            limit: 1,
            count_total: true,
            ..Default::default()
        };
        let (_, response) = paginate(entries(3), &page);
        assert_eq!(response.total, Some(3));
    }
}
