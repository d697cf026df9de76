use interchain_core_channel::store;
use interchain_core_channel::types::acknowledgement::{
    Acknowledgement, AcknowledgementStatus, StatusValue,
};
use interchain_core_channel::types::channel::Order;
use interchain_core_channel::types::error::PacketError;
use interchain_core_handler_types::error::{ContextError, ErrorKind};
use interchain_core_handler_types::events::IbcEvent;
use interchain_core_host_types::identifiers::{ChannelId, Sequence};
use interchain_testkit::relayer::context::RelayerContext;
use interchain_testkit::relayer::error::RelayerError;
use test_log::test;

use crate::{amount, msg_transfer, success_ack, transfer_relayer, ALICE, BOB};

fn next_seq_ack(relayer: &RelayerContext, channel_id: &ChannelId) -> Option<Sequence> {
    relayer
        .get_ctx_a()
        .ibc_store
        .snapshot()
        .next_sequence_ack
        .get(channel_id)
        .copied()
}

fn assert_kind(result: Result<(), RelayerError>, kind: ErrorKind) {
    match result {
        Err(RelayerError::TransactionFailed(e)) => assert_eq!(e.kind(), kind, "{e}"),
        other => panic!("expected a failed transaction, got {other:?}"),
    }
}

#[test]
fn ordered_channel_acknowledges_in_sequence() {
    let (mut relayer, channel_id) = transfer_relayer(Order::Ordered);

    let first = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "10stake", ALICE, BOB))
        .unwrap();
    let second = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "20stake", ALICE, BOB))
        .unwrap();
    let first_ack = relayer.packet_recv_on_b(first.clone()).unwrap();
    let second_ack = relayer.packet_recv_on_b(second.clone()).unwrap();

    let err = relayer
        .packet_ack_on_a(second.clone(), second_ack.clone())
        .unwrap_err();
    assert!(matches!(
        err,
        RelayerError::TransactionFailed(ContextError::PacketError(
            PacketError::MismatchedPacketSequence { .. }
        ))
    ));
    assert_eq!(next_seq_ack(&relayer, &channel_id), Some(Sequence::from(1)));

    relayer.packet_ack_on_a(first, first_ack).unwrap();
    assert_eq!(next_seq_ack(&relayer, &channel_id), Some(Sequence::from(2)));

    relayer.packet_ack_on_a(second, second_ack).unwrap();
    assert_eq!(next_seq_ack(&relayer, &channel_id), Some(Sequence::from(3)));

    assert!(relayer
        .get_ctx_a()
        .ibc_store
        .snapshot()
        .packet_commitments
        .is_empty());
}

#[test]
fn acknowledgement_resolves_packet_once() {
    let (mut relayer, channel_id) = transfer_relayer(Order::Unordered);

    let packet = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "10stake", ALICE, BOB))
        .unwrap();
    let ack = relayer.packet_recv_on_b(packet.clone()).unwrap();

    relayer.packet_ack_on_a(packet.clone(), ack.clone()).unwrap();

    let ctx_a = relayer.get_ctx_a();
    assert!(store::get_commitment(&ctx_a.ibc_store, &channel_id, packet.seq_on_a)
        .unwrap()
        .is_none());
    assert!(ctx_a
        .get_events()
        .iter()
        .any(|event| matches!(event, IbcEvent::AcknowledgePacket(_))));
    // unordered channels leave the ack sequence alone
    assert_eq!(next_seq_ack(&relayer, &channel_id), Some(Sequence::from(1)));

    let result = relayer.packet_ack_on_a(packet, ack);
    assert_kind(result, ErrorKind::Rejected);
}

#[test]
fn forged_acknowledgement_is_refused() {
    let (mut relayer, channel_id) = transfer_relayer(Order::Unordered);

    let packet = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "10stake", ALICE, BOB))
        .unwrap();
    relayer.packet_recv_on_b(packet.clone()).unwrap();

    // an error would refund the sender although chain B minted the voucher
    let forged: Acknowledgement =
        AcknowledgementStatus::error(StatusValue::new("forged").unwrap()).into();
    let result = relayer.packet_ack_on_a(packet.clone(), forged);

    assert_kind(result, ErrorKind::ProofVerification);
    assert_eq!(relayer.get_ctx_a().balance(ALICE, "stake"), amount(990));
    assert!(store::get_commitment(&relayer.get_ctx_a().ibc_store, &channel_id, packet.seq_on_a)
        .unwrap()
        .is_some());
}

#[test]
fn acknowledgement_before_receive_is_refused() {
    let (mut relayer, channel_id) = transfer_relayer(Order::Unordered);

    let packet = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "10stake", ALICE, BOB))
        .unwrap();

    let result = relayer.packet_ack_on_a(packet, success_ack());

    assert_kind(result, ErrorKind::ProofVerification);
}
