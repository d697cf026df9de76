use interchain_core_channel::types::channel::{Order, State};
use interchain_core_channel::types::error::PacketError;
use interchain_core_channel::types::packet::Packet;
use interchain_core_channel::types::timeout::TimeoutHeight;
use interchain_core_handler_types::error::{ContextError, ErrorKind};
use interchain_core_handler_types::events::IbcEvent;
use interchain_core_host_types::identifiers::ChannelId;
use interchain_testkit::relayer::context::RelayerContext;
use interchain_testkit::relayer::error::RelayerError;
use rstest::*;

use crate::{amount, msg_transfer, transfer_relayer, ALICE, BOB};

/// Sends 100stake from `ALICE` that chain B must receive within three blocks.
fn send_expiring(relayer: &mut RelayerContext, channel_id: &ChannelId) -> (Packet, TimeoutHeight) {
    let timeout_height = TimeoutHeight::At(relayer.get_ctx_b().latest_height().add(3));
    let mut msg = msg_transfer(channel_id, "100stake", ALICE, BOB);
    msg.timeout_height_on_b = timeout_height;

    let packet = relayer.send_transfer_on_a(msg).unwrap();
    (packet, timeout_height)
}

fn expire(relayer: &mut RelayerContext, timeout_height: TimeoutHeight) {
    if let TimeoutHeight::At(height) = timeout_height {
        relayer.get_ctx_b_mut().advance_block_up_to(height);
    }
}

#[test_log::test]
fn ordered_timeout_closes_channel() {
    let (mut relayer, channel_id) = transfer_relayer(Order::Ordered);

    let (packet, timeout_height) = send_expiring(&mut relayer, &channel_id);
    expire(&mut relayer, timeout_height);
    relayer.packet_timeout_on_a(packet).unwrap();

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.channel_end(&channel_id).unwrap().state, State::Closed);
    assert!(ctx_a
        .get_events()
        .iter()
        .any(|event| matches!(event, IbcEvent::ChannelClosed(_))));
    assert_eq!(ctx_a.balance(ALICE, "stake"), amount(1_000));

    // nothing more goes through the closed end
    assert!(relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "1stake", ALICE, BOB))
        .is_err());
    assert_eq!(
        relayer.get_ctx_b().channel_end(&channel_id).unwrap().state,
        State::Open
    );
}

#[rstest]
#[case(Order::Unordered, ErrorKind::ProofVerification)]
#[case(Order::Ordered, ErrorKind::Rejected)]
fn received_packet_cannot_time_out(#[case] ordering: Order, #[case] kind: ErrorKind) {
    let (mut relayer, channel_id) = transfer_relayer(ordering);

    let (packet, timeout_height) = send_expiring(&mut relayer, &channel_id);
    relayer.packet_recv_on_b(packet.clone()).unwrap();
    expire(&mut relayer, timeout_height);

    match relayer.packet_timeout_on_a(packet) {
        Err(RelayerError::TransactionFailed(e)) => assert_eq!(e.kind(), kind, "{e}"),
        other => panic!("expected a failed transaction, got {other:?}"),
    }

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.balance(ALICE, "stake"), amount(900));
    assert_eq!(ctx_a.channel_end(&channel_id).unwrap().state, State::Open);
}

#[rstest]
#[case(Order::Unordered)]
#[case(Order::Ordered)]
fn packet_without_timeout_never_times_out(#[case] ordering: Order) {
    let (mut relayer, channel_id) = transfer_relayer(ordering);

    let packet = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "100stake", ALICE, BOB))
        .unwrap();
    relayer.get_ctx_b_mut().advance_blocks(100);

    let err = relayer.packet_timeout_on_a(packet).unwrap_err();
    assert!(matches!(
        err,
        RelayerError::TransactionFailed(ContextError::PacketError(
            PacketError::PacketTimeoutNotReached { .. }
        ))
    ));
}

#[rstest]
#[case(Order::Unordered)]
#[case(Order::Ordered)]
fn acknowledged_packet_cannot_time_out(#[case] ordering: Order) {
    let (mut relayer, channel_id) = transfer_relayer(ordering);

    let (packet, timeout_height) = send_expiring(&mut relayer, &channel_id);
    relayer.relay_a_to_b(packet.clone()).unwrap();
    expire(&mut relayer, timeout_height);

    let err = relayer.packet_timeout_on_a(packet).unwrap_err();
    assert!(
        matches!(
            &err,
            RelayerError::TransactionFailed(e @ ContextError::PacketError(
                PacketError::PacketAlreadyResolved { .. }
            )) if e.kind() == ErrorKind::Rejected
        ),
        "{err}"
    );

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.balance(ALICE, "stake"), amount(900));
    assert_eq!(ctx_a.channel_end(&channel_id).unwrap().state, State::Open);
}
