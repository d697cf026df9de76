use interchain_app_transfer::context::TokenTransferValidationContext;
use interchain_app_transfer::escrow::escrow_address;
use interchain_app_transfer::types::error::TokenTransferError;
use interchain_app_transfer::types::{Amount, PrefixedDenom, U256};
use interchain_core_channel::types::channel::{Order, State};
use interchain_core_channel::types::error::PacketError;
use interchain_core_channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use interchain_core_handler_types::error::{ContextError, ErrorKind};
use interchain_core_host_types::identifiers::{ChannelId, PortId, Sequence};
use interchain_testkit::relayer::context::RelayerContext;
use interchain_testkit::relayer::error::RelayerError;
use rstest::*;

use crate::{amount, msg_transfer, success_ack, transfer_relayer, ALICE, BOB, CAROL};

struct Fixture {
    relayer: RelayerContext,
    channel_id: ChannelId,
    /// `stake` as it is known on chain B after one hop.
    voucher: PrefixedDenom,
}

#[fixture]
fn fixture() -> Fixture {
    let (relayer, channel_id) = transfer_relayer(Order::Unordered);
    let voucher = format!("transfer/{channel_id}/stake")
        .parse()
        .expect("valid denom");

    Fixture {
        relayer,
        channel_id,
        voucher,
    }
}

fn escrow(channel_id: &ChannelId) -> String {
    escrow_address(&PortId::transfer(), channel_id)
}

#[rstest]
fn transfer_escrows_on_source_and_mints_voucher_on_destination(fixture: Fixture) {
    let Fixture {
        mut relayer,
        channel_id,
        voucher,
    } = fixture;

    let packet = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "100stake", ALICE, BOB))
        .unwrap();
    assert_eq!(packet.seq_on_a, Sequence::from(1));

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.balance(ALICE, "stake"), amount(900));
    assert_eq!(ctx_a.balance(&escrow(&channel_id), "stake"), amount(100));
    assert_eq!(ctx_a.transfer().get_total_escrow("stake").unwrap(), amount(100));

    let ack = relayer.relay_a_to_b(packet).unwrap();
    assert_eq!(ack, success_ack());

    let voucher_denom = voucher.ibc_denom();
    assert!(voucher_denom.starts_with("ibc/"));

    let ctx_b = relayer.get_ctx_b();
    assert_eq!(ctx_b.balance(BOB, &voucher_denom), amount(100));
    assert_eq!(
        ctx_b
            .transfer()
            .get_denom_trace(&voucher.trace_hash().unwrap())
            .unwrap(),
        Some(voucher)
    );
    assert!(ctx_b.transfer().total_escrow.is_empty());

    assert!(relayer
        .get_ctx_a()
        .ibc_store
        .snapshot()
        .packet_commitments
        .is_empty());
    // escrow stays locked until the voucher comes back
    assert_eq!(
        relayer
            .get_ctx_a()
            .transfer()
            .get_total_escrow("stake")
            .unwrap(),
        amount(100)
    );
}

#[rstest]
fn returning_vouchers_releases_escrow(fixture: Fixture) {
    let Fixture {
        mut relayer,
        channel_id,
        voucher,
    } = fixture;

    let packet = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "100stake", ALICE, BOB))
        .unwrap();
    relayer.relay_a_to_b(packet).unwrap();

    let voucher_denom = voucher.ibc_denom();

    // by voucher denomination
    let packet = relayer
        .send_transfer_on_b(msg_transfer(
            &channel_id,
            &format!("40{voucher_denom}"),
            BOB,
            ALICE,
        ))
        .unwrap();
    assert_eq!(relayer.get_ctx_b().balance(BOB, &voucher_denom), amount(60));

    let ack = relayer.relay_b_to_a(packet).unwrap();
    assert_eq!(ack, success_ack());

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.balance(ALICE, "stake"), amount(940));
    assert_eq!(ctx_a.balance(&escrow(&channel_id), "stake"), amount(60));
    assert_eq!(ctx_a.transfer().get_total_escrow("stake").unwrap(), amount(60));

    // by full trace
    let packet = relayer
        .send_transfer_on_b(msg_transfer(&channel_id, &format!("60{voucher}"), BOB, ALICE))
        .unwrap();
    relayer.relay_b_to_a(packet).unwrap();

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.balance(ALICE, "stake"), amount(1_000));
    assert!(ctx_a.balance(&escrow(&channel_id), "stake").is_zero());
    assert!(ctx_a.transfer().get_total_escrow("stake").unwrap().is_zero());
    assert!(relayer.get_ctx_b().balance(BOB, &voucher_denom).is_zero());
}

#[rstest]
fn error_acknowledgement_refunds_sender(fixture: Fixture) {
    let Fixture {
        mut relayer,
        channel_id,
        voucher,
    } = fixture;

    relayer.get_ctx_b_mut().transfer_mut().receive_enabled = false;

    let packet = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "100stake", ALICE, BOB))
        .unwrap();
    let ack = relayer.relay_a_to_b(packet.clone()).unwrap();
    assert_ne!(ack, success_ack());

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.balance(ALICE, "stake"), amount(1_000));
    assert!(ctx_a.transfer().get_total_escrow("stake").unwrap().is_zero());
    assert!(relayer
        .get_ctx_b()
        .balance(BOB, &voucher.ibc_denom())
        .is_zero());

    // the packet still counts as received
    let err = relayer.packet_recv_on_b(packet).unwrap_err();
    assert!(
        matches!(&err, RelayerError::TransactionFailed(e) if e.kind() == ErrorKind::Rejected),
        "{err}"
    );
}

#[rstest]
fn overflowing_voucher_mint_is_acknowledged_as_error(fixture: Fixture) {
    let Fixture {
        mut relayer,
        channel_id,
        voucher,
    } = fixture;

    let voucher_denom = voucher.ibc_denom();
    relayer
        .get_ctx_b_mut()
        .fund(BOB, &voucher_denom, Amount::from(U256::MAX));

    let packet = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "100stake", ALICE, BOB))
        .unwrap();
    let ack = relayer.relay_a_to_b(packet).unwrap();
    assert_ne!(ack, success_ack());

    let ctx_b = relayer.get_ctx_b();
    assert_eq!(
        ctx_b.balance(BOB, &voucher_denom),
        Amount::from(U256::MAX)
    );
    assert_eq!(
        ctx_b
            .transfer()
            .get_denom_trace(&voucher.trace_hash().unwrap())
            .unwrap(),
        None
    );

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.balance(ALICE, "stake"), amount(1_000));
    assert!(ctx_a.balance(&escrow(&channel_id), "stake").is_zero());
    assert!(ctx_a.transfer().get_total_escrow("stake").unwrap().is_zero());
}

#[rstest]
fn overflowing_unescrow_is_acknowledged_as_error(fixture: Fixture) {
    let Fixture {
        mut relayer,
        channel_id,
        voucher,
    } = fixture;

    let packet = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "100stake", ALICE, BOB))
        .unwrap();
    relayer.relay_a_to_b(packet).unwrap();

    relayer
        .get_ctx_a_mut()
        .fund(CAROL, "stake", Amount::from(U256::MAX));

    let voucher_denom = voucher.ibc_denom();
    let packet = relayer
        .send_transfer_on_b(msg_transfer(
            &channel_id,
            &format!("100{voucher_denom}"),
            BOB,
            CAROL,
        ))
        .unwrap();
    assert!(relayer.get_ctx_b().balance(BOB, &voucher_denom).is_zero());

    let ack = relayer.relay_b_to_a(packet).unwrap();
    assert_ne!(ack, success_ack());

    // the escrow and its counter stay in step
    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.balance(&escrow(&channel_id), "stake"), amount(100));
    assert_eq!(ctx_a.transfer().get_total_escrow("stake").unwrap(), amount(100));
    assert_eq!(ctx_a.balance(CAROL, "stake"), Amount::from(U256::MAX));

    // and the burned vouchers are minted back
    assert_eq!(relayer.get_ctx_b().balance(BOB, &voucher_denom), amount(100));
}

#[rstest]
fn timed_out_transfer_is_refunded(fixture: Fixture) {
    let Fixture {
        mut relayer,
        channel_id,
        ..
    } = fixture;

    let timeout_height = relayer.get_ctx_b().latest_height().add(3);
    let mut msg = msg_transfer(&channel_id, "100stake", ALICE, BOB);
    msg.timeout_height_on_b = TimeoutHeight::At(timeout_height);

    let packet = relayer.send_transfer_on_a(msg).unwrap();
    assert_eq!(relayer.get_ctx_a().balance(ALICE, "stake"), amount(900));

    let err = relayer.packet_timeout_on_a(packet.clone()).unwrap_err();
    assert!(matches!(
        err,
        RelayerError::TransactionFailed(ContextError::PacketError(
            PacketError::PacketTimeoutNotReached { .. }
        ))
    ));

    relayer.get_ctx_b_mut().advance_block_up_to(timeout_height);
    relayer.packet_timeout_on_a(packet.clone()).unwrap();

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.balance(ALICE, "stake"), amount(1_000));
    assert!(ctx_a.transfer().get_total_escrow("stake").unwrap().is_zero());
    assert_eq!(ctx_a.channel_end(&channel_id).unwrap().state, State::Open);

    // too late for chain B
    assert!(relayer.packet_recv_on_b(packet.clone()).is_err());
    // and the refund happens once
    let err = relayer.packet_timeout_on_a(packet).unwrap_err();
    assert!(
        matches!(&err, RelayerError::TransactionFailed(e) if e.kind() == ErrorKind::Rejected),
        "{err}"
    );
}

#[rstest]
fn transfer_times_out_by_timestamp(fixture: Fixture) {
    let Fixture {
        mut relayer,
        channel_id,
        ..
    } = fixture;

    let block_time = relayer.get_ctx_b().block_time;
    let timeout_timestamp = relayer
        .get_ctx_b()
        .latest_timestamp()
        .checked_add(block_time * 2)
        .unwrap();
    let mut msg = msg_transfer(&channel_id, "100stake", ALICE, BOB);
    msg.timeout_timestamp_on_b = TimeoutTimestamp::At(timeout_timestamp);

    let packet = relayer.send_transfer_on_a(msg).unwrap();

    relayer.get_ctx_b_mut().advance_blocks(2);
    assert!(relayer.packet_recv_on_b(packet.clone()).is_err());

    relayer.packet_timeout_on_a(packet).unwrap();
    assert_eq!(relayer.get_ctx_a().balance(ALICE, "stake"), amount(1_000));
}

#[rstest]
fn transfer_already_expired_for_the_destination_is_refused(fixture: Fixture) {
    let Fixture {
        mut relayer,
        channel_id,
        ..
    } = fixture;

    // chain A's view of chain B is the height the client was created at
    let mut msg = msg_transfer(&channel_id, "100stake", ALICE, BOB);
    msg.timeout_height_on_b = TimeoutHeight::At(relayer.get_ctx_b().latest_height());

    let err = relayer.send_transfer_on_a(msg).unwrap_err();
    assert!(matches!(
        err,
        RelayerError::Transfer(TokenTransferError::ContextError(ContextError::PacketError(
            PacketError::ExpiredPacketHeight { .. }
        )))
    ));

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.balance(ALICE, "stake"), amount(1_000));
    assert!(ctx_a.transfer().get_total_escrow("stake").unwrap().is_zero());
    assert_eq!(
        ctx_a.ibc_store.snapshot().next_sequence_send.get(&channel_id),
        Some(&Sequence::from(1))
    );
}

#[rstest]
#[case("2000stake")]
#[case("1uatom")]
fn transfer_beyond_balance_changes_nothing(fixture: Fixture, #[case] token: &str) {
    let Fixture {
        mut relayer,
        channel_id,
        ..
    } = fixture;

    let events_before = relayer.get_ctx_a().get_events().len();
    let height_before = relayer.get_ctx_a().latest_height();

    let err = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, token, ALICE, BOB))
        .unwrap_err();
    assert!(matches!(
        err,
        RelayerError::Transfer(TokenTransferError::InsufficientFunds { .. })
    ));

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.balance(ALICE, "stake"), amount(1_000));
    assert_eq!(ctx_a.get_events().len(), events_before);
    assert_eq!(ctx_a.latest_height(), height_before);
}

#[test_log::test]
fn ordered_channel_delivers_transfers_in_sequence() {
    let (mut relayer, channel_id) = transfer_relayer(Order::Ordered);

    let first = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "10stake", ALICE, BOB))
        .unwrap();
    let second = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "20stake", ALICE, BOB))
        .unwrap();
    assert_eq!(second.seq_on_a, Sequence::from(2));

    relayer.relay_a_to_b(first).unwrap();
    relayer.relay_a_to_b(second).unwrap();

    let voucher: PrefixedDenom = format!("transfer/{channel_id}/stake").parse().unwrap();
    assert_eq!(
        relayer.get_ctx_b().balance(BOB, &voucher.ibc_denom()),
        amount(30)
    );
}
