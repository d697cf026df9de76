use interchain_core_channel::client::LightClient;
use interchain_core_channel::store;
use interchain_core_channel::types::channel::{Order, State};
use interchain_core_channel::types::commitment::compute_ack_commitment;
use interchain_core_channel::types::error::PacketError;
use interchain_core_channel::types::msgs::MsgRecvPacket;
use interchain_core_channel::types::packet::Packet;
use interchain_core_channel::types::timeout::TimeoutHeight;
use interchain_core_channel::types::Height;
use interchain_core_handler_types::error::{ContextError, ErrorKind};
use interchain_core_handler_types::events::IbcEvent;
use interchain_core_host_types::identifiers::{ChannelId, ConnectionId, Sequence};
use interchain_core_host_types::path::{CommitmentPath, Path};
use interchain_testkit::context::TestContext;
use interchain_testkit::fixtures::core::channel::{MockChannelConfig, PacketConfig};
use interchain_testkit::fixtures::core::signer::dummy_relayer;
use interchain_testkit::relayer::error::RelayerError;
use interchain_testkit::testapp::ibc::clients::mock::{mock_proof, MockLightClient};
use rstest::*;

use crate::{msg_transfer, success_ack, transfer_relayer, ALICE, BOB};

struct Fixture {
    ctx: TestContext,
    client_height: Height,
}

/// A chain whose client of the counterparty accepts every proof, with one
/// open unordered channel.
#[fixture]
fn fixture() -> Fixture {
    let ctx = TestContext::default();
    let client_height = Height::new(0, 10).unwrap();
    let client = MockLightClient::accept_all(client_height, ctx.latest_timestamp());

    let ctx = ctx
        .with_light_client(ConnectionId::zero(), client)
        .with_channel(MockChannelConfig::builder().build())
        .unwrap();

    Fixture { ctx, client_height }
}

fn msg_recv_packet(packet: Packet, proof_height: Height) -> MsgRecvPacket {
    let proof = mock_proof(&Path::from(CommitmentPath::new(
        &packet.chan_id_on_a,
        packet.seq_on_a,
    )))
    .unwrap();

    MsgRecvPacket {
        packet,
        proof_commitment_on_a: proof,
        proof_height_on_a: proof_height,
        signer: dummy_relayer(),
    }
}

fn assert_kind(result: Result<(), RelayerError>, kind: ErrorKind) {
    match result {
        Err(RelayerError::TransactionFailed(e)) => assert_eq!(e.kind(), kind, "{e}"),
        other => panic!("expected a failed transaction, got {other:?}"),
    }
}

#[rstest]
fn recv_writes_receipt_and_acknowledgement(fixture: Fixture) {
    let Fixture {
        mut ctx,
        client_height,
    } = fixture;

    let packet: Packet = PacketConfig::builder().build();
    let chan_id = packet.chan_id_on_b.clone();

    ctx.deliver(msg_recv_packet(packet.clone(), client_height))
        .unwrap();

    assert!(store::has_receipt(&ctx.ibc_store, &chan_id, packet.seq_on_a).unwrap());

    // the payload is not a transfer, so the application acknowledges an error
    let events = ctx.get_events();
    let ack = events
        .iter()
        .find_map(|event| match event {
            IbcEvent::WriteAcknowledgement(e) => Some(e.acknowledgement().clone()),
            _ => None,
        })
        .unwrap();
    assert_ne!(ack, success_ack());
    assert_eq!(
        store::get_acknowledgement(&ctx.ibc_store, &chan_id, packet.seq_on_a).unwrap(),
        Some(compute_ack_commitment(&ack))
    );
    assert!(events
        .iter()
        .any(|event| matches!(event, IbcEvent::ReceivePacket(_))));

    // unordered channels do not track the receive sequence
    assert_eq!(
        ctx.ibc_store
            .snapshot()
            .next_sequence_recv
            .get(&chan_id),
        Some(&Sequence::from(1))
    );
}

#[rstest]
fn replayed_packet_is_rejected(fixture: Fixture) {
    let Fixture {
        mut ctx,
        client_height,
    } = fixture;

    let packet: Packet = PacketConfig::builder().build();
    ctx.deliver(msg_recv_packet(packet.clone(), client_height))
        .unwrap();

    let events_before = ctx.get_events().len();
    let result = ctx.deliver(msg_recv_packet(packet, client_height));

    assert_kind(result, ErrorKind::Rejected);
    assert_eq!(ctx.get_events().len(), events_before);
}

#[rstest]
fn proof_above_client_height_is_refused(fixture: Fixture) {
    let Fixture {
        mut ctx,
        client_height,
    } = fixture;

    let packet: Packet = PacketConfig::builder().build();
    let result = ctx.deliver(msg_recv_packet(packet.clone(), client_height.increment()));

    assert_kind(result, ErrorKind::ProofVerification);
    assert!(!store::has_receipt(&ctx.ibc_store, &packet.chan_id_on_b, packet.seq_on_a).unwrap());
}

#[test_log::test]
fn proof_rejected_by_client_is_refused() {
    let ctx = TestContext::default();
    let client_height = ctx.latest_height();
    let client = MockLightClient::reject_all(client_height, ctx.latest_timestamp());
    let mut ctx = ctx
        .with_light_client(ConnectionId::zero(), client)
        .with_channel(MockChannelConfig::builder().build())
        .unwrap();

    let packet: Packet = PacketConfig::builder().build();
    let result = ctx.deliver(msg_recv_packet(packet.clone(), client_height));

    assert_kind(result, ErrorKind::ProofVerification);
    assert!(!store::has_receipt(&ctx.ibc_store, &packet.chan_id_on_b, packet.seq_on_a).unwrap());
    assert!(ctx.get_events().is_empty());
}

#[rstest]
fn expired_packet_is_refused(fixture: Fixture) {
    let Fixture {
        mut ctx,
        client_height,
    } = fixture;

    let packet: Packet = PacketConfig::builder()
        .timeout_height_on_b(TimeoutHeight::At(ctx.latest_height()))
        .build();
    let result = ctx.deliver(msg_recv_packet(packet, client_height));

    assert!(matches!(
        result,
        Err(RelayerError::TransactionFailed(ContextError::PacketError(
            PacketError::ExpiredPacketHeight { .. }
        )))
    ));
}

#[rstest]
fn packet_for_unbound_channel_is_refused(fixture: Fixture) {
    let Fixture {
        mut ctx,
        client_height,
    } = fixture;

    let packet: Packet = PacketConfig::builder()
        .chan_id_on_b(ChannelId::new(7))
        .build();
    let result = ctx.deliver(msg_recv_packet(packet, client_height));

    assert_kind(result, ErrorKind::NotFound);
}

#[test_log::test]
fn packet_for_closed_channel_is_refused() {
    let ctx = TestContext::default();
    let client_height = ctx.latest_height();
    let client = MockLightClient::accept_all(client_height, ctx.latest_timestamp());
    let mut ctx = ctx
        .with_light_client(ConnectionId::zero(), client)
        .with_channel(MockChannelConfig::builder().state(State::Closed).build())
        .unwrap();

    let packet: Packet = PacketConfig::builder().build();
    let result = ctx.deliver(msg_recv_packet(packet, client_height));

    assert_kind(result, ErrorKind::InvalidInput);
}

#[test_log::test]
fn ordered_channel_receives_in_sequence() {
    let (mut relayer, channel_id) = transfer_relayer(Order::Ordered);

    let first = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "10stake", ALICE, BOB))
        .unwrap();
    let second = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "20stake", ALICE, BOB))
        .unwrap();

    let next_recv = |relayer: &interchain_testkit::relayer::context::RelayerContext| {
        relayer
            .get_ctx_b()
            .ibc_store
            .snapshot()
            .next_sequence_recv
            .get(&channel_id)
            .copied()
    };

    let err = relayer.packet_recv_on_b(second.clone()).unwrap_err();
    assert!(matches!(
        err,
        RelayerError::TransactionFailed(ContextError::PacketError(
            PacketError::MismatchedPacketSequence { .. }
        ))
    ));
    assert_eq!(next_recv(&relayer), Some(Sequence::from(1)));

    relayer.packet_recv_on_b(first.clone()).unwrap();
    assert_eq!(next_recv(&relayer), Some(Sequence::from(2)));

    let err = relayer.packet_recv_on_b(first).unwrap_err();
    assert!(matches!(
        err,
        RelayerError::TransactionFailed(ContextError::PacketError(
            PacketError::PacketAlreadyReceived { .. }
        ))
    ));

    relayer.packet_recv_on_b(second).unwrap();
    assert_eq!(next_recv(&relayer), Some(Sequence::from(3)));

    // ordered channels keep no receipts
    assert!(relayer
        .get_ctx_b()
        .ibc_store
        .snapshot()
        .packet_receipts
        .is_empty());

    let client = relayer
        .get_ctx_b()
        .ibc_store
        .clients
        .get(&ConnectionId::zero())
        .unwrap();
    assert_eq!(client.latest_height(), relayer.get_ctx_a().latest_height());
}
