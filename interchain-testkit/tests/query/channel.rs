use interchain_core_channel::store::PageRequest;
use interchain_core_channel::types::channel::{Order, State};
use interchain_core_channel::types::commitment::{
    compute_ack_commitment, compute_packet_commitment,
};
use interchain_core_channel::types::packet::Packet;
use interchain_core_host_types::identifiers::{ChannelId, Sequence};
use interchain_query::channel::{
    query_channel, query_channels, query_next_sequence_send, query_packet_acknowledgement,
    query_packet_commitment, query_packet_commitments, query_packet_receipt,
    query_unreceived_packets, QueryChannelRequest, QueryNextSequenceSendRequest,
    QueryPacketCommitmentsRequest, QueryPacketRequest, QueryUnreceivedPacketsRequest,
};
use interchain_query::error::QueryError;
use interchain_testkit::relayer::context::RelayerContext;
use rstest::*;

use crate::{msg_transfer, transfer_relayer, ALICE, BOB};

struct Fixture {
    relayer: RelayerContext,
    channel_id: ChannelId,
    packets: Vec<Packet>,
}

/// Three transfers sent from chain A, of which chain B received the first.
#[fixture]
fn fixture() -> Fixture {
    let (mut relayer, channel_id) = transfer_relayer(Order::Unordered);

    let packets: Vec<Packet> = ["10stake", "20stake", "30stake"]
        .into_iter()
        .map(|token| {
            relayer
                .send_transfer_on_a(msg_transfer(&channel_id, token, ALICE, BOB))
                .unwrap()
        })
        .collect();
    relayer.packet_recv_on_b(packets[0].clone()).unwrap();

    Fixture {
        relayer,
        channel_id,
        packets,
    }
}

fn packet_request(port_id: &str, channel_id: &ChannelId, sequence: u64) -> QueryPacketRequest {
    QueryPacketRequest {
        port_id: port_id.to_string(),
        channel_id: channel_id.to_string(),
        sequence,
    }
}

#[rstest]
fn channel_is_found_under_its_port(fixture: Fixture) {
    let Fixture {
        relayer,
        channel_id,
        ..
    } = fixture;
    let store = &relayer.get_ctx_a().ibc_store;

    let response = query_channel(
        store,
        &QueryChannelRequest {
            port_id: "transfer".to_string(),
            channel_id: channel_id.to_string(),
        },
    )
    .unwrap();
    assert_eq!(response.channel.state, State::Open);
    assert_eq!(response.channel.ordering, Order::Unordered);
    assert_eq!(response.height, relayer.get_ctx_a().latest_height());

    let result = query_channel(
        store,
        &QueryChannelRequest {
            port_id: "oracle".to_string(),
            channel_id: channel_id.to_string(),
        },
    );
    assert!(matches!(result, Err(QueryError::NotFound(_))));

    let result = query_channel(
        store,
        &QueryChannelRequest {
            port_id: "transfer".to_string(),
            channel_id: "channel-9".to_string(),
        },
    );
    assert!(matches!(result, Err(QueryError::NotFound(_))));
}

#[rstest]
#[case("transfer", "chan 0")]
#[case("transfer", "channel-x")]
#[case("", "channel-0")]
#[case("trans/fer", "channel-0")]
fn malformed_identifiers_are_invalid_arguments(
    fixture: Fixture,
    #[case] port_id: &str,
    #[case] channel_id: &str,
) {
    let result = query_channel(
        &fixture.relayer.get_ctx_a().ibc_store,
        &QueryChannelRequest {
            port_id: port_id.to_string(),
            channel_id: channel_id.to_string(),
        },
    );

    assert!(matches!(result, Err(QueryError::InvalidArgument(_))));
}

#[rstest]
fn channels_are_listed_in_identifier_order(mut fixture: Fixture) {
    let second = fixture
        .relayer
        .create_transfer_channel(Order::Ordered)
        .unwrap();

    let response = query_channels(&fixture.relayer.get_ctx_a().ibc_store).unwrap();

    let ids: Vec<_> = response
        .channels
        .iter()
        .map(|channel| channel.channel_id.clone())
        .collect();
    assert_eq!(ids, vec![fixture.channel_id, second]);
    assert_eq!(response.channels[1].channel_end.ordering, Order::Ordered);
}

#[rstest]
fn next_sequence_send_follows_sent_packets(fixture: Fixture) {
    let response = query_next_sequence_send(
        &fixture.relayer.get_ctx_a().ibc_store,
        &QueryNextSequenceSendRequest {
            port_id: "transfer".to_string(),
            channel_id: fixture.channel_id.to_string(),
        },
    )
    .unwrap();

    assert_eq!(response.next_sequence_send, Sequence::from(4));
}

#[rstest]
fn packet_commitment_matches_sent_packet(fixture: Fixture) {
    let Fixture {
        relayer,
        channel_id,
        packets,
    } = fixture;
    let store = &relayer.get_ctx_a().ibc_store;

    let packet = &packets[1];
    let response =
        query_packet_commitment(store, &packet_request("transfer", &channel_id, 2)).unwrap();
    let expected = compute_packet_commitment(
        &packet.data,
        &packet.timeout_height_on_b,
        &packet.timeout_timestamp_on_b,
    );
    assert_eq!(response.commitment, expected.into_vec());

    let result = query_packet_commitment(store, &packet_request("transfer", &channel_id, 4));
    assert!(matches!(result, Err(QueryError::NotFound(_))));

    let result = query_packet_commitment(store, &packet_request("transfer", &channel_id, 0));
    assert!(matches!(result, Err(QueryError::InvalidArgument(_))));

    let result = query_packet_commitment(store, &packet_request("oracle", &channel_id, 1));
    assert!(matches!(result, Err(QueryError::NotFound(_))));
}

#[rstest]
fn packet_commitments_are_paginated(fixture: Fixture) {
    let Fixture {
        relayer,
        channel_id,
        ..
    } = fixture;
    let store = &relayer.get_ctx_a().ibc_store;

    let mut request = QueryPacketCommitmentsRequest {
        port_id: "transfer".to_string(),
        channel_id: channel_id.to_string(),
        pagination: Some(PageRequest {
            limit: 2,
            count_total: true,
            ..Default::default()
        }),
    };

    let first_page = query_packet_commitments(store, &request).unwrap();
    let sequences: Vec<_> = first_page.commitments.iter().map(|c| c.seq).collect();
    assert_eq!(sequences, vec![Sequence::from(1), Sequence::from(2)]);
    assert_eq!(first_page.pagination.total, Some(3));
    let next_key = first_page.pagination.next_key.clone();
    assert!(next_key.is_some());

    request.pagination = Some(PageRequest {
        key: next_key,
        limit: 2,
        ..Default::default()
    });
    let second_page = query_packet_commitments(store, &request).unwrap();
    let sequences: Vec<_> = second_page.commitments.iter().map(|c| c.seq).collect();
    assert_eq!(sequences, vec![Sequence::from(3)]);
    assert_eq!(second_page.pagination.next_key, None);
    assert_eq!(second_page.pagination.total, None);

    request.pagination = None;
    let everything = query_packet_commitments(store, &request).unwrap();
    assert_eq!(everything.commitments.len(), 3);
}

#[rstest]
fn receipts_and_acknowledgements_follow_delivery(fixture: Fixture) {
    let Fixture {
        mut relayer,
        channel_id,
        packets,
    } = fixture;

    let store = &relayer.get_ctx_b().ibc_store;
    let received = query_packet_receipt(store, &packet_request("transfer", &channel_id, 1))
        .unwrap()
        .received;
    let pending = query_packet_receipt(store, &packet_request("transfer", &channel_id, 2))
        .unwrap()
        .received;
    assert!(received);
    assert!(!pending);

    let result = query_packet_acknowledgement(store, &packet_request("transfer", &channel_id, 2));
    assert!(matches!(result, Err(QueryError::NotFound(_))));

    let ack = relayer.packet_recv_on_b(packets[1].clone()).unwrap();
    let response = query_packet_acknowledgement(
        &relayer.get_ctx_b().ibc_store,
        &packet_request("transfer", &channel_id, 2),
    )
    .unwrap();
    assert_eq!(response.acknowledgement, compute_ack_commitment(&ack).into_vec());
}

#[rstest]
fn unreceived_packets_are_filtered(fixture: Fixture) {
    let Fixture {
        relayer,
        channel_id,
        ..
    } = fixture;
    let store = &relayer.get_ctx_b().ibc_store;

    let mut request = QueryUnreceivedPacketsRequest {
        port_id: "transfer".to_string(),
        channel_id: channel_id.to_string(),
        packet_commitment_sequences: vec![1, 2, 3],
    };
    let response = query_unreceived_packets(store, &request).unwrap();
    assert_eq!(response.sequences, vec![Sequence::from(2), Sequence::from(3)]);

    request.packet_commitment_sequences = vec![0, 2];
    let result = query_unreceived_packets(store, &request);
    assert!(matches!(result, Err(QueryError::InvalidArgument(_))));
}
