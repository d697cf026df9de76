use interchain_app_transfer::types::{Amount, PrefixedDenom};
use interchain_core_channel::types::channel::Order;
use interchain_query::error::QueryError;
use interchain_query::transfer::{
    query_denom_trace, query_total_escrow, QueryDenomTraceRequest, QueryTotalEscrowRequest,
};
use interchain_testkit::context::TestContext;
use rstest::*;

use crate::{amount, msg_transfer, transfer_relayer, ALICE, BOB};

fn total_escrow(ctx: &TestContext, denom: &str) -> Result<Amount, QueryError> {
    query_total_escrow(
        ctx.transfer(),
        &QueryTotalEscrowRequest {
            denom: denom.to_string(),
        },
    )
    .map(|response| response.amount)
}

#[test_log::test]
fn total_escrow_sums_every_channel() {
    let (mut relayer, channel_id) = transfer_relayer(Order::Unordered);
    let other_channel = relayer.create_transfer_channel(Order::Ordered).unwrap();

    relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "100stake", ALICE, BOB))
        .unwrap();
    relayer
        .send_transfer_on_a(msg_transfer(&other_channel, "50stake", ALICE, BOB))
        .unwrap();

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(total_escrow(ctx_a, "stake").unwrap(), amount(150));
    assert_eq!(total_escrow(ctx_a, "uatom").unwrap(), amount(0));
}

#[rstest]
#[case("")]
#[case("   ")]
fn empty_escrow_denomination_is_invalid(#[case] denom: &str) {
    let result = total_escrow(&TestContext::default(), denom);

    assert!(matches!(result, Err(QueryError::InvalidArgument(_))));
}

#[test_log::test]
fn voucher_hash_resolves_to_its_trace() {
    let (mut relayer, channel_id) = transfer_relayer(Order::Unordered);
    let packet = relayer
        .send_transfer_on_a(msg_transfer(&channel_id, "100stake", ALICE, BOB))
        .unwrap();
    relayer.relay_a_to_b(packet).unwrap();

    let voucher: PrefixedDenom = format!("transfer/{channel_id}/stake").parse().unwrap();
    let hash = voucher.trace_hash().unwrap();
    let ctx_b = relayer.get_ctx_b();

    for query in [hash.clone(), voucher.ibc_denom()] {
        let response = query_denom_trace(ctx_b.transfer(), &QueryDenomTraceRequest { hash: query })
            .unwrap();
        assert_eq!(response.denom, voucher);
    }

    // vouchers are never escrowed on the chain that minted them
    assert_eq!(total_escrow(ctx_b, &voucher.ibc_denom()).unwrap(), amount(0));

    let result = query_denom_trace(
        ctx_b.transfer(),
        &QueryDenomTraceRequest {
            hash: "ibc/".to_string(),
        },
    );
    assert!(matches!(result, Err(QueryError::InvalidArgument(_))));

    let result = query_denom_trace(
        relayer.get_ctx_a().transfer(),
        &QueryDenomTraceRequest { hash },
    );
    assert!(matches!(result, Err(QueryError::NotFound(_))));
}
