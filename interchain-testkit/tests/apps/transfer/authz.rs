use interchain_app_transfer::types::authz::TransferAuthorization;
use interchain_app_transfer::types::error::TokenTransferError;
use interchain_app_transfer::types::msgs::{MsgExec, MsgRevoke};
use interchain_app_transfer::types::Amount;
use interchain_core_channel::types::channel::Order;
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_primitives::Signer;
use interchain_testkit::context::TestContext;
use interchain_testkit::fixtures::applications::transfer::dummy_msg_grant;
use interchain_testkit::relayer::context::RelayerContext;
use interchain_testkit::relayer::error::RelayerError;
use rstest::*;

use crate::{amount, msg_transfer, success_ack, transfer_relayer, ALICE, BOB, CAROL};

/// `CAROL` spends on behalf of `ALICE`.
fn exec(channel_id: &ChannelId, token: &str, receiver: &str) -> MsgExec {
    MsgExec {
        grantee: CAROL.into(),
        msg: msg_transfer(channel_id, token, ALICE, receiver),
    }
}

fn authorization(ctx: &TestContext) -> Option<&TransferAuthorization> {
    ctx.transfer()
        .authorizations
        .get(&(Signer::from(ALICE), Signer::from(CAROL)))
}

fn remaining(ctx: &TestContext, denom: &str) -> Option<Amount> {
    authorization(ctx)
        .and_then(|authz| authz.allocation(&PortId::transfer(), &ChannelId::zero()))
        .map(|allocation| allocation.remaining(denom))
}

#[fixture]
fn relayer() -> RelayerContext {
    let (mut relayer, _) = transfer_relayer(Order::Unordered);
    relayer
        .get_ctx_a_mut()
        .grant(dummy_msg_grant(ALICE, CAROL, "100stake", &[]).unwrap())
        .unwrap();
    relayer
}

#[rstest]
fn grantee_spends_within_limit(mut relayer: RelayerContext) {
    let channel_id = ChannelId::zero();

    let packet = relayer
        .exec_transfer_on_a(exec(&channel_id, "60stake", BOB))
        .unwrap();
    assert_eq!(relayer.get_ctx_a().balance(ALICE, "stake"), amount(940));
    assert_eq!(remaining(relayer.get_ctx_a(), "stake"), Some(amount(40)));

    assert_eq!(relayer.relay_a_to_b(packet).unwrap(), success_ack());

    // spending the rest leaves a zero entry in place
    relayer
        .exec_transfer_on_a(exec(&channel_id, "40stake", BOB))
        .unwrap();
    assert_eq!(remaining(relayer.get_ctx_a(), "stake"), Some(amount(0)));
    let allocation = authorization(relayer.get_ctx_a())
        .and_then(|authz| authz.allocation(&PortId::transfer(), &channel_id))
        .unwrap();
    assert_eq!(allocation.spend_limit.len(), 1);

    let err = relayer
        .exec_transfer_on_a(exec(&channel_id, "1stake", BOB))
        .unwrap_err();
    assert!(matches!(
        err,
        RelayerError::Transfer(TokenTransferError::InsufficientSpendLimit { .. })
    ));
}

#[rstest]
fn exceeding_spend_limit_changes_nothing(mut relayer: RelayerContext) {
    let events_before = relayer.get_ctx_a().get_events().len();

    let err = relayer
        .exec_transfer_on_a(exec(&ChannelId::zero(), "150stake", BOB))
        .unwrap_err();
    assert!(matches!(
        err,
        RelayerError::Transfer(TokenTransferError::InsufficientSpendLimit { .. })
    ));

    let ctx_a = relayer.get_ctx_a();
    assert_eq!(ctx_a.balance(ALICE, "stake"), amount(1_000));
    assert_eq!(remaining(ctx_a, "stake"), Some(amount(100)));
    assert_eq!(ctx_a.get_events().len(), events_before);
}

#[rstest]
fn denomination_outside_limit_is_refused(mut relayer: RelayerContext) {
    relayer.get_ctx_a_mut().fund(ALICE, "uatom", amount(10));

    let err = relayer
        .exec_transfer_on_a(exec(&ChannelId::zero(), "5uatom", BOB))
        .unwrap_err();
    assert!(matches!(
        err,
        RelayerError::Transfer(TokenTransferError::InsufficientSpendLimit { .. })
    ));
    assert_eq!(relayer.get_ctx_a().balance(ALICE, "uatom"), amount(10));
}

#[test_log::test]
fn allow_list_restricts_receivers() {
    let (mut relayer, channel_id) = transfer_relayer(Order::Unordered);
    relayer
        .get_ctx_a_mut()
        .grant(dummy_msg_grant(ALICE, CAROL, "100stake", &[BOB]).unwrap())
        .unwrap();

    let err = relayer
        .exec_transfer_on_a(exec(&channel_id, "10stake", "mallory"))
        .unwrap_err();
    assert!(matches!(
        err,
        RelayerError::Transfer(TokenTransferError::InvalidAddress { .. })
    ));
    assert_eq!(remaining(relayer.get_ctx_a(), "stake"), Some(amount(100)));

    relayer
        .exec_transfer_on_a(exec(&channel_id, "10stake", BOB))
        .unwrap();
    assert_eq!(remaining(relayer.get_ctx_a(), "stake"), Some(amount(90)));
}

#[rstest]
fn grant_covers_only_its_channel(mut relayer: RelayerContext) {
    let other_channel = relayer.create_transfer_channel(Order::Unordered).unwrap();
    assert_eq!(other_channel, ChannelId::new(1));

    let err = relayer
        .exec_transfer_on_a(exec(&other_channel, "10stake", BOB))
        .unwrap_err();
    assert!(matches!(
        err,
        RelayerError::Transfer(TokenTransferError::NoAuthorizationFound { .. })
    ));
}

#[rstest]
fn regrant_replaces_remaining_limit(mut relayer: RelayerContext) {
    relayer
        .exec_transfer_on_a(exec(&ChannelId::zero(), "70stake", BOB))
        .unwrap();
    assert_eq!(remaining(relayer.get_ctx_a(), "stake"), Some(amount(30)));

    relayer
        .get_ctx_a_mut()
        .grant(dummy_msg_grant(ALICE, CAROL, "50stake,5uatom", &[]).unwrap())
        .unwrap();
    assert_eq!(remaining(relayer.get_ctx_a(), "stake"), Some(amount(50)));
    assert_eq!(remaining(relayer.get_ctx_a(), "uatom"), Some(amount(5)));
}

#[rstest]
fn revoked_grant_cannot_be_used(mut relayer: RelayerContext) {
    let revoke = MsgRevoke {
        granter: ALICE.into(),
        grantee: CAROL.into(),
    };

    relayer.get_ctx_a_mut().revoke(revoke.clone()).unwrap();
    assert!(authorization(relayer.get_ctx_a()).is_none());

    let err = relayer
        .exec_transfer_on_a(exec(&ChannelId::zero(), "10stake", BOB))
        .unwrap_err();
    assert!(matches!(
        err,
        RelayerError::Transfer(TokenTransferError::NoAuthorizationFound { .. })
    ));

    let err = relayer.get_ctx_a_mut().revoke(revoke).unwrap_err();
    assert!(matches!(
        err,
        RelayerError::Transfer(TokenTransferError::NoAuthorizationFound { .. })
    ));
}

#[rstest]
#[case(ALICE, ALICE, "100stake", &[])]
#[case(ALICE, CAROL, "0stake", &[])]
#[case(ALICE, CAROL, "10stake,20stake", &[])]
#[case(ALICE, CAROL, "10stake", &[BOB, BOB])]
#[case("", CAROL, "10stake", &[])]
fn malformed_grants_are_refused(
    #[case] granter: &str,
    #[case] grantee: &str,
    #[case] spend_limit: &str,
    #[case] allow_list: &[&str],
) {
    let mut ctx = TestContext::default();

    let err = ctx
        .grant(dummy_msg_grant(granter, grantee, spend_limit, allow_list).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        RelayerError::Transfer(TokenTransferError::InvalidAuthorization { .. })
    ));
    assert!(ctx.transfer().authorizations.is_empty());
}
