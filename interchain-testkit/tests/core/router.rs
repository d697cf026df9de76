use interchain_app_transfer::types::MODULE_ID_STR;
use interchain_core_channel::types::error::ChannelError;
use interchain_core_handler_types::error::ContextError;
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_core_router::router::{lookup_bound_module, Router};
use interchain_core_router::types::error::RouterError;
use interchain_core_router::types::module::ModuleId;
use interchain_testkit::context::TestContext;
use interchain_testkit::fixtures::core::channel::MockChannelConfig;
use interchain_testkit::relayer::error::RelayerError;
use rstest::*;

#[fixture]
fn ctx() -> TestContext {
    TestContext::default()
        .with_channel(MockChannelConfig::builder().build())
        .unwrap()
}

#[rstest]
fn installed_channel_is_bound_to_its_module(ctx: TestContext) {
    let module_id =
        lookup_bound_module(&ctx.ibc_router, &PortId::transfer(), &ChannelId::zero()).unwrap();
    assert_eq!(module_id, ModuleId::new(MODULE_ID_STR));

    let err = lookup_bound_module(&ctx.ibc_router, &PortId::transfer(), &ChannelId::new(1))
        .unwrap_err();
    assert!(matches!(err, RouterError::UnboundChannel { .. }));
}

#[rstest]
fn channel_cannot_be_rebound(mut ctx: TestContext) {
    let err = ctx
        .ibc_router
        .bind_channel(
            PortId::transfer(),
            ChannelId::zero(),
            ModuleId::new(MODULE_ID_STR),
        )
        .unwrap_err();

    assert!(matches!(err, RouterError::ChannelAlreadyBound { .. }));
}

#[rstest]
fn installing_a_channel_twice_is_refused(mut ctx: TestContext) {
    let err = ctx
        .install_channel(MockChannelConfig::builder().build())
        .unwrap_err();

    assert!(matches!(
        err,
        RelayerError::TransactionFailed(ContextError::ChannelError(
            ChannelError::ChannelAlreadyExists { .. }
        ))
    ));
}

#[test_log::test]
fn channel_for_unknown_module_is_refused() {
    let mut ctx = TestContext::default();

    let err = ctx
        .install_channel(
            MockChannelConfig::builder()
                .module_id(ModuleId::new("oracle"))
                .build(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        RelayerError::TransactionFailed(ContextError::RouterError(RouterError::MissingModule(_)))
    ));
    assert!(ctx.channel_end(&ChannelId::zero()).is_err());
    assert!(ctx.ibc_router.bindings.is_empty());
}
