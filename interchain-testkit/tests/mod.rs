use interchain_app_transfer::types::msgs::MsgTransfer;
use interchain_app_transfer::types::{ack_success_b64, Amount, PrefixedCoin, U256};
use interchain_core_channel::types::acknowledgement::{Acknowledgement, AcknowledgementStatus};
use interchain_core_channel::types::channel::Order;
use interchain_core_host_types::identifiers::ChannelId;
use interchain_testkit::context::TestContext;
use interchain_testkit::fixtures::applications::transfer::{MsgTransferConfig, PacketDataConfig};
use interchain_testkit::fixtures::core::context::MockContextConfig;
use interchain_testkit::relayer::context::RelayerContext;

pub mod apps;
pub mod core;
pub mod query;

pub const ALICE: &str = "alice";
pub const BOB: &str = "bob";
pub const CAROL: &str = "carol";

/// Two chains joined by a transfer channel, with `ALICE` holding 1000stake
/// on chain A.
pub fn transfer_relayer(ordering: Order) -> (RelayerContext, ChannelId) {
    let ctx_a: TestContext = MockContextConfig::builder().chain_id("chain-a").build();
    let ctx_b: TestContext = MockContextConfig::builder().chain_id("chain-b").build();

    let mut relayer = RelayerContext::new(ctx_a, ctx_b);
    let channel_id = relayer
        .create_transfer_channel(ordering)
        .expect("transfer channel installed");

    relayer.get_ctx_a_mut().fund(ALICE, "stake", amount(1_000));

    (relayer, channel_id)
}

pub fn amount(value: u64) -> Amount {
    Amount::from(U256::from(value))
}

pub fn coin(coin: &str) -> PrefixedCoin {
    coin.parse().expect("valid coin")
}

/// A transfer of `token` over `channel_id` without timeout.
pub fn msg_transfer(channel_id: &ChannelId, token: &str, sender: &str, receiver: &str) -> MsgTransfer {
    MsgTransferConfig::builder()
        .chan_id_on_a(channel_id.clone())
        .packet_data(
            PacketDataConfig::builder()
                .token(coin(token))
                .sender(sender)
                .receiver(receiver)
                .build(),
        )
        .build()
}

pub fn success_ack() -> Acknowledgement {
    AcknowledgementStatus::success(ack_success_b64()).into()
}
