use core::time::Duration;

use interchain_core_channel::types::Height;
use interchain_primitives::prelude::*;
use interchain_primitives::Timestamp;
use typed_builder::TypedBuilder;

use crate::context::TestContext;
use crate::testapp::ibc::core::router::MockRouter;
use crate::testapp::ibc::core::types::{MockIbcStore, DEFAULT_BLOCK_TIME_SECS};

/// 2023-01-01T00:00:00Z
pub const YEAR_2023_NANOS: u64 = 1_672_531_200_000_000_000;

/// Configuration of a [`TestContext`], for testing purposes only!
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = TestContext))]
pub struct MockContextConfig {
    #[builder(default = "mockgaia".to_string(), setter(into))]
    chain_id: String,

    #[builder(default = Duration::from_secs(DEFAULT_BLOCK_TIME_SECS))]
    block_time: Duration,

    #[builder(default = Height::min(0).add(4))]
    latest_height: Height,

    #[builder(default = Timestamp::from_nanoseconds(YEAR_2023_NANOS))]
    latest_timestamp: Timestamp,
}

impl From<MockContextConfig> for TestContext {
    fn from(params: MockContextConfig) -> Self {
        TestContext {
            chain_id: params.chain_id,
            block_time: params.block_time,
            ibc_store: MockIbcStore::new(params.latest_height, params.latest_timestamp),
            ibc_router: MockRouter::new_with_transfer(),
        }
    }
}
