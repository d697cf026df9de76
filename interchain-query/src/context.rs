//! Host support required by the listing queries.

use interchain_core_channel::context::ValidationContext;
use interchain_core_channel::types::channel::ChannelEnd;
use interchain_core_handler_types::error::ContextError;
use interchain_core_host_types::identifiers::ChannelId;
use interchain_primitives::prelude::*;

/// Context to be implemented by the host to serve queries.
pub trait QueryContext: ValidationContext {
    /// Returns every channel end in the store, ordered by channel identifier.
    fn channel_ends(&self) -> Result<Vec<(ChannelId, ChannelEnd)>, ContextError>;
}
