use displaydoc::Display;
use interchain_core_host_types::error::HostError;
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_primitives::prelude::*;

use crate::module::ModuleId;

/// Error type for the router module.
#[derive(Debug, Display)]
pub enum RouterError {
    /// host error: {0}
    Host(HostError),
    /// missing module `{0}`
    MissingModule(ModuleId),
    /// module `{0}` is already registered
    DuplicateModule(ModuleId),
    /// no module bound to channel `{port_id}/{channel_id}`
    UnboundChannel {
        port_id: PortId,
        channel_id: ChannelId,
    },
    /// channel `{port_id}/{channel_id}` is already bound to module `{module_id}`
    ChannelAlreadyBound {
        port_id: PortId,
        channel_id: ChannelId,
        module_id: ModuleId,
    },
}

impl From<HostError> for RouterError {
    fn from(e: HostError) -> Self {
        Self::Host(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Host(e) => Some(e),
            _ => None,
        }
    }
}
