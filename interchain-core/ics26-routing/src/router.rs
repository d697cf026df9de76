//! Defines the `Router`, which resolves the module bound to a channel

use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_core_router_types::error::RouterError;
use interchain_core_router_types::module::ModuleId;

use crate::module::Module;

/// Resolves modules by identifier, and channels to the module bound to them.
pub trait Router {
    /// Returns a reference to a `Module` registered against the specified `ModuleId`
    fn get_route(&self, module_id: &ModuleId) -> Option<&dyn Module>;

    /// Returns a mutable reference to a `Module` registered against the specified `ModuleId`
    fn get_route_mut(&mut self, module_id: &ModuleId) -> Option<&mut dyn Module>;

    /// Returns the module bound to the channel when the channel was bound.
    fn bound_module(&self, port_id: &PortId, channel_id: &ChannelId) -> Option<ModuleId>;

    /// Binds a newly installed channel to `module_id`. Fails if the module is
    /// not registered or the channel is already bound.
    fn bind_channel(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        module_id: ModuleId,
    ) -> Result<(), RouterError>;
}

/// Looks up the module bound to a channel, failing if the channel was never
/// bound.
pub fn lookup_bound_module(
    router: &impl Router,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> Result<ModuleId, RouterError> {
    router
        .bound_module(port_id, channel_id)
        .ok_or_else(|| RouterError::UnboundChannel {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        })
}
