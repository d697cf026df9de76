use interchain_app_transfer::types::MODULE_ID_STR;
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_core_router::module::Module;
use interchain_core_router::router::Router;
use interchain_core_router::types::error::RouterError;
use interchain_core_router::types::module::ModuleId;

use super::types::MockRouter;

impl Router for MockRouter {
    fn get_route(&self, module_id: &ModuleId) -> Option<&dyn Module> {
        match module_id.as_str() {
            MODULE_ID_STR => Some(&self.transfer),
            _ => None,
        }
    }

    fn get_route_mut(&mut self, module_id: &ModuleId) -> Option<&mut dyn Module> {
        match module_id.as_str() {
            MODULE_ID_STR => Some(&mut self.transfer),
            _ => None,
        }
    }

    fn bound_module(&self, port_id: &PortId, channel_id: &ChannelId) -> Option<ModuleId> {
        self.bindings.get(port_id, channel_id).cloned()
    }

    fn bind_channel(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        module_id: ModuleId,
    ) -> Result<(), RouterError> {
        if self.get_route(&module_id).is_none() {
            return Err(RouterError::MissingModule(module_id));
        }
        self.bindings.bind(port_id, channel_id, module_id)
    }
}
