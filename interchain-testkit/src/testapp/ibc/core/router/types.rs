use interchain_app_transfer::types::MODULE_ID_STR;
use interchain_core_router::binding::ChannelBindings;
use interchain_core_router::types::module::ModuleId;

use crate::testapp::ibc::applications::transfer::types::MockTransferModule;

/// A router hosting the transfer application.
///
/// The module is held by value so that a failed transaction can restore it
/// from a clone.
#[derive(Clone, Debug, Default)]
pub struct MockRouter {
    pub transfer: MockTransferModule,

    /// Maps channels to the module they were bound to
    pub bindings: ChannelBindings,
}

impl MockRouter {
    pub fn new_with_transfer() -> Self {
        Self::default()
    }

    pub fn transfer_module_id() -> ModuleId {
        ModuleId::new(MODULE_ID_STR)
    }

    pub fn transfer(&self) -> &MockTransferModule {
        &self.transfer
    }

    pub fn transfer_mut(&mut self) -> &mut MockTransferModule {
        &mut self.transfer
    }
}
