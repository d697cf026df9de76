//! The table binding channel ends to application modules.
//!
//! A channel is bound to exactly one module, once, when it is installed on
//! the host. Packet handlers resolve their callbacks through the binding of
//! the channel a message targets.

use alloc::collections::BTreeMap;

use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_core_router_types::error::RouterError;
use interchain_core_router_types::module::ModuleId;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelBindings {
    bindings: BTreeMap<(PortId, ChannelId), ModuleId>,
}

impl ChannelBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the channel to `module_id`. A channel cannot be rebound.
    pub fn bind(
        &mut self,
        port_id: PortId,
        channel_id: ChannelId,
        module_id: ModuleId,
    ) -> Result<(), RouterError> {
        let key = (port_id, channel_id);
        if let Some(bound) = self.bindings.get(&key) {
            return Err(RouterError::ChannelAlreadyBound {
                port_id: key.0,
                channel_id: key.1,
                module_id: bound.clone(),
            });
        }

        tracing::debug!(
            port_id = %key.0,
            channel_id = %key.1,
            module_id = %module_id,
            "bound channel to module"
        );
        self.bindings.insert(key, module_id);
        Ok(())
    }

    pub fn get(&self, port_id: &PortId, channel_id: &ChannelId) -> Option<&ModuleId> {
        self.bindings.get(&(port_id.clone(), channel_id.clone()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_is_bound_once() {
        let mut bindings = ChannelBindings::new();
        let transfer = ModuleId::new("transfer");

        bindings
            .bind(PortId::transfer(), ChannelId::new(0), transfer.clone())
            .unwrap();
        assert_eq!(
            bindings.get(&PortId::transfer(), &ChannelId::new(0)),
            Some(&transfer)
        );
        assert!(bindings
            .get(&PortId::transfer(), &ChannelId::new(1))
            .is_none());

        let err = bindings
            .bind(
                PortId::transfer(),
                ChannelId::new(0),
                ModuleId::new("other"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RouterError::ChannelAlreadyBound { module_id, .. } if module_id == transfer
        ));
        assert_eq!(bindings.len(), 1);
    }
}
