use interchain_app_transfer::module::{
    on_acknowledgement_packet_execute, on_acknowledgement_packet_validate,
    on_recv_packet_execute, on_timeout_packet_execute, on_timeout_packet_validate,
};
use interchain_core_channel::types::acknowledgement::Acknowledgement;
use interchain_core_channel::types::error::PacketError;
use interchain_core_channel::types::packet::Packet;
use interchain_core_router::module::Module;
use interchain_core_router::types::module::ModuleExtras;
use interchain_primitives::Signer;

use super::types::MockTransferModule;

impl Module for MockTransferModule {
    fn on_recv_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Acknowledgement) {
        on_recv_packet_execute(self, packet)
    }

    fn on_acknowledgement_packet_validate(
        &self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> Result<(), PacketError> {
        on_acknowledgement_packet_validate(self, packet, acknowledgement, relayer)
            .map_err(PacketError::from)
    }

    fn on_acknowledgement_packet_execute(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        let (extras, res) =
            on_acknowledgement_packet_execute(self, packet, acknowledgement, relayer);
        (extras, res.map_err(PacketError::from))
    }

    fn on_timeout_packet_validate(
        &self,
        packet: &Packet,
        relayer: &Signer,
    ) -> Result<(), PacketError> {
        on_timeout_packet_validate(self, packet, relayer).map_err(PacketError::from)
    }

    fn on_timeout_packet_execute(
        &mut self,
        packet: &Packet,
        relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        let (extras, res) = on_timeout_packet_execute(self, packet, relayer);
        (extras, res.map_err(PacketError::from))
    }
}
