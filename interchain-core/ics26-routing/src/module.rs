use core::fmt::Debug;

use interchain_core_channel_types::acknowledgement::Acknowledgement;
use interchain_core_channel_types::error::PacketError;
use interchain_core_channel_types::packet::Packet;
use interchain_core_router_types::module::ModuleExtras;
use interchain_primitives::Signer;

/// The packet callbacks an application exposes to the lifecycle engine.
///
/// `*_validate` hooks run before any state is written and must not mutate
/// the application. `*_execute` hooks run inside the same atomic operation as
/// the core state writes.
pub trait Module: Debug {
    /// Processes a received packet. The outcome, success or failure, is
    /// encoded in the returned acknowledgement: an application failure never
    /// fails the receive itself.
    fn on_recv_packet_execute(
        &mut self,
        packet: &Packet,
        relayer: &Signer,
    ) -> (ModuleExtras, Acknowledgement);

    fn on_acknowledgement_packet_validate(
        &self,
        _packet: &Packet,
        _acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> Result<(), PacketError>;

    fn on_acknowledgement_packet_execute(
        &mut self,
        _packet: &Packet,
        _acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>);

    fn on_timeout_packet_validate(
        &self,
        packet: &Packet,
        relayer: &Signer,
    ) -> Result<(), PacketError>;

    fn on_timeout_packet_execute(
        &mut self,
        packet: &Packet,
        relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>);
}
