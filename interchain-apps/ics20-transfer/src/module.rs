//! Packet callbacks of the transfer application, to be wired into a
//! [`Module`](interchain_core_router::module::Module) implementation by the host.

use interchain_app_transfer_types::error::TokenTransferError;
use interchain_app_transfer_types::events::{AckEvent, AckStatusEvent, RecvEvent, TimeoutEvent};
use interchain_app_transfer_types::packet::PacketData;
use interchain_app_transfer_types::{ack_success_b64, VERSION};
use interchain_core_channel::types::acknowledgement::{Acknowledgement, AcknowledgementStatus};
use interchain_core_channel::types::packet::Packet;
use interchain_core_channel::types::Version;
use interchain_core_host_types::identifiers::PortId;
use interchain_core_router::types::module::ModuleExtras;
use interchain_primitives::prelude::*;
use interchain_primitives::Signer;

use crate::context::{TokenTransferExecutionContext, TokenTransferValidationContext};
use crate::handler::{
    process_recv_packet_execute, refund_packet_token_execute, refund_packet_token_validate,
};

/// Checks that a channel about to be bound to the transfer application uses
/// its port and speaks its version. An empty version is accepted.
pub fn on_channel_bind_validate(
    ctx: &impl TokenTransferValidationContext,
    port_id: &PortId,
    version: &Version,
) -> Result<(), TokenTransferError> {
    let bound_port = ctx.get_port()?;
    if port_id != &bound_port {
        return Err(TokenTransferError::InvalidPort {
            port_id: port_id.clone(),
            exp_port_id: bound_port,
        });
    }

    if !version.as_str().is_empty() && version.as_str() != VERSION {
        return Err(TokenTransferError::InvalidVersion {
            version: version.to_string(),
            expected: VERSION.to_string(),
        });
    }

    Ok(())
}

pub fn on_recv_packet_execute(
    ctx_b: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
) -> (ModuleExtras, Acknowledgement) {
    let Ok(data) = PacketData::from_json_bytes(&packet.data) else {
        let ack =
            AcknowledgementStatus::error(TokenTransferError::PacketDataDeserialization.into());
        return (ModuleExtras::empty(), ack.into());
    };

    let (mut extras, ack) = match process_recv_packet_execute(ctx_b, packet, data.clone()) {
        Ok(extras) => (extras, AcknowledgementStatus::success(ack_success_b64())),
        Err((extras, error)) => {
            if error.kind().is_fatal() {
                tracing::error!(sequence = %packet.seq_on_a, %error, "transfer state corrupted on receive");
            } else {
                tracing::debug!(sequence = %packet.seq_on_a, %error, "transfer refused");
            }
            (extras, AcknowledgementStatus::error(error.into()))
        }
    };

    let recv_event = RecvEvent {
        sender: data.sender,
        receiver: data.receiver,
        denom: data.token.denom,
        amount: data.token.amount,
        memo: data.memo,
        success: ack.is_successful(),
    };
    extras.events.push(recv_event.into());

    (extras, ack.into())
}

pub fn on_acknowledgement_packet_validate<Ctx>(
    ctx: &Ctx,
    packet: &Packet,
    acknowledgement: &Acknowledgement,
    _relayer: &Signer,
) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    let data = PacketData::from_json_bytes(&packet.data)?;

    let acknowledgement = serde_json::from_slice::<AcknowledgementStatus>(acknowledgement.as_ref())
        .map_err(|_| TokenTransferError::AckDeserialization)?;

    if !acknowledgement.is_successful() {
        refund_packet_token_validate(ctx, packet, &data)?;
    }

    Ok(())
}

pub fn on_acknowledgement_packet_execute(
    ctx: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
    acknowledgement: &Acknowledgement,
    _relayer: &Signer,
) -> (ModuleExtras, Result<(), TokenTransferError>) {
    let Ok(data) = PacketData::from_json_bytes(&packet.data) else {
        return (
            ModuleExtras::empty(),
            Err(TokenTransferError::PacketDataDeserialization),
        );
    };

    let Ok(acknowledgement) =
        serde_json::from_slice::<AcknowledgementStatus>(acknowledgement.as_ref())
    else {
        return (
            ModuleExtras::empty(),
            Err(TokenTransferError::AckDeserialization),
        );
    };

    if !acknowledgement.is_successful() {
        if let Err(err) = refund_packet_token_execute(ctx, packet, &data) {
            return (ModuleExtras::empty(), Err(err));
        }
    }

    let ack_event = AckEvent {
        sender: data.sender,
        receiver: data.receiver,
        denom: data.token.denom,
        amount: data.token.amount,
        memo: data.memo,
        acknowledgement: acknowledgement.clone(),
    };

    let extras = ModuleExtras {
        events: vec![ack_event.into(), AckStatusEvent { acknowledgement }.into()],
        log: Vec::new(),
    };

    (extras, Ok(()))
}

pub fn on_timeout_packet_validate<Ctx>(
    ctx: &Ctx,
    packet: &Packet,
    _relayer: &Signer,
) -> Result<(), TokenTransferError>
where
    Ctx: TokenTransferValidationContext,
{
    let data = PacketData::from_json_bytes(&packet.data)?;

    refund_packet_token_validate(ctx, packet, &data)?;

    Ok(())
}

pub fn on_timeout_packet_execute(
    ctx: &mut impl TokenTransferExecutionContext,
    packet: &Packet,
    _relayer: &Signer,
) -> (ModuleExtras, Result<(), TokenTransferError>) {
    let Ok(data) = PacketData::from_json_bytes(&packet.data) else {
        return (
            ModuleExtras::empty(),
            Err(TokenTransferError::PacketDataDeserialization),
        );
    };

    if let Err(err) = refund_packet_token_execute(ctx, packet, &data) {
        return (ModuleExtras::empty(), Err(err));
    }

    let timeout_event = TimeoutEvent {
        refund_receiver: data.sender,
        refund_denom: data.token.denom,
        refund_amount: data.token.amount,
        memo: data.memo,
    };

    let extras = ModuleExtras {
        events: vec![timeout_event.into()],
        log: Vec::new(),
    };

    (extras, Ok(()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ack_ser() {
        fn ser_json_assert_eq(ack: AcknowledgementStatus, json_str: &str) {
            let ser = serde_json::to_string(&ack).unwrap();
            assert_eq!(ser, json_str)
        }

        ser_json_assert_eq(
            AcknowledgementStatus::success(ack_success_b64()),
            r#"{"result":"AQ=="}"#,
        );
        ser_json_assert_eq(
            AcknowledgementStatus::error(TokenTransferError::PacketDataDeserialization.into()),
            r#"{"error":"failed to deserialize packet data"}"#,
        );
    }

    #[test]
    fn test_ack_de() {
        fn de_json_assert_eq(json_str: &str, ack: AcknowledgementStatus) {
            let de = serde_json::from_str::<AcknowledgementStatus>(json_str).unwrap();
            assert_eq!(de, ack)
        }

        de_json_assert_eq(
            r#"{"result":"AQ=="}"#,
            AcknowledgementStatus::success(ack_success_b64()),
        );
        de_json_assert_eq(
            r#"{"error":"failed to deserialize packet data"}"#,
            AcknowledgementStatus::error(TokenTransferError::PacketDataDeserialization.into()),
        );

        assert!(serde_json::from_str::<AcknowledgementStatus>(r#"{"success":"AQ=="}"#).is_err());
    }
}
