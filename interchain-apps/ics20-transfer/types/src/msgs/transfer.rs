//! Defines the token transfer message type

use interchain_core_channel_types::timeout::{TimeoutHeight, TimeoutTimestamp};
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_primitives::prelude::*;

use crate::error::TokenTransferError;
use crate::packet::PacketData;

pub const TRANSFER_TYPE_URL: &str = "/interchain.transfer.v1.MsgTransfer";

/// Message used to build a token transfer packet.
///
/// This is not a packet yet: the sequence number and the destination end are
/// filled in from the channel when the transfer is sent.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MsgTransfer {
    /// the port on which the packet will be sent
    pub port_id_on_a: PortId,
    /// the channel by which the packet will be sent
    pub chan_id_on_a: ChannelId,
    /// token transfer packet data of the packet that will be sent
    pub packet_data: PacketData,
    /// Timeout height on the receiving chain. Disabled when `Never`.
    pub timeout_height_on_b: TimeoutHeight,
    /// Timeout timestamp on the receiving chain. Disabled when `Never`.
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

impl MsgTransfer {
    pub fn validate_basic(&self) -> Result<(), TokenTransferError> {
        if self.packet_data.token.amount.is_zero() {
            return Err(TokenTransferError::ZeroAmount);
        }
        if self.packet_data.sender.is_empty() {
            return Err(TokenTransferError::EmptySender);
        }
        if self.packet_data.receiver.is_empty() {
            return Err(TokenTransferError::EmptyReceiver);
        }
        Ok(())
    }

    pub fn type_url(&self) -> &'static str {
        TRANSFER_TYPE_URL
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use rstest::rstest;

    use super::*;
    use crate::PrefixedCoin;

    fn msg_transfer(coin: &str, sender: &str, receiver: &str) -> MsgTransfer {
        MsgTransfer {
            port_id_on_a: PortId::transfer(),
            chan_id_on_a: ChannelId::new(0),
            packet_data: PacketData {
                token: PrefixedCoin::from_str(coin).unwrap(),
                sender: sender.into(),
                receiver: receiver.into(),
                memo: "".to_string().into(),
            },
            timeout_height_on_b: TimeoutHeight::Never,
            timeout_timestamp_on_b: TimeoutTimestamp::Never,
        }
    }

    #[rstest]
    #[case::valid("100uatom", "alice", "bob", true)]
    #[case::zero_amount("0uatom", "alice", "bob", false)]
    #[case::empty_sender("100uatom", "", "bob", false)]
    #[case::blank_receiver("100uatom", "alice", "  ", false)]
    fn validates_transfer_messages(
        #[case] coin: &str,
        #[case] sender: &str,
        #[case] receiver: &str,
        #[case] valid: bool,
    ) {
        assert_eq!(
            msg_transfer(coin, sender, receiver).validate_basic().is_ok(),
            valid
        );
    }
}
