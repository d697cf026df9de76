use interchain_app_transfer::types::authz::{Allocation, TransferAuthorization};
use interchain_app_transfer::types::error::TokenTransferError;
use interchain_app_transfer::types::msgs::{MsgGrant, MsgTransfer};
use interchain_app_transfer::types::packet::PacketData;
use interchain_app_transfer::types::{BaseCoin, Memo, PrefixedCoin};
use interchain_core_channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_primitives::prelude::*;
use interchain_primitives::Signer;
use typed_builder::TypedBuilder;

use crate::fixtures::core::signer::dummy_account_id;

/// Configuration of a [`MsgTransfer`], for testing purposes only!
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = MsgTransfer))]
pub struct MsgTransferConfig {
    pub packet_data: PacketData,
    #[builder(default = PortId::transfer())]
    pub port_id_on_a: PortId,
    #[builder(default = ChannelId::zero())]
    pub chan_id_on_a: ChannelId,
    #[builder(default = TimeoutHeight::Never)]
    pub timeout_height_on_b: TimeoutHeight,
    #[builder(default = TimeoutTimestamp::Never)]
    pub timeout_timestamp_on_b: TimeoutTimestamp,
}

impl From<MsgTransferConfig> for MsgTransfer {
    fn from(config: MsgTransferConfig) -> Self {
        MsgTransfer {
            port_id_on_a: config.port_id_on_a,
            chan_id_on_a: config.chan_id_on_a,
            packet_data: config.packet_data,
            timeout_height_on_b: config.timeout_height_on_b,
            timeout_timestamp_on_b: config.timeout_timestamp_on_b,
        }
    }
}

/// Configuration of a [`PacketData`], for testing purposes only!
#[derive(TypedBuilder, Debug)]
#[builder(build_method(into = PacketData))]
pub struct PacketDataConfig {
    pub token: PrefixedCoin,
    #[builder(default = dummy_account_id(), setter(into))]
    pub sender: Signer,
    #[builder(default = dummy_account_id(), setter(into))]
    pub receiver: Signer,
    #[builder(default = Memo::from(String::new()))]
    pub memo: Memo,
}

impl From<PacketDataConfig> for PacketData {
    fn from(config: PacketDataConfig) -> Self {
        PacketData {
            token: config.token,
            sender: config.sender,
            receiver: config.receiver,
            memo: config.memo,
        }
    }
}

/// A grant over `transfer/channel-0` with the given spend limit, written as
/// a coin list such as `"100stake,5uatom"`.
pub fn dummy_msg_grant(
    granter: &str,
    grantee: &str,
    spend_limit: &str,
    allow_list: &[&str],
) -> Result<MsgGrant, TokenTransferError> {
    Ok(MsgGrant {
        granter: granter.into(),
        grantee: grantee.into(),
        authorization: TransferAuthorization::new(vec![Allocation {
            source_port: PortId::transfer(),
            source_channel: ChannelId::zero(),
            spend_limit: BaseCoin::from_string_list(spend_limit)?,
            allow_list: allow_list.iter().map(ToString::to_string).collect(),
        }]),
    })
}
