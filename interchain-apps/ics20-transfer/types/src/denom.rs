//! Denominations and their trace paths.
//!
//! A denomination that crossed one or more channels carries the
//! `{port}/{channel}` hops it took, most recent first, ahead of its base
//! denomination. On a chain that holds it as a voucher, the bank knows it by
//! the hashed form `ibc/{HASH}`.
use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use derive_more::{Display, From};
use interchain_core_host_types::identifiers::{ChannelId, PortId};
use interchain_primitives::prelude::*;
use interchain_primitives::serializers;
use sha2::{Digest, Sha256};
use subtle_encoding::hex;

use super::error::TokenTransferError;

/// Prefix of the hashed voucher denomination.
pub const VOUCHER_DENOM_PREFIX: &str = "ibc";

/// The "base" of a denomination.
///
/// For example, given the token `my_port-1/my_channel-1/my_port-2/my_channel-2/base_denom`,
/// `base_denom` is the "base" of the denomination
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(
    Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Display, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct BaseDenom(String);

impl BaseDenom {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BaseDenom {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            Err(TokenTransferError::EmptyBaseDenom)
        } else {
            Ok(BaseDenom(s.to_owned()))
        }
    }
}

/// One hop in a token's trace: the port and channel identifiers of the
/// receiving end of a transfer.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Ord, PartialOrd, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TracePrefix {
    port_id: PortId,
    channel_id: ChannelId,
}

impl TracePrefix {
    pub fn new(port_id: PortId, channel_id: ChannelId) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }
}

impl Display for TracePrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}/{}", self.port_id, self.channel_id)
    }
}

/// A full trace path modelled as a collection of `TracePrefix`s.
// Stored in reverse, i.e. "transfer/channel-0/transfer/channel-1/uatom" is
// `["transfer/channel-1", "transfer/channel-0"]`, so the outermost hop sits
// at the end of the vector.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(
    Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord, From, serde::Serialize, serde::Deserialize,
)]
pub struct TracePath(Vec<TracePrefix>);

impl TracePath {
    /// Creates a trace path from prefixes given outermost first.
    pub fn new(mut trace: Vec<TracePrefix>) -> Self {
        trace.reverse();
        Self(trace)
    }

    /// Returns true iff this path starts with the specified prefix
    pub fn starts_with(&self, prefix: &TracePrefix) -> bool {
        self.0.last().map(|p| p == prefix).unwrap_or(false)
    }

    /// Removes the specified prefix from the path if there is a match, otherwise does nothing.
    pub fn remove_prefix(&mut self, prefix: &TracePrefix) {
        if self.starts_with(prefix) {
            self.0.pop();
        }
    }

    /// Adds the specified prefix to the path.
    pub fn add_prefix(&mut self, prefix: TracePrefix) {
        self.0.push(prefix)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn empty() -> Self {
        Self(vec![])
    }
}

impl<'a> TryFrom<Vec<&'a str>> for TracePath {
    type Error = TokenTransferError;

    fn try_from(v: Vec<&'a str>) -> Result<Self, Self::Error> {
        if v.len() % 2 != 0 {
            return Err(TokenTransferError::InvalidTraceLength {
                len: v.len() as u64,
            });
        }

        let mut trace = vec![];
        let id_pairs = v.chunks_exact(2).map(|paths| (paths[0], paths[1]));
        for (pos, (port_id, channel_id)) in id_pairs.rev().enumerate() {
            let port_id =
                PortId::from_str(port_id).map_err(|e| TokenTransferError::InvalidTracePortId {
                    pos: pos as u64,
                    validation_error: e,
                })?;
            let channel_id = ChannelId::from_str(channel_id).map_err(|e| {
                TokenTransferError::InvalidTraceChannelId {
                    pos: pos as u64,
                    validation_error: e,
                }
            })?;
            trace.push(TracePrefix {
                port_id,
                channel_id,
            });
        }

        Ok(trace.into())
    }
}

impl FromStr for TracePath {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() == 1 && parts[0].trim().is_empty() {
                vec![]
            } else {
                parts
            }
        };
        parts.try_into()
    }
}

impl Display for TracePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        let path = self
            .0
            .iter()
            .rev()
            .map(|prefix| prefix.to_string())
            .collect::<Vec<String>>()
            .join("/");
        write!(f, "{path}")
    }
}

/// A base denomination together with the trace of channels it crossed.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct PrefixedDenom {
    /// A series of `{port-id}/{channel-id}`s for tracing the source of the token.
    #[serde(
        serialize_with = "serializers::serialize",
        deserialize_with = "serializers::deserialize"
    )]
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub trace_path: TracePath,
    /// Base denomination of the relayed fungible token.
    pub base_denom: BaseDenom,
}

impl PrefixedDenom {
    /// Removes the specified prefix from the trace path if there is a match, otherwise does nothing.
    pub fn remove_trace_prefix(&mut self, prefix: &TracePrefix) {
        self.trace_path.remove_prefix(prefix)
    }

    /// Adds the specified prefix to the trace path.
    pub fn add_trace_prefix(&mut self, prefix: TracePrefix) {
        self.trace_path.add_prefix(prefix)
    }

    /// Upper-case hex of `sha256` over the full `{trace}/{base}` path, or
    /// `None` for a native denomination.
    pub fn trace_hash(&self) -> Option<String> {
        if self.trace_path.is_empty() {
            return None;
        }

        let digest = Sha256::digest(self.to_string().as_bytes());
        Some(String::from_utf8_lossy(&hex::encode_upper(digest)).into_owned())
    }

    /// The denomination under which the local bank holds this token: the
    /// base denomination for native tokens, `ibc/{HASH}` for vouchers.
    pub fn ibc_denom(&self) -> String {
        match self.trace_hash() {
            Some(hash) => format!("{VOUCHER_DENOM_PREFIX}/{hash}"),
            None => self.base_denom.to_string(),
        }
    }

    /// Extracts `HASH` from a denomination written as `ibc/{HASH}`.
    pub fn voucher_hash(&self) -> Option<&str> {
        if !self.trace_path.is_empty() {
            return None;
        }
        self.base_denom
            .as_str()
            .strip_prefix(VOUCHER_DENOM_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|hash| !hash.is_empty())
    }
}

/// Returns true if the denomination originally came from the sender chain and
/// false otherwise.
///
/// The "source" chain is the one that escrows and unescrows the token, while
/// the other end mints and burns vouchers. It need not be the chain that
/// created the base denomination.
pub fn is_sender_chain_source(
    source_port: PortId,
    source_channel: ChannelId,
    denom: &PrefixedDenom,
) -> bool {
    !is_receiver_chain_source(source_port, source_channel, denom)
}

/// Returns true if the denomination originally came from the receiving chain and false otherwise.
pub fn is_receiver_chain_source(
    source_port: PortId,
    source_channel: ChannelId,
    denom: &PrefixedDenom,
) -> bool {
    // A token the receiver sent us over this channel was recorded as
    // "{source_port}/{source_channel}/{denom}" when it arrived here.
    let prefix = TracePrefix::new(source_port, source_channel);
    denom.trace_path.starts_with(&prefix)
}

impl FromStr for PrefixedDenom {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut trace_prefixes = vec![];

        let mut remaining_parts = s;

        loop {
            let parsed_prefix = remaining_parts
                .split_once('/')
                .and_then(|(port_id_s, remaining)| {
                    remaining
                        .split_once('/')
                        .map(|(channel_id_s, remaining)| (port_id_s, channel_id_s, remaining))
                })
                .and_then(|(port_id_s, channel_id_s, remaining)| {
                    let port_id = PortId::from_str(port_id_s).ok()?;
                    let channel_id = ChannelId::from_str(channel_id_s).ok()?;
                    Some((port_id, channel_id, remaining))
                });
            match parsed_prefix {
                Some((port_id, channel_id, remaining)) => {
                    trace_prefixes.push(TracePrefix::new(port_id, channel_id));
                    remaining_parts = remaining;
                }
                None => break,
            }
        }

        let trace_path = TracePath::new(trace_prefixes);
        let base_denom = BaseDenom::from_str(remaining_parts)?;

        Ok(Self {
            trace_path,
            base_denom,
        })
    }
}

impl From<BaseDenom> for PrefixedDenom {
    fn from(denom: BaseDenom) -> Self {
        Self {
            trace_path: TracePath::empty(),
            base_denom: denom,
        }
    }
}

impl Display for PrefixedDenom {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        if self.trace_path.0.is_empty() {
            write!(f, "{}", self.base_denom)
        } else {
            write!(f, "{}/{}", self.trace_path, self.base_denom)
        }
    }
}
