//! Defines the channel end, its counterparty, ordering and state.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use interchain_core_host_types::identifiers::{ChannelId, ConnectionId, PortId};
use interchain_primitives::prelude::*;
use interchain_primitives::utils::PrettySlice;

use crate::error::ChannelError;
use crate::Version;

/// The local end of a channel as stored by the host.
///
/// Channel ends are keyed by channel identifier alone, so each end records
/// the port it is bound to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelEnd {
    pub state: State,
    pub ordering: Order,
    pub port_id: PortId,
    pub remote: Counterparty,
    pub connection_hops: Vec<ConnectionId>,
    pub version: Version,
}

impl Display for ChannelEnd {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "ChannelEnd {{ state: {}, ordering: {}, port_id: {}, remote: {}, connection_hops: {}, version: {} }}",
            self.state,
            self.ordering,
            self.port_id,
            self.remote,
            PrettySlice(&self.connection_hops),
            self.version
        )
    }
}

impl ChannelEnd {
    pub fn new(
        state: State,
        ordering: Order,
        port_id: PortId,
        remote: Counterparty,
        connection_hops: Vec<ConnectionId>,
        version: Version,
    ) -> Result<Self, ChannelError> {
        let channel_end = Self {
            state,
            ordering,
            port_id,
            remote,
            connection_hops,
            version,
        };
        channel_end.validate_basic()?;
        Ok(channel_end)
    }

    /// Moves the channel end to `Closed`. Closing is terminal.
    pub fn close(&mut self) {
        self.state = State::Closed;
    }

    pub fn set_state(&mut self, s: State) {
        self.state = s;
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn ordering(&self) -> &Order {
        &self.ordering
    }

    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    pub fn counterparty(&self) -> &Counterparty {
        &self.remote
    }

    pub fn connection_hops(&self) -> &Vec<ConnectionId> {
        &self.connection_hops
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn validate_basic(&self) -> Result<(), ChannelError> {
        if self.state == State::Uninitialized {
            return Err(ChannelError::InvalidState {
                expected: State::Init,
                actual: self.state,
            });
        }

        self.verify_connection_hops_length()?;

        if self.state.is_open() && self.remote.channel_id.is_none() {
            return Err(ChannelError::MissingCounterpartyChannel);
        }

        Ok(())
    }

    /// Checks if the state of this channel end matches the expected state.
    pub fn verify_state_matches(&self, expected: &State) -> Result<(), ChannelError> {
        if !self.state.eq(expected) {
            return Err(ChannelError::InvalidState {
                expected: *expected,
                actual: self.state,
            });
        }
        Ok(())
    }

    /// Checks that the channel end is bound to the given port.
    pub fn verify_port_matches(
        &self,
        channel_id: &ChannelId,
        port_id: &PortId,
    ) -> Result<(), ChannelError> {
        if !self.port_id.eq(port_id) {
            return Err(ChannelError::MismatchedPort {
                channel_id: channel_id.clone(),
                expected: port_id.clone(),
                actual: self.port_id.clone(),
            });
        }
        Ok(())
    }

    /// Checks if the counterparty of this channel end matches with an expected counterparty.
    pub fn verify_counterparty_matches(&self, expected: &Counterparty) -> Result<(), ChannelError> {
        if !self.counterparty().eq(expected) {
            return Err(ChannelError::MismatchedCounterparty {
                expected: expected.to_string(),
                actual: self.counterparty().to_string(),
            });
        }
        Ok(())
    }

    /// Only single-hop channels are supported.
    pub fn verify_connection_hops_length(&self) -> Result<(), ChannelError> {
        if self.connection_hops.len() != 1 {
            return Err(ChannelError::InvalidConnectionHopsLength {
                expected: 1,
                actual: self.connection_hops.len() as u64,
            });
        }
        Ok(())
    }

    /// Returns the connection the channel runs over.
    pub fn connection_id(&self) -> Result<&ConnectionId, ChannelError> {
        self.verify_connection_hops_length()?;
        self.connection_hops
            .first()
            .ok_or(ChannelError::InvalidConnectionHopsLength {
                expected: 1,
                actual: 0,
            })
    }

    /// Returns the counterparty channel identifier, which must be known
    /// once the channel is open.
    pub fn counterparty_channel_id(&self) -> Result<&ChannelId, ChannelError> {
        self.remote
            .channel_id()
            .ok_or(ChannelError::MissingCounterpartyChannel)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counterparty {
    pub port_id: PortId,
    pub channel_id: Option<ChannelId>,
}

impl Counterparty {
    pub fn new(port_id: PortId, channel_id: Option<ChannelId>) -> Self {
        Self {
            port_id,
            channel_id,
        }
    }

    pub fn port_id(&self) -> &PortId {
        &self.port_id
    }

    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.channel_id.as_ref()
    }
}

impl Display for Counterparty {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match &self.channel_id {
            Some(channel_id) => write!(
                f,
                "Counterparty(port_id: {}, channel_id: {})",
                self.port_id, channel_id
            ),
            None => write!(
                f,
                "Counterparty(port_id: {}, channel_id: None)",
                self.port_id
            ),
        }
    }
}

/// Represents the channel ordering
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Unordered,
    Ordered,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unordered => "ORDER_UNORDERED",
            Self::Ordered => "ORDER_ORDERED",
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Order {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim_start_matches("order_") {
            "unordered" => Ok(Self::Unordered),
            "ordered" => Ok(Self::Ordered),
            _ => Err(ChannelError::AppModule {
                description: format!("unknown channel ordering `{s}`"),
            }),
        }
    }
}

/// Represents the state of a [`ChannelEnd`]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Uninitialized,
    Init,
    TryOpen,
    Open,
    Closed,
}

impl State {
    pub fn as_string(&self) -> &'static str {
        match self {
            Self::Uninitialized => "UNINITIALIZED",
            Self::Init => "INIT",
            Self::TryOpen => "TRYOPEN",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }

    pub fn is_open(self) -> bool {
        self == State::Open
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_string())
    }
}
