use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use derive_more::Into;
use interchain_primitives::prelude::*;

use crate::error::IdentifierError;
use crate::validate::validate_connection_identifier;

const CONNECTION_ID_PREFIX: &str = "connection";

/// Identifies the connection a channel runs over. The packet core only uses
/// it to pick the light client tracking the counterparty chain.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Into)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(counter: u64) -> Self {
        Self(format!("{}-{}", Self::prefix(), counter))
    }

    pub fn prefix() -> &'static str {
        CONNECTION_ID_PREFIX
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn zero() -> Self {
        Self::new(0)
    }
}

impl Display for ConnectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConnectionId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_connection_identifier(s).map(|_| Self(s.to_string()))
    }
}

impl AsRef<str> for ConnectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
