//! Defines acknowledgement types used by channel handlers and applications.

use core::fmt::{Display, Error as FmtError, Formatter};

use derive_more::Into;
use interchain_primitives::prelude::*;

use crate::error::PacketError;

/// A generic acknowledgement type: opaque, non-empty bytes written by the
/// receiving application.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, PartialEq, Eq, Into)]
pub struct Acknowledgement(Vec<u8>);

impl Acknowledgement {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl AsRef<[u8]> for Acknowledgement {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl TryFrom<Vec<u8>> for Acknowledgement {
    type Error = PacketError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            Err(PacketError::EmptyAcknowledgement)
        } else {
            Ok(Self(bytes))
        }
    }
}

/// Lets applications build an [`Acknowledgement`] from the success or
/// failure of processing a received packet.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AcknowledgementStatus {
    /// e.g. `{"result":"AQ=="}`
    #[cfg_attr(feature = "serde", serde(rename = "result"))]
    Success(StatusValue),
    /// e.g. `{"error":"cannot unmarshal ICS-20 transfer packet data"}`
    #[cfg_attr(feature = "serde", serde(rename = "error"))]
    Error(StatusValue),
}

const UNKNOWN_STATUS: &str = "unknown";

/// A non-empty status string.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusValue(String);

impl StatusValue {
    pub fn new(value: impl ToString) -> Result<Self, PacketError> {
        let value = value.to_string();

        if value.is_empty() {
            return Err(PacketError::EmptyAcknowledgementStatus);
        }

        Ok(Self(value))
    }

    /// Like [`StatusValue::new`], writing `unknown` in place of an empty value.
    pub fn new_or_unknown(value: impl ToString) -> Self {
        let value = value.to_string();

        if value.is_empty() {
            return Self(UNKNOWN_STATUS.to_string());
        }

        Self(value)
    }
}

impl Display for StatusValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{status_value}", status_value = self.0)
    }
}

impl AcknowledgementStatus {
    pub fn success(value: StatusValue) -> Self {
        Self::Success(value)
    }

    pub fn error(value: StatusValue) -> Self {
        Self::Error(value)
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, AcknowledgementStatus::Success(_))
    }
}

impl Display for AcknowledgementStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            AcknowledgementStatus::Success(v) | AcknowledgementStatus::Error(v) => write!(f, "{v}"),
        }
    }
}

/// Quotes and backslashes in the status are escaped so the output stays
/// valid JSON.
impl From<AcknowledgementStatus> for Vec<u8> {
    fn from(ack: AcknowledgementStatus) -> Self {
        let escape = |v: &StatusValue| v.0.replace('\\', "\\\\").replace('"', "\\\"");
        match ack {
            AcknowledgementStatus::Success(v) => {
                format!(r#"{{"result":"{}"}}"#, escape(&v)).into()
            }
            AcknowledgementStatus::Error(v) => format!(r#"{{"error":"{}"}}"#, escape(&v)).into(),
        }
    }
}

impl From<AcknowledgementStatus> for Acknowledgement {
    fn from(ack_status: AcknowledgementStatus) -> Self {
        // Both JSON forms are non-empty.
        Self(ack_status.into())
    }
}
