use core::fmt::{Display, Error as FmtError, Formatter};

use interchain_primitives::Timestamp;

/// Indicates a timestamp on the destination chain after which the packet is
/// no longer accepted. `Never` stands for the zero timestamp on the wire.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TimeoutTimestamp {
    Never,
    At(Timestamp),
}

impl TimeoutTimestamp {
    /// Nanoseconds to be used in packet commitment computation
    pub fn nanoseconds(&self) -> u64 {
        match self {
            Self::At(timestamp) => timestamp.nanoseconds(),
            Self::Never => 0,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::At(_))
    }

    /// A packet expires once the destination block time reaches the
    /// timeout timestamp.
    pub fn has_expired(&self, host_timestamp: &Timestamp) -> bool {
        match self {
            Self::At(timeout_timestamp) => host_timestamp >= timeout_timestamp,
            Self::Never => false,
        }
    }
}

impl Default for TimeoutTimestamp {
    fn default() -> Self {
        Self::Never
    }
}

impl From<u64> for TimeoutTimestamp {
    fn from(nanoseconds: u64) -> Self {
        match nanoseconds {
            0 => Self::Never,
            n => Self::At(Timestamp::from_nanoseconds(n)),
        }
    }
}

impl From<Timestamp> for TimeoutTimestamp {
    fn from(timestamp: Timestamp) -> Self {
        Self::from(timestamp.nanoseconds())
    }
}

impl Display for TimeoutTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::At(timeout_timestamp) => write!(f, "{timeout_timestamp}"),
            Self::Never => write!(f, "no timeout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_nanoseconds_means_no_timeout() {
        assert_eq!(TimeoutTimestamp::from(0), TimeoutTimestamp::Never);
        assert_eq!(TimeoutTimestamp::Never.nanoseconds(), 0);

        let timeout = TimeoutTimestamp::from(1_000);
        assert!(!timeout.has_expired(&Timestamp::from_nanoseconds(999)));
        assert!(timeout.has_expired(&Timestamp::from_nanoseconds(1_000)));
    }
}
