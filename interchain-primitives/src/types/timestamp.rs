//! Defines the representation of host and counterparty timestamps.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::num::ParseIntError;
use core::str::FromStr;
use core::time::Duration;

use displaydoc::Display;
use time::OffsetDateTime;

use crate::prelude::*;

/// A point in time counted in nanoseconds since the UNIX epoch.
///
/// The zero value is a valid timestamp; callers that use zero as a
/// "no timestamp" marker wrap it in their own type.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(PartialEq, Eq, Copy, Clone, Debug, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp {
    nanoseconds: u64,
}

impl Timestamp {
    pub const fn from_nanoseconds(nanoseconds: u64) -> Self {
        Self { nanoseconds }
    }

    pub fn from_unix_timestamp(secs: u64, nanos: u32) -> Result<Self, TimestampError> {
        if nanos > 999_999_999 {
            return Err(TimestampError::DateOutOfRange);
        }

        secs.checked_mul(1_000_000_000)
            .and_then(|n| n.checked_add(u64::from(nanos)))
            .map(Self::from_nanoseconds)
            .ok_or(TimestampError::DateOutOfRange)
    }

    /// Returns a `Timestamp` representation of the current time.
    #[cfg(feature = "std")]
    pub fn now() -> Self {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        Self::from_nanoseconds(u64::try_from(nanos).unwrap_or_default())
    }

    pub fn nanoseconds(self) -> u64 {
        self.nanoseconds
    }

    /// Computes the duration elapsed from `other` to `self`, if `self` is later.
    pub fn duration_since(&self, other: &Self) -> Option<Duration> {
        self.nanoseconds
            .checked_sub(other.nanoseconds)
            .map(Duration::from_nanos)
    }

    pub fn checked_add(self, duration: Duration) -> Result<Self, TimestampError> {
        u64::try_from(duration.as_nanos())
            .ok()
            .and_then(|d| self.nanoseconds.checked_add(d))
            .map(Self::from_nanoseconds)
            .ok_or(TimestampError::TimestampOverflow)
    }

    pub fn checked_sub(self, duration: Duration) -> Result<Self, TimestampError> {
        u64::try_from(duration.as_nanos())
            .ok()
            .and_then(|d| self.nanoseconds.checked_sub(d))
            .map(Self::from_nanoseconds)
            .ok_or(TimestampError::TimestampOverflow)
    }
}

impl From<u64> for Timestamp {
    fn from(nanoseconds: u64) -> Self {
        Self::from_nanoseconds(nanoseconds)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_nanoseconds(s.parse::<u64>()?))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.nanoseconds)) {
            Ok(odt) => write!(f, "{odt}"),
            Err(_) => write!(f, "{}ns", self.nanoseconds),
        }
    }
}

#[derive(Debug, Display, derive_more::From)]
pub enum TimestampError {
    /// parsing u64 integer from string error: `{0}`
    ParseInt(ParseIntError),
    /// date out of range
    DateOutOfRange,
    /// timestamp overflow when modifying with duration
    TimestampOverflow,
}

#[cfg(feature = "std")]
impl std::error::Error for TimestampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::ParseInt(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use rstest::rstest;

    use super::*;

    #[test]
    fn test_timestamp_comparisons() {
        let nil_timestamp = Timestamp::from_nanoseconds(0);
        assert_eq!(nil_timestamp.nanoseconds(), 0);

        let timestamp1 = Timestamp::from_nanoseconds(1);
        let timestamp2 = Timestamp::from_nanoseconds(1_000_000_000);

        assert!(timestamp1 < timestamp2);
        assert!(nil_timestamp < timestamp1);
        assert_eq!(
            timestamp2.duration_since(&timestamp1),
            Some(Duration::from_nanos(999_999_999))
        );
        assert_eq!(timestamp1.duration_since(&timestamp2), None);
    }

    #[rstest]
    #[case(100, 50, Some(150), Some(50))]
    #[case(0, 50, Some(50), None)]
    #[case(u64::MAX, 1, None, Some(u64::MAX - 1))]
    fn test_timestamp_arithmetic(
        #[case] base: u64,
        #[case] delta: u64,
        #[case] added: Option<u64>,
        #[case] subtracted: Option<u64>,
    ) {
        let time = Timestamp::from_nanoseconds(base);
        let duration = Duration::from_nanos(delta);

        assert_eq!(
            time.checked_add(duration).ok().map(Timestamp::nanoseconds),
            added
        );
        assert_eq!(
            time.checked_sub(duration).ok().map(Timestamp::nanoseconds),
            subtracted
        );
    }

    #[test]
    fn test_from_unix_timestamp() {
        let ts = Timestamp::from_unix_timestamp(2, 5).unwrap();
        assert_eq!(ts.nanoseconds(), 2_000_000_005);

        assert!(Timestamp::from_unix_timestamp(1, 1_000_000_000).is_err());
        assert!(Timestamp::from_unix_timestamp(u64::MAX, 0).is_err());
    }

    #[test]
    fn test_display_is_rfc_like() {
        let ts = Timestamp::from_nanoseconds(0);
        assert!(ts.to_string().starts_with("1970-01-01"));
    }
}
