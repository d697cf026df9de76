//! Serde helpers shared by domain types that travel as strings or hex on the wire.

use core::fmt::Display;
use core::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serializer};
use subtle_encoding::{Encoding, Hex};

use crate::prelude::*;

/// Serializes any `Display` value as a string.
pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.serialize_str(value.to_string().as_ref())
}

/// Deserializes any `FromStr` value from a string.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    T::from_str(<String>::deserialize(deserializer)?.as_str()).map_err(de::Error::custom)
}

/// Serializes raw bytes as an upper-case hex string.
pub fn ser_hex_upper<S, T>(data: T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: AsRef<[u8]>,
{
    let hex = Hex::upper_case()
        .encode_to_string(data)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&hex)
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Wrapped {
        #[serde(serialize_with = "ser_hex_upper")]
        data: Vec<u8>,
        #[serde(serialize_with = "serialize")]
        amount: u64,
    }

    #[test]
    fn test_hex_and_display_serialization() {
        let value = Wrapped {
            data: vec![0xde, 0xad, 0x01],
            amount: 42,
        };
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"data":"DEAD01","amount":"42"}"#);
    }
}
