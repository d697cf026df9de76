use interchain_primitives::prelude::*;

use crate::error::IdentifierError as Error;

const VALID_SPECIAL_CHARS: &str = "._+-#[]<>";

/// Checks that the identifier only holds ASCII alphanumerics or one of
/// `.`, `_`, `+`, `-`, `#`, `[`, `]`, `<`, `>`.
///
/// Store keys rely on this: the tag bytes separating a channel id from the
/// rest of a key can never appear inside an identifier.
pub fn validate_identifier_chars(id: &str) -> Result<(), Error> {
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || VALID_SPECIAL_CHARS.contains(c))
    {
        return Err(Error::InvalidCharacter { id: id.into() });
    }

    Ok(())
}

/// Checks that the identifier length lies within `[min, max]`. Empty
/// identifiers are always rejected.
pub fn validate_identifier_length(id: &str, min: u64, max: u64) -> Result<(), Error> {
    let min = min.max(1);
    let length = id.len() as u64;
    if (min..=max).contains(&length) {
        Ok(())
    } else {
        Err(Error::InvalidLength {
            id: id.into(),
            min,
            max,
        })
    }
}

/// Checks that the identifier is a named u64 index: `{name}-{u64}`, without
/// leading zeros.
pub fn validate_named_u64_index(id: &str, name: &str) -> Result<(), Error> {
    let invalid = || Error::InvalidPrefix {
        id: id.into(),
        prefix: name.into(),
    };

    let number_s = id
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('-'))
        .ok_or_else(invalid)?;

    if number_s.starts_with('0') && number_s.len() > 1 {
        return Err(invalid());
    }

    number_s.parse::<u64>().map_err(|_| invalid())?;

    Ok(())
}

/// A valid port identifier is 2-128 characters long.
pub fn validate_port_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 2, 128)
}

/// A valid channel identifier is 8-64 characters long and has the form
/// `channel-{N}`.
pub fn validate_channel_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 8, 64)?;
    validate_named_u64_index(id, crate::identifiers::ChannelId::prefix())
}

/// A valid connection identifier is 10-64 characters long and has the form
/// `connection-{N}`.
pub fn validate_connection_identifier(id: &str) -> Result<(), Error> {
    validate_identifier_chars(id)?;
    validate_identifier_length(id, 10, 64)?;
    validate_named_u64_index(id, crate::identifiers::ConnectionId::prefix())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn parse_invalid_port_id_min() {
        assert!(validate_port_identifier("p").is_err())
    }

    #[test]
    fn parse_invalid_port_id_max() {
        let id = "a".repeat(129);
        assert!(validate_port_identifier(&id).is_err());
        assert!(validate_port_identifier(&id[..128]).is_ok());
    }

    #[rstest]
    #[case("channel-0")]
    #[case("channel-123")]
    #[case("channel-18446744073709551615")]
    fn parse_valid_channel_id(#[case] id: &str) {
        validate_channel_identifier(id).expect("success");
    }

    #[rstest]
    #[case("channel")]
    #[case("channel-0123")]
    #[case("channel0123")]
    #[case("chan-1")]
    #[case("channel-18446744073709551616")]
    #[case("channel-1/2")]
    fn parse_invalid_channel_id(#[case] id: &str) {
        validate_channel_identifier(id).expect_err("failure");
    }

    #[rstest]
    #[case("connection-0", true)]
    #[case("connection-42", true)]
    #[case("connect01", false)]
    #[case("connection-01", false)]
    fn parse_connection_id(#[case] id: &str, #[case] valid: bool) {
        assert_eq!(validate_connection_identifier(id).is_ok(), valid);
    }

    #[rstest]
    #[case("transfer")]
    #[case("port.with_specials+#[]<>")]
    fn valid_chars(#[case] id: &str) {
        assert!(validate_identifier_chars(id).is_ok());
    }

    #[rstest]
    #[case("ports/transfer")]
    #[case("transfér")]
    #[case("tab\tbed")]
    #[case("nul\u{1}byte")]
    fn invalid_chars(#[case] id: &str) {
        assert!(validate_identifier_chars(id).is_err());
    }
}
