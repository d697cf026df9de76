//! Defines coin types; the objects that are being transferred.
use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use interchain_primitives::prelude::*;

use super::amount::Amount;
use super::denom::{BaseDenom, PrefixedDenom};
use super::error::TokenTransferError;

/// A `Coin` type with fully qualified `PrefixedDenom`.
pub type PrefixedCoin = Coin<PrefixedDenom>;

/// A `Coin` type with an unprefixed denomination.
pub type BaseCoin = Coin<BaseDenom>;

pub type RawCoin = Coin<String>;

/// Allowed characters in string representation of a denomination.
const VALID_DENOM_CHARACTERS: &str = "/:._-";

/// Coin defines a token with a denomination and an amount.
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Coin<D> {
    /// Denomination
    pub denom: D,
    /// Amount
    pub amount: Amount,
}

impl<D> Coin<D> {
    pub fn new(denom: D, amount: impl Into<Amount>) -> Self {
        Self {
            denom,
            amount: amount.into(),
        }
    }
}

impl<D: FromStr> Coin<D>
where
    D::Err: Into<TokenTransferError>,
{
    pub fn from_string_list(coin_str: &str) -> Result<Vec<Self>, TokenTransferError> {
        coin_str.split(',').map(FromStr::from_str).collect()
    }
}

impl<D: FromStr> FromStr for Coin<D>
where
    D::Err: Into<TokenTransferError>,
{
    type Err = TokenTransferError;

    /// Parses `{amount}{denom}`, e.g. `100uatom`. The denomination may contain
    /// letters, digits and the separators `/:._-`.
    fn from_str(coin_str: &str) -> Result<Self, TokenTransferError> {
        let (amount, denom) = coin_str
            .chars()
            .position(|x| !x.is_numeric())
            .map(|index| coin_str.split_at(index))
            .filter(|(amount, _)| !amount.is_empty())
            .filter(|(_, denom)| {
                denom
                    .chars()
                    .all(|x| x.is_alphanumeric() || VALID_DENOM_CHARACTERS.contains(x))
            })
            .ok_or_else(|| TokenTransferError::InvalidCoin {
                coin: coin_str.to_string(),
            })?;

        Ok(Coin {
            amount: amount.parse()?,
            denom: denom.parse().map_err(Into::into)?,
        })
    }
}

impl From<BaseCoin> for PrefixedCoin {
    fn from(coin: BaseCoin) -> PrefixedCoin {
        PrefixedCoin {
            denom: coin.denom.into(),
            amount: coin.amount,
        }
    }
}

impl<D: Display> Display for Coin<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use primitive_types::U256;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::nat("123stake", 123, "stake")]
    #[case::zero("0stake", 0, "stake")]
    #[case::u256_max(
        "115792089237316195423570985008687907853269984665640564039457584007913129639935stake",
        U256::MAX,
        "stake"
    )]
    #[case::digit_in_denom("1a1", 1, "a1")]
    #[case::ibc_denom("1234ibc/a0B1C", 1234, "ibc/a0B1C")]
    fn parses_raw_coins(
        #[case] raw: &str,
        #[case] amount: impl Into<Amount>,
        #[case] denom: &str,
    ) -> Result<(), TokenTransferError> {
        assert_eq!(
            RawCoin::from_str(raw)?,
            RawCoin {
                denom: denom.into(),
                amount: amount.into()
            }
        );
        Ok(())
    }

    #[rstest]
    #[case::pos("+123stake")]
    #[case::neg("-123stake")]
    #[case::no_amount("stake")]
    #[case::u256_max_plus_1(
        "115792089237316195423570985008687907853269984665640564039457584007913129639936stake"
    )]
    #[case::invalid_char_in_denom("0x!")]
    fn rejects_malformed_coins(#[case] raw: &str) {
        assert!(RawCoin::from_str(raw).is_err());
    }

    #[test]
    fn parses_coin_lists() -> Result<(), TokenTransferError> {
        let coins = BaseCoin::from_string_list("123stake,1a1,999den0m")?;
        assert_eq!(
            coins.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["123stake", "1a1", "999den0m"]
        );
        Ok(())
    }
}
