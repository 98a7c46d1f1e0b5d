// ----- standard library imports
use std::str::FromStr;
// ----- extra library imports
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;
// ----- local imports

// ----- end imports

/// highest precision `Decimal` can represent without losing digits
pub const MAX_DECIMALS: u8 = 28;

pub type Result<T> = std::result::Result<T, Error>;
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("negative amount: {0}")]
    Negative(Decimal),
    #[error("unsupported token decimals: {0}")]
    UnsupportedDecimals(u8),
    #[error("amount {0} does not fit in smallest units")]
    Overflow(Decimal),
}

/// Parses a human-entered amount such as `"1.5"` or `"1e3"`.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| Error::Invalid(String::from(trimmed)))
}

fn scale_factor(decimals: u8) -> Result<Decimal> {
    if decimals > MAX_DECIMALS {
        return Err(Error::UnsupportedDecimals(decimals));
    }
    let factor = 10_i128.pow(u32::from(decimals));
    Decimal::try_from_i128_with_scale(factor, 0).map_err(|_| Error::UnsupportedDecimals(decimals))
}

/// `amount * 10^decimals`, truncating digits beyond the token precision.
pub fn to_smallest_units(amount: Decimal, decimals: u8) -> Result<u64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::Negative(amount));
    }
    let scaled = amount
        .checked_mul(scale_factor(decimals)?)
        .ok_or(Error::Overflow(amount))?;
    scaled.trunc().to_u64().ok_or(Error::Overflow(amount))
}

/// `raw / 10^decimals`, exact.
pub fn from_smallest_units(raw: u64, decimals: u8) -> Result<Decimal> {
    if decimals > MAX_DECIMALS {
        return Err(Error::UnsupportedDecimals(decimals));
    }
    Decimal::try_from_i128_with_scale(i128::from(raw), u32::from(decimals))
        .map_err(|_| Error::UnsupportedDecimals(decimals))
}

/// Renders an amount for display, without trailing zeros.
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_smallest_units_sol() {
        let amount = parse_amount("1.5").unwrap();
        assert_eq!(to_smallest_units(amount, 9).unwrap(), 1_500_000_000);
    }

    #[test]
    fn to_smallest_units_usdc() {
        let amount = parse_amount("25.75").unwrap();
        assert_eq!(to_smallest_units(amount, 6).unwrap(), 25_750_000);
    }

    #[test]
    fn to_smallest_units_truncates_extra_precision() {
        let amount = parse_amount("1.23456789").unwrap();
        assert_eq!(to_smallest_units(amount, 6).unwrap(), 1_234_567);

        let dust = parse_amount("0.0000001").unwrap();
        assert_eq!(to_smallest_units(dust, 6).unwrap(), 0);
    }

    #[test]
    fn to_smallest_units_zero_decimals() {
        let amount = parse_amount("42").unwrap();
        assert_eq!(to_smallest_units(amount, 0).unwrap(), 42);
    }

    #[test]
    fn to_smallest_units_negative() {
        let amount = parse_amount("-1").unwrap();
        assert!(matches!(
            to_smallest_units(amount, 9),
            Err(Error::Negative(_))
        ));
    }

    #[test]
    fn to_smallest_units_overflow() {
        let amount = parse_amount("100000000000").unwrap();
        assert!(matches!(
            to_smallest_units(amount, 18),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn from_smallest_units_display() {
        let out = from_smallest_units(2_000_000_000, 9).unwrap();
        assert_eq!(format_amount(out), "2");

        let out = from_smallest_units(123_456, 6).unwrap();
        assert_eq!(format_amount(out), "0.123456");

        let out = from_smallest_units(0, 9).unwrap();
        assert_eq!(format_amount(out), "0");
    }

    #[test]
    fn unsupported_decimals() {
        assert_eq!(
            from_smallest_units(1, 29),
            Err(Error::UnsupportedDecimals(29))
        );
        let amount = parse_amount("1").unwrap();
        assert_eq!(
            to_smallest_units(amount, 40),
            Err(Error::UnsupportedDecimals(40))
        );
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
        assert_eq!(parse_amount(" 0.5 ").unwrap().to_string(), "0.5");
        assert!(parse_amount("1e").is_err());
    }

    #[test]
    fn parse_amount_exponent() {
        let amount = parse_amount("1e3").unwrap();
        assert_eq!(to_smallest_units(amount, 6).unwrap(), 1_000_000_000);
        let amount = parse_amount("1.5e-3").unwrap();
        assert_eq!(to_smallest_units(amount, 9).unwrap(), 1_500_000);
    }
}
