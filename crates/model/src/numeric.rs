// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Conversion between on-chain fixed-point integers and human-readable decimals.
//!
//! The implementation never goes through floating point:
//! - Human amounts are arbitrary-precision [`BigDecimal`] values.
//! - Scaling to on-chain units is a pure exponent shift followed by truncation toward zero.
//! - Scaling back to human units is exact, the result keeps every on-chain digit.

use std::str::FromStr;

use alloy_primitives::U256;
use bigdecimal::{
    BigDecimal, Zero,
    num_bigint::{BigInt, Sign},
};
use rust_decimal::Decimal;

/// The denominator of every basis-point value read from the contracts.
pub const BASIS_POINTS_DEN: u64 = 10_000;

/// Decimal digits of `U256::MAX`.
const U256_MAX_DIGITS: i128 = 78;

/// Errors raised by the numeric codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumericError {
    #[error("Invalid numeric input: {0}")]
    InvalidNumericInput(String),
    #[error("Value {0} does not fit in 256 bits")]
    Overflow(String),
    #[error("Division by zero in ratio {0}")]
    DivisionByZero(String),
}

/// Parses a human amount, accepting plain and exponent notation (`"1.5"`, `"2e-3"`).
///
/// # Errors
///
/// Returns [`NumericError::InvalidNumericInput`] if `input` is not a non-negative real number.
pub fn parse_amount(input: &str) -> Result<BigDecimal, NumericError> {
    let trimmed = input.trim();
    let value = BigDecimal::from_str(trimmed)
        .map_err(|_| NumericError::InvalidNumericInput(input.to_string()))?;

    if value.sign() == Sign::Minus {
        return Err(NumericError::InvalidNumericInput(input.to_string()));
    }
    Ok(value)
}

/// Scales `value` by `10^decimals` and truncates toward zero.
///
/// # Errors
///
/// Returns an error if `value` is negative or the scaled integer exceeds 256 bits.
pub fn to_on_chain(value: &BigDecimal, decimals: u8) -> Result<U256, NumericError> {
    if value.sign() == Sign::Minus {
        return Err(NumericError::InvalidNumericInput(describe(value)));
    }

    if value.is_zero() {
        return Ok(U256::ZERO);
    }

    let (digits, scale) = value.as_bigint_and_exponent();
    let scale = scale
        .checked_sub(i64::from(decimals))
        .ok_or_else(|| NumericError::Overflow(describe(value)))?;

    // Bound the integer part before materializing it, exponents may be arbitrarily large
    let integer_digits = i128::from(value.digits()) - i128::from(scale);
    if integer_digits <= 0 {
        return Ok(U256::ZERO);
    }
    if integer_digits > U256_MAX_DIGITS {
        return Err(NumericError::Overflow(describe(value)));
    }

    // `with_scale` drops digits by integer division, i.e. truncation.
    let shifted = BigDecimal::new(digits, scale).with_scale(0);
    let (integer, _) = shifted.as_bigint_and_exponent();

    bigint_to_u256(&integer).ok_or_else(|| NumericError::Overflow(describe(value)))
}

/// Parses a human amount and converts it to on-chain units in one step.
///
/// # Errors
///
/// Returns an error if parsing or scaling fails.
pub fn parse_on_chain(input: &str, decimals: u8) -> Result<U256, NumericError> {
    to_on_chain(&parse_amount(input)?, decimals)
}

/// Scales an on-chain integer by `10^-decimals`, keeping full precision.
#[must_use]
pub fn to_human(raw: U256, decimals: u8) -> BigDecimal {
    BigDecimal::new(u256_to_bigint(raw), i64::from(decimals))
}

/// Returns `num / den` as a high-precision decimal.
///
/// # Errors
///
/// Returns [`NumericError::DivisionByZero`] if `den` is zero.
pub fn ratio(num: U256, den: U256) -> Result<BigDecimal, NumericError> {
    if den.is_zero() {
        return Err(NumericError::DivisionByZero(format!("{num}/{den}")));
    }
    Ok(to_human(num, 0) / to_human(den, 0))
}

/// Converts a basis-point value (`x / 10_000`) to an exact decimal ratio.
///
/// # Errors
///
/// Returns [`NumericError::Overflow`] if `bps` does not fit in a `u64`.
pub fn basis_points_to_ratio(bps: U256) -> Result<Decimal, NumericError> {
    let bps = u64::try_from(bps).map_err(|_| NumericError::Overflow(bps.to_string()))?;
    Ok(Decimal::from(bps) / Decimal::from(BASIS_POINTS_DEN))
}

/// Returns `10^exponent` as an exact decimal, negative exponents included.
#[must_use]
pub fn pow10(exponent: i64) -> BigDecimal {
    BigDecimal::new(BigInt::from(1u8), -exponent)
}

/// Converts a fixed-precision [`Decimal`] to a [`BigDecimal`] without loss.
#[must_use]
pub fn from_decimal(value: Decimal) -> BigDecimal {
    BigDecimal::new(BigInt::from(value.mantissa()), i64::from(value.scale()))
}

// Scientific form, never expands the exponent
fn describe(value: &BigDecimal) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    format!("{digits}e{}", -i128::from(scale))
}

fn u256_to_bigint(value: U256) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, &value.to_be_bytes::<32>())
}

fn bigint_to_u256(value: &BigInt) -> Option<U256> {
    let (sign, bytes) = value.to_bytes_be();
    if sign == Sign::Minus || bytes.len() > 32 {
        return None;
    }
    U256::try_from_be_slice(&bytes)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    fn bd(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case("1", 18, "1000000000000000000")]
    #[case("1.23456789", 6, "1234567")]
    #[case("0.0000009", 6, "0")]
    #[case("0.00001", 18, "10000000000000")]
    #[case("2e-3", 3, "2")]
    #[case("12", 0, "12")]
    #[case("12.999", 0, "12")]
    fn test_to_on_chain_truncates(#[case] input: &str, #[case] decimals: u8, #[case] expected: &str) {
        let raw = parse_on_chain(input, decimals).unwrap();
        assert_eq!(raw, U256::from_str(expected).unwrap());
    }

    #[rstest]
    #[case("-1")]
    #[case("abc")]
    #[case("")]
    #[case("1.2.3")]
    fn test_parse_amount_rejects_invalid(#[case] input: &str) {
        assert!(matches!(
            parse_amount(input),
            Err(NumericError::InvalidNumericInput(_))
        ));
    }

    #[rstest]
    fn test_to_on_chain_overflow() {
        let too_big = to_human(U256::MAX, 0) + BigDecimal::from(1);
        assert!(matches!(
            to_on_chain(&too_big, 0),
            Err(NumericError::Overflow(_))
        ));
        assert_eq!(to_on_chain(&to_human(U256::MAX, 0), 0).unwrap(), U256::MAX);
    }

    #[rstest]
    #[case("1e9223372036854775807", 18)]
    #[case("1e20000000", 18)]
    #[case("1e61", 18)]
    #[case("123456789e70", 0)]
    fn test_huge_exponent_overflows(#[case] input: &str, #[case] decimals: u8) {
        assert!(matches!(
            parse_on_chain(input, decimals),
            Err(NumericError::Overflow(_))
        ));
    }

    #[rstest]
    #[case("1e-9223372036854775807", 18)]
    #[case("1e-20000000", 18)]
    #[case("0e20000000", 18)]
    #[case("5e-19", 18)]
    fn test_tiny_or_zero_truncates_to_zero(#[case] input: &str, #[case] decimals: u8) {
        assert_eq!(parse_on_chain(input, decimals).unwrap(), U256::ZERO);
    }

    #[rstest]
    fn test_largest_exponent_that_fits() {
        // 1e77 is 78 digits, the same as U256::MAX
        assert_eq!(
            parse_on_chain("1e59", 18).unwrap(),
            U256::from(10u8).pow(U256::from(77u8))
        );
    }

    #[rstest]
    #[case(U256::from(1234567u64), 6, "1.234567")]
    #[case(U256::from(1u64), 18, "0.000000000000000001")]
    #[case(U256::ZERO, 18, "0")]
    fn test_to_human_exact(#[case] raw: U256, #[case] decimals: u8, #[case] expected: &str) {
        assert_eq!(to_human(raw, decimals), bd(expected));
    }

    #[rstest]
    fn test_round_trip_never_rounds_up() {
        let raw = U256::from_str("44721359549995793").unwrap();
        assert_eq!(to_on_chain(&to_human(raw, 18), 18).unwrap(), raw);

        // Truncation at a coarser precision loses digits but never increases the value.
        let coarse = to_on_chain(&to_human(raw, 18), 6).unwrap();
        assert_eq!(coarse, U256::from(44_721u64));
    }

    #[rstest]
    fn test_ratio() {
        let r = ratio(U256::from(1u64), U256::from(4u64)).unwrap();
        assert_eq!(r, bd("0.25"));
        assert!(matches!(
            ratio(U256::from(1u64), U256::ZERO),
            Err(NumericError::DivisionByZero(_))
        ));
    }

    #[rstest]
    #[case(0, dec!(0))]
    #[case(1000, dec!(0.1))]
    #[case(10_000, dec!(1))]
    #[case(1, dec!(0.0001))]
    fn test_basis_points_to_ratio(#[case] bps: u64, #[case] expected: Decimal) {
        assert_eq!(basis_points_to_ratio(U256::from(bps)).unwrap(), expected);
    }

    #[rstest]
    fn test_pow10() {
        assert_eq!(pow10(3), bd("1000"));
        assert_eq!(pow10(-2), bd("0.01"));
        assert_eq!(pow10(0), bd("1"));
    }

    #[rstest]
    #[case(dec!(99.5), "99.5")]
    #[case(dec!(-0.25), "-0.25")]
    #[case(dec!(100), "100")]
    fn test_from_decimal(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(from_decimal(value), bd(expected));
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    proptest! {
        #[rstest]
        fn prop_to_on_chain_truncates_toward_zero(
            mantissa in any::<u128>(),
            scale in 0u8..=36,
            decimals in 0u8..=18,
        ) {
            let value = to_human(U256::from(mantissa), scale);
            let raw = to_on_chain(&value, decimals).unwrap();
            let back = to_human(raw, decimals);

            prop_assert!(back <= value);
            prop_assert!(&value - &back < pow10(-i64::from(decimals)));
        }

        #[rstest]
        fn prop_on_chain_round_trip(mantissa in any::<u128>(), decimals in 0u8..=18) {
            let raw = U256::from(mantissa);
            prop_assert_eq!(to_on_chain(&to_human(raw, decimals), decimals).unwrap(), raw);
        }

        #[rstest]
        fn prop_parse_on_chain_shifts_digit_strings(
            integer in "[0-9]{1,20}",
            fraction in "[0-9]{0,24}",
            decimals in 0u8..=18,
        ) {
            let input = if fraction.is_empty() {
                integer.clone()
            } else {
                format!("{integer}.{fraction}")
            };
            let kept: String = fraction.chars().take(usize::from(decimals)).collect();
            let expected = format!("{integer}{kept:0<width$}", width = usize::from(decimals));

            prop_assert_eq!(
                parse_on_chain(&input, decimals).unwrap(),
                U256::from_str(&expected).unwrap()
            );
        }
    }
}
