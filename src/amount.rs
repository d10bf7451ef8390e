//! USDC amount conversions between human-readable decimal strings and base units.
//!
//! USDC has a fixed precision of 6 decimals on every chain the relay serves.
//! Conversions must be exact: an amount with more than 6 fractional digits has
//! no base-unit representation and is rejected rather than rounded.

use alloy_primitives::utils::{format_units, parse_units, ParseUnits};
use alloy_primitives::U256;

use crate::error::{BridgeError, Result};

/// USDC decimal precision, identical on all supported chains.
pub const USDC_DECIMALS: u8 = 6;

/// Parses a human-entered decimal amount into USDC base units.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidAmount`] if the string is not a decimal
/// number, is zero or negative, or carries fractional digits below the
/// smallest unit.
///
/// # Example
///
/// ```rust
/// use alloy_primitives::U256;
/// use usdc_bridge_relay::parse_usdc;
///
/// assert_eq!(parse_usdc("1.5").unwrap(), U256::from(1_500_000u64));
/// assert!(parse_usdc("0.0000001").is_err());
/// ```
pub fn parse_usdc(amount: &str) -> Result<U256> {
    let parsed = parse_units(amount.trim(), USDC_DECIMALS)
        .map_err(|e| BridgeError::InvalidAmount(format!("{amount:?}: {e}")))?;

    let base_units = match parsed {
        ParseUnits::U256(value) => value,
        ParseUnits::I256(_) => {
            return Err(BridgeError::InvalidAmount(format!(
                "{amount:?}: amount must be positive"
            )))
        }
    };

    if base_units.is_zero() {
        return Err(BridgeError::InvalidAmount(format!(
            "{amount:?}: amount must be positive"
        )));
    }

    Ok(base_units)
}

/// Formats a base-unit amount back into a decimal string.
///
/// Round-trips exactly with [`parse_usdc`] for any integer base-unit amount.
pub fn format_usdc(base_units: U256) -> String {
    format_units(base_units, USDC_DECIMALS).unwrap_or_else(|_| base_units.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("500000", 500_000_000_000u64)]
    #[case("1", 1_000_000u64)]
    #[case("1.5", 1_500_000u64)]
    #[case("0.000001", 1u64)]
    #[case("  2.25  ", 2_250_000u64)]
    fn parses_exact_amounts(#[case] input: &str, #[case] expected: u64) {
        assert_eq!(parse_usdc(input).unwrap(), U256::from(expected));
    }

    #[rstest]
    #[case("0")]
    #[case("0.0")]
    #[case("-1")]
    #[case("0.0000001")]
    #[case("1.0000001")]
    #[case("")]
    #[case("five")]
    #[case("1.2.3")]
    fn rejects_invalid_amounts(#[case] input: &str) {
        let err = parse_usdc(input).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidAmount(_)), "{input}: {err}");
    }

    #[rstest]
    #[case(1u64)]
    #[case(1_000_000u64)]
    #[case(1_234_567u64)]
    #[case(999_999_999_999u64)]
    fn round_trips_integer_base_units(#[case] base: u64) {
        let base = U256::from(base);
        assert_eq!(parse_usdc(&format_usdc(base)).unwrap(), base);
    }

    #[test]
    fn formats_with_fixed_precision() {
        insta::assert_snapshot!(format_usdc(U256::from(1_500_000u64)), @"1.500000");
        insta::assert_snapshot!(format_usdc(U256::from(1u64)), @"0.000001");
    }
}
