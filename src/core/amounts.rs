//! Arithmetic checks on a single transaction: VAT = net × rate and
//! gross = net + VAT, compared within a tolerance.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Tolerance used by the report engine (0.02 SEK).
pub const DEFAULT_TOLERANCE: Decimal = dec!(0.02);

/// Looser tolerance for interactive, per-row checks (0.05 SEK).
pub const LENIENT_TOLERANCE: Decimal = dec!(0.05);

/// A failed amount check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountMismatch {
    pub expected: Decimal,
    pub actual: Decimal,
    /// `|actual - expected|`, always above the tolerance used.
    pub difference: Decimal,
    pub message: String,
}

impl std::fmt::Display for AmountMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AmountMismatch {}

/// VAT expected on `net` at `rate_percent`, rounded half-up to öre.
///
/// `None` if the product leaves the `Decimal` range.
pub fn expected_vat(net: Decimal, rate_percent: Decimal) -> Option<Decimal> {
    net.checked_mul(rate_percent)?
        .checked_div(dec!(100))
        .map(|v| v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

impl AmountMismatch {
    /// The comparison could not be computed. `difference` is `Decimal::MAX`.
    fn out_of_range(actual: Decimal, what: &str) -> Self {
        Self {
            expected: Decimal::ZERO,
            actual,
            difference: Decimal::MAX,
            message: format!("{what} cannot be checked: amount out of range"),
        }
    }
}

/// Check that `vat` is `rate_percent` of `net` within `tolerance`.
///
/// Amounts too large to compute with are reported as a mismatch.
pub fn validate_vat_calculation(
    net: Decimal,
    vat: Decimal,
    rate_percent: Decimal,
    tolerance: Decimal,
) -> Result<(), AmountMismatch> {
    let Some((expected, difference)) = expected_vat(net, rate_percent)
        .and_then(|expected| Some((expected, vat.checked_sub(expected)?.abs())))
    else {
        return Err(AmountMismatch::out_of_range(vat, "VAT"));
    };
    if difference > tolerance {
        return Err(AmountMismatch {
            expected,
            actual: vat,
            difference,
            message: format!(
                "VAT {:.2} does not match {}% of {:.2} (expected {expected:.2}, diff {difference:.2})",
                vat,
                rate_percent.normalize(),
                net
            ),
        });
    }
    Ok(())
}

/// Check that `gross` equals `net + vat` within `tolerance`.
pub fn validate_gross_amount(
    net: Decimal,
    vat: Decimal,
    gross: Decimal,
    tolerance: Decimal,
) -> Result<(), AmountMismatch> {
    let Some((expected, difference)) = net
        .checked_add(vat)
        .and_then(|expected| Some((expected, gross.checked_sub(expected)?.abs())))
    else {
        return Err(AmountMismatch::out_of_range(gross, "gross"));
    };
    if difference > tolerance {
        return Err(AmountMismatch {
            expected,
            actual: gross,
            difference,
            message: format!(
                "gross {gross:.2} ≠ net {net:.2} + VAT {vat:.2} (expected {expected:.2}, diff {difference:.2})"
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_vat_rounds_half_up() {
        assert_eq!(expected_vat(dec!(0.10), dec!(25)), Some(dec!(0.03)));
        assert_eq!(expected_vat(dec!(-0.10), dec!(25)), Some(dec!(-0.03)));
        assert_eq!(expected_vat(dec!(100), dec!(12)), Some(dec!(12.00)));
    }

    #[test]
    fn expected_vat_out_of_range() {
        assert_eq!(expected_vat(Decimal::MAX, dec!(25)), None);
    }

    #[test]
    fn huge_amounts_are_mismatches() {
        let err = validate_vat_calculation(Decimal::MAX, Decimal::MAX, dec!(25), DEFAULT_TOLERANCE)
            .unwrap_err();
        assert!(err.message.contains("out of range"));
        let err = validate_gross_amount(Decimal::MAX, Decimal::MAX, Decimal::MAX, DEFAULT_TOLERANCE)
            .unwrap_err();
        assert_eq!(err.difference, Decimal::MAX);
    }

    #[test]
    fn vat_within_tolerance() {
        assert!(validate_vat_calculation(dec!(100), dec!(25.02), dec!(25), DEFAULT_TOLERANCE).is_ok());
    }

    #[test]
    fn vat_outside_tolerance() {
        let err = validate_vat_calculation(dec!(100), dec!(25.03), dec!(25), DEFAULT_TOLERANCE)
            .unwrap_err();
        assert_eq!(err.expected, dec!(25.00));
        assert_eq!(err.difference, dec!(0.03));
        assert!(err.message.contains("25%"));
    }

    #[test]
    fn lenient_tolerance_accepts_more() {
        assert!(validate_vat_calculation(dec!(100), dec!(25.05), dec!(25), LENIENT_TOLERANCE).is_ok());
        assert!(validate_vat_calculation(dec!(100), dec!(25.05), dec!(25), DEFAULT_TOLERANCE).is_err());
    }

    #[test]
    fn gross_checks() {
        assert!(validate_gross_amount(dec!(100), dec!(25), dec!(125), DEFAULT_TOLERANCE).is_ok());
        let err = validate_gross_amount(dec!(100), dec!(25), dec!(126), DEFAULT_TOLERANCE)
            .unwrap_err();
        assert_eq!(err.expected, dec!(125));
        assert_eq!(err.difference, dec!(1));
    }
}
