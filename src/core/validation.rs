use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::amounts::{validate_gross_amount, validate_vat_calculation};
use super::error::Finding;
use super::types::TransactionRecord;

/// Upper bound for a plausible single charging session.
pub const DEFAULT_ENERGY_LIMIT_KWH: Decimal = dec!(500);

/// Plausibility check on a delivered energy quantity.
///
/// Returns a finding against `kwh` when the quantity is negative or above
/// `limit`.
pub fn validate_energy_quantity(kwh: Decimal, limit: Decimal) -> Option<Finding> {
    if kwh < Decimal::ZERO {
        Some(Finding::warning("kwh", "kWh cannot be negative"))
    } else if kwh > limit {
        Some(Finding::warning("kwh", format!("implausibly high kWh value: {kwh}")))
    } else {
        None
    }
}

/// Validate one raw row on its own, outside any report.
///
/// Missing required fields are errors and stop further checks on the row.
/// Amount checks run on absolute values, so sales and costs are treated
/// alike; mismatches are warnings.
pub fn validate_record(
    record: &TransactionRecord,
    tolerance: Decimal,
    energy_limit: Decimal,
) -> Vec<Finding> {
    let missing = record.missing_fields();
    if !missing.is_empty() {
        return missing
            .into_iter()
            .map(|field| Finding::error(field, format!("missing field: {field}")))
            .collect();
    }

    let mut findings = Vec::new();
    let (Some(gross), Some(net), Some(vat), Some(rate)) =
        (record.amount, record.sub_amount, record.vat, record.vat_rate)
    else {
        return findings;
    };

    if let Err(e) = validate_vat_calculation(net.abs(), vat.abs(), rate.trunc(), tolerance) {
        findings.push(Finding::warning("vat_calculation", e.message));
    }
    if let Err(e) = validate_gross_amount(net.abs(), vat.abs(), gross.abs(), tolerance) {
        findings.push(Finding::warning("gross_amount", e.message));
    }
    if let Some(f) = record.kwh.and_then(|kwh| validate_energy_quantity(kwh, energy_limit)) {
        findings.push(f);
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::amounts::LENIENT_TOLERANCE;

    #[test]
    fn complete_valid_row() {
        let rec = TransactionRecord::new(dec!(125), dec!(100), dec!(25), dec!(25)).kwh(dec!(40));
        assert!(validate_record(&rec, LENIENT_TOLERANCE, DEFAULT_ENERGY_LIMIT_KWH).is_empty());
    }

    #[test]
    fn cost_row_checked_on_absolute_values() {
        let rec = TransactionRecord::new(dec!(-62.50), dec!(-50), dec!(-12.50), dec!(25));
        assert!(validate_record(&rec, LENIENT_TOLERANCE, DEFAULT_ENERGY_LIMIT_KWH).is_empty());
    }

    #[test]
    fn missing_fields_are_errors() {
        let rec = TransactionRecord {
            amount: Some(dec!(125)),
            vat: Some(dec!(25)),
            ..Default::default()
        };
        let findings = validate_record(&rec, LENIENT_TOLERANCE, DEFAULT_ENERGY_LIMIT_KWH);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(Finding::is_error));
        assert_eq!(findings[0].field, "subAmount");
        assert_eq!(findings[1].field, "vatRate");
    }

    #[test]
    fn energy_plausibility() {
        assert!(validate_energy_quantity(dec!(-1), DEFAULT_ENERGY_LIMIT_KWH).is_some());
        assert!(validate_energy_quantity(dec!(500), DEFAULT_ENERGY_LIMIT_KWH).is_none());
        assert!(validate_energy_quantity(dec!(500.1), DEFAULT_ENERGY_LIMIT_KWH).is_some());
    }

    #[test]
    fn arithmetic_mismatch_is_warning() {
        let rec = TransactionRecord::new(dec!(130), dec!(100), dec!(30), dec!(25));
        let findings = validate_record(&rec, LENIENT_TOLERANCE, DEFAULT_ENERGY_LIMIT_KWH);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].field, "vat_calculation");
        assert!(!findings[0].is_error());
    }
}
