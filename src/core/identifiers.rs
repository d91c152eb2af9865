//! Swedish identifier validation: organisationsnummer, VAT number,
//! bankgiro, plusgiro, personnummer and BAS account codes.
//!
//! Validators accept free-form input and never fail: malformed input is
//! reported through [`IdentifierCheck::valid`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::accounts;
use super::error::MomsError;

/// The identifier types that can be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    OrgNumber,
    VatNumber,
    Bankgiro,
    Plusgiro,
    PersonalNumber,
    BasAccount,
}

impl IdentifierKind {
    /// Field tag attached to check results.
    pub fn field(&self) -> &'static str {
        match self {
            Self::OrgNumber => "org_number",
            Self::VatNumber => "vat_number",
            Self::Bankgiro => "bankgiro",
            Self::Plusgiro => "plusgiro",
            Self::PersonalNumber => "personal_number",
            Self::BasAccount => "bas_account",
        }
    }

    /// Long tag as accepted on the command line.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::OrgNumber => "organisation-number",
            Self::VatNumber => "vat-number",
            Self::Bankgiro => "bankgiro",
            Self::Plusgiro => "plusgiro",
            Self::PersonalNumber => "personal-number",
            Self::BasAccount => "bas-account",
        }
    }
}

impl FromStr for IdentifierKind {
    type Err = MomsError;

    /// Accepts the long tags and the short aliases `org`, `vat`, `bg`, `pg`,
    /// `pnr` and `bas` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "organisation-number" | "org" => Ok(Self::OrgNumber),
            "vat-number" | "vat" => Ok(Self::VatNumber),
            "bankgiro" | "bg" => Ok(Self::Bankgiro),
            "plusgiro" | "pg" => Ok(Self::Plusgiro),
            "personal-number" | "pnr" => Ok(Self::PersonalNumber),
            "bas-account" | "bas" => Ok(Self::BasAccount),
            other => Err(MomsError::Validation(format!(
                "unknown identifier type '{other}'"
            ))),
        }
    }
}

/// Outcome of an identifier check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierCheck {
    pub valid: bool,
    /// Human-readable outcome; for BAS accounts includes the account class.
    pub message: String,
    /// Field tag (see [`IdentifierKind::field`]).
    pub field: &'static str,
    /// The input exactly as given.
    pub value: String,
}

impl IdentifierCheck {
    fn ok(kind: IdentifierKind, value: &str, message: impl Into<String>) -> Self {
        Self {
            valid: true,
            message: message.into(),
            field: kind.field(),
            value: value.to_string(),
        }
    }

    fn fail(kind: IdentifierKind, value: &str, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            field: kind.field(),
            value: value.to_string(),
        }
    }
}

impl std::fmt::Display for IdentifierCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = if self.valid { '✓' } else { '✗' };
        write!(f, "{mark} {}", self.message)
    }
}

/// Run the validator for `kind` on `value`.
pub fn validate_identifier(kind: IdentifierKind, value: &str) -> IdentifierCheck {
    match kind {
        IdentifierKind::OrgNumber => validate_org_number(value),
        IdentifierKind::VatNumber => validate_vat_number(value),
        IdentifierKind::Bankgiro => validate_bankgiro(value),
        IdentifierKind::Plusgiro => validate_plusgiro(value),
        IdentifierKind::PersonalNumber => validate_personal_number(value),
        IdentifierKind::BasAccount => validate_bas_account(value),
    }
}

/// Validate a Swedish organisationsnummer (NNNNNN-NNNN).
///
/// Ten digits after stripping separators, no leading zero, Luhn check digit.
pub fn validate_org_number(value: &str) -> IdentifierCheck {
    let kind = IdentifierKind::OrgNumber;
    let digits = digits_of(value);

    if digits.len() != 10 {
        return IdentifierCheck::fail(kind, value, "organisation number must be 10 digits");
    }
    if digits[0] == 0 {
        return IdentifierCheck::fail(kind, value, "organisation number cannot start with 0");
    }

    let expected = luhn_check_digit(&digits[..9]);
    if digits[9] != expected {
        return IdentifierCheck::fail(
            kind,
            value,
            format!("invalid check digit (expected {expected}, got {})", digits[9]),
        );
    }

    IdentifierCheck::ok(kind, value, "valid organisation number")
}

/// Validate a Swedish VAT number: `SE` + organisationsnummer + `01`.
pub fn validate_vat_number(value: &str) -> IdentifierCheck {
    let kind = IdentifierKind::VatNumber;
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return IdentifierCheck::fail(kind, value, "VAT number is missing");
    }
    if !trimmed.to_ascii_uppercase().starts_with("SE") {
        return IdentifierCheck::fail(kind, value, "Swedish VAT number must start with SE");
    }

    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 12 {
        return IdentifierCheck::fail(
            kind,
            value,
            format!(
                "VAT number must have 12 digits after SE (got {})",
                digits.len()
            ),
        );
    }

    let org = validate_org_number(&digits[..10]);
    if !org.valid {
        return IdentifierCheck::fail(
            kind,
            value,
            format!("invalid organisation number in VAT number: {}", org.message),
        );
    }

    if &digits[10..] != "01" {
        return IdentifierCheck::fail(
            kind,
            value,
            format!("VAT number must end with 01 (got {})", &digits[10..]),
        );
    }

    IdentifierCheck::ok(kind, value, "valid VAT number")
}

/// Validate a bankgironummer (NNN-NNNN or NNNN-NNNN), modulus 10.
pub fn validate_bankgiro(value: &str) -> IdentifierCheck {
    let kind = IdentifierKind::Bankgiro;
    let digits = digits_of(value);

    if !(7..=8).contains(&digits.len()) {
        return IdentifierCheck::fail(kind, value, "bankgiro number must be 7-8 digits");
    }
    if !giro_check_passes(&digits) {
        return IdentifierCheck::fail(kind, value, "invalid check digit for bankgiro");
    }

    IdentifierCheck::ok(kind, value, "valid bankgiro number")
}

/// Validate a plusgironummer (2-8 digits), modulus 10.
pub fn validate_plusgiro(value: &str) -> IdentifierCheck {
    let kind = IdentifierKind::Plusgiro;
    let digits = digits_of(value);

    if !(2..=8).contains(&digits.len()) {
        return IdentifierCheck::fail(kind, value, "plusgiro number must be 2-8 digits");
    }
    if !giro_check_passes(&digits) {
        return IdentifierCheck::fail(kind, value, "invalid check digit for plusgiro");
    }

    IdentifierCheck::ok(kind, value, "valid plusgiro number")
}

/// Validate a personnummer (YYMMDD-NNNN or YYYYMMDD-NNNN).
///
/// Month must be 1-12 and day 1-31. The day is not checked against the
/// month length, so 0231 passes the date check.
pub fn validate_personal_number(value: &str) -> IdentifierCheck {
    let kind = IdentifierKind::PersonalNumber;
    let mut digits = digits_of(value);

    // Drop the century
    if digits.len() == 12 {
        digits.drain(..2);
    }
    if digits.len() != 10 {
        return IdentifierCheck::fail(kind, value, "personal number must be 10 or 12 digits");
    }

    let month = digits[2] * 10 + digits[3];
    let day = digits[4] * 10 + digits[5];
    if !(1..=12).contains(&month) {
        return IdentifierCheck::fail(kind, value, format!("invalid month: {month}"));
    }
    if !(1..=31).contains(&day) {
        return IdentifierCheck::fail(kind, value, format!("invalid day: {day}"));
    }

    if digits[9] != luhn_check_digit(&digits[..9]) {
        return IdentifierCheck::fail(kind, value, "invalid check digit");
    }

    IdentifierCheck::ok(kind, value, "valid personal number")
}

/// Validate a BAS account code: four digits, first digit 1-8.
///
/// The message of a valid result names the account class.
pub fn validate_bas_account(value: &str) -> IdentifierCheck {
    let kind = IdentifierKind::BasAccount;
    match accounts::account_class_name(value) {
        Some(class) => IdentifierCheck::ok(kind, value, format!("valid BAS account ({class})")),
        None => IdentifierCheck::fail(
            kind,
            value,
            format!("invalid BAS account: {value} (must be 4 digits starting with 1-8)"),
        ),
    }
}

fn digits_of(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Luhn digit sum where weights 2,1,2,1… are applied from the first digit.
fn luhn_sum<'a>(digits: impl Iterator<Item = &'a u32>) -> u32 {
    digits
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled >= 10 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum()
}

/// Check digit for a 9-digit organisation or personal number body.
pub fn luhn_check_digit(body: &[u32]) -> u32 {
    (10 - luhn_sum(body.iter()) % 10) % 10
}

/// Giro numbers are weighted from the right: the digit before the check
/// digit gets weight 2.
fn giro_check_passes(digits: &[u32]) -> bool {
    let Some((&check, body)) = digits.split_last() else {
        return false;
    };
    let expected = (10 - luhn_sum(body.iter().rev()) % 10) % 10;
    check == expected
}
