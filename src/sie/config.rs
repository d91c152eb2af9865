use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::MomsError;

/// Configuration for SIE4 export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SieConfig {
    /// Program name written to `#PROGRAM`.
    pub program_name: String,
    /// Program version written to `#PROGRAM`.
    pub program_version: String,
    /// Fiscal year for `#RAR`. Defaults to the year of the first
    /// verification, or of the generation date.
    pub fiscal_year: Option<i32>,
    /// Fiscal year start as MMDD.
    pub fiscal_year_start: String,
    /// Fiscal year end as MMDD. An end before the start rolls into the
    /// following calendar year.
    pub fiscal_year_end: String,
    /// Chart of accounts type for `#KPTYP`.
    pub chart_type: String,
    /// Date for `#GEN`; today if unset.
    pub generated: Option<NaiveDate>,
    /// Number given to the first verification created from a report.
    pub first_verification_number: u32,
}

impl Default for SieConfig {
    fn default() -> Self {
        Self {
            program_name: "moms".into(),
            program_version: env!("CARGO_PKG_VERSION").into(),
            fiscal_year: None,
            fiscal_year_start: "0101".into(),
            fiscal_year_end: "1231".into(),
            chart_type: "BAS2024".into(),
            generated: None,
            first_verification_number: 1,
        }
    }
}

impl SieConfig {
    /// Generation date: configured, or today.
    pub fn generation_date(&self) -> NaiveDate {
        self.generated
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// `#RAR` bounds as `(YYYYMMDD, YYYYMMDD)` for fiscal year `year`.
    pub fn fiscal_year_bounds(&self, year: i32) -> (String, String) {
        let end_year = if self.fiscal_year_end <= self.fiscal_year_start {
            year + 1
        } else {
            year
        };
        (
            format!("{year}{}", self.fiscal_year_start),
            format!("{end_year}{}", self.fiscal_year_end),
        )
    }

    pub(crate) fn resolve_fiscal_year(&self, first_date: Option<NaiveDate>) -> i32 {
        self.fiscal_year
            .or_else(|| first_date.map(|d| d.year()))
            .unwrap_or_else(|| self.generation_date().year())
    }
}

/// Builder for [`SieConfig`].
///
/// # Example
///
/// ```
/// use moms::sie::SieConfigBuilder;
/// use chrono::NaiveDate;
///
/// let config = SieConfigBuilder::new()
///     .fiscal_year(2024)
///     .generated(NaiveDate::from_ymd_opt(2024, 4, 12).unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(config.fiscal_year_bounds(2024).1, "20241231");
/// ```
#[derive(Debug, Default)]
pub struct SieConfigBuilder {
    config: SieConfig,
}

impl SieConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the program name and version.
    pub fn program(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.config.program_name = name.into();
        self.config.program_version = version.into();
        self
    }

    pub fn fiscal_year(mut self, year: i32) -> Self {
        self.config.fiscal_year = Some(year);
        self
    }

    /// Set fiscal year start and end (MMDD each).
    pub fn fiscal_period(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.config.fiscal_year_start = start.into();
        self.config.fiscal_year_end = end.into();
        self
    }

    pub fn chart_type(mut self, chart_type: impl Into<String>) -> Self {
        self.config.chart_type = chart_type.into();
        self
    }

    /// Fix the generation date, making output fully reproducible.
    pub fn generated(mut self, date: NaiveDate) -> Self {
        self.config.generated = Some(date);
        self
    }

    pub fn first_verification_number(mut self, number: u32) -> Self {
        self.config.first_verification_number = number;
        self
    }

    /// Finish the configuration.
    ///
    /// Fails if a fiscal year bound is not a valid `MMDD`.
    pub fn build(self) -> Result<SieConfig, MomsError> {
        check_mmdd("fiscal_year_start", &self.config.fiscal_year_start)?;
        check_mmdd("fiscal_year_end", &self.config.fiscal_year_end)?;
        Ok(self.config)
    }
}

/// Month 01-12 and day 01-31. 0229 is allowed.
fn check_mmdd(field: &str, value: &str) -> Result<(), MomsError> {
    let valid = value.len() == 4
        && value.bytes().all(|b| b.is_ascii_digit())
        && matches!(value[..2].parse::<u32>(), Ok(1..=12))
        && matches!(value[2..].parse::<u32>(), Ok(1..=31));
    if valid {
        Ok(())
    } else {
        Err(MomsError::Builder(format!(
            "{field} must be MMDD, got '{value}'"
        )))
    }
}
