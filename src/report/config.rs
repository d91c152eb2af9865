use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_ENERGY_LIMIT_KWH, DEFAULT_TOLERANCE};

/// Configuration for report generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Allowed deviation (SEK) for VAT and gross checks.
    pub tolerance: Decimal,
    /// Energy quantities above this are flagged as implausible.
    pub energy_limit_kwh: Decimal,
    /// Also run amount checks on cost rows. Off by default: only sales rows
    /// are checked.
    pub validate_costs: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            energy_limit_kwh: DEFAULT_ENERGY_LIMIT_KWH,
            validate_costs: false,
        }
    }
}

/// Builder for [`ReportConfig`].
///
/// # Example
///
/// ```
/// use moms::core::LENIENT_TOLERANCE;
/// use moms::report::ReportConfigBuilder;
///
/// let config = ReportConfigBuilder::new()
///     .tolerance(LENIENT_TOLERANCE)
///     .validate_costs(true)
///     .build();
/// assert!(config.validate_costs);
/// ```
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the amount tolerance.
    pub fn tolerance(mut self, tolerance: Decimal) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set the energy plausibility limit.
    pub fn energy_limit_kwh(mut self, limit: Decimal) -> Self {
        self.config.energy_limit_kwh = limit;
        self
    }

    /// Enable amount checks on cost rows.
    pub fn validate_costs(mut self, enabled: bool) -> Self {
        self.config.validate_costs = enabled;
        self
    }

    pub fn build(self) -> ReportConfig {
        self.config
    }
}

/// Company and period a report is produced for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub company_name: String,
    /// Checked once per report when present and non-blank.
    pub org_number: Option<String>,
    /// Period label, conventionally `YYYY-MM`. Defaults to the current month.
    pub period: Option<String>,
}

impl ReportHeader {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            ..Default::default()
        }
    }

    pub fn org_number(mut self, org_number: impl Into<String>) -> Self {
        self.org_number = Some(org_number.into());
        self
    }

    pub fn period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }
}
