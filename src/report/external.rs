//! External report shape consumed by the web frontend.
//!
//! This is the only place where decimals become `f64`.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::types::VatReport;
use crate::core::{Finding, MomsError, VatRate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatReportData {
    /// Always `"vat_report"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub period: String,
    pub company: CompanyData,
    pub summary: SummaryData,
    pub sales: Vec<RateLine>,
    pub costs: Vec<RateLine>,
    pub vat: VatSummaryData,
    pub journal_entries: Vec<JournalLine>,
    pub validation: ValidationData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charging_sessions: Option<Vec<ChargingSessionData>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyData {
    pub name: String,
    pub org_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryData {
    pub total_income: f64,
    pub total_costs: f64,
    pub result: f64,
}

/// One aggregated sales or cost line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLine {
    pub description: String,
    pub net: f64,
    pub vat: f64,
    /// 25, 12, 6 or 0.
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatSummaryData {
    pub outgoing_25: f64,
    pub outgoing_12: f64,
    pub outgoing_6: f64,
    pub incoming: f64,
    pub net: f64,
    pub to_pay: f64,
    pub to_refund: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account: String,
    pub name: String,
    pub debit: f64,
    pub credit: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationData {
    pub is_valid: bool,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingSessionData {
    pub id: String,
    pub kwh: f64,
    pub amount: f64,
}

fn money(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

fn sales_label(rate: VatRate) -> &'static str {
    match rate {
        VatRate::Standard => "Försäljning 25% moms",
        VatRate::Reduced12 => "Försäljning 12% moms",
        VatRate::Reduced6 => "Försäljning 6% moms",
        VatRate::Zero => "Försäljning momsfri (roaming)",
    }
}

impl VatReport {
    /// Convert to the external shape.
    ///
    /// Sales lines are emitted per rate with positive net. Costs are
    /// collapsed into one line carrying the incoming VAT total.
    pub fn to_data(&self) -> VatReportData {
        let sales = self
            .sales
            .iter()
            .filter(|(_, b)| b.net > Decimal::ZERO)
            .map(|(rate, b)| RateLine {
                description: sales_label(rate).into(),
                net: money(b.net),
                vat: money(if rate.is_taxed() { b.vat } else { Decimal::ZERO }),
                rate: money(rate.percent()),
            })
            .collect();

        let total_income = self.total_sales_net();
        let total_costs = self.total_purchases_net();

        let mut costs = Vec::new();
        if total_costs > Decimal::ZERO {
            costs.push(RateLine {
                description: "Kostnader".into(),
                net: money(total_costs),
                vat: money(self.incoming_vat),
                rate: money(VatRate::Standard.percent()),
            });
        }

        let charging_sessions = if self.charging_sessions.is_empty() {
            None
        } else {
            Some(
                self.charging_sessions
                    .iter()
                    .map(|s| ChargingSessionData {
                        id: s.id.clone(),
                        kwh: money(s.kwh),
                        amount: money(s.amount),
                    })
                    .collect(),
            )
        };

        VatReportData {
            kind: "vat_report".into(),
            period: self.period.clone(),
            company: CompanyData {
                name: self.company_name.clone(),
                org_number: self.org_number.clone(),
            },
            summary: SummaryData {
                total_income: money(total_income),
                total_costs: money(total_costs),
                result: money(total_income - total_costs),
            },
            sales,
            costs,
            vat: VatSummaryData {
                outgoing_25: money(self.outgoing_vat(VatRate::Standard)),
                outgoing_12: money(self.outgoing_vat(VatRate::Reduced12)),
                outgoing_6: money(self.outgoing_vat(VatRate::Reduced6)),
                incoming: money(self.incoming_vat),
                net: money(self.net_vat),
                to_pay: money(self.net_vat.max(Decimal::ZERO)),
                to_refund: money((-self.net_vat).max(Decimal::ZERO)),
            },
            journal_entries: self
                .journal_entries
                .iter()
                .map(|e| JournalLine {
                    account: e.account.clone(),
                    name: e.account_name.clone(),
                    debit: money(e.debit),
                    credit: money(e.credit),
                    description: e.description.clone(),
                })
                .collect(),
            validation: ValidationData {
                is_valid: self.is_valid,
                errors: self.errors().into_iter().cloned().collect(),
                warnings: self.warnings().into_iter().cloned().collect(),
            },
            charging_sessions,
        }
    }

    /// Serialize the external shape as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, MomsError> {
        serde_json::to_string_pretty(&self.to_data()).map_err(|e| MomsError::Json(e.to_string()))
    }
}
