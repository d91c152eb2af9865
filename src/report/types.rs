use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::journal::JournalEntry;
use crate::core::{Finding, Severity, VatRate};

/// One value per Swedish VAT rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerRate<T> {
    pub standard: T,
    pub reduced_12: T,
    pub reduced_6: T,
    pub zero: T,
}

impl<T> PerRate<T> {
    pub fn get(&self, rate: VatRate) -> &T {
        match rate {
            VatRate::Standard => &self.standard,
            VatRate::Reduced12 => &self.reduced_12,
            VatRate::Reduced6 => &self.reduced_6,
            VatRate::Zero => &self.zero,
        }
    }

    pub fn get_mut(&mut self, rate: VatRate) -> &mut T {
        match rate {
            VatRate::Standard => &mut self.standard,
            VatRate::Reduced12 => &mut self.reduced_12,
            VatRate::Reduced6 => &mut self.reduced_6,
            VatRate::Zero => &mut self.zero,
        }
    }

    /// Entries in [`VatRate::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (VatRate, &T)> {
        VatRate::ALL.into_iter().map(move |r| (r, self.get(r)))
    }
}

/// Net and VAT accumulated for one outgoing rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesBucket {
    pub net: Decimal,
    pub vat: Decimal,
}

/// Whether the period ends with VAT to pay or to have refunded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum VatPosition {
    /// Net VAT owed to Skatteverket.
    ToPay(Decimal),
    /// Net VAT to be refunded (absolute value).
    ToRefund(Decimal),
    /// Outgoing and incoming VAT cancel out.
    Balanced,
}

/// A sale carrying an energy quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargingSession {
    pub id: String,
    pub kwh: Decimal,
    /// Signed gross amount of the row.
    pub amount: Decimal,
}

/// VAT report for one company and period.
///
/// Built once by [`process_transactions`](super::process_transactions) and
/// not modified afterwards. All amounts are exact decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatReport {
    pub period: String,
    pub company_name: String,
    /// Organisation number as supplied (empty if none).
    pub org_number: String,
    /// Outgoing side: net and VAT per rate. The 0% bucket carries net only.
    pub sales: PerRate<SalesBucket>,
    /// Incoming side: net per rate.
    pub purchases: PerRate<Decimal>,
    /// Deductible VAT on all purchases.
    pub incoming_vat: Decimal,
    /// Sum of outgoing VAT over the 25%, 12% and 6% buckets.
    pub total_outgoing_vat: Decimal,
    /// `total_outgoing_vat - incoming_vat`; positive = to pay.
    pub net_vat: Decimal,
    pub journal_entries: Vec<JournalEntry>,
    pub findings: Vec<Finding>,
    /// False iff at least one error-severity finding exists.
    pub is_valid: bool,
    pub charging_sessions: Vec<ChargingSession>,
}

impl VatReport {
    pub fn sales_net(&self, rate: VatRate) -> Decimal {
        self.sales.get(rate).net
    }

    pub fn outgoing_vat(&self, rate: VatRate) -> Decimal {
        self.sales.get(rate).vat
    }

    pub fn purchases_net(&self, rate: VatRate) -> Decimal {
        *self.purchases.get(rate)
    }

    pub fn total_sales_net(&self) -> Decimal {
        self.sales.iter().map(|(_, b)| b.net).sum()
    }

    pub fn total_purchases_net(&self) -> Decimal {
        self.purchases.iter().map(|(_, n)| *n).sum()
    }

    pub fn vat_position(&self) -> VatPosition {
        if self.net_vat > Decimal::ZERO {
            VatPosition::ToPay(self.net_vat)
        } else if self.net_vat < Decimal::ZERO {
            VatPosition::ToRefund(self.net_vat.abs())
        } else {
            VatPosition::Balanced
        }
    }

    /// Findings of the given severity, in discovery order.
    pub fn findings_with(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    pub fn errors(&self) -> Vec<&Finding> {
        self.findings_with(Severity::Error).collect()
    }

    pub fn warnings(&self) -> Vec<&Finding> {
        self.findings_with(Severity::Warning).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn per_rate_access() {
        let mut t = PerRate::<Decimal>::default();
        *t.get_mut(VatRate::Reduced6) += dec!(6);
        *t.get_mut(VatRate::Zero) += dec!(1);
        assert_eq!(*t.get(VatRate::Reduced6), dec!(6));
        let rates: Vec<VatRate> = t.iter().map(|(r, _)| r).collect();
        assert_eq!(rates, VatRate::ALL.to_vec());
    }
}
