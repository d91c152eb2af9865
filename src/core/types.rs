use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Swedish VAT rates (momssatser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VatRate {
    /// 25%: standard rate.
    Standard,
    /// 12%: food, hotels, restaurants.
    Reduced12,
    /// 6%: books, newspapers, passenger transport, culture.
    Reduced6,
    /// 0%: exempt or outside the scope of Swedish VAT.
    Zero,
}

impl VatRate {
    /// All rates, highest first. This is also the bucket order of a report.
    pub const ALL: [VatRate; 4] = [Self::Standard, Self::Reduced12, Self::Reduced6, Self::Zero];

    /// Rate as a percentage (25, 12, 6, 0).
    pub fn percent(&self) -> Decimal {
        match self {
            Self::Standard => dec!(25),
            Self::Reduced12 => dec!(12),
            Self::Reduced6 => dec!(6),
            Self::Zero => Decimal::ZERO,
        }
    }

    /// Rate as a fraction (0.25, 0.12, 0.06, 0).
    pub fn fraction(&self) -> Decimal {
        match self {
            Self::Standard => dec!(0.25),
            Self::Reduced12 => dec!(0.12),
            Self::Reduced6 => dec!(0.06),
            Self::Zero => Decimal::ZERO,
        }
    }

    /// Exact match on an integral percentage.
    pub fn from_percent(percent: u32) -> Option<Self> {
        match percent {
            25 => Some(Self::Standard),
            12 => Some(Self::Reduced12),
            6 => Some(Self::Reduced6),
            0 => Some(Self::Zero),
            _ => None,
        }
    }

    /// Resolve a declared percentage to a bucket.
    ///
    /// The fractional part is truncated (25.9 → 25). Unknown percentages
    /// fall back to [`VatRate::Standard`]; this is intentional, not an error.
    pub fn resolve(percent: Decimal) -> Self {
        let whole = percent.trunc();
        Self::ALL
            .into_iter()
            .find(|r| r.percent() == whole)
            .unwrap_or(Self::Standard)
    }

    /// True for the three rates that carry outgoing VAT.
    pub fn is_taxed(&self) -> bool {
        *self != Self::Zero
    }
}

impl std::fmt::Display for VatRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Income; carries outgoing VAT.
    Sale,
    /// Expense; carries deductible incoming VAT.
    Cost,
}

/// One raw input row, as delivered by an upload or an API caller.
///
/// Field names follow the external column names (`subAmount`, `vatRate`,
/// `transactionName`). Amounts are signed: positive = sale, negative = cost.
/// `amount`, `subAmount`, `vat` and `vatRate` are required; a row missing any
/// of them is reported and skipped, see [`TransactionRecord::to_transaction`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Gross amount (incl. VAT).
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Net amount (excl. VAT).
    #[serde(default)]
    pub sub_amount: Option<Decimal>,
    /// VAT amount.
    #[serde(default)]
    pub vat: Option<Decimal>,
    /// Declared VAT rate in percent.
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    #[serde(default)]
    pub transaction_name: Option<String>,
    /// Delivered energy; only used for plausibility checks.
    #[serde(default)]
    pub kwh: Option<Decimal>,
}

impl TransactionRecord {
    /// Create a record with all required fields set.
    pub fn new(amount: Decimal, sub_amount: Decimal, vat: Decimal, vat_rate: Decimal) -> Self {
        Self {
            amount: Some(amount),
            sub_amount: Some(sub_amount),
            vat: Some(vat),
            vat_rate: Some(vat_rate),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.transaction_name = Some(name.into());
        self
    }

    pub fn kwh(mut self, kwh: Decimal) -> Self {
        self.kwh = Some(kwh);
        self
    }

    /// Subject used for findings about this row: `transaction_<id>`, or the
    /// 1-based row number when the row has no id.
    pub fn subject(&self, index: usize) -> String {
        match &self.id {
            Some(id) => format!("transaction_{id}"),
            None => format!("transaction_{}", index + 1),
        }
    }

    /// Names of the required fields this row lacks, in column order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.amount.is_none() {
            missing.push("amount");
        }
        if self.sub_amount.is_none() {
            missing.push("subAmount");
        }
        if self.vat.is_none() {
            missing.push("vat");
        }
        if self.vat_rate.is_none() {
            missing.push("vatRate");
        }
        missing
    }

    /// Convert into a [`Transaction`], or return the missing required fields.
    pub fn to_transaction(&self, index: usize) -> Result<Transaction, Vec<&'static str>> {
        match (self.amount, self.sub_amount, self.vat, self.vat_rate) {
            (Some(gross), Some(net), Some(vat), Some(rate_percent)) => Ok(Transaction {
                id: self.id.clone().unwrap_or_else(|| format!("{}", index + 1)),
                date: self.date,
                description: self.transaction_name.clone().unwrap_or_default(),
                gross,
                net,
                vat,
                rate_percent,
                rate: VatRate::resolve(rate_percent),
                kwh: self.kwh,
            }),
            _ => Err(self.missing_fields()),
        }
    }
}

/// A complete, immutable transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub description: String,
    /// Signed gross amount.
    pub gross: Decimal,
    /// Signed net amount.
    pub net: Decimal,
    /// Signed VAT amount.
    pub vat: Decimal,
    /// Percentage as declared by the source row.
    pub rate_percent: Decimal,
    /// Bucket the declared percentage resolves to.
    pub rate: VatRate,
    pub kwh: Option<Decimal>,
}

impl Transaction {
    /// Sale for positive gross, cost for negative gross, `None` for zero.
    pub fn kind(&self) -> Option<TransactionKind> {
        if self.gross > Decimal::ZERO {
            Some(TransactionKind::Sale)
        } else if self.gross < Decimal::ZERO {
            Some(TransactionKind::Cost)
        } else {
            None
        }
    }
}

/// A transaction pre-normalized by an upstream step: unsigned amounts and an
/// explicit direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTransaction {
    /// Gross amount (incl. VAT), unsigned.
    pub amount: Decimal,
    /// Net amount (excl. VAT), unsigned.
    pub net_amount: Decimal,
    /// VAT amount, unsigned.
    pub vat_amount: Decimal,
    /// VAT rate in percent (25, 12, 6, 0).
    pub vat_rate: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: TransactionKind,
}

fn default_kind() -> TransactionKind {
    TransactionKind::Sale
}

impl NormalizedTransaction {
    /// Convert into a signed record with id `tx_<index>`.
    pub fn to_record(&self, index: usize) -> TransactionRecord {
        let sign = match self.kind {
            TransactionKind::Sale => Decimal::ONE,
            TransactionKind::Cost => Decimal::NEGATIVE_ONE,
        };
        TransactionRecord {
            id: Some(format!("tx_{index}")),
            date: self.date,
            amount: Some(self.amount * sign),
            sub_amount: Some(self.net_amount * sign),
            vat: Some(self.vat_amount * sign),
            vat_rate: Some(self.vat_rate),
            transaction_name: Some(self.description.clone()),
            kwh: None,
        }
    }
}

/// Convert a batch of normalized transactions into signed records.
pub fn normalized_to_records(transactions: &[NormalizedTransaction]) -> Vec<TransactionRecord> {
    transactions
        .iter()
        .enumerate()
        .map(|(i, t)| t.to_record(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_known_rates() {
        assert_eq!(VatRate::resolve(dec!(25)), VatRate::Standard);
        assert_eq!(VatRate::resolve(dec!(12.0)), VatRate::Reduced12);
        assert_eq!(VatRate::resolve(dec!(6)), VatRate::Reduced6);
        assert_eq!(VatRate::resolve(dec!(0)), VatRate::Zero);
    }

    #[test]
    fn resolve_truncates_fraction() {
        assert_eq!(VatRate::resolve(dec!(12.7)), VatRate::Reduced12);
    }

    #[test]
    fn resolve_unknown_falls_back_to_standard() {
        assert_eq!(VatRate::resolve(dec!(19)), VatRate::Standard);
        assert_eq!(VatRate::resolve(dec!(-6)), VatRate::Standard);
    }

    #[test]
    fn record_missing_fields_in_column_order() {
        let rec = TransactionRecord {
            amount: Some(dec!(10)),
            ..Default::default()
        };
        assert_eq!(rec.missing_fields(), vec!["subAmount", "vat", "vatRate"]);
        assert!(rec.to_transaction(0).is_err());
    }

    #[test]
    fn record_subject_uses_id_or_row() {
        let rec = TransactionRecord::new(dec!(125), dec!(100), dec!(25), dec!(25));
        assert_eq!(rec.subject(4), "transaction_5");
        assert_eq!(rec.id("a1").subject(4), "transaction_a1");
    }

    #[test]
    fn kind_by_sign() {
        let sale = TransactionRecord::new(dec!(125), dec!(100), dec!(25), dec!(25))
            .to_transaction(0)
            .unwrap();
        let cost = TransactionRecord::new(dec!(-50), dec!(-40), dec!(-10), dec!(25))
            .to_transaction(1)
            .unwrap();
        let zero = TransactionRecord::new(dec!(0), dec!(0), dec!(0), dec!(25))
            .to_transaction(2)
            .unwrap();
        assert_eq!(sale.kind(), Some(TransactionKind::Sale));
        assert_eq!(cost.kind(), Some(TransactionKind::Cost));
        assert_eq!(zero.kind(), None);
    }

    #[test]
    fn normalized_cost_is_negated() {
        let n = NormalizedTransaction {
            amount: dec!(50),
            net_amount: dec!(40),
            vat_amount: dec!(10),
            vat_rate: dec!(25),
            description: "Plattformsavgift".into(),
            date: None,
            kind: TransactionKind::Cost,
        };
        let rec = n.to_record(3);
        assert_eq!(rec.id.as_deref(), Some("tx_3"));
        assert_eq!(rec.amount, Some(dec!(-50)));
        assert_eq!(rec.sub_amount, Some(dec!(-40)));
        assert_eq!(rec.vat, Some(dec!(-10)));
    }
}
