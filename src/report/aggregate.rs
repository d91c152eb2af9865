//! VAT aggregation: partitions transactions into sales and costs, sums net
//! and VAT per rate, and assembles the [`VatReport`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info, warn};

use super::config::{ReportConfig, ReportHeader};
use super::journal::journal_entries;
use super::types::{ChargingSession, PerRate, SalesBucket, VatReport};
use crate::core::{
    Finding, NormalizedTransaction, Transaction, TransactionKind, TransactionRecord,
    normalized_to_records, validate_energy_quantity, validate_gross_amount, validate_org_number,
    validate_vat_calculation,
};

/// Maximum disagreement tolerated between the bucket totals and the
/// per-transaction net VAT.
const BALANCE_TOLERANCE: Decimal = dec!(0.01);

/// A row would push a running total out of the `Decimal` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OutOfRange;

fn add(a: Decimal, b: Decimal) -> Result<Decimal, OutOfRange> {
    a.checked_add(b).ok_or(OutOfRange)
}

/// Running totals of one aggregation pass.
///
/// A row is applied completely or not at all.
#[derive(Debug, Default)]
struct Accumulator {
    sales: PerRate<SalesBucket>,
    purchases: PerRate<Decimal>,
    incoming_vat: Decimal,
    /// Net VAT summed per transaction, independent of the buckets.
    direct_net_vat: Decimal,
    /// Sum of `|net| + |vat|` over accepted rows. Bounds every total and
    /// journal line derived from the buckets.
    magnitude: Decimal,
}

impl Accumulator {
    fn grown_magnitude(&self, tx: &Transaction) -> Result<Decimal, OutOfRange> {
        add(add(self.magnitude, tx.net.abs())?, tx.vat.abs())
    }

    fn add_sale(&mut self, tx: &Transaction) -> Result<(), OutOfRange> {
        let magnitude = self.grown_magnitude(tx)?;
        let bucket = *self.sales.get(tx.rate);
        let net = add(bucket.net, tx.net)?;
        let (vat, direct_net_vat) = if tx.rate.is_taxed() {
            (add(bucket.vat, tx.vat)?, add(self.direct_net_vat, tx.vat)?)
        } else {
            (bucket.vat, self.direct_net_vat)
        };

        *self.sales.get_mut(tx.rate) = SalesBucket { net, vat };
        self.direct_net_vat = direct_net_vat;
        self.magnitude = magnitude;
        Ok(())
    }

    fn add_cost(&mut self, tx: &Transaction) -> Result<(), OutOfRange> {
        let magnitude = self.grown_magnitude(tx)?;
        let vat = tx.vat.abs();
        let purchases = add(*self.purchases.get(tx.rate), tx.net.abs())?;
        let incoming_vat = add(self.incoming_vat, vat)?;
        let direct_net_vat = self.direct_net_vat.checked_sub(vat).ok_or(OutOfRange)?;

        *self.purchases.get_mut(tx.rate) = purchases;
        self.incoming_vat = incoming_vat;
        self.direct_net_vat = direct_net_vat;
        self.magnitude = magnitude;
        Ok(())
    }

    fn total_outgoing_vat(&self) -> Decimal {
        self.sales
            .iter()
            .filter(|(rate, _)| rate.is_taxed())
            .map(|(_, b)| b.vat)
            .sum()
    }
}

fn out_of_range(subject: &str, findings: &mut Vec<Finding>) {
    warn!(%subject, "row skipped, amount out of range");
    findings.push(Finding::error(subject, "amount out of range"));
}

/// Run both amount checks on a transaction, recording mismatches as
/// warnings against `subject`. Costs are checked on absolute values.
fn check_amounts(
    tx: &Transaction,
    subject: &str,
    config: &ReportConfig,
    findings: &mut Vec<Finding>,
) {
    let (net, vat, gross) = match tx.kind() {
        Some(TransactionKind::Cost) => (tx.net.abs(), tx.vat.abs(), tx.gross.abs()),
        _ => (tx.net, tx.vat, tx.gross),
    };
    if let Err(e) = validate_vat_calculation(net, vat, tx.rate.percent(), config.tolerance) {
        findings.push(Finding::warning(subject, e.message));
    }
    if let Err(e) = validate_gross_amount(net, vat, gross, config.tolerance) {
        findings.push(Finding::warning(subject, e.message));
    }
}

/// Aggregate raw rows into a VAT report.
///
/// Never fails: rows missing required fields or carrying amounts too large
/// to total are recorded as errors and skipped, arithmetic mismatches on
/// sales are recorded as warnings, and an invalid organisation number is
/// recorded as an error. Rows with a gross
/// amount of exactly zero belong to neither side and are ignored.
pub fn process_transactions(
    records: &[TransactionRecord],
    header: &ReportHeader,
    config: &ReportConfig,
) -> VatReport {
    let mut findings = Vec::new();

    let org_number = header.org_number.clone().unwrap_or_default();
    if !org_number.trim().is_empty() {
        let check = validate_org_number(&org_number);
        if !check.valid {
            findings.push(Finding::error("organisation_number", check.message));
        }
    }

    let mut sales: Vec<(String, Transaction)> = Vec::new();
    let mut costs: Vec<(String, Transaction)> = Vec::new();
    let mut charging_sessions = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let subject = record.subject(i);
        let tx = match record.to_transaction(i) {
            Ok(tx) => tx,
            Err(missing) => {
                debug!(%subject, ?missing, "skipping incomplete row");
                for field in missing {
                    findings.push(Finding::error(
                        subject.as_str(),
                        format!("missing field: {field}"),
                    ));
                }
                continue;
            }
        };

        if let Some(kwh) = tx.kwh {
            if let Some(mut finding) = validate_energy_quantity(kwh, config.energy_limit_kwh) {
                finding.field = subject.clone();
                findings.push(finding);
            }
            charging_sessions.push(ChargingSession {
                id: tx.id.clone(),
                kwh,
                amount: tx.gross,
            });
        }

        if tx.rate.percent() != tx.rate_percent.trunc() {
            debug!(%subject, declared = %tx.rate_percent, "unknown VAT rate, using 25%");
        }

        match tx.kind() {
            Some(TransactionKind::Sale) => sales.push((subject, tx)),
            Some(TransactionKind::Cost) => costs.push((subject, tx)),
            None => debug!(%subject, "zero-amount row ignored"),
        }
    }

    let mut acc = Accumulator::default();

    for (subject, tx) in &sales {
        check_amounts(tx, subject, config, &mut findings);
        if acc.add_sale(tx).is_err() {
            out_of_range(subject, &mut findings);
        }
    }

    for (subject, tx) in &costs {
        if config.validate_costs {
            check_amounts(tx, subject, config, &mut findings);
        }
        if acc.add_cost(tx).is_err() {
            out_of_range(subject, &mut findings);
        }
    }

    let total_outgoing_vat = acc.total_outgoing_vat();
    let net_vat = total_outgoing_vat - acc.incoming_vat;

    let drift = acc.direct_net_vat.checked_sub(net_vat).map(|d| d.abs());
    if drift.is_none_or(|d| d > BALANCE_TOLERANCE) {
        findings.push(Finding::error(
            "vat_balance",
            format!(
                "VAT balance mismatch: per-transaction {} ≠ aggregated {}",
                acc.direct_net_vat, net_vat
            ),
        ));
    }

    let journal = journal_entries(&acc.sales, &acc.purchases, acc.incoming_vat);
    let is_valid = !findings.iter().any(Finding::is_error);
    let period = header
        .period
        .clone()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m").to_string());

    info!(
        %period,
        sales = sales.len(),
        costs = costs.len(),
        %net_vat,
        findings = findings.len(),
        "VAT report assembled"
    );
    if !is_valid {
        let errors = findings.iter().filter(|f| f.is_error()).count();
        warn!(%period, errors, "VAT report is invalid");
    }

    VatReport {
        period,
        company_name: header.company_name.clone(),
        org_number,
        sales: acc.sales,
        purchases: acc.purchases,
        incoming_vat: acc.incoming_vat,
        total_outgoing_vat,
        net_vat,
        journal_entries: journal,
        findings,
        is_valid,
        charging_sessions,
    }
}

/// Aggregate pre-normalized transactions (unsigned amounts plus direction).
pub fn process_normalized(
    transactions: &[NormalizedTransaction],
    header: &ReportHeader,
    config: &ReportConfig,
) -> VatReport {
    process_transactions(&normalized_to_records(transactions), header, config)
}
