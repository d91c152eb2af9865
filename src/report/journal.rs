//! Journal entries (bokföringsförslag) derived from aggregated buckets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{PerRate, SalesBucket};
use crate::core::VatRate;
use crate::core::accounts::{
    self, ACCOUNTS_PAYABLE, ACCOUNTS_RECEIVABLE, BasAccount, EXTERNAL_SERVICES, INCOMING_VAT,
};

/// One posting line on a BAS account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Four-digit BAS code.
    pub account: String,
    pub account_name: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub description: String,
}

impl JournalEntry {
    fn debit(account: BasAccount, amount: Decimal, description: &str) -> Self {
        Self {
            account: account.number.into(),
            account_name: account.name.into(),
            debit: amount,
            credit: Decimal::ZERO,
            description: description.into(),
        }
    }

    fn credit(account: BasAccount, amount: Decimal, description: &str) -> Self {
        Self {
            account: account.number.into(),
            account_name: account.name.into(),
            debit: Decimal::ZERO,
            credit: amount,
            description: description.into(),
        }
    }

    /// `debit - credit`.
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}

fn sales_description(rate: VatRate) -> &'static str {
    match rate {
        VatRate::Standard => "Intäkter med 25% moms",
        VatRate::Reduced12 => "Intäkter med 12% moms",
        VatRate::Reduced6 => "Intäkter med 6% moms",
        VatRate::Zero => "Momsfria intäkter (t.ex. roaming)",
    }
}

/// Build the journal for a report.
///
/// Lines appear in a fixed order and only for positive amounts: sales per
/// rate (credit), outgoing VAT per rate (credit), total purchases on 6590
/// (debit), incoming VAT (debit). Receivables (1510, debit) and payables
/// (2440, credit) close each side so that debits always equal credits.
pub fn journal_entries(
    sales: &PerRate<SalesBucket>,
    purchases: &PerRate<Decimal>,
    incoming_vat: Decimal,
) -> Vec<JournalEntry> {
    let mut entries = Vec::new();

    for (rate, bucket) in sales.iter() {
        if bucket.net > Decimal::ZERO {
            entries.push(JournalEntry::credit(
                accounts::sales_account(rate),
                bucket.net,
                sales_description(rate),
            ));
        }
    }

    for (rate, bucket) in sales.iter() {
        let Some(account) = accounts::outgoing_vat_account(rate) else {
            continue;
        };
        if bucket.vat > Decimal::ZERO {
            entries.push(JournalEntry::credit(
                account,
                bucket.vat,
                "Utgående moms på försäljning",
            ));
        }
    }

    let receivable = total_credit(&entries);

    let total_costs: Decimal = purchases.iter().map(|(_, n)| *n).sum();
    if total_costs > Decimal::ZERO {
        entries.push(JournalEntry::debit(
            EXTERNAL_SERVICES,
            total_costs,
            "Kostnader för avgifter och abonnemang",
        ));
    }
    if incoming_vat > Decimal::ZERO {
        entries.push(JournalEntry::debit(
            INCOMING_VAT,
            incoming_vat,
            "Avdragsgill ingående moms",
        ));
    }

    let payable = total_debit(&entries);

    if receivable > Decimal::ZERO {
        entries.push(JournalEntry::debit(
            ACCOUNTS_RECEIVABLE,
            receivable,
            "Fordran på kunder",
        ));
    }
    if payable > Decimal::ZERO {
        entries.push(JournalEntry::credit(
            ACCOUNTS_PAYABLE,
            payable,
            "Skuld till leverantörer",
        ));
    }

    entries
}

pub fn total_debit(entries: &[JournalEntry]) -> Decimal {
    entries.iter().map(|e| e.debit).sum()
}

pub fn total_credit(entries: &[JournalEntry]) -> Decimal {
    entries.iter().map(|e| e.credit).sum()
}

/// Debits and credits agree within `tolerance`.
pub fn is_balanced(entries: &[JournalEntry], tolerance: Decimal) -> bool {
    (total_debit(entries) - total_credit(entries)).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn accounts_of(entries: &[JournalEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.account.as_str()).collect()
    }

    #[test]
    fn empty_buckets_emit_nothing() {
        let entries = journal_entries(&PerRate::default(), &PerRate::default(), Decimal::ZERO);
        assert!(entries.is_empty());
    }

    #[test]
    fn sales_and_costs_in_fixed_order() {
        let mut sales = PerRate::<SalesBucket>::default();
        sales.standard = SalesBucket {
            net: dec!(100),
            vat: dec!(25),
        };
        sales.zero.net = dec!(30);
        let mut purchases = PerRate::<Decimal>::default();
        purchases.standard = dec!(40);

        let entries = journal_entries(&sales, &purchases, dec!(10));
        assert_eq!(
            accounts_of(&entries),
            vec!["3010", "3011", "2611", "6590", "2641", "1510", "2440"]
        );
        assert_eq!(entries[5].debit, dec!(155));
        assert_eq!(entries[6].credit, dec!(50));
        assert!(is_balanced(&entries, Decimal::ZERO));
    }

    #[test]
    fn reduced_rates_get_their_own_lines() {
        let mut sales = PerRate::<SalesBucket>::default();
        sales.reduced_12 = SalesBucket {
            net: dec!(100),
            vat: dec!(12),
        };
        sales.reduced_6 = SalesBucket {
            net: dec!(50),
            vat: dec!(3),
        };
        let entries = journal_entries(&sales, &PerRate::default(), Decimal::ZERO);
        assert_eq!(accounts_of(&entries), vec!["3002", "3003", "2621", "2631", "1510"]);
        assert!(is_balanced(&entries, Decimal::ZERO));
    }

    #[test]
    fn signed_amount() {
        let e = JournalEntry::credit(EXTERNAL_SERVICES, dec!(12.5), "x");
        assert_eq!(e.signed_amount(), dec!(-12.5));
    }
}
