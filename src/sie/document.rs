use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::SieConfig;
use crate::core::accounts::STANDARD_ACCOUNTS;
use crate::report::VatReport;

/// One posting inside a verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiePosting {
    pub account: String,
    pub debit: Decimal,
    pub credit: Decimal,
}

impl SiePosting {
    pub fn new(account: impl Into<String>, debit: Decimal, credit: Decimal) -> Self {
        Self {
            account: account.into(),
            debit,
            credit,
        }
    }

    /// `debit - credit`, the amount written to `#TRANS`.
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// A dated, numbered group of postings (verifikation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub number: u32,
    pub date: NaiveDate,
    pub description: String,
    pub postings: Vec<SiePosting>,
}

/// Bookkeeping data to be written as a SIE4 file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SieDocument {
    pub company_name: String,
    /// Digits only.
    pub org_number: String,
    /// Chart of accounts, code → name.
    pub accounts: BTreeMap<String, String>,
    /// Opening balances, code → balance.
    pub opening_balances: BTreeMap<String, Decimal>,
    pub verifications: Vec<Verification>,
}

impl SieDocument {
    /// Create an empty document. Separators are stripped from `org_number`.
    pub fn new(company_name: impl Into<String>, org_number: &str) -> Self {
        Self {
            company_name: company_name.into(),
            org_number: org_number.chars().filter(|c| c.is_ascii_digit()).collect(),
            ..Default::default()
        }
    }

    /// Add or rename an account.
    pub fn add_account(&mut self, number: impl Into<String>, name: impl Into<String>) {
        self.accounts.insert(number.into(), name.into());
    }

    /// Add every account of the standard BAS table.
    pub fn add_standard_accounts(&mut self) {
        for account in STANDARD_ACCOUNTS {
            self.add_account(account.number, account.name);
        }
    }

    pub fn set_opening_balance(&mut self, account: impl Into<String>, balance: Decimal) {
        self.opening_balances.insert(account.into(), balance);
    }

    pub fn add_verification(
        &mut self,
        number: u32,
        date: NaiveDate,
        description: impl Into<String>,
        postings: Vec<SiePosting>,
    ) {
        self.verifications.push(Verification {
            number,
            date,
            description: description.into(),
            postings,
        });
    }

    /// Build a document from a VAT report.
    ///
    /// Registers the standard account table and, if the report has journal
    /// entries, one verification "Momsredovisning <period>" holding them.
    /// The verification is dated the last day of the period when the period
    /// is `YYYY-MM`, otherwise the generation date.
    pub fn from_report(report: &VatReport, config: &SieConfig) -> Self {
        let mut doc = Self::new(report.company_name.clone(), &report.org_number);
        doc.add_standard_accounts();

        if !report.journal_entries.is_empty() {
            let postings = report
                .journal_entries
                .iter()
                .map(|e| SiePosting::new(e.account.clone(), e.debit, e.credit))
                .collect();
            let date = period_end(&report.period).unwrap_or_else(|| config.generation_date());
            doc.add_verification(
                config.first_verification_number,
                date,
                format!("Momsredovisning {}", report.period),
                postings,
            );
        }

        doc
    }
}

/// Last day of a `YYYY-MM` period.
pub fn period_end(period: &str) -> Option<NaiveDate> {
    let (year, month) = period.trim().split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    // Rejects months outside 1-12
    NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    next.pred_opt()
}
