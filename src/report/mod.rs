//! VAT aggregation, BAS journal entries, and report assembly.
//!
//! # Example
//!
//! ```
//! use moms::core::TransactionRecord;
//! use moms::report::*;
//! use rust_decimal_macros::dec;
//!
//! let rows = vec![
//!     TransactionRecord::new(dec!(125.00), dec!(100.00), dec!(25.00), dec!(25)),
//!     TransactionRecord::new(dec!(-50.00), dec!(-40.00), dec!(-10.00), dec!(25)),
//! ];
//! let header = ReportHeader::new("Laddbolaget AB")
//!     .org_number("556036-0793")
//!     .period("2024-03");
//! let report = process_transactions(&rows, &header, &ReportConfig::default());
//!
//! assert!(report.is_valid);
//! assert_eq!(report.vat_position(), VatPosition::ToPay(dec!(15.00)));
//! ```

mod aggregate;
mod config;
mod external;
mod journal;
mod types;

pub use aggregate::{process_normalized, process_transactions};
pub use config::{ReportConfig, ReportConfigBuilder, ReportHeader};
pub use external::{
    ChargingSessionData, CompanyData, JournalLine, RateLine, SummaryData, ValidationData,
    VatReportData, VatSummaryData,
};
pub use journal::{JournalEntry, is_balanced, journal_entries, total_credit, total_debit};
pub use types::{ChargingSession, PerRate, SalesBucket, VatPosition, VatReport};
