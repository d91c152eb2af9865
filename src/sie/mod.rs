//! SIE4 export for Swedish accounting software.
//!
//! A [`SieDocument`] holds a chart of accounts, opening balances and
//! verifications. It renders to SIE4 text with [`SieDocument::to_sie`] and is
//! written to disk in PC8 (code page 437) with [`write_sie_file`].
//!
//! # Example
//!
//! ```
//! use moms::sie::{SieConfigBuilder, SieDocument, SiePosting};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
//! let config = SieConfigBuilder::new().generated(date).build().unwrap();
//!
//! let mut doc = SieDocument::new("Laddbolaget AB", "556036-0793");
//! doc.add_account("3010", "Försäljning");
//! doc.add_verification(1, date, "Försäljning mars", vec![
//!     SiePosting::new("1510", dec!(125), dec!(0)),
//!     SiePosting::new("3010", dec!(0), dec!(100)),
//!     SiePosting::new("2611", dec!(0), dec!(25)),
//! ]);
//!
//! let sie = doc.to_sie(&config);
//! assert!(sie.contains("#KONTO 3010 \"Försäljning\"\n"));
//! assert!(sie.contains("    #TRANS 3010 {} -100.00\n"));
//! ```

mod config;
mod document;
mod encoding;
mod export;

pub use config::{SieConfig, SieConfigBuilder};
pub use document::{SieDocument, SiePosting, Verification, period_end};
pub use encoding::{Pc8Output, REPLACEMENT, decode_pc8, encode_pc8, encode_pc8_strict};
pub use export::write_sie_file;
