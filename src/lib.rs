//! # moms
//!
//! Swedish VAT (moms) reconciliation: identifier checks, VAT aggregation
//! per rate, BAS journal entries, and SIE4 export.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Conversion to `f64` happens exactly once, when a report is turned into the
//! external [`report::VatReportData`] shape.
//!
//! ## Quick Start
//!
//! ```rust
//! use moms::core::*;
//!
//! assert!(validate_org_number("556036-0793").valid);
//! assert!(validate_vat_number("SE556036079301").valid);
//! assert!(validate_bankgiro("5402-9681").valid);
//! assert!(!validate_bankgiro("5402-9682").valid);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Transaction types, identifier and amount validators, BAS accounts |
//! | `report` | VAT aggregation, journal entries, report assembly, JSON output |
//! | `sie` | SIE4 export (PC8 encoded) |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "report")]
pub mod report;

#[cfg(feature = "sie")]
pub mod sie;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
