//! Core transaction types, Swedish identifier validators, amount checks,
//! and the BAS account table.
//!
//! Everything in this module is stateless; the only shared data are the
//! read-only account tables in [`accounts`].

pub mod accounts;
mod amounts;
mod error;
mod identifiers;
mod types;
mod validation;

pub use accounts::{BasAccount, account_class_name, account_name};
pub use amounts::*;
pub use error::*;
pub use identifiers::*;
pub use types::*;
pub use validation::*;
