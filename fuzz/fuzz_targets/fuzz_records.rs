#![no_main]

use libfuzzer_sys::fuzz_target;
use moms::core::TransactionRecord;
use moms::report::{ReportConfig, ReportHeader, is_balanced, process_transactions};
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    let Ok(rows) = serde_json::from_slice::<Vec<TransactionRecord>>(data) else {
        return;
    };
    let report = process_transactions(&rows, &ReportHeader::new("Fuzz AB"), &ReportConfig::default());
    assert!(is_balanced(&report.journal_entries, Decimal::ZERO));
    let _ = report.to_json();
});
