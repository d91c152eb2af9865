use moms::core::*;
use moms::report::*;
use rust_decimal_macros::dec;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("moms=debug")
        .init();

    let rows = vec![
        TransactionRecord::new(dec!(125.00), dec!(100.00), dec!(25.00), dec!(25))
            .id("cs-1001")
            .name("Laddning Stockholm")
            .kwh(dec!(32.4)),
        TransactionRecord::new(dec!(56.00), dec!(50.00), dec!(6.00), dec!(12))
            .id("cs-1002")
            .name("Parkering"),
        TransactionRecord::new(dec!(18.00), dec!(18.00), dec!(0), dec!(0))
            .id("r-77")
            .name("Roaming"),
        TransactionRecord::new(dec!(-50.00), dec!(-40.00), dec!(-10.00), dec!(25))
            .id("fee-9")
            .name("Plattformsavgift"),
        // VAT off by one krona
        TransactionRecord::new(dec!(126.00), dec!(100.00), dec!(26.00), dec!(25)).id("cs-1003"),
    ];

    let header = ReportHeader::new("Laddbolaget AB")
        .org_number("556036-0793")
        .period("2024-03");
    let report = process_transactions(&rows, &header, &ReportConfig::default());

    println!("\n=== Momsrapport {} ===\n", report.period);
    for (rate, bucket) in report.sales.iter() {
        if !bucket.net.is_zero() {
            println!("  Försäljning {rate:<4} netto {:>10}  moms {:>8}", bucket.net, bucket.vat);
        }
    }
    println!("  Inköp           netto {:>10}  moms {:>8}", report.total_purchases_net(), report.incoming_vat);
    println!("  Position: {:?}", report.vat_position());

    println!("\n=== Bokföringsförslag ===\n");
    for e in &report.journal_entries {
        println!("  {} {:<28} {:>10} {:>10}", e.account, e.account_name, e.debit, e.credit);
    }

    println!("\n=== Findings ===\n");
    for f in &report.findings {
        println!("  {f}");
    }

    match report.to_json() {
        Ok(json) => println!("\n{json}"),
        Err(e) => eprintln!("JSON export failed: {e}"),
    }
}
