use moms::core::*;
use moms::report::*;
use moms::sie::*;
use rust_decimal_macros::dec;

fn main() -> Result<(), MomsError> {
    let rows = vec![
        TransactionRecord::new(dec!(1250.00), dec!(1000.00), dec!(250.00), dec!(25)),
        TransactionRecord::new(dec!(-500.00), dec!(-400.00), dec!(-100.00), dec!(25)),
    ];
    let header = ReportHeader::new("Laddbolaget AB")
        .org_number("556036-0793")
        .period("2024-03");
    let report = process_transactions(&rows, &header, &ReportConfig::default());

    let config = SieConfigBuilder::new().program("moms-demo", "1.0").build()?;
    let doc = SieDocument::from_report(&report, &config);

    println!("{}", doc.to_sie(&config));

    let path = std::env::temp_dir().join("moms_2024-03.se");
    let replaced = write_sie_file(&path, &doc, &config)?;
    println!("Wrote {} ({replaced} characters replaced)", path.display());
    Ok(())
}
