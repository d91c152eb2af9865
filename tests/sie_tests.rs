#![cfg(feature = "sie")]

use chrono::NaiveDate;
use moms::core::*;
use moms::report::*;
use moms::sie::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fixed_config() -> SieConfig {
    SieConfigBuilder::new()
        .program("moms", "0.1.0")
        .generated(date(2024, 4, 12))
        .build()
        .unwrap()
}

fn sample_report() -> VatReport {
    let rows = vec![
        TransactionRecord::new(dec!(125.00), dec!(100.00), dec!(25.00), dec!(25)),
        TransactionRecord::new(dec!(-50.00), dec!(-40.00), dec!(-10.00), dec!(25)),
    ];
    let header = ReportHeader::new("Laddbolaget AB")
        .org_number("556036-0793")
        .period("2024-03");
    process_transactions(&rows, &header, &ReportConfig::default())
}

fn minimal_document() -> SieDocument {
    let mut doc = SieDocument::new("Laddbolaget AB", "556036-0793");
    doc.add_account("3010", "Försäljning");
    doc.add_verification(
        1,
        date(2024, 3, 15),
        "Laddning",
        vec![
            SiePosting::new("1510", dec!(125), dec!(0)),
            SiePosting::new("3010", dec!(0), dec!(100)),
            SiePosting::new("2611", dec!(0), dec!(25)),
        ],
    );
    doc
}

// ---------------------------------------------------------------------------
// Document rendering
// ---------------------------------------------------------------------------

#[test]
fn minimal_document_records() {
    let sie = minimal_document().to_sie(&fixed_config());
    let lines: Vec<&str> = sie.lines().collect();

    let konto: Vec<_> = lines.iter().filter(|l| l.starts_with("#KONTO")).collect();
    assert_eq!(konto, vec![&"#KONTO 3010 \"Försäljning\""]);

    let ver: Vec<_> = lines.iter().filter(|l| l.starts_with("#VER")).collect();
    assert_eq!(ver, vec![&"#VER \"\" 1 20240315 \"Laddning\""]);

    let trans: Vec<_> = lines
        .iter()
        .filter(|l| l.trim_start().starts_with("#TRANS"))
        .collect();
    assert_eq!(trans.len(), 3);
    assert!(lines.contains(&"    #TRANS 1510 {} 125.00"));
    assert!(lines.contains(&"    #TRANS 3010 {} -100.00"));
    assert!(lines.contains(&"#ORGNR 5560360793"));
    assert!(lines.contains(&"#RAR 0 20240101 20241231"));
}

#[test]
fn zero_postings_are_omitted() {
    let mut doc = SieDocument::new("AB", "5560360793");
    doc.add_verification(
        7,
        date(2024, 1, 31),
        "Nolla",
        vec![
            SiePosting::new("1510", dec!(10), dec!(10)),
            SiePosting::new("3010", dec!(0), dec!(0)),
        ],
    );
    let sie = doc.to_sie(&fixed_config());
    assert!(!sie.contains("#TRANS"));
    assert!(sie.contains("#VER \"\" 7 20240131 \"Nolla\"\n{\n}\n"));
}

#[test]
fn opening_balances_sorted_by_account() {
    let mut doc = SieDocument::new("AB", "5560360793");
    doc.set_opening_balance("2440", dec!(-1200.5));
    doc.set_opening_balance("1510", dec!(3400));
    let sie = doc.to_sie(&fixed_config());
    assert!(sie.contains("#IB 0 1510 3400.00\n#IB 0 2440 -1200.50\n"));
}

#[test]
fn output_is_deterministic_apart_from_generation_date() {
    let doc = minimal_document();
    let first = doc.to_sie(&fixed_config());
    let second = doc.to_sie(
        &SieConfigBuilder::new()
            .program("moms", "0.1.0")
            .generated(date(2025, 1, 2))
            .build()
            .unwrap(),
    );
    assert_ne!(first, second);

    let without_gen = |s: &str| -> Vec<String> {
        s.lines()
            .filter(|l| !l.starts_with("#GEN"))
            .map(str::to_string)
            .collect()
    };
    assert_eq!(without_gen(&first), without_gen(&second));
    assert_eq!(first, doc.to_sie(&fixed_config()));
}

#[test]
fn broken_fiscal_year_in_rar() {
    let config = SieConfigBuilder::new()
        .fiscal_year(2023)
        .fiscal_period("0701", "0630")
        .generated(date(2024, 4, 12))
        .build()
        .unwrap();
    let sie = minimal_document().to_sie(&config);
    assert!(sie.contains("#RAR 0 20230701 20240630\n"));
}

// ---------------------------------------------------------------------------
// From a report
// ---------------------------------------------------------------------------

#[test]
fn report_document_snapshot() {
    let config = fixed_config();
    let doc = SieDocument::from_report(&sample_report(), &config);
    insta::assert_snapshot!(doc.to_sie(&config), @r##"
#FLAGGA 0
#FORMAT PC8
#SIETYP 4
#PROGRAM "moms" 0.1.0
#GEN 20240412
#FNAMN "Laddbolaget AB"
#ORGNR 5560360793
#RAR 0 20240101 20241231
#KPTYP BAS2024

#KONTO 1510 "Kundfordringar"
#KONTO 2440 "Leverantörsskulder"
#KONTO 2611 "Utgående moms 25%"
#KONTO 2621 "Utgående moms 12%"
#KONTO 2631 "Utgående moms 6%"
#KONTO 2641 "Ingående moms"
#KONTO 2650 "Momsredovisning"
#KONTO 3002 "Försäljning 12% moms"
#KONTO 3003 "Försäljning 6% moms"
#KONTO 3010 "Försäljning tjänster 25%"
#KONTO 3011 "Försäljning tjänster momsfri"
#KONTO 3012 "Roaming-intäkter"
#KONTO 6590 "Övriga externa tjänster"
#KONTO 6591 "Plattformsavgifter"
#KONTO 6592 "Abonnemangskostnader"

#VER "" 1 20240331 "Momsredovisning 2024-03"
{
    #TRANS 3010 {} -100.00
    #TRANS 2611 {} -25.00
    #TRANS 6590 {} 40.00
    #TRANS 2641 {} 10.00
    #TRANS 1510 {} 125.00
    #TRANS 2440 {} -50.00
}
"##);
}

#[test]
fn report_verification_balances() {
    let doc = SieDocument::from_report(&sample_report(), &fixed_config());
    assert_eq!(doc.verifications.len(), 1);
    let sum: rust_decimal::Decimal = doc.verifications[0]
        .postings
        .iter()
        .map(SiePosting::signed_amount)
        .sum();
    assert!(sum.is_zero());
}

#[test]
fn empty_report_has_no_verification() {
    let report = process_transactions(
        &[],
        &ReportHeader::new("AB").period("2024-03"),
        &ReportConfig::default(),
    );
    let doc = SieDocument::from_report(&report, &fixed_config());
    assert!(doc.verifications.is_empty());
    assert_eq!(doc.accounts.len(), 15);
}

#[test]
fn unparseable_period_uses_generation_date() {
    let report = process_transactions(
        &[TransactionRecord::new(dec!(125), dec!(100), dec!(25), dec!(25))],
        &ReportHeader::new("AB").period("Q1 2024"),
        &ReportConfig::default(),
    );
    let doc = SieDocument::from_report(&report, &fixed_config());
    assert_eq!(doc.verifications[0].date, date(2024, 4, 12));
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[test]
fn file_is_written_in_pc8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moms.se");
    let config = fixed_config();
    let doc = minimal_document();

    let replaced = write_sie_file(&path, &doc, &config).unwrap();
    assert_eq!(replaced, 0);

    let bytes = std::fs::read(&path).unwrap();
    // "Försäljning": ö = 0x94, ä = 0x84
    assert!(bytes.windows(3).any(|w| w == [b'F', 0x94, b'r']));
    assert!(bytes.contains(&0x84));
    assert_eq!(decode_pc8(&bytes), doc.to_sie(&config));
}

#[test]
fn unmappable_characters_are_counted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("euro.se");
    let doc = SieDocument::new("Euro € Laddning AB", "5560360793");

    let replaced = write_sie_file(&path, &doc, &fixed_config()).unwrap();
    assert_eq!(replaced, 1);
    let text = decode_pc8(&std::fs::read(&path).unwrap());
    assert!(text.contains("#FNAMN \"Euro ? Laddning AB\""));
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("moms.se");
    let err = write_sie_file(&path, &minimal_document(), &fixed_config()).unwrap_err();
    assert!(matches!(err, MomsError::Io(_)));
}

#[test]
fn invalid_fiscal_period_is_a_builder_error() {
    let result = SieConfigBuilder::new().fiscal_period("07-1", "0630").build();
    match result {
        Err(MomsError::Builder(msg)) => assert!(msg.contains("fiscal_year_start"), "{msg}"),
        other => panic!("expected builder error, got {other:?}"),
    }
    assert!(SieConfigBuilder::new().fiscal_period("0101", "1232").build().is_err());
}
