use moms::core::*;

fn main() {
    println!("=== Identifier Validation ===\n");

    let inputs = [
        ("org", "556036-0793"),
        ("org", "556036-0794"),
        ("vat", "SE556036079301"),
        ("vat", "SE556036079302"),
        ("bg", "5402-9681"),
        ("pg", "4 12 34-6"),
        ("pnr", "19811218-9876"),
        ("pnr", "811318-9876"),
        ("bas", "2641"),
        ("bas", "9999"),
    ];

    for (tag, value) in &inputs {
        match tag.parse::<IdentifierKind>() {
            Ok(kind) => {
                let check = validate_identifier(kind, value);
                println!("  {:<20} {value:<16} {check}", kind.tag());
            }
            Err(e) => println!("  {tag}: {e}"),
        }
    }

    println!("\n=== BAS Accounts ===\n");

    for code in ["1510", "2611", "3010", "6590"] {
        println!(
            "  {code} {:<28} ({})",
            account_name(code).unwrap_or("-"),
            account_class_name(code).unwrap_or("-")
        );
    }
}
