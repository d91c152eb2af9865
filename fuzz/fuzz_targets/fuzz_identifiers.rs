#![no_main]

use libfuzzer_sys::fuzz_target;
use moms::core::*;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Validators must not panic on any input.
        let _ = validate_org_number(s);
        let _ = validate_vat_number(s);
        let _ = validate_bankgiro(s);
        let _ = validate_plusgiro(s);
        let _ = validate_personal_number(s);
        let _ = validate_bas_account(s);
        let _ = s.parse::<IdentifierKind>();
    }
});
