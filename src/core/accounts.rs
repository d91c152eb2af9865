//! BAS chart of accounts: the fixed accounts used for VAT bookkeeping.

use serde::Serialize;

use super::types::VatRate;

/// Named BAS account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BasAccount {
    /// Four-digit account code.
    pub number: &'static str,
    /// Swedish account name.
    pub name: &'static str,
}

pub const ACCOUNTS_RECEIVABLE: BasAccount = BasAccount {
    number: "1510",
    name: "Kundfordringar",
};
pub const ACCOUNTS_PAYABLE: BasAccount = BasAccount {
    number: "2440",
    name: "Leverantörsskulder",
};
pub const OUTGOING_VAT_25: BasAccount = BasAccount {
    number: "2611",
    name: "Utgående moms 25%",
};
pub const OUTGOING_VAT_12: BasAccount = BasAccount {
    number: "2621",
    name: "Utgående moms 12%",
};
pub const OUTGOING_VAT_6: BasAccount = BasAccount {
    number: "2631",
    name: "Utgående moms 6%",
};
pub const INCOMING_VAT: BasAccount = BasAccount {
    number: "2641",
    name: "Ingående moms",
};
pub const VAT_SETTLEMENT: BasAccount = BasAccount {
    number: "2650",
    name: "Momsredovisning",
};
pub const SALES_12: BasAccount = BasAccount {
    number: "3002",
    name: "Försäljning 12% moms",
};
pub const SALES_6: BasAccount = BasAccount {
    number: "3003",
    name: "Försäljning 6% moms",
};
pub const SALES_SERVICES_25: BasAccount = BasAccount {
    number: "3010",
    name: "Försäljning tjänster 25%",
};
pub const SALES_SERVICES_EXEMPT: BasAccount = BasAccount {
    number: "3011",
    name: "Försäljning tjänster momsfri",
};
pub const SALES_ROAMING: BasAccount = BasAccount {
    number: "3012",
    name: "Roaming-intäkter",
};
pub const EXTERNAL_SERVICES: BasAccount = BasAccount {
    number: "6590",
    name: "Övriga externa tjänster",
};
pub const PLATFORM_FEES: BasAccount = BasAccount {
    number: "6591",
    name: "Plattformsavgifter",
};
pub const SUBSCRIPTION_COSTS: BasAccount = BasAccount {
    number: "6592",
    name: "Abonnemangskostnader",
};

/// Standard account table, sorted by account code.
pub const STANDARD_ACCOUNTS: &[BasAccount] = &[
    ACCOUNTS_RECEIVABLE,
    ACCOUNTS_PAYABLE,
    OUTGOING_VAT_25,
    OUTGOING_VAT_12,
    OUTGOING_VAT_6,
    INCOMING_VAT,
    VAT_SETTLEMENT,
    SALES_12,
    SALES_6,
    SALES_SERVICES_25,
    SALES_SERVICES_EXEMPT,
    SALES_ROAMING,
    EXTERNAL_SERVICES,
    PLATFORM_FEES,
    SUBSCRIPTION_COSTS,
];

/// BAS account classes 1-8, indexed by first digit minus one.
const CLASS_NAMES: [&str; 8] = [
    "Tillgångar",
    "Eget kapital och skulder",
    "Intäkter",
    "Kostnader för varor/material",
    "Övriga externa kostnader",
    "Övriga externa kostnader",
    "Personalkostnader",
    "Finansiella poster",
];

/// Look up a standard account by code.
pub fn account_by_number(number: &str) -> Option<&'static BasAccount> {
    STANDARD_ACCOUNTS.iter().find(|a| a.number == number)
}

/// Name of a standard account, if the code is in the table.
pub fn account_name(number: &str) -> Option<&'static str> {
    account_by_number(number).map(|a| a.name)
}

/// Class name for a well-formed BAS code (one digit 1-8 followed by three
/// digits), `None` otherwise.
pub fn account_class_name(code: &str) -> Option<&'static str> {
    let bytes = code.as_bytes();
    if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    match bytes[0] {
        b'1'..=b'8' => Some(CLASS_NAMES[(bytes[0] - b'1') as usize]),
        _ => None,
    }
}

/// Revenue account for a sales rate.
pub fn sales_account(rate: VatRate) -> BasAccount {
    match rate {
        VatRate::Standard => SALES_SERVICES_25,
        VatRate::Reduced12 => SALES_12,
        VatRate::Reduced6 => SALES_6,
        VatRate::Zero => SALES_SERVICES_EXEMPT,
    }
}

/// Output VAT liability account for a rate; 0% has none.
pub fn outgoing_vat_account(rate: VatRate) -> Option<BasAccount> {
    match rate {
        VatRate::Standard => Some(OUTGOING_VAT_25),
        VatRate::Reduced12 => Some(OUTGOING_VAT_12),
        VatRate::Reduced6 => Some(OUTGOING_VAT_6),
        VatRate::Zero => None,
    }
}
