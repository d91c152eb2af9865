//! SIE4 serialization and file output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use super::config::SieConfig;
use super::document::{SieDocument, Verification};
use super::encoding::{Pc8Output, encode_pc8};
use crate::core::MomsError;

/// SIE file type written to `#SIETYP`.
const SIE_TYPE: u8 = 4;

impl SieDocument {
    /// Render as SIE4 text.
    ///
    /// Sections appear in fixed order: header, `#KONTO` sorted by code,
    /// `#IB` sorted by code (only if any are set), then one `#VER` block per
    /// verification. Postings with a signed amount of zero are left out.
    /// Apart from the `#GEN` line the output depends only on the document
    /// and the configuration.
    pub fn to_sie(&self, config: &SieConfig) -> String {
        let mut out = String::new();

        write_header(&mut out, self, config);

        out.push('\n');
        for (number, name) in &self.accounts {
            push_line(&mut out, &format!("#KONTO {number} {}", quote(name)));
        }

        if !self.opening_balances.is_empty() {
            out.push('\n');
            for (account, balance) in &self.opening_balances {
                push_line(&mut out, &format!("#IB 0 {account} {}", format_amount(*balance)));
            }
        }

        if !self.verifications.is_empty() {
            out.push('\n');
            for ver in &self.verifications {
                write_verification(&mut out, ver);
            }
        }

        out
    }

    /// Render as SIE4 and encode to PC8, replacing unmappable characters.
    pub fn to_pc8(&self, config: &SieConfig) -> Pc8Output {
        encode_pc8(&self.to_sie(config))
    }
}

/// Write a SIE4 file in PC8 encoding.
///
/// Encoding happens before the file is opened and never fails; unmappable
/// characters become `?`. Returns the number of replaced characters.
pub fn write_sie_file(
    path: impl AsRef<Path>,
    document: &SieDocument,
    config: &SieConfig,
) -> Result<usize, MomsError> {
    let path = path.as_ref();
    let encoded = document.to_pc8(config);

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&encoded.bytes)?;
    writer.flush()?;

    if encoded.replaced > 0 {
        warn!(path = %path.display(), replaced = encoded.replaced, "characters not representable in PC8 were replaced");
    }
    debug!(path = %path.display(), bytes = encoded.bytes.len(), "SIE file written");
    Ok(encoded.replaced)
}

fn write_header(out: &mut String, doc: &SieDocument, config: &SieConfig) {
    let first_date = doc.verifications.first().map(|v| v.date);
    let year = config.resolve_fiscal_year(first_date);
    let (start, end) = config.fiscal_year_bounds(year);

    push_line(out, "#FLAGGA 0");
    push_line(out, "#FORMAT PC8");
    push_line(out, &format!("#SIETYP {SIE_TYPE}"));
    push_line(
        out,
        &format!(
            "#PROGRAM {} {}",
            quote(&config.program_name),
            config.program_version
        ),
    );
    push_line(
        out,
        &format!("#GEN {}", config.generation_date().format("%Y%m%d")),
    );
    push_line(out, &format!("#FNAMN {}", quote(&doc.company_name)));
    push_line(out, &format!("#ORGNR {}", doc.org_number));
    push_line(out, &format!("#RAR 0 {start} {end}"));
    push_line(out, &format!("#KPTYP {}", config.chart_type));
}

fn write_verification(out: &mut String, ver: &Verification) {
    push_line(
        out,
        &format!(
            "#VER \"\" {} {} {}",
            ver.number,
            ver.date.format("%Y%m%d"),
            quote(&ver.description)
        ),
    );
    push_line(out, "{");
    for posting in &ver.postings {
        let amount = posting.signed_amount();
        if amount.is_zero() {
            continue;
        }
        push_line(
            out,
            &format!("    #TRANS {} {{}} {}", posting.account, format_amount(amount)),
        );
    }
    push_line(out, "}");
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Quote a string field; embedded double quotes become single quotes.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "'"))
}

/// Format a Decimal for SIE: point separator, 2 decimal places, half-up.
fn format_amount(d: Decimal) -> String {
    format!(
        "{:.2}",
        d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
