//! PC8 (IBM code page 437) encoding, the character set SIE files use.

use codepage_437::CP437_CONTROL;

use crate::core::MomsError;

/// Byte written for characters code page 437 cannot represent.
pub const REPLACEMENT: u8 = b'?';

/// Result of a best-effort PC8 encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pc8Output {
    pub bytes: Vec<u8>,
    /// Number of characters replaced by [`REPLACEMENT`].
    pub replaced: usize,
}

/// ASCII maps to itself, including control characters.
fn encode_char(c: char) -> Option<u8> {
    CP437_CONTROL.encode(c)
}

/// Encode to PC8, replacing unmappable characters with `?`.
pub fn encode_pc8(text: &str) -> Pc8Output {
    let mut bytes = Vec::with_capacity(text.len());
    let mut replaced = 0;
    for c in text.chars() {
        match encode_char(c) {
            Some(b) => bytes.push(b),
            None => {
                bytes.push(REPLACEMENT);
                replaced += 1;
            }
        }
    }
    Pc8Output { bytes, replaced }
}

/// Encode to PC8, failing on the first unmappable character.
pub fn encode_pc8_strict(text: &str) -> Result<Vec<u8>, MomsError> {
    text.chars()
        .map(|c| {
            encode_char(c).ok_or_else(|| {
                MomsError::Encoding(format!("'{c}' (U+{:04X}) has no PC8 representation", c as u32))
            })
        })
        .collect()
}

/// Decode PC8 bytes.
pub fn decode_pc8(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| CP437_CONTROL.decode(b)).collect()
}
