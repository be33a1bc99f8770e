use std::str::FromStr;

use memchr::memmem;

use crate::error::{InspectError, Result};

/// The query preset by the inspection tools, a JPEG start of image.
pub const DEFAULT_PATTERN: &str = "FF D8 FF";

/// A byte pattern given as hex pairs, e.g. `FF D8 FF`, `ffd8ff` or `0xFF 0xD8 0xFF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternQuery {
    bytes: Vec<u8>,
}

impl PatternQuery {
    /// Whitespace and every `0x` prefix are dropped, the rest must be an
    /// even number of hex digits.
    pub fn parse(hex_digits: &str) -> Result<Self> {
        let digits: String = hex_digits.split_whitespace().collect();
        let digits = digits.replace("0x", "").replace("0X", "");

        if digits.is_empty() {
            return Err(InspectError::invalid_pattern(hex_digits, "no hex digits given"));
        }
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(InspectError::invalid_pattern(
                hex_digits,
                format!("{c:?} is not a hex digit"),
            ));
        }
        if digits.len() % 2 != 0 {
            return Err(InspectError::invalid_pattern(
                hex_digits,
                "odd number of hex digits",
            ));
        }

        let bytes = digits
            .as_bytes()
            .chunks(2)
            .map(|pair| {
                // only ascii hex digits are left, so the pair is valid utf8 and parses
                std::str::from_utf8(pair)
                    .ok()
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                    .ok_or_else(|| InspectError::invalid_pattern(hex_digits, "malformed hex pair"))
            })
            .collect::<Result<Vec<u8>>>()?;

        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl FromStr for PatternQuery {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Every start offset of `query` in `buffer`, ascending. Overlapping matches
/// are included, the scan resumes one byte after each match start.
pub fn search(buffer: &[u8], query: &PatternQuery) -> Vec<usize> {
    let finder = memmem::Finder::new(query.bytes());
    let mut matches = Vec::new();
    let mut start = 0;

    while let Some(pos) = finder.find(&buffer[start..]) {
        matches.push(start + pos);
        start += pos + 1;
    }
    matches
}

/// Parses `hex_digits` and searches `buffer` for it.
pub fn search_hex(buffer: &[u8], hex_digits: &str) -> Result<Vec<usize>> {
    Ok(search(buffer, &PatternQuery::parse(hex_digits)?))
}
