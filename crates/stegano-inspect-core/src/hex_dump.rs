//! Offset / hex / ASCII dump of a byte range, followed by a pattern analysis
//! (signatures and entropy) of that same range.
//!
//! ## Layout
//!
//! ```text
//! Hex view of carrier.png
//! Starting at offset: 0x00000000 (0)
//! Showing 20 bytes
//! --------------------------------------------------------------------------------
//! Offset    00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F  ASCII
//! --------------------------------------------------------------------------------
//! 00000000  89 50 4E 47 0D 0A 1A 0A 00 00 00 0D 49 48 44 52  .PNG........IHDR
//! 00000010  00 00 00 05                                      ....
//!
//! ================================================================================
//! PATTERN ANALYSIS
//! ================================================================================
//! File signatures found:
//! Found PNG image signature at offset +0 (0x00000000)
//!
//! Entropy indicator: 0.051
//! Unique bytes: 13/256
//! Low entropy - repetitive data pattern
//! ```

use std::fmt::{self, Write};

use crate::entropy::{self, EntropyReport};
use crate::signature::{self, SignatureMatch};
use crate::window::DumpWindow;

pub const BYTES_PER_ROW: usize = 16;
/// lines rendered before the first data row
pub const HEADER_LINES: usize = 6;
/// text column of the first hex pair in a data row, after `OFFSET` and two spaces
pub const HEX_COLUMN_START: usize = 10;
/// width of one hex pair including its separating space
pub const HEX_CELL_WIDTH: usize = 3;

const HEX_COLUMN_WIDTH: usize = BYTES_PER_ROW * HEX_CELL_WIDTH - 1;
const RULE_WIDTH: usize = 80;
const COLUMN_HEADER: &str = "Offset    00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F  ASCII";

/// A formatted view on `data`, which starts at `start_offset` of the inspected file.
#[derive(Debug, Clone)]
pub struct HexDump<'a> {
    name: Option<&'a str>,
    data: &'a [u8],
    start_offset: usize,
}

impl<'a> HexDump<'a> {
    /// Takes at most `window.length` bytes of `buffer` starting at `window.start_offset`.
    /// A window reaching past the end of the buffer shows fewer bytes.
    pub fn new(buffer: &'a [u8], window: DumpWindow) -> Self {
        let start = window.start_offset.min(buffer.len());
        let end = start.saturating_add(window.length).min(buffer.len());

        Self::of_range(&buffer[start..end], window.start_offset)
    }

    /// For bytes that were already read from `start_offset` of a file.
    pub fn of_range(data: &'a [u8], start_offset: usize) -> Self {
        Self {
            name: None,
            data,
            start_offset,
        }
    }

    /// Names the dumped file in the title line
    pub fn named(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn data(&self) -> &[u8] {
        self.data
    }

    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// One line per started 16 byte row.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.data
            .chunks(BYTES_PER_ROW)
            .enumerate()
            .map(|(i, chunk)| format_row(self.start_offset + i * BYTES_PER_ROW, chunk))
    }

    pub fn signatures(&self) -> Vec<SignatureMatch> {
        signature::find_signatures(self.data)
    }

    pub fn entropy(&self) -> Option<EntropyReport> {
        entropy::estimate(self.data)
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => writeln!(f, "Hex view of {name}")?,
            None => writeln!(f, "Hex view")?,
        }
        writeln!(
            f,
            "Starting at offset: 0x{:08X} ({})",
            self.start_offset, self.start_offset
        )?;
        writeln!(f, "Showing {} bytes", self.data.len())?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(f, "{COLUMN_HEADER}")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))
    }

    fn write_analysis(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "PATTERN ANALYSIS")?;
        write!(f, "{}", "=".repeat(RULE_WIDTH))?;

        let found = self.signatures();
        if found.is_empty() {
            write!(f, "\nNo known file signatures found in this range")?;
        } else {
            write!(f, "\nFile signatures found:")?;
            for m in found {
                write!(
                    f,
                    "\nFound {} signature at offset +{} (0x{:08X})",
                    m.label,
                    m.offset_in_range,
                    self.start_offset + m.offset_in_range
                )?;
            }
        }

        if let Some(report) = self.entropy() {
            write!(f, "\n\nEntropy indicator: {:.3}", report.indicator)?;
            write!(f, "\nUnique bytes: {}/256", report.unique_byte_count)?;
            write!(f, "\n{}", report.class())?;
        }

        Ok(())
    }
}

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        self.write_analysis(f)
    }
}

/// Renders at most `length` bytes of `buffer` from `start_offset` as a full dump report.
pub fn format(buffer: &[u8], start_offset: usize, length: usize) -> String {
    HexDump::new(buffer, DumpWindow::new(start_offset, length)).to_string()
}

/// `OFFSET  b0 b1 .. b15  ASCII`, the hex column padded so short rows keep the ASCII aligned.
pub fn format_row(offset: usize, chunk: &[u8]) -> String {
    let mut hex = String::with_capacity(HEX_COLUMN_WIDTH);
    for (i, b) in chunk.iter().enumerate() {
        if i > 0 {
            hex.push(' ');
        }
        // writing into a String never fails
        let _ = write!(hex, "{b:02X}");
    }
    let ascii: String = chunk.iter().map(|b| printable(*b)).collect();

    format!(
        "{offset:08X}  {hex:<width$}  {ascii}",
        width = HEX_COLUMN_WIDTH
    )
}

fn printable(b: u8) -> char {
    if (0x20..=0x7E).contains(&b) {
        b as char
    } else {
        '.'
    }
}
