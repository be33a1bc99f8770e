//! The displayed byte range of a dump and the mapping of file offsets onto it.

use crate::hex_dump::{BYTES_PER_ROW, HEADER_LINES, HEX_CELL_WIDTH, HEX_COLUMN_START};

/// Default number of bytes in a dump window
pub const DEFAULT_WINDOW_LENGTH: usize = 1024;
/// Bytes shown before a target when jumping to it
pub const JUMP_CONTEXT_BYTES: usize = 64;

/// The currently displayed byte range. It only changes by constructing a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpWindow {
    pub start_offset: usize,
    pub length: usize,
}

impl Default for DumpWindow {
    fn default() -> Self {
        Self::new(0, DEFAULT_WINDOW_LENGTH)
    }
}

impl DumpWindow {
    pub fn new(start_offset: usize, length: usize) -> Self {
        Self {
            start_offset,
            length,
        }
    }

    /// For user supplied starts, a negative start is clamped to 0.
    pub fn clamped(start_offset: i64, length: usize) -> Self {
        Self::new(usize::try_from(start_offset.max(0)).unwrap_or(usize::MAX), length)
    }

    /// A window of `length` bytes that shows `offset` after [`JUMP_CONTEXT_BYTES`] of context
    pub fn around(offset: usize, length: usize) -> Self {
        Self::new(offset.saturating_sub(JUMP_CONTEXT_BYTES), length)
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.start_offset.saturating_add(self.length)
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start_offset <= offset && offset < self.end()
    }
}

/// One highlighted byte within a dump row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightCell {
    /// byte position within the row, `0..16`
    pub column: usize,
    /// first character of the hex pair in the rendered row
    pub text_start: usize,
    /// character after the hex pair in the rendered row
    pub text_end: usize,
}

impl HighlightCell {
    fn at(column: usize) -> Self {
        let text_start = HEX_COLUMN_START + column * HEX_CELL_WIDTH;
        Self {
            column,
            text_start,
            text_end: text_start + 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRegion {
    /// data row relative to the window start
    pub row: usize,
    /// byte position of the first highlighted byte within the row
    pub start_column: usize,
    pub cells: Vec<HighlightCell>,
}

impl HighlightRegion {
    /// Zero based line of the row in the rendered dump, header included
    pub fn text_line(&self) -> usize {
        self.row + HEADER_LINES
    }
}

/// Maps `byte_span` bytes at `offset` onto the rows of `window`.
///
/// Returns `None` if `offset` is not visible in the window. The span is cut at
/// the end of its row, it does not continue on the next one.
pub fn map_to_window(offset: usize, byte_span: usize, window: &DumpWindow) -> Option<HighlightRegion> {
    if !window.contains(offset) {
        return None;
    }

    let relative = offset - window.start_offset;
    let row = relative / BYTES_PER_ROW;
    let start_column = relative % BYTES_PER_ROW;
    let cells = (start_column..BYTES_PER_ROW)
        .take(byte_span)
        .map(HighlightCell::at)
        .collect();

    Some(HighlightRegion {
        row,
        start_column,
        cells,
    })
}
