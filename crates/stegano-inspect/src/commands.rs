pub mod dump;
pub mod pixel;
pub mod properties;
pub mod search;

use std::fmt::Write;

use stegano_inspect_core::HighlightRegion;

/// Puts a `^^` marker line below the highlighted row of a rendered dump.
pub(crate) fn mark_highlight(dump: &str, region: &HighlightRegion) -> String {
    let mut out = String::with_capacity(dump.len() + 80);
    for (i, line) in dump.lines().enumerate() {
        out.push_str(line);
        out.push('\n');
        if i == region.text_line() {
            let mut marker = String::new();
            for cell in &region.cells {
                // writing into a String never fails
                let _ = write!(
                    marker,
                    "{:pad$}{}",
                    "",
                    "^".repeat(cell.text_end - cell.text_start),
                    pad = cell.text_start - marker.len()
                );
            }
            out.push_str(&marker);
            out.push('\n');
        }
    }
    out
}
