use std::path::PathBuf;

use clap::Args;
use stegano_inspect_core::search::DEFAULT_PATTERN;
use stegano_inspect_core::window::DEFAULT_WINDOW_LENGTH;
use stegano_inspect_core::{DumpWindow, Inspection, PatternQuery};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::CliResult;

/// Matches listed in the summary, the rest is only counted
const MAX_LISTED_MATCHES: usize = 20;

/// Searches a file for a byte pattern given in hex
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// File to search, used readonly
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    /// Hex byte pattern, e.g. "FF D8 FF" or "0x89504E47"
    #[arg(short, long, value_name = "hex pattern", default_value = DEFAULT_PATTERN)]
    pub pattern: String,

    /// Also dump the bytes around the first match
    #[arg(long)]
    pub jump: bool,
}

impl SearchArgs {
    pub fn run(self) -> CliResult<()> {
        let query = PatternQuery::parse(&self.pattern)?;
        let inspection = Inspection::open(&self.media)?;
        let matches = inspection.search(&query);

        println!("{}", summarize(&self.pattern, &matches));

        if let (true, Some(first)) = (self.jump, matches.first()) {
            println!();
            println!(
                "{}",
                inspection.dump(DumpWindow::around(*first, DEFAULT_WINDOW_LENGTH))
            );
        }
        Ok(())
    }
}

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Offset")]
    offset: usize,
    #[tabled(rename = "Hex")]
    hex: String,
}

fn summarize(pattern: &str, matches: &[usize]) -> String {
    if matches.is_empty() {
        return format!("Pattern '{pattern}' not found in file");
    }

    let rows = matches
        .iter()
        .take(MAX_LISTED_MATCHES)
        .enumerate()
        .map(|(i, offset)| MatchRow {
            index: i + 1,
            offset: *offset,
            hex: format!("0x{offset:08X}"),
        });
    let mut table = Table::new(rows);
    table.with(Style::ascii());

    let mut summary = format!(
        "Pattern '{pattern}' found at {} location(s):\n{table}",
        matches.len()
    );
    if matches.len() > MAX_LISTED_MATCHES {
        summary.push_str(&format!(
            "\n... and {} more matches",
            matches.len() - MAX_LISTED_MATCHES
        ));
    }
    summary
}
