use std::path::PathBuf;

use clap::Args;
use stegano_inspect_core::session::read_range;
use stegano_inspect_core::window::DEFAULT_WINDOW_LENGTH;
use stegano_inspect_core::{DumpWindow, HexDump};

use crate::CliResult;

/// Shows a hex dump of a byte range together with its signatures and entropy
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// File to inspect, used readonly
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    /// Start offset of the dump, negative values start at 0
    #[arg(
        short,
        long,
        value_name = "start offset",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub offset: i64,

    /// Bytes to show
    #[arg(short, long, value_name = "bytes", default_value_t = DEFAULT_WINDOW_LENGTH)]
    pub length: usize,
}

impl DumpArgs {
    pub fn run(self) -> CliResult<()> {
        let window = DumpWindow::clamped(self.offset, self.length);
        let data = read_range(&self.media, window.start_offset, window.length)?;
        let name = display_name(&self.media);

        println!(
            "{}",
            HexDump::of_range(&data, window.start_offset).named(&name)
        );
        Ok(())
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
