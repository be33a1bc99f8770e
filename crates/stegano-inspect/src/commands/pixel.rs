use std::path::PathBuf;

use clap::Args;
use log::info;
use stegano_inspect_core::window::DEFAULT_WINDOW_LENGTH;
use stegano_inspect_core::Inspection;

use crate::commands::mark_highlight;
use crate::CliResult;

/// Shows the values of a pixel and where it approximately lives in the file
#[derive(Args, Debug)]
pub struct PixelArgs {
    /// Image file to inspect, used readonly
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub media: PathBuf,

    /// Column of the pixel
    #[arg(short, value_name = "x")]
    pub x: u32,

    /// Row of the pixel
    #[arg(short, value_name = "y")]
    pub y: u32,

    /// Also dump the bytes around the pixel offset and mark the pixel
    #[arg(long)]
    pub jump: bool,

    /// Bytes to show when jumping
    #[arg(short, long, value_name = "bytes", default_value_t = DEFAULT_WINDOW_LENGTH)]
    pub length: usize,
}

impl PixelArgs {
    pub fn run(self) -> CliResult<()> {
        let inspection = Inspection::open(&self.media)?;
        let estimate = inspection.estimate();
        info!(
            "{} pixel data estimated to start at {}",
            estimate.format.name(),
            estimate.data_start_offset
        );

        let pixel = inspection.pixel(self.x, self.y)?;
        println!("{pixel}");

        if !self.jump {
            return Ok(());
        }
        let Some(window) = inspection.jump_to_pixel(self.x, self.y, self.length)? else {
            return Ok(());
        };

        let dump = inspection.dump(window);
        println!();
        match inspection.highlight_pixel(self.x, self.y, &window)? {
            Some(region) => print!("{}", mark_highlight(&dump, &region)),
            None => println!("{dump}"),
        }

        Ok(())
    }
}
