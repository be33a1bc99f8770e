use std::path::PathBuf;

use clap::Args;
use stegano_inspect_core::Inspection;

use crate::CliResult;

/// Shows file and image properties, timestamps and MD5/SHA-1/SHA-256 digests
#[derive(Args, Debug)]
pub struct PropertiesArgs {
    /// File to inspect, used readonly
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,
}

impl PropertiesArgs {
    pub fn run(self) -> CliResult<()> {
        let inspection = Inspection::open(&self.media)?;

        println!("{}", inspection.properties());
        Ok(())
    }
}
