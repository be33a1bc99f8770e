use clap::Parser;
use stegano_inspect_core::InspectError;

use crate::cli::{CliArgs, Commands};

mod cli;
mod commands;

pub type CliResult<T> = Result<T, InspectError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    match args.command {
        Commands::Dump(args) => args.run(),
        Commands::Pixel(args) => args.run(),
        Commands::Search(args) => args.run(),
        Commands::Properties(args) => args.run(),
    }
}
