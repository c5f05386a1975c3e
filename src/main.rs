//! # sierraecg
//!
//! Command-line front end for decoding Philips SierraECG XML files.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize a file
//! sierraecg info resting.xml --repbeats
//!
//! # Export decoded leads as CSV
//! sierraecg export resting.xml -o resting.csv --format csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
