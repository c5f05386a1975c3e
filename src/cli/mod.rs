use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

mod config;
mod export;
mod info;

pub use config::Config;

/// sierraecg - Philips SierraECG XML decoder
#[derive(Parser)]
#[command(name = "sierraecg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for the export command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// The whole decoded file as JSON
    #[default]
    Json,
    /// One column per lead, one row per sample index
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Display a summary of a SierraECG file
    Info {
        /// Input SierraECG XML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Also decode representative beats
        #[arg(long)]
        repbeats: bool,
    },

    /// Export decoded leads as JSON or CSV
    Export {
        /// Input SierraECG XML file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short = 'o', long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Output format (json, csv)
        #[arg(short = 'f', long, value_enum)]
        format: Option<ExportFormat>,

        /// Also decode and export representative beats
        #[arg(long)]
        repbeats: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info { file, repbeats } => info::run(file, repbeats),
        Commands::Export {
            input,
            output,
            format,
            repbeats,
            pretty,
            config,
        } => {
            let config = match config {
                Some(path) => Config::from_file(&path)?,
                None => Config::default(),
            };
            let options = export::ExportOptions::resolve(&config, format, repbeats, pretty);
            export::run(input, output, options)
        }
    }
}
