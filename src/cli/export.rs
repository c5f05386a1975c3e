use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use sierraecg::sierra::{SierraEcgFile, SierraReader};

use super::{Config, ExportFormat};

/// Effective export settings after merging flags over the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_repbeats: bool,
    pub pretty: bool,
}

impl ExportOptions {
    pub fn resolve(config: &Config, format: Option<ExportFormat>, repbeats: bool, pretty: bool) -> Self {
        Self {
            format: format.or(config.export.format).unwrap_or_default(),
            include_repbeats: repbeats || config.read.include_repbeats.unwrap_or(false),
            pretty: pretty || config.export.pretty.unwrap_or(false),
        }
    }
}

/// Decode a SierraECG file and write it as JSON or CSV
pub fn run(input: PathBuf, output: Option<PathBuf>, options: ExportOptions) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let ecg = SierraReader::new()
        .include_repbeats(options.include_repbeats)
        .read_path(&input)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match options.format {
        ExportFormat::Json => write_json(writer, &ecg, options.pretty)?,
        ExportFormat::Csv => write_csv(writer, &ecg)?,
    }

    if let Some(path) = output {
        info!("Wrote {:?} export to {}", options.format, path.display());
    }
    Ok(())
}

fn write_json<W: Write>(mut writer: W, ecg: &SierraEcgFile, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, ecg)?;
    } else {
        serde_json::to_writer(&mut writer, ecg)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// One column per lead, followed by one `repbeat:<label>` column per beat.
/// Shorter columns are padded with empty cells.
fn write_csv<W: Write>(writer: W, ecg: &SierraEcgFile) -> Result<()> {
    let mut columns: Vec<(String, &[i16])> = ecg
        .leads
        .iter()
        .map(|lead| (lead.label.clone(), lead.samples.as_slice()))
        .collect();
    columns.extend(
        ecg.repbeats
            .values()
            .map(|beat| (format!("repbeat:{}", beat.label), beat.samples.as_slice())),
    );

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(columns.iter().map(|(name, _)| name.as_str()))?;

    let rows = columns.iter().map(|(_, samples)| samples.len()).max().unwrap_or(0);
    for row in 0..rows {
        csv.write_record(columns.iter().map(|(_, samples)| {
            samples
                .get(row)
                .map(|value| value.to_string())
                .unwrap_or_default()
        }))?;
    }
    csv.flush()?;
    Ok(())
}
