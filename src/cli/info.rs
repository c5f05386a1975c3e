use anyhow::{Context, Result};
use std::path::PathBuf;

use sierraecg::sierra::{read_file, SierraEcgFile};

/// Display information about a SierraECG file
pub fn run(file: PathBuf, repbeats: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let ecg = read_file(&file, repbeats)
        .with_context(|| format!("Failed to decode {}", file.display()))?;

    print!("{}", format_summary(&file, &ecg));
    Ok(())
}

fn heading(text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        console::style(text).bold().cyan().to_string()
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        text.to_string()
    }
}

fn format_summary(file: &std::path::Path, ecg: &SierraEcgFile) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", heading("SierraECG File Information")));
    out.push_str("==========================\n");
    out.push_str(&format!("File: {}\n", file.display()));
    out.push_str(&format!("Type: {} {}\n\n", ecg.doc_type, ecg.doc_ver));

    out.push_str(&format!("{}\n", heading(&format!("Leads ({}):", ecg.leads.len()))));
    for lead in &ecg.leads {
        let min = lead.samples.iter().min().copied().unwrap_or_default();
        let max = lead.samples.iter().max().copied().unwrap_or_default();
        out.push_str(&format!(
            "  {:<10} {:>5} Hz {:>7} ms {:>7} samples  [{}, {}]\n",
            lead.label,
            lead.sampling_freq,
            lead.duration,
            lead.len(),
            min,
            max
        ));
    }

    if !ecg.repbeats.is_empty() {
        out.push('\n');
        out.push_str(&format!(
            "{}\n",
            heading(&format!("Representative beats ({}):", ecg.repbeats.len()))
        ));
        for beat in ecg.repbeats.values() {
            out.push_str(&format!(
                "  {:<10} {:>5} Hz {:>7} ms {:>7} samples  resolution {} method '{}'\n",
                beat.label,
                beat.sampling_freq,
                beat.duration,
                beat.samples.len(),
                beat.resolution,
                beat.method
            ));
        }
    }

    out
}
