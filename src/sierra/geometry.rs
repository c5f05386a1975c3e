//! Lead labels and per-lead sample geometry
//!
//! Newer schema revisions list lead labels explicitly on `parsedwaveforms`;
//! older ones only give a channel count and an acquisition type, from which
//! the standard 12-lead names are synthesized.

use log::debug;

use super::document::DocumentAccessor;
use super::SierraError;

/// Acquisition types whose channels follow the standard 12-lead order
pub const STANDARD_ACQUISITION_TYPES: [&str; 2] = ["STD-12", "10-WIRE"];

/// Upper bound on `numberchannelsallocated`
pub const MAX_CHANNELS: usize = u16::MAX as usize;

const LIMB_LEAD_NAMES: [&str; 6] = ["I", "II", "III", "aVR", "aVL", "aVF"];

/// Resolved geometry of the full-disclosure waveforms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadGeometry {
    /// Sampling rate in Hz
    pub sampling_freq: u32,
    /// Duration of every channel in milliseconds
    pub duration: u32,
    /// Ordered lead labels
    pub labels: Vec<String>,
}

impl LeadGeometry {
    /// Number of samples each lead holds
    pub fn sample_count(&self) -> usize {
        sample_count(self.duration, self.sampling_freq)
    }

    /// Number of leads
    pub fn lead_count(&self) -> usize {
        self.labels.len()
    }
}

/// `floor(duration_ms * sampling_freq / 1000)`
pub fn sample_count(duration: u32, sampling_freq: u32) -> usize {
    (u64::from(duration) * u64::from(sampling_freq) / 1000) as usize
}

/// Resolve sampling rate, duration and labels
///
/// `signal` is `dataacquisition/signalcharacteristics`, `waveforms` is
/// `parsedwaveforms`.
pub fn resolve_geometry<D: DocumentAccessor>(
    signal: &D,
    waveforms: &D,
) -> Result<LeadGeometry, SierraError> {
    let sampling_freq = signal.required_child("samplingrate")?.parse_text()?;
    let duration = waveforms.parse_attribute("durationperchannel")?;
    let labels = lead_labels(signal, waveforms)?;

    let geometry = LeadGeometry {
        sampling_freq,
        duration,
        labels,
    };
    debug!(
        "Resolved {} leads at {} Hz for {} ms ({} samples each)",
        geometry.lead_count(),
        geometry.sampling_freq,
        geometry.duration,
        geometry.sample_count()
    );
    Ok(geometry)
}

/// Explicit `leadlabels` truncated to `numberofleads`, or synthesized names
///
/// Labels are separated by single spaces, so a doubled space yields an empty
/// label at that position.
pub fn lead_labels<D: DocumentAccessor>(signal: &D, waveforms: &D) -> Result<Vec<String>, SierraError> {
    let explicit = waveforms.attribute_or("leadlabels", "");
    if !explicit.is_empty() {
        let lead_count: usize = waveforms.parse_attribute("numberofleads")?;
        return Ok(explicit
            .split(' ')
            .take(lead_count)
            .map(str::to_string)
            .collect());
    }

    let channel_element = signal.required_child("numberchannelsallocated")?;
    let channels: usize = channel_element.parse_text()?;
    if channels > MAX_CHANNELS {
        return Err(SierraError::invalid_value(
            "numberchannelsallocated",
            channel_element.text(),
        ));
    }
    let acquisition_type = signal.required_child("acquisitiontype")?.text();
    Ok((1..=channels)
        .map(|index| lead_name(acquisition_type, index))
        .collect())
}

/// Name of the 1-based channel `index` for the given acquisition type
pub fn lead_name(acquisition_type: &str, index: usize) -> String {
    if STANDARD_ACQUISITION_TYPES.contains(&acquisition_type) {
        match index {
            1..=6 => return LIMB_LEAD_NAMES[index - 1].to_string(),
            7..=12 => return format!("V{}", index - 6),
            _ => {}
        }
    }
    format!("Channel {}", index)
}
