//! Representative beat extraction
//!
//! Two layouts exist for `<repbeat>` entries:
//!
//! ```text
//! 1.04+  <repbeat leadname="I"><waveform duration="1200">BASE64</waveform></repbeat>
//! 1.03   <repbeat leadname="I" duration="1200">BASE64</repbeat>
//! ```
//!
//! 1.03 files may also omit `samplespersec`, `resolution` and
//! `repbeatmethod` on the `<repbeats>` container.

use std::collections::BTreeMap;

use log::debug;

use super::binary::{BinaryDecoder, PayloadEncoding};
use super::document::DocumentAccessor;
use super::models::EcgRepbeat;
use super::SierraError;

/// Where a beat's `duration` and payload live
#[derive(Debug, Clone, Copy)]
pub enum BeatWaveform<'a, D> {
    /// Nested `<waveform>` element
    Nested(&'a D),
    /// Directly on the `<repbeat>` element (1.03)
    Inline(&'a D),
}

impl<'a, D: DocumentAccessor> BeatWaveform<'a, D> {
    /// Resolve the layout of one `<repbeat>` entry
    pub fn locate(repbeat: &'a D) -> Self {
        match repbeat.child("waveform") {
            Some(waveform) => BeatWaveform::Nested(waveform),
            None => BeatWaveform::Inline(repbeat),
        }
    }

    /// Element carrying `duration` and the encoded samples
    pub fn element(&self) -> &'a D {
        match *self {
            BeatWaveform::Nested(element) | BeatWaveform::Inline(element) => element,
        }
    }
}

/// Settings shared by every beat in a `<repbeats>` container
#[derive(Debug, Clone, PartialEq)]
struct BeatContainer {
    encoding: PayloadEncoding,
    sampling_freq: u32,
    resolution: f64,
    method: String,
}

impl BeatContainer {
    fn from_element<D: DocumentAccessor>(element: &D) -> Result<Self, SierraError> {
        Ok(Self {
            encoding: PayloadEncoding::parse(element.required_attribute("dataencoding")?)?,
            sampling_freq: element.parse_attribute_or("samplespersec", 0)?,
            resolution: element.parse_attribute_or("resolution", 0.0)?,
            method: element.attribute_or("repbeatmethod", "").to_string(),
        })
    }
}

/// Extract every representative beat, keyed by lead name
///
/// A document without `<repbeats>` yields an empty map. When a lead name
/// repeats, the later entry wins.
pub fn extract_repbeats<D: DocumentAccessor>(root: &D) -> Result<BTreeMap<String, EcgRepbeat>, SierraError> {
    let Some(container) = root.child("repbeats") else {
        debug!("No representative beats in document");
        return Ok(BTreeMap::new());
    };

    let settings = BeatContainer::from_element(container)?;
    let mut repbeats = BTreeMap::new();

    for item in container.children("repbeat") {
        let label = item.required_attribute("leadname")?.to_string();
        let waveform = BeatWaveform::locate(item).element();
        let duration = waveform.parse_attribute("duration")?;
        let samples = BinaryDecoder::decode_samples(waveform.text(), settings.encoding)?;

        repbeats.insert(
            label.clone(),
            EcgRepbeat {
                label,
                sampling_freq: settings.sampling_freq,
                duration,
                resolution: settings.resolution,
                method: settings.method.clone(),
                samples,
            },
        );
    }

    debug!("Extracted {} representative beats", repbeats.len());
    Ok(repbeats)
}
