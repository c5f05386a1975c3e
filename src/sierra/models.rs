//! Data models for decoded SierraECG files
//!
//! Every value here is owned by the instance that holds it; nothing is shared
//! between files, leads or beats.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single ECG lead: one recorded or derived channel of the tracing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EcgLead {
    /// Lead label (`I`, `II`, `V1`, `Channel 3`, ...), unique within a file
    pub label: String,

    /// Sampling frequency in Hz
    pub sampling_freq: u32,

    /// Duration in milliseconds
    pub duration: u32,

    /// Samples in the document's native units
    pub samples: Vec<i16>,
}

impl EcgLead {
    /// Create a lead from its label, geometry and samples
    pub fn new(label: impl Into<String>, sampling_freq: u32, duration: u32, samples: Vec<i16>) -> Self {
        Self {
            label: label.into(),
            sampling_freq,
            duration,
            samples,
        }
    }

    /// Number of samples in the lead
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the lead holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// A representative beat for one lead
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EcgRepbeat {
    /// Lead label this beat belongs to
    pub label: String,

    /// Sampling frequency in Hz (0 when the schema omits it)
    pub sampling_freq: u32,

    /// Duration in milliseconds
    pub duration: u32,

    /// Amplitude resolution (0 when the schema omits it)
    pub resolution: f64,

    /// Beat detection method label (empty when the schema omits it)
    pub method: String,

    /// Beat samples
    pub samples: Vec<i16>,
}

/// A decoded SierraECG / PhilipsECG document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SierraEcgFile {
    /// Document type (`SierraECG` or `PhilipsECG`)
    pub doc_type: String,

    /// Document schema version
    pub doc_ver: String,

    /// Leads in document order, with augmented leads already derived
    pub leads: Vec<EcgLead>,

    /// Representative beats keyed by lead label
    pub repbeats: BTreeMap<String, EcgRepbeat>,
}

impl SierraEcgFile {
    /// Look up a lead by label
    pub fn lead(&self, label: &str) -> Option<&EcgLead> {
        self.leads.iter().find(|lead| lead.label == label)
    }

    /// Labels of all leads, in order
    pub fn lead_labels(&self) -> Vec<&str> {
        self.leads.iter().map(|lead| lead.label.as_str()).collect()
    }

    /// Look up a representative beat by lead label
    pub fn repbeat(&self, label: &str) -> Option<&EcgRepbeat> {
        self.repbeats.get(label)
    }
}
