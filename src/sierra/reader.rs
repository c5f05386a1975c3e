//! SierraECG document reader
//!
//! [`SierraReader`] runs the decode pipeline over one fully buffered
//! document, in order:
//!
//! 1. locate `restingecgdata` and check the document type and version
//! 2. resolve sampling rate, duration and lead labels
//! 3. decode `parsedwaveforms`, handing XLI payloads to the codec
//! 4. derive III, aVR, aVL and aVF in place
//! 5. optionally extract representative beats
//!
//! Any failure aborts the read; no partial file is returned.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sierraecg::sierra::{ReaderConfig, SierraReader};
//!
//! let reader = SierraReader::new().with_config(ReaderConfig {
//!     include_repbeats: true,
//! });
//! let ecg = reader.read_path("resting.xml")?;
//!
//! for lead in &ecg.leads {
//!     println!("{}: {} samples", lead.label, lead.len());
//! }
//! # Ok::<(), sierraecg::sierra::SierraError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use super::derive::derive_augmented_leads;
use super::document::{DocumentAccessor, XmlElement};
use super::geometry::resolve_geometry;
use super::models::{EcgLead, SierraEcgFile};
use super::repbeats::extract_repbeats;
use super::version::assert_version;
use super::{binary, SierraError};
use crate::codec::{WaveformCodec, XliCodec};

/// Root element of every SierraECG document
pub const ROOT_ELEMENT: &str = "restingecgdata";

/// Configuration for reading SierraECG files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Also extract representative beats
    pub include_repbeats: bool,
}

/// Reader for SierraECG documents
///
/// Generic over the codec used for compressed waveforms; [`SierraReader::new`]
/// uses [`XliCodec`].
#[derive(Debug, Clone, Default)]
pub struct SierraReader<C = XliCodec> {
    codec: C,
    config: ReaderConfig,
}

impl SierraReader<XliCodec> {
    /// Create a reader with the XLI codec and default configuration
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: WaveformCodec> SierraReader<C> {
    /// Create a reader that delegates compressed payloads to `codec`
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            config: ReaderConfig::default(),
        }
    }

    /// Replace the reader configuration
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Toggle representative beat extraction
    pub fn include_repbeats(mut self, include: bool) -> Self {
        self.config.include_repbeats = include;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read and decode a file from disk
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<SierraEcgFile, SierraError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let ecg = self.read(BufReader::new(file))?;
        info!(
            "Read {} ({} {}, {} leads)",
            path.display(),
            ecg.doc_type,
            ecg.doc_ver,
            ecg.leads.len()
        );
        Ok(ecg)
    }

    /// Read and decode a complete document from a buffered source
    pub fn read<R: BufRead>(&self, reader: R) -> Result<SierraEcgFile, SierraError> {
        let document = XmlElement::from_reader(reader)?;
        self.read_document(&document)
    }

    /// Read and decode a document held in memory
    pub fn read_str(&self, xml: &str) -> Result<SierraEcgFile, SierraError> {
        self.read(xml.as_bytes())
    }

    /// Read and decode a document held as raw bytes
    pub fn read_bytes(&self, xml: &[u8]) -> Result<SierraEcgFile, SierraError> {
        self.read(xml)
    }

    /// Decode an already parsed document
    ///
    /// `document` may be the `restingecgdata` element itself or any ancestor
    /// of it.
    pub fn read_document<D: DocumentAccessor>(&self, document: &D) -> Result<SierraEcgFile, SierraError> {
        let root = if document.name() == ROOT_ELEMENT {
            document
        } else {
            document.required_child(ROOT_ELEMENT)?
        };

        let version = assert_version(root)?;

        let signal = root
            .required_child("dataacquisition")?
            .required_child("signalcharacteristics")?;
        let waveforms = root.required_child("parsedwaveforms")?;
        let geometry = resolve_geometry(signal, waveforms)?;

        let samples = binary::decode_waveforms(
            waveforms,
            &geometry.labels,
            geometry.sample_count(),
            &self.codec,
        )?;

        let mut leads: Vec<EcgLead> = geometry
            .labels
            .iter()
            .zip(samples)
            .map(|(label, samples)| {
                EcgLead::new(label.as_str(), geometry.sampling_freq, geometry.duration, samples)
            })
            .collect();
        derive_augmented_leads(&mut leads);

        let repbeats = if self.config.include_repbeats {
            extract_repbeats(root)?
        } else {
            Default::default()
        };

        Ok(SierraEcgFile {
            doc_type: version.doc_type,
            doc_ver: version.doc_ver,
            leads,
            repbeats,
        })
    }
}

/// Read a SierraECG file from disk with the default XLI codec
pub fn read_file<P: AsRef<Path>>(path: P, include_repbeats: bool) -> Result<SierraEcgFile, SierraError> {
    SierraReader::new()
        .include_repbeats(include_repbeats)
        .read_path(path)
}

/// Read a SierraECG document from a string with the default XLI codec
pub fn read_str(xml: &str, include_repbeats: bool) -> Result<SierraEcgFile, SierraError> {
    SierraReader::new()
        .include_repbeats(include_repbeats)
        .read_str(xml)
}

/// Read a SierraECG document from raw bytes with the default XLI codec
pub fn read_bytes(xml: &[u8], include_repbeats: bool) -> Result<SierraEcgFile, SierraError> {
    SierraReader::new()
        .include_repbeats(include_repbeats)
        .read_bytes(xml)
}
