//! # SierraECG Decoder Module
//!
//! Decodes Philips SierraECG / PhilipsECG XML documents (schema revisions
//! 1.03 through 1.04.02) into lead-labelled `i16` sample sequences.
//!
//! ## Pipeline
//!
//! 1. Parse the document into an [`XmlElement`] tree
//! 2. Gate on `documenttype` / `documentversion`
//! 3. Resolve sampling rate, duration and lead labels
//! 4. Decode the `parsedwaveforms` payload (Base64, then raw blocks or XLI)
//! 5. Derive III, aVR, aVL and aVF in place from I and II
//! 6. Optionally extract representative beats
//!
//! Any failure aborts the whole read; no partial result is returned.
//!
//! ## Document Structure
//!
//! ```text
//! restingecgdata
//! ├── documentinfo
//! │   ├── documenttype          (SierraECG | PhilipsECG)
//! │   └── documentversion       (1.03 | 1.04 | 1.04.01 | 1.04.02)
//! ├── dataacquisition
//! │   └── signalcharacteristics
//! │       ├── samplingrate
//! │       ├── numberchannelsallocated
//! │       └── acquisitiontype
//! ├── parsedwaveforms           (@durationperchannel @numberofleads @leadlabels
//! │                              @dataencoding @compressmethod|@compression)
//! └── repbeats (optional)       (@dataencoding @samplespersec @resolution @repbeatmethod)
//!     └── repbeat*              (@leadname)
//!         └── waveform          (@duration; inline on repbeat in 1.03)
//! ```

mod binary;
mod derive;
mod document;
mod error;
mod geometry;
mod models;
mod reader;
mod repbeats;
mod version;

#[cfg(test)]
mod tests;

pub use binary::{
    decode_waveforms, BinaryDecodeError, BinaryDecoder, CompressionMethod, PayloadEncoding,
};
pub use derive::{
    derive_augmented_leads, derive_avf, derive_avl, derive_avr, derive_iii, DERIVATION_LEAD_COUNT,
};
pub use document::{DocumentAccessor, XmlElement};
pub use error::SierraError;
pub use geometry::{
    lead_labels, lead_name, resolve_geometry, sample_count, LeadGeometry, MAX_CHANNELS,
    STANDARD_ACQUISITION_TYPES,
};
pub use models::{EcgLead, EcgRepbeat, SierraEcgFile};
pub use reader::{read_bytes, read_file, read_str, ReaderConfig, SierraReader, ROOT_ELEMENT};
pub use repbeats::{extract_repbeats, BeatWaveform};
pub use version::{
    assert_version, DocumentVersion, SUPPORTED_DOCUMENT_TYPES, SUPPORTED_DOCUMENT_VERSIONS,
};
