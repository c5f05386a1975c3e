//! # sierraecg - Philips SierraECG XML Decoder
//!
//! `sierraecg` decodes Philips SierraECG / PhilipsECG resting ECG documents
//! into lead-labelled sample sequences ready for downstream analysis.
//!
//! ## Key Features
//!
//! - **Schema Coverage**: Document revisions 1.03, 1.04, 1.04.01 and 1.04.02
//!   of both `SierraECG` and `PhilipsECG` document types.
//!
//! - **Lead Resolution**: Explicit `leadlabels` lists as well as labels
//!   synthesized from the acquisition type for older files.
//!
//! - **Compression**: Uncompressed block payloads and Philips XLI; other
//!   codecs can be plugged in through [`codec::WaveformCodec`].
//!
//! - **Exact Lead Derivation**: III, aVR, aVL and aVF are recovered from the
//!   stored residuals with the same floor-division integer arithmetic the
//!   device uses.
//!
//! - **Representative Beats**: Optional per-lead median beats, including the
//!   1.03 inline layout.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sierraecg::sierra::read_file;
//!
//! let ecg = read_file("resting.xml", true)?;
//! println!("{} {}", ecg.doc_type, ecg.doc_ver);
//!
//! for lead in &ecg.leads {
//!     println!("{}: {} samples at {} Hz", lead.label, lead.len(), lead.sampling_freq);
//! }
//!
//! if let Some(beat) = ecg.repbeat("II") {
//!     println!("Lead II median beat: {} samples", beat.samples.len());
//! }
//! # Ok::<(), sierraecg::sierra::SierraError>(())
//! ```
//!
//! ## Custom Codecs
//!
//! ```rust
//! use sierraecg::codec::CodecError;
//! use sierraecg::sierra::SierraReader;
//!
//! let codec = |_raw: &[u8], labels: &[String]| -> Result<Vec<Vec<i16>>, CodecError> {
//!     Ok(labels.iter().map(|_| Vec::new()).collect())
//! };
//! let reader = SierraReader::with_codec(codec).include_repbeats(true);
//! assert!(reader.config().include_repbeats);
//! ```
//!
//! ## Architecture
//!
//! - [`sierra`]: Document access, version gate, lead geometry, payload
//!   decoding, lead derivation, representative beats and the reader
//! - [`codec`]: Compression codec boundary and the XLI implementation

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod codec;
pub mod sierra;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::codec::{CodecError, WaveformCodec, XliCodec};
    pub use crate::sierra::{
        read_bytes, read_file, read_str, DocumentAccessor, EcgLead, EcgRepbeat, ReaderConfig, SierraEcgFile,
        SierraError, SierraReader, XmlElement,
    };
}
