//! # Waveform Compression Codecs
//!
//! Compressed `parsedwaveforms` payloads are handed to a [`WaveformCodec`]
//! together with the resolved lead labels; the codec returns one sample
//! sequence per label, in label order. The reader is generic over the codec,
//! so callers can substitute their own implementation (or a stub in tests).
//!
//! [`XliCodec`] implements the Philips XLI scheme used by SierraECG devices.

mod lzw;
mod xli;

pub use lzw::LzwDecoder;
pub use xli::{XliCodec, XLI_CODE_BITS};

/// Errors raised while decompressing a waveform payload
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Not enough bytes left for a chunk header
    #[error("Truncated chunk header at offset {0}")]
    TruncatedHeader(usize),

    /// Chunk header declares more bytes than remain in the payload
    #[error("Chunk at offset {offset} declares {declared} bytes, {available} available")]
    TruncatedChunk {
        /// Byte offset of the chunk body
        offset: usize,
        /// Declared chunk size
        declared: i64,
        /// Bytes remaining in the payload
        available: usize,
    },

    /// LZW code that cannot be resolved against the dictionary
    #[error("Invalid LZW code {code} (next free code {next_code})")]
    InvalidCode {
        /// Offending code
        code: u16,
        /// Next dictionary slot at the time of the error
        next_code: usize,
    },

    /// Error raised by a caller-supplied codec
    #[error("{0}")]
    Custom(String),
}

/// Decompresses a raw waveform payload into per-lead samples
pub trait WaveformCodec {
    /// Decode `data` into one sample sequence per entry of `labels`
    fn decode(&self, data: &[u8], labels: &[String]) -> Result<Vec<Vec<i16>>, CodecError>;
}

impl<F> WaveformCodec for F
where
    F: Fn(&[u8], &[String]) -> Result<Vec<Vec<i16>>, CodecError>,
{
    fn decode(&self, data: &[u8], labels: &[String]) -> Result<Vec<Vec<i16>>, CodecError> {
        self(data, labels)
    }
}
