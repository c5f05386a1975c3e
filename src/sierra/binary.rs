//! Waveform payload decoding
//!
//! `parsedwaveforms` carries every lead in one text payload. Decoding is:
//!
//! 1. Text-to-binary decode according to `dataencoding` (Base64)
//! 2. Either split the raw bytes into contiguous little-endian `i16` blocks,
//!    one per lead, or hand them to the compression codec
//!
//! The uncompressed layout is block-contiguous: lead 0 occupies the first
//! `sample_count` values, lead 1 the next `sample_count`, and so on. Values
//! past `lead_count * sample_count` are ignored.

use std::io::Cursor;

use base64::prelude::*;
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use log::debug;

use super::document::DocumentAccessor;
use super::SierraError;
use crate::codec::WaveformCodec;

/// Text-to-binary encodings a payload may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// Standard Base64
    Base64,
}

impl PayloadEncoding {
    /// Map a `dataencoding` attribute value to a supported encoding
    pub fn parse(value: &str) -> Result<Self, SierraError> {
        match value {
            "Base64" => Ok(PayloadEncoding::Base64),
            other => Err(SierraError::UnsupportedEncoding(other.to_string())),
        }
    }

    /// Decode payload text into raw bytes
    pub fn decode(&self, text: &str) -> Result<Vec<u8>, BinaryDecodeError> {
        match self {
            PayloadEncoding::Base64 => {
                // Payloads are frequently wrapped across lines
                let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
                Ok(BASE64_STANDARD.decode(compact)?)
            }
        }
    }
}

/// Compression applied to the waveform payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionMethod {
    /// Raw little-endian `i16` blocks
    #[default]
    Uncompressed,
    /// Philips XLI compression
    Xli,
}

impl CompressionMethod {
    /// Attribute names that may carry the compression method, in priority order.
    /// Newer revisions use `compressmethod`, 1.04 `compression`.
    pub const ATTRIBUTE_NAMES: [&'static str; 2] = ["compressmethod", "compression"];

    /// Map a compression attribute value to a supported method
    pub fn parse(value: &str) -> Result<Self, SierraError> {
        match value {
            "Uncompressed" => Ok(CompressionMethod::Uncompressed),
            "XLI" => Ok(CompressionMethod::Xli),
            other => Err(SierraError::UnsupportedCompression(other.to_string())),
        }
    }

    /// Resolve the method declared on `parsedwaveforms`; first attribute
    /// present wins, and a document declaring neither is uncompressed.
    pub fn from_element<D: DocumentAccessor>(element: &D) -> Result<Self, SierraError> {
        Self::ATTRIBUTE_NAMES
            .iter()
            .find_map(|name| element.attribute(name))
            .map_or(Ok(CompressionMethod::Uncompressed), Self::parse)
    }
}

/// Errors that can occur during binary decoding
#[derive(Debug, thiserror::Error)]
pub enum BinaryDecodeError {
    /// Payload text is not valid Base64
    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    /// Payload holds fewer samples than the geometry requires
    #[error("Payload too short: expected {expected} samples, got {actual}")]
    Truncated {
        /// Samples required
        expected: usize,
        /// Samples available
        actual: usize,
    },

    /// Byte count is not a whole number of 16-bit samples
    #[error("Invalid data length: {0} bytes is not a multiple of 2")]
    OddLength(usize),

    /// Reading from the byte buffer failed
    #[error("Read error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Decoder for SierraECG binary payloads
pub struct BinaryDecoder;

impl BinaryDecoder {
    /// Interpret the whole buffer as little-endian `i16` values
    pub fn bytes_to_samples(bytes: &[u8]) -> Result<Vec<i16>, BinaryDecodeError> {
        if bytes.len() % 2 != 0 {
            return Err(BinaryDecodeError::OddLength(bytes.len()));
        }

        let count = bytes.len() / 2;
        let mut values = Vec::with_capacity(count);
        let mut cursor = Cursor::new(bytes);
        for _ in 0..count {
            values.push(cursor.read_i16::<LittleEndian>()?);
        }
        Ok(values)
    }

    /// Split raw bytes into `lead_count` contiguous blocks of `sample_count`
    /// little-endian `i16` values. Trailing data is discarded.
    pub fn split_leads(
        bytes: &[u8],
        lead_count: usize,
        sample_count: usize,
    ) -> Result<Vec<Vec<i16>>, BinaryDecodeError> {
        let expected = lead_count.saturating_mul(sample_count);
        let available = bytes.len() / 2;
        if available < expected {
            return Err(BinaryDecodeError::Truncated {
                expected,
                actual: available,
            });
        }

        let block_bytes = sample_count * 2;
        let leads = (0..lead_count)
            .map(|lead| {
                let start = lead * block_bytes;
                let mut samples = vec![0i16; sample_count];
                LittleEndian::read_i16_into(&bytes[start..start + block_bytes], &mut samples);
                samples
            })
            .collect();
        Ok(leads)
    }

    /// Decode a payload that stores samples directly (representative beats)
    pub fn decode_samples(text: &str, encoding: PayloadEncoding) -> Result<Vec<i16>, BinaryDecodeError> {
        let bytes = encoding.decode(text)?;
        Self::bytes_to_samples(&bytes)
    }
}

/// Decode the `parsedwaveforms` payload into one sample sequence per label
///
/// The result always holds exactly `labels.len()` sequences of
/// `sample_count` samples each.
pub fn decode_waveforms<D, C>(
    waveforms: &D,
    labels: &[String],
    sample_count: usize,
    codec: &C,
) -> Result<Vec<Vec<i16>>, SierraError>
where
    D: DocumentAccessor,
    C: WaveformCodec + ?Sized,
{
    let encoding = PayloadEncoding::parse(waveforms.required_attribute("dataencoding")?)?;
    let compression = CompressionMethod::from_element(waveforms)?;
    let raw = encoding.decode(waveforms.text())?;
    debug!(
        "Decoded {} payload bytes ({:?}, {:?})",
        raw.len(),
        encoding,
        compression
    );

    match compression {
        CompressionMethod::Uncompressed => {
            Ok(BinaryDecoder::split_leads(&raw, labels.len(), sample_count)?)
        }
        CompressionMethod::Xli => {
            let leads = codec.decode(&raw, labels)?;
            if leads.len() != labels.len() {
                return Err(SierraError::LeadCountMismatch {
                    expected: labels.len(),
                    actual: leads.len(),
                });
            }
            for (label, samples) in labels.iter().zip(&leads) {
                if samples.len() != sample_count {
                    return Err(SierraError::LeadLength {
                        label: label.clone(),
                        expected: sample_count,
                        actual: samples.len(),
                    });
                }
            }
            Ok(leads)
        }
    }
}
