//! Philips XLI waveform compression
//!
//! An XLI payload is a run of chunks, one per lead:
//!
//! ```text
//! +----------------+---------+---------------+---------------------+
//! | size: i32 (LE) | 2 bytes | start: i16 LE | size bytes of LZW   |
//! +----------------+---------+---------------+---------------------+
//! ```
//!
//! Each chunk LZW-decompresses (10-bit codes) to a byte buffer whose first
//! half holds the high bytes and second half the low bytes of 16-bit
//! deltas. The deltas are then integrated as second differences, seeded by
//! the chunk's start value. All sample arithmetic wraps at 16 bits.

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use super::{CodecError, LzwDecoder, WaveformCodec};

/// Code width used by XLI's LZW stage
pub const XLI_CODE_BITS: u32 = 10;

const CHUNK_HEADER_LEN: usize = 8;
const DELTA_BIAS: i16 = 64;

/// Decoder for XLI-compressed `parsedwaveforms` payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct XliCodec;

impl XliCodec {
    /// Create a new XLI codec
    pub fn new() -> Self {
        Self
    }

    /// Decode every chunk of `data`, one lead per chunk
    pub fn decode_chunks(data: &[u8]) -> Result<Vec<Vec<i16>>, CodecError> {
        let mut leads = Vec::new();
        let mut offset = 0;

        while offset < data.len() {
            let header = data
                .get(offset..offset + CHUNK_HEADER_LEN)
                .ok_or(CodecError::TruncatedHeader(offset))?;
            let declared = LittleEndian::read_i32(&header[0..4]);
            let start = LittleEndian::read_i16(&header[6..8]);
            offset += CHUNK_HEADER_LEN;

            let available = data.len() - offset;
            let size = usize::try_from(declared)
                .ok()
                .filter(|&size| size <= available)
                .ok_or(CodecError::TruncatedChunk {
                    offset,
                    declared: i64::from(declared),
                    available,
                })?;
            let chunk = &data[offset..offset + size];
            offset += size;

            let mut bytes = LzwDecoder::new(chunk, XLI_CODE_BITS).decode()?;
            if bytes.len() % 2 == 1 {
                bytes.push(0);
            }
            leads.push(decode_deltas(unpack(&bytes), start));
        }

        Ok(leads)
    }
}

impl WaveformCodec for XliCodec {
    fn decode(&self, data: &[u8], labels: &[String]) -> Result<Vec<Vec<i16>>, CodecError> {
        let leads = Self::decode_chunks(data)?;
        debug!(
            "XLI decoded {} chunks for {} labels",
            leads.len(),
            labels.len()
        );
        Ok(leads)
    }
}

/// Join the high-byte half and low-byte half of `buffer` into `i16` values
fn unpack(buffer: &[u8]) -> Vec<i16> {
    let (high, low) = buffer.split_at(buffer.len() / 2);
    high.iter()
        .zip(low)
        .map(|(&hi, &lo)| i16::from_be_bytes([hi, lo]))
        .collect()
}

/// Integrate second-difference deltas in place; the first two values are
/// kept as-is.
fn decode_deltas(mut deltas: Vec<i16>, first: i16) -> Vec<i16> {
    if deltas.len() < 2 {
        return deltas;
    }

    let mut x = deltas[0];
    let mut y = deltas[1];
    let mut last = first;
    for delta in deltas.iter_mut().skip(2) {
        let z = y.wrapping_add(y).wrapping_sub(x).wrapping_sub(last);
        last = delta.wrapping_sub(DELTA_BIAS);
        *delta = z;
        x = y;
        y = z;
    }
    deltas
}
