//! Fixed-width LZW decompression
//!
//! Codes are packed most-significant-bit first. The dictionary starts with
//! the 256 single-byte strings and grows until it reaches `(1 << bits) - 2`;
//! after that, codes keep resolving against the frozen dictionary.

use super::CodecError;

const FIRST_FREE_CODE: usize = 256;

/// Streaming LZW decoder over a borrowed byte buffer
pub struct LzwDecoder<'a> {
    input: &'a [u8],
    bits: u32,
    max_code: usize,
    offset: usize,
    bit_count: u32,
    bit_buffer: u32,
    previous: Vec<u8>,
    dictionary: Vec<Vec<u8>>,
}

impl<'a> LzwDecoder<'a> {
    /// Create a decoder for `bits`-wide codes (at most 16)
    pub fn new(input: &'a [u8], bits: u32) -> Self {
        let mut dictionary = Vec::with_capacity(1 << bits);
        dictionary.extend((0..=u8::MAX).map(|byte| vec![byte]));

        Self {
            input,
            bits,
            max_code: (1usize << bits) - 2,
            offset: 0,
            bit_count: 0,
            bit_buffer: 0,
            previous: Vec::new(),
            dictionary,
        }
    }

    /// Decode the whole input
    pub fn decode(mut self) -> Result<Vec<u8>, CodecError> {
        let mut output = Vec::with_capacity(self.input.len() * 2);
        while let Some(code) = self.read_code_point() {
            let data = self.resolve(code)?;
            output.extend_from_slice(&data);
        }
        Ok(output)
    }

    fn resolve(&mut self, code: u16) -> Result<Vec<u8>, CodecError> {
        let index = usize::from(code);
        let data = match self.dictionary.get(index) {
            Some(entry) => entry.clone(),
            None => {
                let Some(&first) = self.previous.first() else {
                    return Err(CodecError::InvalidCode {
                        code,
                        next_code: self.next_code(),
                    });
                };
                let mut entry = self.previous.clone();
                entry.push(first);
                entry
            }
        };

        if !self.previous.is_empty() && self.next_code() <= self.max_code {
            let mut entry = std::mem::take(&mut self.previous);
            entry.push(data[0]);
            self.dictionary.push(entry);
        }

        self.previous = data.clone();
        Ok(data)
    }

    fn next_code(&self) -> usize {
        self.dictionary.len().max(FIRST_FREE_CODE)
    }

    fn read_code_point(&mut self) -> Option<u16> {
        while self.bit_count <= 24 {
            if let Some(&byte) = self.input.get(self.offset) {
                self.offset += 1;
                self.bit_buffer |= u32::from(byte) << (24 - self.bit_count);
                self.bit_count += 8;
            } else if self.bit_count < self.bits {
                return None;
            } else {
                break;
            }
        }

        let code = (self.bit_buffer >> (32 - self.bits)) as u16;
        self.bit_buffer <<= self.bits;
        self.bit_count -= self.bits;
        Some(code)
    }
}
