//! Bitstream assembly: mode indicator, count indicator, payload, terminator, padding
use log::trace;

use crate::encoder::modes::{
    alphanumeric::AlphanumericEncoder, byte::ByteEncoder, kanji::KanjiEncoder,
    numeric::NumericEncoder,
};
use crate::encoder::tables::VersionSpec;
use crate::error::{QrError, Result};
use crate::models::EncodingMode;

const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Append-only MSB-first bit buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSequence {
    bits: Vec<bool>,
}

impl BitSequence {
    /// Empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty sequence with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn push_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32);
        debug_assert!(count == 32 || value >> count == 0);
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 != 0);
        }
    }

    /// Append one bit
    pub fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append a whole byte
    pub fn push_byte(&mut self, byte: u8) {
        self.push_bits(byte as u32, 8);
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when no bits were pushed
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits in push order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Consume the sequence and yield its codewords
    pub fn finish(self) -> Vec<u8> {
        self.to_codewords()
    }

    /// Pack into codewords; a partial trailing byte is zero-filled
    pub fn to_codewords(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |byte, (i, &bit)| byte | (u8::from(bit) << (7 - i)))
            })
            .collect()
    }
}

/// Produces the padded data codewords for one version/EC row
pub struct BitstreamEncoder;

impl BitstreamEncoder {
    /// Encode `text` in `mode` and pad to the exact data capacity of `spec`
    pub fn encode(text: &str, mode: EncodingMode, spec: &VersionSpec) -> Result<Vec<u8>> {
        let capacity = spec.data_bits();
        let mut bits = BitSequence::with_capacity(capacity);
        let count = text.chars().count();

        bits.push_bits(mode.indicator() as u32, 4);
        bits.push_bits(count as u32, mode.char_count_bits(spec.version));

        match mode {
            EncodingMode::Numeric => NumericEncoder::encode(text, &mut bits)?,
            EncodingMode::Alphanumeric => AlphanumericEncoder::encode(text, &mut bits)?,
            EncodingMode::Byte => ByteEncoder::encode(text, &mut bits)?,
            EncodingMode::Kanji => KanjiEncoder::encode(text, &mut bits)?,
        }

        if bits.len() > capacity {
            return Err(QrError::EncodingOverflow {
                expected: capacity,
                actual: bits.len(),
            });
        }
        let payload_bits = bits.len();

        // Terminator, cut short when capacity is reached
        let terminator = (capacity - bits.len()).min(4);
        bits.push_bits(0, terminator as u8);

        let alignment = (8 - bits.len() % 8) % 8;
        bits.push_bits(0, alignment as u8);

        for &pad in PAD_BYTES.iter().cycle() {
            if bits.len() >= capacity {
                break;
            }
            bits.push_byte(pad);
        }
        debug_assert_eq!(bits.len(), capacity);

        trace!(
            "bitstream: {} payload bits, {} after padding (v{} {})",
            payload_bits,
            bits.len(),
            spec.version,
            spec.ec_level
        );

        Ok(bits.finish())
    }
}
