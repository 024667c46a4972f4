//! Alphanumeric mode encoder (Mode 0010)
//! Alphanumeric character set: 0-9, A-Z, space, $%*+-./:

use crate::encoder::bitstream::BitSequence;
use crate::error::{QrError, Result};
use crate::models::EncodingMode;

const ALPHANUMERIC_TABLE: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Position of `c` in the 45-symbol table
    pub fn value_of(c: char) -> Option<u32> {
        ALPHANUMERIC_TABLE
            .iter()
            .position(|&t| t == c)
            .map(|p| p as u32)
    }

    /// Whether `c` is one of the 45 symbols
    pub fn is_encodable(c: char) -> bool {
        Self::value_of(c).is_some()
    }

    /// Pack pairs into 11 bits, a trailing single into 6
    pub fn encode(text: &str, bits: &mut BitSequence) -> Result<()> {
        let values = text
            .chars()
            .map(|c| {
                Self::value_of(c).ok_or(QrError::UnencodableCharacter {
                    character: c,
                    mode: EncodingMode::Alphanumeric,
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        for pair in values.chunks(2) {
            match *pair {
                [first, second] => bits.push_bits(first * 45 + second, 11),
                [single] => bits.push_bits(single, 6),
                _ => {}
            }
        }
        Ok(())
    }
}
