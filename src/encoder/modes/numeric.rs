//! Numeric mode encoder (Mode 0001)
//! Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits

use crate::encoder::bitstream::BitSequence;
use crate::error::{QrError, Result};
use crate::models::EncodingMode;

/// Numeric mode packer
pub struct NumericEncoder;

impl NumericEncoder {
    /// ASCII digits only
    pub fn is_encodable(c: char) -> bool {
        c.is_ascii_digit()
    }

    /// Append the numeric payload for `text`
    pub fn encode(text: &str, bits: &mut BitSequence) -> Result<()> {
        let digits = text
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .filter(|_| Self::is_encodable(c))
                    .ok_or(QrError::UnencodableCharacter {
                        character: c,
                        mode: EncodingMode::Numeric,
                    })
            })
            .collect::<Result<Vec<u32>>>()?;

        for group in digits.chunks(3) {
            let value = group.iter().fold(0, |acc, &d| acc * 10 + d);
            let width = match group.len() {
                3 => 10,
                2 => 7,
                _ => 4,
            };
            bits.push_bits(value, width);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(text: &str) -> String {
        let mut bits = BitSequence::new();
        NumericEncoder::encode(text, &mut bits).unwrap();
        bits.iter().map(|b| if b { '1' } else { '0' }).collect()
    }

    #[test]
    fn test_numeric_groups() {
        // 012 -> 0000001100, 345 -> 0101011001, 67 -> 1000011
        assert_eq!(encode("01234567"), "000000110001010110011000011");
        assert_eq!(encode("8"), "1000");
        assert_eq!(encode("99"), "1100011");
        assert_eq!(encode("999"), "1111100111");
    }

    #[test]
    fn test_numeric_rejects_letters() {
        let mut bits = BitSequence::new();
        let err = NumericEncoder::encode("12a", &mut bits).unwrap_err();
        assert_eq!(
            err,
            QrError::UnencodableCharacter {
                character: 'a',
                mode: EncodingMode::Numeric
            }
        );
    }

    #[test]
    fn test_numeric_rejects_non_ascii_digits() {
        // Arabic-Indic digit three
        let mut bits = BitSequence::new();
        assert!(NumericEncoder::encode("\u{0663}", &mut bits).is_err());
    }
}
