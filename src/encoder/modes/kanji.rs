//! Kanji mode encoder (Mode 1000)
//! Each Shift-JIS double-byte character is compacted into 13 bits:
//! subtract 0x8140 (or 0xC140), then high byte * 0xC0 + low byte.

use encoding_rs::SHIFT_JIS;

use crate::encoder::bitstream::BitSequence;
use crate::error::{QrError, Result};
use crate::models::EncodingMode;

/// Kanji mode packer
pub struct KanjiEncoder;

impl KanjiEncoder {
    /// Shift-JIS code of `c` if it is a double-byte character in one of the
    /// two ranges QR Kanji mode accepts
    pub fn shift_jis_code(c: char) -> Option<u16> {
        let mut utf8 = [0u8; 4];
        let (bytes, _, had_unmappable) = SHIFT_JIS.encode(c.encode_utf8(&mut utf8));
        if had_unmappable {
            return None;
        }
        let code = match *bytes {
            [high, low] => u16::from_be_bytes([high, low]),
            _ => return None,
        };
        matches!(code, 0x8140..=0x9FFC | 0xE040..=0xEBBF).then_some(code)
    }

    /// Whether `c` has a Kanji-mode Shift-JIS code
    pub fn is_encodable(c: char) -> bool {
        Self::shift_jis_code(c).is_some()
    }

    /// 13-bit value for a Shift-JIS code already known to be in range
    fn compact(code: u16) -> u32 {
        let offset = if code <= 0x9FFC { code - 0x8140 } else { code - 0xC140 };
        (offset >> 8) as u32 * 0xC0 + (offset & 0xFF) as u32
    }

    /// Append 13 bits per character
    pub fn encode(text: &str, bits: &mut BitSequence) -> Result<()> {
        for c in text.chars() {
            let code = Self::shift_jis_code(c).ok_or(QrError::UnencodableCharacter {
                character: c,
                mode: EncodingMode::Kanji,
            })?;
            bits.push_bits(Self::compact(code), 13);
        }
        Ok(())
    }
}
