//! Byte mode encoder (Mode 0100)
//! One 8-bit value per character; characters above U+00FF are not representable

use crate::encoder::bitstream::BitSequence;
use crate::error::{QrError, Result};
use crate::models::EncodingMode;

/// Byte mode packer
pub struct ByteEncoder;

impl ByteEncoder {
    /// Code points up to U+00FF
    pub fn is_encodable(c: char) -> bool {
        (c as u32) <= 0xFF
    }

    /// Append one byte per character
    pub fn encode(text: &str, bits: &mut BitSequence) -> Result<()> {
        for c in text.chars() {
            let byte = u8::try_from(c as u32).map_err(|_| QrError::UnencodableCharacter {
                character: c,
                mode: EncodingMode::Byte,
            })?;
            bits.push_byte(byte);
        }
        Ok(())
    }
}
