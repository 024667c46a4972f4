//! Mode analysis: pick the single narrowest mode that covers the whole text
use crate::encoder::modes::{
    alphanumeric::AlphanumericEncoder, byte::ByteEncoder, kanji::KanjiEncoder,
    numeric::NumericEncoder,
};
use crate::error::{QrError, Result};
use crate::models::EncodingMode;

/// Whether `mode` can carry character `c`
pub fn accepts(mode: EncodingMode, c: char) -> bool {
    match mode {
        EncodingMode::Numeric => NumericEncoder::is_encodable(c),
        EncodingMode::Alphanumeric => AlphanumericEncoder::is_encodable(c),
        EncodingMode::Byte => ByteEncoder::is_encodable(c),
        EncodingMode::Kanji => KanjiEncoder::is_encodable(c),
    }
}

/// Escalate through the modes character by character.
///
/// A character that fails the current mode moves the analysis to the next
/// broader mode and is re-tested there; earlier characters are not
/// revisited. The result is the broadest mode any character needed.
pub fn analyze(text: &str) -> Result<EncodingMode> {
    let mut mode = EncodingMode::Numeric;
    for (position, c) in text.chars().enumerate() {
        while !accepts(mode, c) {
            mode = mode
                .escalate()
                .ok_or(QrError::NoViableMode { character: c, position })?;
        }
    }
    Ok(mode)
}

/// Validate an explicit mode against the analyzed one, or fall back to it
pub fn resolve(text: &str, requested: Option<EncodingMode>) -> Result<EncodingMode> {
    let required = analyze(text)?;
    match requested {
        Some(requested) if requested < required => {
            Err(QrError::ModeMismatch { requested, required })
        }
        Some(requested) => Ok(requested),
        None => Ok(required),
    }
}
