//! qr_encoder - QR code symbol encoding in pure Rust
//!
//! Turns text into a standards-compliant QR Code (Model 2, versions 1-40):
//! mode analysis, version selection, bitstream packing, Reed-Solomon error
//! correction, module placement and penalty-based mask selection.
//!
//! ```
//! let code = qr_encoder::encode("HELLO WORLD").unwrap();
//! assert_eq!(code.size(), 21);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code encoding modules (mode analysis, error correction, placement, masking)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QRCode, Matrix, Module, Version, etc.)
pub mod models;
/// Output collaborators (Writer trait, PNG writer)
pub mod writer;

pub use encoder::config::EncodeOptions;
pub use encoder::penalty::PenaltyScore;
pub use error::{QrError, Result};
pub use models::{
    BitMatrix, Direction, ECLevel, EncodingMode, MaskPattern, Matrix, Module, ModuleType, QRCode,
    Version,
};
pub use writer::{ImageWriter, Writer, WriterError};

use encoder::qr_encoder::QrEncoder;

/// Encode text with default options (automatic mode, EC level Q)
///
/// # Errors
/// Returns [`QrError`] when the text has no viable mode or does not fit in
/// version 40.
pub fn encode(text: &str) -> Result<QRCode> {
    QrEncoder::encode(text, &EncodeOptions::default())
}

/// Encode text with explicit options
pub fn encode_with(text: &str, options: &EncodeOptions) -> Result<QRCode> {
    QrEncoder::encode(text, options)
}

/// Reusable encoder holding a set of options
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    /// Encoder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder with the given options
    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Options used for every call
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encode one text
    pub fn encode(&self, text: &str) -> Result<QRCode> {
        QrEncoder::encode(text, &self.options)
    }

    /// Encode one text and hand the finished matrix to `writer`
    ///
    /// The writer only sees complete symbols; if encoding fails nothing is
    /// written.
    pub fn encode_to<W: Writer>(
        &self,
        text: &str,
        writer: &mut W,
    ) -> std::result::Result<QRCode, EncodeToError> {
        let code = self.encode(text)?;
        writer.write(&code.matrix)?;
        Ok(code)
    }
}

/// Failure of [`Encoder::encode_to`]: either stage can fail
#[derive(Debug, thiserror::Error)]
pub enum EncodeToError {
    /// Encoding failed, the writer was not called
    #[error(transparent)]
    Encode(#[from] QrError),
    /// The writer rejected the finished symbol
    #[error(transparent)]
    Write(#[from] WriterError),
}
