//! Error types for the encoding pipeline

use thiserror::Error;

use crate::models::{ECLevel, EncodingMode};

/// Everything that can stop an encode
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QrError {
    /// An explicitly requested mode cannot represent the text
    #[error("mode {requested} cannot represent the input, it needs at least {required}")]
    ModeMismatch {
        /// Mode the caller asked for
        requested: EncodingMode,
        /// Narrowest mode that covers every character
        required: EncodingMode,
    },

    /// A character is outside every encoding mode
    #[error("character {character:?} at position {position} has no viable encoding mode")]
    NoViableMode {
        /// The offending character
        character: char,
        /// Its index in characters, not bytes
        position: usize,
    },

    /// A character passed mode escalation but cannot be packed in the final mode
    #[error("character {character:?} cannot be encoded in {mode} mode")]
    UnencodableCharacter {
        /// The offending character
        character: char,
        /// Mode the text resolved to
        mode: EncodingMode,
    },

    /// The data does not fit even in version 40
    #[error("{length} characters in {mode} mode exceed the capacity of version 40 at level {ec_level}")]
    VersionNotFound {
        /// Input length in characters
        length: usize,
        /// Mode the length was counted in
        mode: EncodingMode,
        /// Requested error correction level
        ec_level: ECLevel,
    },

    /// A version number outside 1-40
    #[error("invalid version {0}, expected 1-40")]
    InvalidVersion(u8),

    /// A mask id outside 0-7
    #[error("invalid mask pattern {0}, expected 0-7")]
    InvalidMask(u8),

    /// An EC level letter other than L, M, Q or H
    #[error("invalid error correction level {0:?}, expected one of L, M, Q, H")]
    InvalidEcLevel(char),

    /// Fewer bits than free modules; indicates a table defect
    #[error("codeword stream underflow: {actual} bits for {expected} data modules")]
    EncodingUnderflow {
        /// Free data modules in the symbol
        expected: usize,
        /// Bits produced
        actual: usize,
    },

    /// More bits than free modules; indicates a table defect
    #[error("codeword stream overflow: {actual} bits for {expected} data modules")]
    EncodingOverflow {
        /// Free data modules in the symbol
        expected: usize,
        /// Bits produced
        actual: usize,
    },

    /// A read outside the square grid
    #[error("coordinate ({x}, {y}) outside {size}x{size} matrix")]
    MatrixBounds {
        /// Requested column
        x: usize,
        /// Requested row
        y: usize,
        /// Side length of the grid
        size: usize,
    },
}

impl QrError {
    /// Whether the error was caused by the caller's input or options
    /// rather than by an internal invariant violation
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            QrError::EncodingUnderflow { .. }
                | QrError::EncodingOverflow { .. }
                | QrError::MatrixBounds { .. }
        )
    }
}

/// Result alias used throughout the encoder
pub type Result<T> = std::result::Result<T, QrError>;
