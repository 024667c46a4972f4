use std::fmt;

use super::Matrix;
use crate::error::{QrError, Result};

/// QR code version (1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest symbol (21x21)
    pub const MIN: Version = Version(1);
    /// Largest symbol (177x177)
    pub const MAX: Version = Version(40);

    /// Create a version, rejecting numbers outside 1-40
    pub fn new(number: u8) -> Result<Self> {
        if (1..=40).contains(&number) {
            Ok(Self(number))
        } else {
            Err(QrError::InvalidVersion(number))
        }
    }

    /// Get the version number (1-40)
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Versions 7 and up carry an 18-bit version information block
    pub fn has_version_info(&self) -> bool {
        self.0 >= 7
    }

    /// Iterate this version and every larger one up to 40
    pub(crate) fn upward(self) -> impl Iterator<Item = Version> {
        (self.0..=40).map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    M = 1,
    /// Quartile (~25% recovery capacity)
    #[default]
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// All levels, weakest first
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// The 2-bit code stored in the format information (L=01, M=00, Q=11, H=10)
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Inverse of [`ECLevel::format_bits`]
    pub fn from_format_bits(bits: u8) -> Option<Self> {
        match bits & 0x03 {
            0b01 => Some(ECLevel::L),
            0b00 => Some(ECLevel::M),
            0b11 => Some(ECLevel::Q),
            0b10 => Some(ECLevel::H),
            _ => None,
        }
    }

    /// Row index into the per-level tables
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl TryFrom<char> for ECLevel {
    type Error = QrError;

    fn try_from(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'L' => Ok(ECLevel::L),
            'M' => Ok(ECLevel::M),
            'Q' => Ok(ECLevel::Q),
            'H' => Ok(ECLevel::H),
            _ => Err(QrError::InvalidEcLevel(c)),
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            ECLevel::L => 'L',
            ECLevel::M => 'M',
            ECLevel::Q => 'Q',
            ECLevel::H => 'H',
        };
        write!(f, "{c}")
    }
}

/// Mask pattern (0-7), predicates over x = column, y = row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaskPattern {
    /// (x + y) % 2 == 0
    Pattern0 = 0,
    /// y % 2 == 0
    Pattern1 = 1,
    /// x % 3 == 0
    Pattern2 = 2,
    /// (x + y) % 3 == 0
    Pattern3 = 3,
    /// (x/3 + y/2) % 2 == 0
    Pattern4 = 4,
    /// (x*y)%2 + (x*y)%3 == 0
    Pattern5 = 5,
    /// ((x*y)%2 + (x*y)%3) % 2 == 0
    Pattern6 = 6,
    /// ((x+y)%2 + (x*y)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All patterns in id order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from its 3-bit id
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.get(bits as usize).copied()
    }

    /// The 3-bit id written into the format information
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Check if the data module at column `x`, row `y` gets inverted
    pub fn is_masked(&self, x: usize, y: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (x + y) % 2 == 0,
            MaskPattern::Pattern1 => y % 2 == 0,
            MaskPattern::Pattern2 => x % 3 == 0,
            MaskPattern::Pattern3 => (x + y) % 3 == 0,
            MaskPattern::Pattern4 => (x / 3 + y / 2) % 2 == 0,
            MaskPattern::Pattern5 => (x * y) % 2 + (x * y) % 3 == 0,
            MaskPattern::Pattern6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
            MaskPattern::Pattern7 => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
        }
    }
}

impl TryFrom<u8> for MaskPattern {
    type Error = QrError;

    fn try_from(id: u8) -> Result<Self> {
        Self::from_bits(id).ok_or(QrError::InvalidMask(id))
    }
}

/// Data encoding mode, ordered by escalation (Numeric < Alphanumeric < Byte < Kanji)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EncodingMode {
    /// Digits only, 10 bits per 3 digits
    Numeric,
    /// 45-symbol set, 11 bits per pair
    Alphanumeric,
    /// One byte per character (code points up to 0xFF)
    Byte,
    /// Shift-JIS double-byte characters, 13 bits each
    Kanji,
}

impl EncodingMode {
    /// Modes in escalation order
    pub const ALL: [EncodingMode; 4] = [
        EncodingMode::Numeric,
        EncodingMode::Alphanumeric,
        EncodingMode::Byte,
        EncodingMode::Kanji,
    ];

    /// 4-bit mode indicator
    pub fn indicator(&self) -> u8 {
        match self {
            EncodingMode::Numeric => 0b0001,
            EncodingMode::Alphanumeric => 0b0010,
            EncodingMode::Byte => 0b0100,
            EncodingMode::Kanji => 0b1000,
        }
    }

    /// Width of the character count indicator for a version
    pub fn char_count_bits(&self, version: Version) -> u8 {
        let range = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        let widths: [u8; 3] = match self {
            EncodingMode::Numeric => [10, 12, 14],
            EncodingMode::Alphanumeric => [9, 11, 13],
            EncodingMode::Byte => [8, 16, 16],
            EncodingMode::Kanji => [8, 10, 12],
        };
        widths[range]
    }

    /// Next broader mode, `None` after Kanji
    pub fn escalate(&self) -> Option<Self> {
        match self {
            EncodingMode::Numeric => Some(EncodingMode::Alphanumeric),
            EncodingMode::Alphanumeric => Some(EncodingMode::Byte),
            EncodingMode::Byte => Some(EncodingMode::Kanji),
            EncodingMode::Kanji => None,
        }
    }

    /// Column index into the capacity table
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncodingMode::Numeric => "numeric",
            EncodingMode::Alphanumeric => "alphanumeric",
            EncodingMode::Byte => "byte",
            EncodingMode::Kanji => "kanji",
        };
        f.write_str(name)
    }
}

/// Encoded QR code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QRCode {
    /// Finished module grid
    pub matrix: Matrix,
    /// Source text
    pub content: String,
    /// QR code version
    pub version: Version,
    /// Error correction level
    pub error_correction: ECLevel,
    /// Mask pattern applied to the data modules
    pub mask_pattern: MaskPattern,
    /// Mode the whole text was encoded in
    pub mode: EncodingMode,
}

impl QRCode {
    /// Side length in modules
    pub fn size(&self) -> usize {
        self.matrix.width()
    }
}
