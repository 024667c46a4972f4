//! QR code data mode encoders
//!
//! This module contains payload encoders for the four QR data modes:
//! - Numeric: Efficient encoding for digits (0-9)
//! - Alphanumeric: Upper-case letters, digits, and nine symbols
//! - Byte: 8-bit data (Latin-1 code points)
//! - Kanji: Shift-JIS double-byte characters

/// Alphanumeric mode (45-symbol set)
pub mod alphanumeric;
/// Byte mode
pub mod byte;
/// Kanji mode
pub mod kanji;
/// Numeric mode
pub mod numeric;
