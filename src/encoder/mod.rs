//! QR code encoding modules
//!
//! This module contains all the logic for turning text into a module grid:
//! - Mode analysis and version selection
//! - Bitstream packing (numeric, alphanumeric, byte, kanji)
//! - Error correction (Reed-Solomon, BCH) and codeword interleaving
//! - Function patterns, data placement and mask selection

/// BCH codes for format and version info
pub mod bch;
/// Bitstream assembly and padding
pub mod bitstream;
/// Encode options and environment knobs
pub mod config;
/// Format information placement (mask pattern, EC level)
pub mod format;
/// Function pattern grid builder (finder/timing/format/alignment/version)
pub mod function_mask;
/// Block splitting and codeword interleaving
pub mod interleave;
/// Mask application and penalty-based selection
pub mod mask;
/// Single-mode analysis of the input text
pub mod mode;
/// Data mode encoders (numeric, alphanumeric, byte, kanji)
pub mod modes;
/// Mask penalty rules
pub mod penalty;
/// Zig-zag data placement
pub mod placement;
/// Main QR encoder that orchestrates the encoding pipeline
pub mod qr_encoder;
/// Reed-Solomon error correction codewords
pub mod reed_solomon;
/// QR specification tables (ECC codewords/blocks, capacities)
pub mod tables;
/// Version selection and version information (versions 7-40)
pub mod version;
