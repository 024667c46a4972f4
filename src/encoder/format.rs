//! Format information placement for QR code

use std::sync::OnceLock;

use crate::encoder::bch::BchEncoder;
use crate::models::{ECLevel, MaskPattern, Matrix, Module, ModuleType};

/// Format info is 15 bits (5 data + 10 ECC), masked with 0x5412
/// Both copies sit next to the finder patterns
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Mask applied to the data modules
    pub mask_pattern: MaskPattern,
}

/// Indexed by the 5 data bits (EC bits << 3 | mask id)
static FORMAT_CODEWORDS: OnceLock<[u16; 32]> = OnceLock::new();

impl FormatInfo {
    /// Format info for a level and mask
    pub fn new(ec_level: ECLevel, mask_pattern: MaskPattern) -> Self {
        Self {
            ec_level,
            mask_pattern,
        }
    }

    /// 5 data bits: EC level bits then mask id
    pub fn data_bits(&self) -> u8 {
        (self.ec_level.format_bits() << 3) | self.mask_pattern.id()
    }

    /// Masked 15-bit codeword, bit 14 first
    pub fn codeword(&self) -> u16 {
        let table = FORMAT_CODEWORDS.get_or_init(|| {
            let mut table = [0u16; 32];
            for (data, slot) in table.iter_mut().enumerate() {
                *slot = BchEncoder::encode_format(data as u8);
            }
            table
        });
        table[self.data_bits() as usize]
    }

    /// Cells for bit `i` (LSB first) of both copies
    pub fn positions(size: usize, i: usize) -> [(usize, usize); 2] {
        let around_finder = match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        };
        let split = if i < 8 {
            (size - 1 - i, 8)
        } else {
            (8, size - 15 + i)
        };
        [around_finder, split]
    }

    /// Write both copies of the codeword into the reserved cells
    pub fn write(&self, matrix: &mut Matrix) {
        let bits = self.codeword();
        let size = matrix.width();
        for i in 0..15 {
            let dark = (bits >> i) & 1 != 0;
            for (x, y) in Self::positions(size, i) {
                matrix.set(x, y, Module::new(ModuleType::Format, dark));
            }
        }
    }

    /// Read the top-left copy back out of a matrix
    pub fn read(matrix: &Matrix) -> Option<Self> {
        let size = matrix.width();
        let bits = (0..15).fold(0u16, |acc, i| {
            let (x, y) = Self::positions(size, i)[0];
            acc | (u16::from(matrix.is_dark(x, y)) << i)
        });
        if !BchEncoder::check_format(bits) {
            return None;
        }
        let data = ((bits ^ 0x5412) >> 10) as u8;
        Some(Self {
            ec_level: ECLevel::from_format_bits(data >> 3)?,
            mask_pattern: MaskPattern::from_bits(data & 0x07)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_codewords() {
        let info = FormatInfo::new(ECLevel::M, MaskPattern::Pattern7);
        assert_eq!(info.data_bits(), 0b00111);
        assert_eq!(info.codeword(), 0x4AA0);
        assert_eq!(
            FormatInfo::new(ECLevel::L, MaskPattern::Pattern0).codeword(),
            0x77C4
        );
    }

    #[test]
    fn test_positions_avoid_timing_and_cover_reservation() {
        let size = 21;
        let mut seen = std::collections::HashSet::new();
        for i in 0..15 {
            for cell in FormatInfo::positions(size, i) {
                assert!(seen.insert(cell), "duplicate cell {cell:?}");
                assert_ne!(cell.0, 6);
                assert_ne!(cell.1, 6);
            }
        }
        assert_eq!(seen.len(), 30);
        // Dark module is not part of format info
        assert!(!seen.contains(&(8, size - 8)));
        assert_eq!(FormatInfo::positions(size, 0), [(8, 0), (20, 8)]);
        assert_eq!(FormatInfo::positions(size, 14), [(0, 8), (8, 20)]);
    }
}
