//! Data placement into the QR code matrix following the zigzag pattern

use crate::encoder::bitstream::BitSequence;
use crate::encoder::function_mask::ModuleGrid;
use crate::error::{QrError, Result};
use crate::models::ModuleType;

/// Fills every free cell of a grid with codeword bits
pub struct DataPlacer;

impl DataPlacer {
    /// Free cells in placement order: two-column strips from the right edge,
    /// alternating upward and downward, skipping the vertical timing column
    pub fn order(grid: &ModuleGrid) -> Vec<(usize, usize)> {
        let size = grid.size();
        let mut cells = Vec::with_capacity(grid.data_modules_count());
        let mut right = size as isize - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            let upward = ((right + 1) & 2) == 0;
            for vert in 0..size {
                let y = if upward { size - 1 - vert } else { vert };
                for j in 0..2 {
                    let x = (right - j) as usize;
                    if !grid.is_function(x, y) {
                        cells.push((x, y));
                    }
                }
            }
            right -= 2;
        }
        cells
    }

    /// Place `bits` into the free cells; the count must match exactly
    pub fn place(grid: &mut ModuleGrid, bits: &BitSequence) -> Result<()> {
        let cells = Self::order(grid);
        if bits.len() < cells.len() {
            return Err(QrError::EncodingUnderflow {
                expected: cells.len(),
                actual: bits.len(),
            });
        }
        if bits.len() > cells.len() {
            return Err(QrError::EncodingOverflow {
                expected: cells.len(),
                actual: bits.len(),
            });
        }
        for ((x, y), bit) in cells.into_iter().zip(bits.iter()) {
            grid.set(x, y, ModuleType::Data, bit);
        }
        Ok(())
    }
}
