use crate::models::{Matrix, Module, ModuleType, Version};

/// Partially built symbol for a specific QR version.
/// `Some` = function module already placed, `None` = still free for data.
pub struct ModuleGrid {
    cells: Vec<Option<Module>>,
    size: usize,
    version: Version,
}

impl ModuleGrid {
    /// Grid with every function pattern in place. Format and version
    /// areas are reserved as light modules.
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut grid = Self {
            cells: vec![None; size * size],
            size,
            version,
        };

        // Finder patterns + separators (up to 9x9 areas, clipped to bounds)
        grid.place_finder(0, 0);
        grid.place_finder(size - 7, 0);
        grid.place_finder(0, size - 7);

        grid.place_timing();
        grid.place_alignment();
        grid.reserve_format();
        grid.set(8, size - 8, ModuleType::Dark, true);
        if version.has_version_info() {
            grid.reserve_version();
        }
        grid
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Version the grid was laid out for
    pub fn version(&self) -> Version {
        self.version
    }

    /// Placed module at column `x`, row `y`; `None` for free cells
    pub fn get(&self, x: usize, y: usize) -> Option<Module> {
        self.cells[y * self.size + x]
    }

    /// Whether the cell is already taken
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some()
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, kind: ModuleType, dark: bool) {
        self.cells[y * self.size + x] = Some(Module::new(kind, dark));
    }

    /// Cells still free for codeword bits
    pub fn data_modules_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Finish the grid. Cells never written stay light data modules.
    pub fn into_matrix(self) -> Matrix {
        let modules = self
            .cells
            .into_iter()
            .map(|cell| cell.unwrap_or(Module::new(ModuleType::Data, false)))
            .collect();
        Matrix::from_modules(self.size, modules)
    }

    /// 7x7 finder at top-left corner (x, y) with its light separator ring
    fn place_finder(&mut self, x: usize, y: usize) {
        for dy in -1i32..=7 {
            for dx in -1i32..=7 {
                let (Some(xx), Some(yy)) = (
                    x.checked_add_signed(dx as isize),
                    y.checked_add_signed(dy as isize),
                ) else {
                    continue;
                };
                if xx >= self.size || yy >= self.size {
                    continue;
                }
                if (0..7).contains(&dx) && (0..7).contains(&dy) {
                    let ring = (dx - 3).abs().max((dy - 3).abs());
                    self.set(xx, yy, ModuleType::Finder, ring != 2 && ring != 4);
                } else {
                    self.set(xx, yy, ModuleType::Separator, false);
                }
            }
        }
    }

    /// Timing patterns (row 6 and column 6) between the separators
    fn place_timing(&mut self) {
        for i in 8..self.size - 8 {
            let dark = i % 2 == 0;
            self.set(i, 6, ModuleType::Timing, dark);
            self.set(6, i, ModuleType::Timing, dark);
        }
    }

    fn place_alignment(&mut self) {
        let size = self.size;
        let align = alignment_pattern_positions(self.version.number());
        for &cx in &align {
            for &cy in &align {
                // Skip the three finder corners
                let in_tl = cx <= 8 && cy <= 8;
                let in_tr = cx >= size - 9 && cy <= 8;
                let in_bl = cx <= 8 && cy >= size - 9;
                if in_tl || in_tr || in_bl {
                    continue;
                }
                // 5x5 alignment pattern, dark ring around a light ring
                for dy in -2i32..=2 {
                    for dx in -2i32..=2 {
                        let x = (cx as i32 + dx) as usize;
                        let y = (cy as i32 + dy) as usize;
                        let ring = dx.abs().max(dy.abs());
                        self.set(x, y, ModuleType::Alignment, ring != 1);
                    }
                }
            }
        }
    }

    fn reserve_format(&mut self) {
        let size = self.size;
        for i in 0..9 {
            if i != 6 {
                self.set(8, i, ModuleType::Format, false);
                self.set(i, 8, ModuleType::Format, false);
            }
        }
        for i in 0..8 {
            self.set(size - 1 - i, 8, ModuleType::Format, false);
            self.set(8, size - 1 - i, ModuleType::Format, false);
        }
    }

    fn reserve_version(&mut self) {
        let size = self.size;
        for dy in 0..6 {
            for dx in 0..3 {
                self.set(size - 11 + dx, dy, ModuleType::Version, false);
                self.set(dy, size - 11 + dx, ModuleType::Version, false);
            }
        }
    }
}

/// Alignment pattern centers for a given version (ISO/IEC 18004 Annex E).
///
/// The last center sits 7 modules in from the far edge and the rest are
/// spaced by an even step, leaving any slack in the gap next to 6.
pub fn alignment_pattern_positions(version: u8) -> Vec<usize> {
    if version == 1 {
        return Vec::new();
    }
    let v = version as usize;
    let num_align = v / 7 + 2;
    let size = 17 + 4 * v;
    let step = (8 * v + 3 * num_align + 5) / (4 * num_align - 4) * 2;

    let mut positions = vec![6usize; num_align];
    for (i, pos) in positions.iter_mut().skip(1).rev().enumerate() {
        *pos = size - 7 - i * step;
    }
    positions
}
