use crate::error::{QrError, Result};

/// Role of a module in the symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleType {
    /// 7x7 position marker
    Finder,
    /// Light ring around a finder
    Separator,
    /// Alternating strip on row 6 / column 6
    Timing,
    /// 5x5 alignment marker
    Alignment,
    /// Format information (EC level + mask)
    Format,
    /// Version information (v7+)
    Version,
    /// The single always-dark module
    Dark,
    /// Codeword bits (the only modules touched by masking)
    Data,
}

impl ModuleType {
    /// Everything except `Data` is a function module
    pub fn is_function(&self) -> bool {
        !matches!(self, ModuleType::Data)
    }
}

/// One cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Module {
    kind: ModuleType,
    dark: bool,
}

impl Module {
    /// Module of the given role and color
    pub const fn new(kind: ModuleType, dark: bool) -> Self {
        Self { kind, dark }
    }

    /// Role of the module
    pub fn kind(&self) -> ModuleType {
        self.kind
    }

    /// True for dark modules
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub(crate) fn inverted(self) -> Self {
        Self {
            kind: self.kind,
            dark: !self.dark,
        }
    }
}

/// Traversal order for [`Matrix::iterate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left to right, then top to bottom
    RowMajor,
    /// Top to bottom, then left to right
    ColumnMajor,
}

/// Finished QR module grid
///
/// Always square. Only the encoder mutates it; callers read it through
/// [`Matrix::get`], [`Matrix::iterate`] or [`Matrix::bitmap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    size: usize,
    modules: Vec<Module>,
}

impl Matrix {
    pub(crate) fn from_modules(size: usize, modules: Vec<Module>) -> Self {
        debug_assert_eq!(modules.len(), size * size);
        Self { size, modules }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.size
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.size
    }

    /// Get the module at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Result<Module> {
        if x >= self.size || y >= self.size {
            return Err(QrError::MatrixBounds {
                x,
                y,
                size: self.size,
            });
        }
        Ok(self.modules[y * self.size + x])
    }

    /// Dark check that treats everything outside the grid as light (quiet zone)
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.modules[y * self.size + x].dark
    }

    /// Visit every module with its coordinates
    pub fn iterate<F>(&self, direction: Direction, mut visit: F)
    where
        F: FnMut(usize, usize, Module),
    {
        match direction {
            Direction::RowMajor => {
                for (i, &module) in self.modules.iter().enumerate() {
                    visit(i % self.size, i / self.size, module);
                }
            }
            Direction::ColumnMajor => {
                for x in 0..self.size {
                    for y in 0..self.size {
                        visit(x, y, self.modules[y * self.size + x]);
                    }
                }
            }
        }
    }

    /// Packed dark/light view
    pub fn bitmap(&self) -> BitMatrix {
        let mut bitmap = BitMatrix::new(self.size, self.size);
        self.iterate(Direction::RowMajor, |x, y, module| {
            if module.dark {
                bitmap.set(x, y, true);
            }
        });
        bitmap
    }

    /// Rows of plain booleans (`true` = dark)
    pub fn to_bools(&self) -> Vec<Vec<bool>> {
        self.modules
            .chunks(self.size)
            .map(|row| row.iter().map(Module::is_dark).collect())
            .collect()
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| m.dark).count()
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, module: Module) {
        self.modules[y * self.size + x] = module;
    }

    pub(crate) fn modules_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut Module)> {
        let size = self.size;
        self.modules
            .iter_mut()
            .enumerate()
            .map(move |(i, m)| (i % size, i / size, m))
    }
}

/// Compact bit matrix (`true` = dark)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create an all-light bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out of range reads as light
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y); out of range writes are dropped
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        let bit = 1 << (index % 8);
        if value {
            self.data[index / 8] |= bit;
        } else {
            self.data[index / 8] &= !bit;
        }
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Get raw data as bytes (row-major, LSB first)
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
