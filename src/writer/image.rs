use std::path::{Path, PathBuf};

use image::{GrayImage, ImageBuffer, ImageFormat, Luma};
use log::debug;

use super::{Writer, WriterError};
use crate::models::Matrix;

/// Default pixels per module
pub const DEFAULT_SCALE: u32 = 8;
/// Light border width in modules required by ISO/IEC 18004
pub const DEFAULT_QUIET_ZONE: u32 = 4;

const DARK: Luma<u8> = Luma([0u8]);
const LIGHT: Luma<u8> = Luma([255u8]);

/// Rasterize a matrix: `scale` pixels per module, `quiet_zone` light
/// modules on every side
pub fn render(matrix: &Matrix, scale: u32, quiet_zone: u32) -> GrayImage {
    let scale = scale.max(1);
    let modules = matrix.width() as u32 + 2 * quiet_zone;
    let side = modules * scale;
    ImageBuffer::from_fn(side, side, |px, py| {
        let mx = (px / scale).checked_sub(quiet_zone);
        let my = (py / scale).checked_sub(quiet_zone);
        match (mx, my) {
            (Some(x), Some(y)) if matrix.is_dark(x as usize, y as usize) => DARK,
            _ => LIGHT,
        }
    })
}

/// Renders every written matrix to a grayscale image and, when a path is
/// set, saves it there as PNG
#[derive(Debug)]
pub struct ImageWriter {
    path: Option<PathBuf>,
    scale: u32,
    quiet_zone: u32,
    images: Vec<GrayImage>,
    closed: bool,
}

impl ImageWriter {
    /// Save each written symbol to `path` (PNG, overwritten per write)
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            ..Self::in_memory()
        }
    }

    /// Keep rendered images in memory only
    pub fn in_memory() -> Self {
        Self {
            path: None,
            scale: DEFAULT_SCALE,
            quiet_zone: DEFAULT_QUIET_ZONE,
            images: Vec::new(),
            closed: false,
        }
    }

    /// Pixels per module, at least 1
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Light border width in modules
    pub fn with_quiet_zone(mut self, quiet_zone: u32) -> Self {
        self.quiet_zone = quiet_zone;
        self
    }

    /// Images rendered so far, in write order
    pub fn images(&self) -> &[GrayImage] {
        &self.images
    }
}

impl Writer for ImageWriter {
    fn write(&mut self, matrix: &Matrix) -> Result<(), WriterError> {
        if self.closed {
            return Err(WriterError::Closed);
        }
        let img = render(matrix, self.scale, self.quiet_zone);
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            img.save_with_format(path, ImageFormat::Png)?;
            debug!("wrote {}x{} PNG to {}", img.width(), img.height(), path.display());
        }
        self.images.push(img);
        Ok(())
    }

    fn close(&mut self) -> Result<(), WriterError> {
        if self.closed {
            return Err(WriterError::Closed);
        }
        self.closed = true;
        Ok(())
    }
}
