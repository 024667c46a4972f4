//! Output collaborators for finished symbols
//!
//! A [`Writer`] receives the finished [`Matrix`] and does whatever it likes
//! with it. The crate ships a PNG writer built on the `image` crate; other
//! front ends (terminal, SVG) implement the trait themselves.

use thiserror::Error;

use crate::models::Matrix;

/// PNG rendering through the `image` crate
pub mod image;

pub use self::image::{ImageWriter, render};

/// Failures reported by a [`Writer`]
#[derive(Debug, Error)]
pub enum WriterError {
    /// PNG encoding or file creation failed
    #[error("image encoding failed: {0}")]
    Image(#[from] ::image::ImageError),

    /// Underlying I/O failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// `write` after `close`
    #[error("writer is already closed")]
    Closed,
}

/// Sink for finished module grids
pub trait Writer {
    /// Consume one finished matrix
    fn write(&mut self, matrix: &Matrix) -> Result<(), WriterError>;

    /// Flush and release resources; later writes fail with [`WriterError::Closed`]
    fn close(&mut self) -> Result<(), WriterError>;
}
