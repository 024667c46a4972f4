/// Module grid types
pub mod matrix;
/// Symbol parameters and the finished QR code
pub mod qr_code;

pub use matrix::{BitMatrix, Direction, Matrix, Module, ModuleType};
pub use qr_code::{ECLevel, EncodingMode, MaskPattern, QRCode, Version};
