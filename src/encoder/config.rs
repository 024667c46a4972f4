use std::sync::OnceLock;

use crate::error::Result;
use crate::models::{ECLevel, EncodingMode, MaskPattern, Version};

/// Per-call encoding options
///
/// Everything is optional except the error correction level, which
/// defaults to Q. Setters that take raw numbers validate them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    mode: Option<EncodingMode>,
    ec_level: ECLevel,
    min_version: Option<Version>,
    mask: Option<MaskPattern>,
}

impl EncodeOptions {
    /// Automatic mode at level Q, no version floor, scored mask
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a mode; it must be at least as broad as the text requires
    pub fn with_mode(mut self, mode: EncodingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the error correction level
    pub fn with_ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Never pick a version below `version` (1-40)
    pub fn with_min_version(mut self, version: u8) -> Result<Self> {
        self.min_version = Some(Version::new(version)?);
        Ok(self)
    }

    /// Skip mask scoring and always apply mask `id` (0-7)
    pub fn with_mask(mut self, id: u8) -> Result<Self> {
        self.mask = Some(MaskPattern::try_from(id)?);
        Ok(self)
    }

    /// Forced mode, if any
    pub fn mode(&self) -> Option<EncodingMode> {
        self.mode
    }

    /// Error correction level
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Smallest version allowed, if any
    pub fn min_version(&self) -> Option<Version> {
        self.min_version
    }

    /// Forced mask, if any
    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }
}

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static PARALLEL_MASKS: OnceLock<bool> = OnceLock::new();

pub(crate) fn parallel_mask_scoring() -> bool {
    *PARALLEL_MASKS.get_or_init(|| parse_env_bool_u8("QR_PARALLEL_MASKS", true))
}

static PARALLEL_MIN_VERSION: OnceLock<u8> = OnceLock::new();

pub(crate) fn parallel_min_version() -> u8 {
    *PARALLEL_MIN_VERSION
        .get_or_init(|| parse_env_u8("QR_PARALLEL_MIN_VERSION", 7).clamp(1, 40))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QrError;

    #[test]
    fn test_defaults() {
        let options = EncodeOptions::new();
        assert_eq!(options.ec_level(), ECLevel::Q);
        assert_eq!(options.mode(), None);
        assert_eq!(options.min_version(), None);
        assert_eq!(options.mask(), None);
    }

    #[test]
    fn test_builder() {
        let options = EncodeOptions::new()
            .with_mode(EncodingMode::Byte)
            .with_ec_level(ECLevel::H)
            .with_min_version(5)
            .unwrap()
            .with_mask(3)
            .unwrap();
        assert_eq!(options.mode(), Some(EncodingMode::Byte));
        assert_eq!(options.ec_level(), ECLevel::H);
        assert_eq!(options.min_version(), Version::new(5).ok());
        assert_eq!(options.mask(), Some(MaskPattern::Pattern3));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert_eq!(
            EncodeOptions::new().with_mask(8).unwrap_err(),
            QrError::InvalidMask(8)
        );
        assert_eq!(
            EncodeOptions::new().with_min_version(0).unwrap_err(),
            QrError::InvalidVersion(0)
        );
        assert_eq!(
            EncodeOptions::new().with_min_version(41).unwrap_err(),
            QrError::InvalidVersion(41)
        );
    }

    #[test]
    fn test_env_parsing_falls_back() {
        assert_eq!(parse_env_u8("QR_TEST_UNSET_KNOB", 9), 9);
        assert!(parse_env_bool_u8("QR_TEST_UNSET_KNOB", true));
        assert!((1..=40).contains(&parallel_min_version()));
    }
}
