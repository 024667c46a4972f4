//! Version selection and version information (versions 7-40)

use std::sync::OnceLock;

use log::debug;

use crate::encoder::bch::BchEncoder;
use crate::encoder::tables::{VersionSpec, version_spec};
use crate::error::{QrError, Result};
use crate::models::{ECLevel, EncodingMode, Matrix, Module, ModuleType, Version};

/// Smallest version at or above `min_version` whose capacity for `mode`
/// holds `length` characters
pub fn select_version(
    length: usize,
    mode: EncodingMode,
    ec_level: ECLevel,
    min_version: Option<Version>,
) -> Result<&'static VersionSpec> {
    let floor = min_version.unwrap_or(Version::MIN);
    let spec = floor
        .upward()
        .map(|version| version_spec(version, ec_level))
        .find(|spec| spec.capacity(mode) >= length)
        .ok_or(QrError::VersionNotFound {
            length,
            mode,
            ec_level,
        })?;
    debug!(
        "selected version {} for {} {} chars at level {} (capacity {})",
        spec.version,
        length,
        mode,
        ec_level,
        spec.capacity(mode)
    );
    Ok(spec)
}

/// Version info is 18 bits (6 data + 12 ECC) for versions 7-40
pub struct VersionInfo;

static VERSION_CODEWORDS: OnceLock<[u32; 41]> = OnceLock::new();

impl VersionInfo {
    fn table() -> &'static [u32; 41] {
        VERSION_CODEWORDS.get_or_init(|| {
            let mut table = [0u32; 41];
            for (version, slot) in table.iter_mut().enumerate().skip(7) {
                *slot = BchEncoder::encode_version(version as u8);
            }
            table
        })
    }

    /// BCH-protected version codeword, `None` below version 7
    pub fn codeword(version: Version) -> Option<u32> {
        version
            .has_version_info()
            .then(|| Self::table()[version.number() as usize])
    }

    /// Cells of both 3x6 blocks in bit order (LSB first): the block above
    /// the bottom-left finder and its transpose left of the top-right finder
    pub fn positions(size: usize) -> impl Iterator<Item = [(usize, usize); 2]> {
        (0..18).map(move |i| {
            let a = size - 11 + i % 3;
            let b = i / 3;
            [(a, b), (b, a)]
        })
    }

    /// Write the version codeword into both reserved blocks
    pub fn write(matrix: &mut Matrix, version: Version) {
        let Some(bits) = Self::codeword(version) else {
            return;
        };
        for (i, cells) in Self::positions(matrix.width()).enumerate() {
            let dark = (bits >> i) & 1 != 0;
            for (x, y) in cells {
                matrix.set(x, y, Module::new(ModuleType::Version, dark));
            }
        }
    }
}
