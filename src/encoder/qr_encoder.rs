//! Main QR code encoder - wires everything together

use log::debug;

use crate::encoder::bitstream::BitstreamEncoder;
use crate::encoder::config::EncodeOptions;
use crate::encoder::format::FormatInfo;
use crate::encoder::function_mask::ModuleGrid;
use crate::encoder::interleave::final_sequence;
use crate::encoder::mask;
use crate::encoder::mode::resolve;
use crate::encoder::placement::DataPlacer;
use crate::encoder::version::{VersionInfo, select_version};
use crate::error::Result;
use crate::models::QRCode;

/// Main QR encoder that turns text into a finished symbol
pub struct QrEncoder;

impl QrEncoder {
    /// Run the whole pipeline; any failing stage aborts with its error
    pub fn encode(text: &str, options: &EncodeOptions) -> Result<QRCode> {
        // Pick the single mode for the whole text
        let mode = resolve(text, options.mode())?;
        let length = text.chars().count();
        debug!("encoding {length} chars in {mode} mode");

        // Smallest version that holds the text at the requested level
        let spec = select_version(length, mode, options.ec_level(), options.min_version())?;
        let version = spec.version;

        // Data codewords, then EC blocks interleaved with remainder bits
        let data = BitstreamEncoder::encode(text, mode, spec)?;
        let bits = final_sequence(&data, spec)?;

        // Function patterns first, data in whatever is left
        let mut grid = ModuleGrid::new(version);
        DataPlacer::place(&mut grid, &bits)?;
        let unmasked = grid.into_matrix();

        // Masks are scored with the format/version areas still blank
        let winner = mask::select(&unmasked, version, options.mask());
        debug!(
            "version {} level {} mask {} (penalty {})",
            version,
            options.ec_level(),
            winner.mask.id(),
            winner.score.total()
        );

        let mut matrix = winner.matrix;
        FormatInfo::new(options.ec_level(), winner.mask).write(&mut matrix);
        VersionInfo::write(&mut matrix, version);

        Ok(QRCode {
            matrix,
            content: text.to_string(),
            version,
            error_correction: options.ec_level(),
            mask_pattern: winner.mask,
            mode,
        })
    }
}
