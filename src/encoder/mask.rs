//! Mask application and selection

use log::trace;
use rayon::prelude::*;

use crate::encoder::config::{parallel_mask_scoring, parallel_min_version};
use crate::encoder::penalty::{PenaltyScore, score};
use crate::models::{MaskPattern, Matrix, Version};

/// XOR every data module with the mask pattern; function modules are untouched
pub fn apply_mask(matrix: &mut Matrix, mask_pattern: MaskPattern) {
    for (x, y, module) in matrix.modules_mut() {
        if !module.kind().is_function() && mask_pattern.is_masked(x, y) {
            *module = module.inverted();
        }
    }
}

/// One masked copy of the grid with its penalty
#[derive(Debug, Clone)]
pub struct MaskCandidate {
    /// Mask that produced `matrix`
    pub mask: MaskPattern,
    /// Masked grid, format and version areas still blank
    pub matrix: Matrix,
    /// Penalty of `matrix`
    pub score: PenaltyScore,
}

impl MaskCandidate {
    /// Mask a copy of `unmasked` and score it
    pub fn evaluate(unmasked: &Matrix, mask: MaskPattern) -> Self {
        let mut matrix = unmasked.clone();
        apply_mask(&mut matrix, mask);
        let score = score(&matrix);
        trace!(
            "mask {}: penalty {} (rule1 {}, rule2 {}, rule3 {}, rule4 {})",
            mask.id(),
            score.total(),
            score.rule1,
            score.rule2,
            score.rule3,
            score.rule4
        );
        Self {
            mask,
            matrix,
            score,
        }
    }
}

/// Score all eight masks, returned in id order
pub fn evaluate_all(unmasked: &Matrix, version: Version) -> Vec<MaskCandidate> {
    if parallel_mask_scoring() && version.number() >= parallel_min_version() {
        MaskPattern::ALL
            .par_iter()
            .map(|&mask| MaskCandidate::evaluate(unmasked, mask))
            .collect()
    } else {
        MaskPattern::ALL
            .iter()
            .map(|&mask| MaskCandidate::evaluate(unmasked, mask))
            .collect()
    }
}

/// Lowest total penalty wins, ties go to the lowest mask id
pub fn select(unmasked: &Matrix, version: Version, forced: Option<MaskPattern>) -> MaskCandidate {
    if let Some(mask) = forced {
        return MaskCandidate::evaluate(unmasked, mask);
    }
    let mut candidates = evaluate_all(unmasked, version);
    let best = candidates
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| (c.score.total(), c.mask.id()))
        .map_or(0, |(i, _)| i);
    candidates.swap_remove(best)
}
