//! Mask penalty scoring (ISO/IEC 18004 section 7.8.3)
//!
//! Four independent rules, each applied to every row and every column
//! unless noted:
//! - Rule 1: runs of five or more same-colored modules
//! - Rule 2: uniform 2x2 blocks (whole grid)
//! - Rule 3: finder-like 1:1:3:1:1 sequences with four light modules on one side
//! - Rule 4: deviation of the dark proportion from 50% (whole grid)
use std::sync::OnceLock;

use crate::models::Matrix;

const RUN_PENALTY: u32 = 3;
const BLOCK_PENALTY: u32 = 3;
const FINDER_LIKE_PENALTY: u32 = 40;
const BALANCE_PENALTY: u32 = 10;

/// Per-rule breakdown of a mask score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PenaltyScore {
    /// Runs of five or more
    pub rule1: u32,
    /// 2x2 blocks
    pub rule2: u32,
    /// Finder-like sequences
    pub rule3: u32,
    /// Dark/light balance
    pub rule4: u32,
}

impl PenaltyScore {
    /// Sum of all four rules
    pub fn total(&self) -> u32 {
        self.rule1 + self.rule2 + self.rule3 + self.rule4
    }
}

/// Counts occurrences of a fixed pattern, overlapping ones included.
///
/// A Knuth-Morris-Pratt automaton: on a mismatch or after a full match the
/// cursor falls back to the longest proper border of the matched prefix, so
/// a match that starts inside the previous one is still found.
#[derive(Debug, Clone)]
pub struct PatternCounter {
    pattern: Vec<bool>,
    failure: Vec<usize>,
}

impl PatternCounter {
    /// Counter for a non-empty pattern
    pub fn new(pattern: &[bool]) -> Self {
        debug_assert!(!pattern.is_empty());
        let mut failure = vec![0usize; pattern.len()];
        let mut k = 0;
        for i in 1..pattern.len() {
            while k > 0 && pattern[i] != pattern[k] {
                k = failure[k - 1];
            }
            if pattern[i] == pattern[k] {
                k += 1;
            }
            failure[i] = k;
        }
        Self {
            pattern: pattern.to_vec(),
            failure,
        }
    }

    /// Build from a string of '0' and '1'
    pub fn from_bits(bits: &str) -> Self {
        let pattern: Vec<bool> = bits.chars().map(|c| c == '1').collect();
        Self::new(&pattern)
    }

    /// Number of matches in `sequence`, overlaps included
    pub fn count_overlapping<I>(&self, sequence: I) -> usize
    where
        I: IntoIterator<Item = bool>,
    {
        let mut count = 0;
        let mut matched = 0;
        for bit in sequence {
            while matched > 0 && bit != self.pattern[matched] {
                matched = self.failure[matched - 1];
            }
            if bit == self.pattern[matched] {
                matched += 1;
            }
            if matched == self.pattern.len() {
                count += 1;
                matched = self.failure[matched - 1];
            }
        }
        count
    }
}

fn finder_like_counters() -> &'static [PatternCounter; 2] {
    static COUNTERS: OnceLock<[PatternCounter; 2]> = OnceLock::new();
    COUNTERS.get_or_init(|| {
        [
            PatternCounter::from_bits("10111010000"),
            PatternCounter::from_bits("00001011101"),
        ]
    })
}

/// Rule 1 for a single row or column
fn run_penalty(line: &[bool]) -> u32 {
    let mut penalty = 0;
    let mut run = 0u32;
    let mut color = None;
    for &bit in line {
        if color == Some(bit) {
            run += 1;
        } else {
            if run >= 5 {
                penalty += RUN_PENALTY + (run - 5);
            }
            color = Some(bit);
            run = 1;
        }
    }
    if run >= 5 {
        penalty += RUN_PENALTY + (run - 5);
    }
    penalty
}

/// Rule 3 for a single row or column
fn finder_like_penalty(line: &[bool]) -> u32 {
    finder_like_counters()
        .iter()
        .map(|counter| counter.count_overlapping(line.iter().copied()) as u32)
        .sum::<u32>()
        * FINDER_LIKE_PENALTY
}

/// Rule 4: 10 points for every full 5% step away from an even split
fn balance_penalty(dark: usize, total: usize) -> u32 {
    let steps = (20 * dark).abs_diff(10 * total) / total;
    steps as u32 * BALANCE_PENALTY
}

/// Score a fully masked grid
pub fn score(matrix: &Matrix) -> PenaltyScore {
    let rows = matrix.to_bools();
    let size = rows.len();
    let columns: Vec<Vec<bool>> = (0..size)
        .map(|x| rows.iter().map(|row| row[x]).collect())
        .collect();

    let mut result = PenaltyScore::default();
    for line in rows.iter().chain(columns.iter()) {
        result.rule1 += run_penalty(line);
        result.rule3 += finder_like_penalty(line);
    }

    for pair in rows.windows(2) {
        let (top, bottom) = (&pair[0], &pair[1]);
        for x in 0..size.saturating_sub(1) {
            let c = top[x];
            if top[x + 1] == c && bottom[x] == c && bottom[x + 1] == c {
                result.rule2 += BLOCK_PENALTY;
            }
        }
    }

    result.rule4 = balance_penalty(matrix.dark_count(), size * size);
    result
}
