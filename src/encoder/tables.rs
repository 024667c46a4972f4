//! Per-(version, EC level) block structure and character capacities.
//!
//! The two raw ECC tables are the ISO/IEC 18004 Table 9 values. Everything
//! else (group split, data codewords, remainder bits, per-mode capacities)
//! is derived from them once and cached for the life of the process.

use std::sync::OnceLock;

use crate::models::{ECLevel, EncodingMode, Version};

// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Blocks of equal size within a version's RS structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGroup {
    /// Blocks in this group
    pub num_blocks: usize,
    /// Data codewords per block
    pub data_codewords: usize,
    /// EC codewords per block
    pub ecc_per_block: usize,
}

/// One row of the capacity table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    /// Symbol version
    pub version: Version,
    /// Error correction level
    pub ec_level: ECLevel,
    /// Character capacity indexed by [`EncodingMode`] order
    pub capacities: [usize; 4],
    /// Short blocks first, then (if any) blocks with one extra data codeword
    pub groups: Vec<BlockGroup>,
    /// Zero bits appended after the last codeword
    pub remainder_bits: usize,
}

impl VersionSpec {
    fn build(version: Version, ec_level: ECLevel) -> Self {
        let v = version.number() as usize;
        let level = ec_level.index();
        let ecc_per_block = ECC_CODEWORDS_PER_BLOCK[level][v] as usize;
        let num_blocks = NUM_ERROR_CORRECTION_BLOCKS[level][v] as usize;

        let raw_modules = raw_data_modules(version);
        let total_codewords = raw_modules / 8;
        let long_blocks = total_codewords % num_blocks;
        let short_blocks = num_blocks - long_blocks;
        let short_data = total_codewords / num_blocks - ecc_per_block;

        let mut groups = vec![BlockGroup {
            num_blocks: short_blocks,
            data_codewords: short_data,
            ecc_per_block,
        }];
        if long_blocks > 0 {
            groups.push(BlockGroup {
                num_blocks: long_blocks,
                data_codewords: short_data + 1,
                ecc_per_block,
            });
        }

        let data_bits = groups
            .iter()
            .map(|g| g.num_blocks * g.data_codewords)
            .sum::<usize>()
            * 8;
        let capacities = EncodingMode::ALL.map(|mode| max_chars(mode, version, data_bits));

        Self {
            version,
            ec_level,
            capacities,
            groups,
            remainder_bits: raw_modules % 8,
        }
    }

    /// Character capacity for a mode
    pub fn capacity(&self, mode: EncodingMode) -> usize {
        self.capacities[mode.index()]
    }

    /// Data codewords across all blocks
    pub fn total_data_codewords(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.num_blocks * g.data_codewords)
            .sum()
    }

    /// Number of RS blocks
    pub fn total_blocks(&self) -> usize {
        self.groups.iter().map(|g| g.num_blocks).sum()
    }

    /// EC codewords per block, the same for every group
    pub fn ecc_per_block(&self) -> usize {
        self.groups[0].ecc_per_block
    }

    /// Data plus EC codewords
    pub fn total_codewords(&self) -> usize {
        self.total_data_codewords() + self.total_blocks() * self.ecc_per_block()
    }

    /// Bits available for the data bitstream
    pub fn data_bits(&self) -> usize {
        self.total_data_codewords() * 8
    }
}

/// Modules left for codewords after all function patterns are placed
pub fn raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Largest character count whose full segment fits in `data_bits`
fn max_chars(mode: EncodingMode, version: Version, data_bits: usize) -> usize {
    let header = 4 + mode.char_count_bits(version) as usize;
    let Some(bits) = data_bits.checked_sub(header) else {
        return 0;
    };
    match mode {
        EncodingMode::Numeric => {
            let tail = match bits % 10 {
                7..=9 => 2,
                4..=6 => 1,
                _ => 0,
            };
            bits / 10 * 3 + tail
        }
        EncodingMode::Alphanumeric => bits / 11 * 2 + usize::from(bits % 11 >= 6),
        EncodingMode::Byte => bits / 8,
        EncodingMode::Kanji => bits / 13,
    }
}

static CAPACITY_TABLE: OnceLock<Vec<VersionSpec>> = OnceLock::new();

/// All 160 rows, ordered by version then EC level
pub fn capacity_table() -> &'static [VersionSpec] {
    CAPACITY_TABLE.get_or_init(|| {
        Version::MIN
            .upward()
            .flat_map(|version| {
                ECLevel::ALL
                    .into_iter()
                    .map(move |level| VersionSpec::build(version, level))
            })
            .collect()
    })
}

/// Row for one (version, EC level) pair
pub fn version_spec(version: Version, ec_level: ECLevel) -> &'static VersionSpec {
    &capacity_table()[(version.number() as usize - 1) * 4 + ec_level.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_data_codewords_sum_matches_declared_totals() {
        for spec in capacity_table() {
            let declared = raw_data_modules(spec.version) / 8
                - NUM_ERROR_CORRECTION_BLOCKS[spec.ec_level.index()][spec.version.number() as usize]
                    as usize
                    * ECC_CODEWORDS_PER_BLOCK[spec.ec_level.index()][spec.version.number() as usize]
                        as usize;
            assert_eq!(spec.total_data_codewords(), declared, "{:?}", spec);
            assert_eq!(spec.total_codewords() * 8 + spec.remainder_bits, raw_data_modules(spec.version));
        }
    }

    #[test]
    fn test_capacity_decreases_with_ec_level() {
        for version in Version::MIN.upward() {
            for pair in ECLevel::ALL.windows(2) {
                let lower = version_spec(version, pair[0]);
                let higher = version_spec(version, pair[1]);
                assert!(higher.total_data_codewords() < lower.total_data_codewords());
                for mode in EncodingMode::ALL {
                    assert!(
                        higher.capacity(mode) < lower.capacity(mode),
                        "v{} {:?} {:?}",
                        version,
                        pair,
                        mode
                    );
                }
            }
        }
    }

    #[test]
    fn test_known_capacities() {
        assert_eq!(version_spec(v(1), ECLevel::L).capacities, [41, 25, 17, 10]);
        assert_eq!(version_spec(v(1), ECLevel::H).capacities, [17, 10, 7, 4]);
        assert_eq!(version_spec(v(7), ECLevel::Q).capacities, [207, 125, 86, 53]);
        assert_eq!(version_spec(v(10), ECLevel::M).capacities, [513, 311, 213, 131]);
        assert_eq!(version_spec(v(27), ECLevel::L).capacities, [3517, 2132, 1465, 902]);
        assert_eq!(version_spec(v(40), ECLevel::L).capacities, [7089, 4296, 2953, 1817]);
        assert_eq!(version_spec(v(40), ECLevel::H).capacities, [3057, 1852, 1273, 784]);
    }

    #[test]
    fn test_block_groups() {
        let spec = version_spec(v(5), ECLevel::Q);
        assert_eq!(
            spec.groups,
            vec![
                BlockGroup { num_blocks: 2, data_codewords: 15, ecc_per_block: 18 },
                BlockGroup { num_blocks: 2, data_codewords: 16, ecc_per_block: 18 },
            ]
        );

        let spec = version_spec(v(40), ECLevel::H);
        assert_eq!(spec.total_blocks(), 81);
        assert_eq!(spec.groups[0].num_blocks, 20);
        assert_eq!(spec.groups[0].data_codewords, 15);
        assert_eq!(spec.groups[1].num_blocks, 61);

        assert_eq!(version_spec(v(1), ECLevel::M).groups.len(), 1);
    }

    #[test]
    fn test_remainder_bits() {
        let expected = |n: u8| match n {
            1 => 0,
            2..=6 => 7,
            7..=13 => 0,
            14..=20 => 3,
            21..=27 => 4,
            28..=34 => 3,
            _ => 0,
        };
        for version in Version::MIN.upward() {
            assert_eq!(
                version_spec(version, ECLevel::M).remainder_bits,
                expected(version.number())
            );
        }
    }
}
