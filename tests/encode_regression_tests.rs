//! Integration tests for QR code encoding regression testing
//!
//! These tests pin the encoder's output for known inputs and check the
//! structural invariants every symbol must satisfy, so changes to tables,
//! placement or mask scoring show up as concrete grid differences.

use qr_encoder::encoder::bitstream::BitstreamEncoder;
use qr_encoder::encoder::format::FormatInfo;
use qr_encoder::encoder::function_mask::ModuleGrid;
use qr_encoder::encoder::interleave::final_sequence;
use qr_encoder::encoder::mask::{MaskCandidate, evaluate_all};
use qr_encoder::encoder::placement::DataPlacer;
use qr_encoder::encoder::tables::version_spec;
use qr_encoder::encoder::version::VersionInfo;
use qr_encoder::{
    Direction, ECLevel, EncodeOptions, EncodingMode, MaskPattern, ModuleType, QrError, Version,
    encode, encode_with,
};

/// Known-good 21x21 symbol for "4376471154038" (version 1-M, mask 7)
const GOLDEN: [&str; 21] = [
    "#######.....#.#######",
    "#.....#..#....#.....#",
    "#.###.#...##..#.###.#",
    "#.###.#...#...#.###.#",
    "#.###.#..####.#.###.#",
    "#.....#.#.#...#.....#",
    "#######.#.#.#.#######",
    ".........#...........",
    "#..#.##.######.#.....",
    "###.#..##..#.#.#.##..",
    "#..#.####.##..###...#",
    "..#.#..#....#####....",
    "..#...##.#.#.###.##..",
    "........#.#..####.##.",
    "#######...###.#.####.",
    "#.....#.#.....##....#",
    "#.###.#..##.###..#.##",
    "#.###.#.#.#..####..##",
    "#.###.#..###.###.#..#",
    "#.....#..####..##..#.",
    "#######.###..#.###...",
];

/// Known-good 45x45 symbol for "VERSION SEVEN" (version 7-M, mask 0).
/// Pins alignment centers, version info and the data walk around them.
const GOLDEN_V7: [&str; 45] = [
    "#######.....#...#.##.#.###....####..#.#######",
    "#.....#.#.####.#.#.#####.#..#..#.#.#..#.....#",
    "#.###.#...###...####.#.##.####.###.#..#.###.#",
    "#.###.#........###...#.#...#.###...##.#.###.#",
    "#.###.#.####..#..##.#####.####.##.###.#.###.#",
    "#.....#.......###.###...#..#.#.#.#....#.....#",
    "#######.#.#.#.#.#.#.#.#.#.#.#.#.#.#.#.#######",
    ".........##.#..#.##.#...##.#.#.#.##.#........",
    "#.#.#.#...###.#..#..########.###.#.##...#..#.",
    "#..#.....##.####.#.#.#...#.###.#####.....#...",
    ".#.##.#.##.##...##.####.####.###..####..###.#",
    ".####..###...###.###.#....##..#..#.#.#.#.#.#.",
    "##....#.#..####..#.####.#..#....###.####.##..",
    "###..#...#..####.#.#..##..###.#..#..##.##.##.",
    "..######.#...#..#.#.#..#..##..#.###..###...#.",
    "#.#.##.###.##..##...#.####....##..#.#.#...###",
    "#.....##..###.#.#.#...##.##.#..#........#.##.",
    "#.##.#.#.#..###.#...#.#..#....###.##..#..#...",
    "...##.#.#####...##.##...###.#.##..#.#.#.###.#",
    ".###....##......####..#...##.#.#.#.#.#.#.#...",
    ".##.#####.##....##.######..#.###.##########.#",
    "....#...###.##...#.##...#.####.###.##...####.",
    "#...#.#.##...#.#..#.#.#.#.##.###.##.#.#.####.",
    "#...#...##.##.#.#..##...#.#...#..#.##...#####",
    ".#..#####.#..#..#.#.#####...#...#.########.#.",
    "#.###...##..##..#..###.#..#...#..#.#....#.#..",
    "#..##.#...###.#.#####.#.#.#.#.#.#.#.#.#....#.",
    "#.##.....#...##.#.#.#...##...#.#..###...#.###",
    "##...####..###.#...##.#..##.####...###....###",
    "##..##..##..#..##..##...##...#.##.#.##.###...",
    "#..#..###...##.##..###..###.####..##.#..###.#",
    "#......###.##.#.#...###.#.##.#...#.#..##.#...",
    ".#######.#...#.#...#.#.....#.##.###..#.####.#",
    "#..##...###.##...###.#..#.####...#.#.###..##.",
    "....#.#...###..##.#...###.##.##.###..#.##..#.",
    ".####....#...#####.#...#.#....#...#..#.#..###",
    "#..##.#.#...###.....#######.#...#..######.##.",
    "........###.#.#...###...##....#...###...#....",
    "#######.....#.###...#.#.###.#.#.#.###.#.#...#",
    "#.....#..#..#..#....#...##.#.#.#..###...#.#..",
    "#.###.#.##..#..#...#########.###...########.#",
    "#.###.#..#####...#####...#.###.##.##.#.#.#.#.",
    "#.###.#.#.####.###.#.##.####.###..##.###.##.#",
    "#.....#....#.#.##.#..#.#..##..#..#.###.###.##",
    "#######.##.#.#.####.####...#....####.###.##.#",
];

fn options(level: ECLevel) -> EncodeOptions {
    EncodeOptions::new().with_ec_level(level)
}

fn render_rows(code: &qr_encoder::QRCode) -> Vec<String> {
    code.matrix
        .to_bools()
        .iter()
        .map(|row| row.iter().map(|&d| if d { '#' } else { '.' }).collect())
        .collect()
}

#[test]
fn test_golden_matrix_encode() {
    let code = encode_with("4376471154038", &options(ECLevel::M)).unwrap();
    assert_eq!(code.version.number(), 1);
    assert_eq!(code.mode, EncodingMode::Numeric);
    assert_eq!(code.mask_pattern, MaskPattern::Pattern7);
    assert_eq!(render_rows(&code), GOLDEN);
}

#[test]
fn test_golden_matrix_encode_v7() {
    let options = options(ECLevel::M).with_min_version(7).unwrap();
    let code = encode_with("VERSION SEVEN", &options).unwrap();
    assert_eq!(code.version.number(), 7);
    assert_eq!(code.mode, EncodingMode::Alphanumeric);
    assert_eq!(code.mask_pattern, MaskPattern::Pattern0);
    assert_eq!(render_rows(&code), GOLDEN_V7);
}

#[test]
fn test_alignment_modules_v7() {
    let options = options(ECLevel::M).with_min_version(7).unwrap();
    let code = encode_with("VERSION SEVEN", &options).unwrap();
    for (cx, cy) in [(22, 6), (6, 22), (22, 22), (38, 22), (22, 38), (38, 38)] {
        for dy in 0..5 {
            for dx in 0..5 {
                let (x, y) = (cx + dx - 2, cy + dy - 2);
                let module = code.matrix.get(x, y).unwrap();
                assert_eq!(module.kind(), ModuleType::Alignment, "({x}, {y})");
                let ring = dx.abs_diff(2).max(dy.abs_diff(2));
                assert_eq!(module.is_dark(), ring != 1, "({x}, {y})");
            }
        }
    }
    // Outside every v7 pattern
    assert_eq!(code.matrix.get(18, 18).unwrap().kind(), ModuleType::Data);
}

#[test]
fn test_golden_mask_scores() {
    let spec = version_spec(Version::new(1).unwrap(), ECLevel::M);
    let data = BitstreamEncoder::encode("4376471154038", EncodingMode::Numeric, spec).unwrap();
    let bits = final_sequence(&data, spec).unwrap();
    let mut grid = ModuleGrid::new(spec.version);
    DataPlacer::place(&mut grid, &bits).unwrap();
    let unmasked = grid.into_matrix();

    let totals: Vec<u32> = evaluate_all(&unmasked, spec.version)
        .iter()
        .map(|c| c.score.total())
        .collect();
    assert_eq!(totals, vec![443, 523, 589, 472, 531, 568, 551, 387]);

    let forced = MaskCandidate::evaluate(&unmasked, MaskPattern::Pattern7);
    assert_eq!(forced.score.total(), 387);
}

#[test]
fn test_deterministic() {
    for text in ["HELLO WORLD", "https://example.com/?q=1", "にほんご"] {
        let a = encode(text).unwrap();
        let b = encode(text).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_dimension_invariant() {
    for n in [1u8, 2, 6, 7, 14, 27, 40] {
        let options = EncodeOptions::new().with_min_version(n).unwrap();
        let code = encode_with("dimension", &options).unwrap();
        assert_eq!(code.version.number(), n);
        assert_eq!(code.matrix.width(), 4 * n as usize + 17);
        assert_eq!(code.matrix.height(), code.matrix.width());
    }
}

#[test]
fn test_version_not_found_at_h() {
    let text = "x".repeat(1274);
    let err = encode_with(&text, &options(ECLevel::H)).unwrap_err();
    assert_eq!(
        err,
        QrError::VersionNotFound {
            length: 1274,
            mode: EncodingMode::Byte,
            ec_level: ECLevel::H
        }
    );
    assert!(err.is_user_error());

    // One less fits exactly
    let code = encode_with(&text[1..], &options(ECLevel::H)).unwrap();
    assert_eq!(code.version.number(), 40);
}

#[test]
fn test_mode_mismatch() {
    let options = EncodeOptions::new().with_mode(EncodingMode::Alphanumeric);
    let err = encode_with("lower case", &options).unwrap_err();
    assert_eq!(
        err,
        QrError::ModeMismatch {
            requested: EncodingMode::Alphanumeric,
            required: EncodingMode::Byte
        }
    );
}

#[test]
fn test_wider_mode_override() {
    let options = EncodeOptions::new().with_mode(EncodingMode::Byte);
    let code = encode_with("12345", &options).unwrap();
    assert_eq!(code.mode, EncodingMode::Byte);
}

#[test]
fn test_chosen_mask_is_optimal() {
    for text in ["HELLO WORLD", "a", "01234567", "mask optimality check"] {
        let code = encode(text).unwrap();
        let spec = version_spec(code.version, code.error_correction);
        let data = BitstreamEncoder::encode(text, code.mode, spec).unwrap();
        let bits = final_sequence(&data, spec).unwrap();
        let mut grid = ModuleGrid::new(code.version);
        DataPlacer::place(&mut grid, &bits).unwrap();
        let candidates = evaluate_all(&grid.into_matrix(), code.version);

        let chosen = &candidates[code.mask_pattern.id() as usize];
        assert!(candidates.iter().all(|c| chosen.score.total() <= c.score.total()));
        assert!(
            candidates[..code.mask_pattern.id() as usize]
                .iter()
                .all(|c| c.score.total() > chosen.score.total())
        );
    }
}

#[test]
fn test_format_info_reads_back() {
    for level in ECLevel::ALL {
        let code = encode_with("FORMAT CHECK", &options(level)).unwrap();
        let info = FormatInfo::read(&code.matrix).unwrap();
        assert_eq!(info.ec_level, level);
        assert_eq!(info.mask_pattern, code.mask_pattern);
    }
}

#[test]
fn test_version_info_for_v7() {
    let code = encode_with("v7", &EncodeOptions::new().with_min_version(7).unwrap()).unwrap();
    let size = code.size();
    let bits = VersionInfo::codeword(code.version).unwrap();
    assert_eq!(bits, 0x07C94);
    for (i, cells) in VersionInfo::positions(size).enumerate() {
        let expected = (bits >> i) & 1 != 0;
        for (x, y) in cells {
            let module = code.matrix.get(x, y).unwrap();
            assert_eq!(module.kind(), ModuleType::Version);
            assert_eq!(module.is_dark(), expected, "bit {i} at ({x}, {y})");
        }
    }
}

#[test]
fn test_kanji_encode() {
    let code = encode("にほんごのテスト").unwrap();
    assert_eq!(code.mode, EncodingMode::Kanji);
    assert_eq!(code.version.number(), 2);
    assert_eq!(code.mask_pattern, MaskPattern::Pattern2);
}

#[test]
fn test_function_patterns_survive_masking() {
    let code = encode("function patterns").unwrap();
    let size = code.size();
    // Finder corners dark, separator light, timing alternates
    for (x, y) in [(0, 0), (size - 1, 0), (0, size - 1)] {
        assert!(code.matrix.is_dark(x, y));
    }
    assert!(!code.matrix.is_dark(7, 7));
    for i in 8..size - 8 {
        assert_eq!(code.matrix.is_dark(i, 6), i % 2 == 0);
        assert_eq!(code.matrix.is_dark(6, i), i % 2 == 0);
    }
    assert!(code.matrix.is_dark(8, size - 8));
}

#[test]
fn test_matrix_accessors() {
    let code = encode("accessors").unwrap();
    let size = code.size();
    assert!(matches!(
        code.matrix.get(size, 0),
        Err(QrError::MatrixBounds { .. })
    ));
    assert!(!code.matrix.is_dark(size + 3, 0));

    let mut row_major = Vec::new();
    code.matrix
        .iterate(Direction::RowMajor, |x, y, m| row_major.push((x, y, m.is_dark())));
    let mut column_major = Vec::new();
    code.matrix
        .iterate(Direction::ColumnMajor, |x, y, m| column_major.push((x, y, m.is_dark())));
    assert_eq!(row_major.len(), size * size);
    assert_eq!(row_major[1], (1, 0, code.matrix.is_dark(1, 0)));
    assert_eq!(column_major[1], (0, 1, code.matrix.is_dark(0, 1)));

    let bitmap = code.matrix.bitmap();
    assert_eq!(bitmap.count_ones(), code.matrix.dark_count());
}

#[test]
fn test_concurrent_encodes() {
    let handles: Vec<_> = (0..8)
        .map(|i| std::thread::spawn(move || encode(&format!("thread {i}")).unwrap()))
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let code = handle.join().unwrap();
        assert_eq!(code, encode(&format!("thread {i}")).unwrap());
    }
}
