//! Block splitting, per-block error correction and codeword interleaving
use log::trace;

use crate::encoder::bitstream::BitSequence;
use crate::encoder::reed_solomon::ReedSolomonEncoder;
use crate::encoder::tables::{VersionSpec, raw_data_modules};
use crate::error::{QrError, Result};

/// Split data codewords into blocks, shorter blocks first
fn split_blocks<'a>(data: &'a [u8], spec: &VersionSpec) -> Vec<&'a [u8]> {
    let mut blocks = Vec::with_capacity(spec.total_blocks());
    let mut offset = 0;
    for group in &spec.groups {
        for _ in 0..group.num_blocks {
            blocks.push(&data[offset..offset + group.data_codewords]);
            offset += group.data_codewords;
        }
    }
    blocks
}

/// Column-wise read-out: codeword i of every block before codeword i+1
fn interleave<T: AsRef<[u8]>>(blocks: &[T], out: &mut Vec<u8>) {
    let longest = blocks.iter().map(|b| b.as_ref().len()).max().unwrap_or(0);
    for i in 0..longest {
        out.extend(blocks.iter().filter_map(|b| b.as_ref().get(i).copied()));
    }
}

/// Final codeword sequence: interleaved data, interleaved EC
pub fn build_codewords(data: &[u8], spec: &VersionSpec) -> Result<Vec<u8>> {
    let expected = spec.total_data_codewords();
    if data.len() < expected {
        return Err(QrError::EncodingUnderflow {
            expected: expected * 8,
            actual: data.len() * 8,
        });
    }
    if data.len() > expected {
        return Err(QrError::EncodingOverflow {
            expected: expected * 8,
            actual: data.len() * 8,
        });
    }

    let rs = ReedSolomonEncoder::new(spec.ecc_per_block());
    let blocks = split_blocks(data, spec);
    let ecc: Vec<Vec<u8>> = blocks.iter().map(|block| rs.remainder(block)).collect();

    let mut codewords = Vec::with_capacity(spec.total_codewords());
    interleave(&blocks, &mut codewords);
    interleave(&ecc, &mut codewords);

    trace!(
        "interleaved {} blocks into {} codewords ({} EC per block)",
        blocks.len(),
        codewords.len(),
        rs.degree()
    );
    Ok(codewords)
}

/// Codeword bits plus the version's remainder bits, sized to the data area
pub fn final_sequence(data: &[u8], spec: &VersionSpec) -> Result<BitSequence> {
    let codewords = build_codewords(data, spec)?;
    let mut bits = BitSequence::with_capacity(raw_data_modules(spec.version));
    for &codeword in &codewords {
        bits.push_byte(codeword);
    }
    for _ in 0..spec.remainder_bits {
        bits.push_bit(false);
    }

    let expected = raw_data_modules(spec.version);
    match bits.len() {
        n if n < expected => Err(QrError::EncodingUnderflow {
            expected,
            actual: n,
        }),
        n if n > expected => Err(QrError::EncodingOverflow {
            expected,
            actual: n,
        }),
        _ => Ok(bits),
    }
}
