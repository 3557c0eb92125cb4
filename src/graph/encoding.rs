//! PlantUML text encoding: raw DEFLATE followed by PlantUML's base64 variant.
//!
//! The alphabet is `0-9A-Za-z-_` in that order, which is not the RFC 4648
//! alphabet. Compressed bytes are zero-padded to a multiple of three so
//! every group of three bytes maps to exactly four characters.

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::error::{PhaseError, Result};

const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

/// Compress and encode diagram text for use in a rendering URL.
///
/// ```
/// use phasegraph::graph::encoding::encode;
///
/// assert_eq!(encode("content string").unwrap(), "IyxFAqdDAr4eBYdAp4i70000");
/// ```
pub fn encode(text: &str) -> Result<String> {
    let compressed = compress(text.as_bytes()).map_err(PhaseError::Encode)?;
    Ok(encode64(&compressed))
}

/// Raw DEFLATE at the best compression level.
pub fn compress(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Encode bytes with the PlantUML alphabet, padding with zero bytes.
pub fn encode64(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for chunk in bytes.chunks(3) {
        let b1 = chunk[0];
        let b2 = chunk.get(1).copied().unwrap_or(0);
        let b3 = chunk.get(2).copied().unwrap_or(0);
        append3(&mut out, b1, b2, b3);
    }
    out
}

fn append3(out: &mut String, b1: u8, b2: u8, b3: u8) {
    let c1 = b1 >> 2;
    let c2 = ((b1 & 0x3) << 4) | (b2 >> 4);
    let c3 = ((b2 & 0xF) << 2) | (b3 >> 6);
    let c4 = b3 & 0x3F;
    for c in [c1, c2, c3, c4] {
        out.push(char::from(ALPHABET[usize::from(c)]));
    }
}
