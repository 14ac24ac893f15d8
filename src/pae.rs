//! Pre-authentication encoding.
//!
//! The signed/authenticated message for every token operation is the PAE of
//! an ordered list of byte strings: an 8-byte little-endian element count,
//! then for each element an 8-byte little-endian length prefix followed by
//! the raw bytes. The fixed 64-bit framing makes the encoding injective:
//! no two distinct field sequences produce the same output.

/// Encode an ordered list of byte strings into one unambiguous byte string.
#[must_use]
pub fn pae<T: AsRef<[u8]>>(pieces: &[T]) -> Vec<u8> {
    let total: usize = pieces.iter().map(|p| 8 + p.as_ref().len()).sum();
    let mut out = Vec::with_capacity(8 + total);
    out.extend_from_slice(&(pieces.len() as u64).to_le_bytes());
    for piece in pieces {
        let piece = piece.as_ref();
        out.extend_from_slice(&(piece.len() as u64).to_le_bytes());
        out.extend_from_slice(piece);
    }
    out
}
