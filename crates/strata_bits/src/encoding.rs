//! Byte encoding of [`Bits`].
//!
//! Member `i` lives in byte `i / 8` at bit position `i % 8`. Trailing zero
//! bytes are dropped, so the empty set encodes to an empty slice. This is the
//! row payload of the serialized reference graph.

use crate::Bits;

impl Bits {
    /// Encode the set as little-endian bytes with trailing zeros trimmed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self
            .words
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .collect();
        let used = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        bytes.truncate(used);
        bytes
    }

    /// Decode a set produced by [`Bits::to_bytes`].
    ///
    /// Any byte slice is a valid encoding; trailing zero bytes are tolerated.
    pub fn from_bytes(bytes: &[u8]) -> Bits {
        let words = bytes
            .chunks(8)
            .map(|chunk| {
                let mut word = [0u8; 8];
                word[..chunk.len()].copy_from_slice(chunk);
                u64::from_le_bytes(word)
            })
            .collect();
        let mut bits = Bits { words };
        bits.shrink_to_fit();
        bits
    }
}
