use crate::error::{CodecError, Result};

/// Width, in bits, of the preamble word. A configurable constant rather
/// than a hard literal so an alternate encoding revision could widen it.
pub const PREAMBLE_BITS: u32 = 64;
/// Width, in bits, of one message tag.
pub const TAG_BITS: u32 = 4;
/// Number of bytes the preamble word occupies on the wire.
pub const PREAMBLE_BYTES: usize = (PREAMBLE_BITS / 8) as usize;
/// Number of tag slots packed into one preamble word.
pub const TAGS_PER_PREAMBLE: usize = (PREAMBLE_BITS / TAG_BITS) as usize;

/// Reads the `PREAMBLE_BYTES`-byte little-endian preamble word at `offset`
/// and unpacks it into `TAGS_PER_PREAMBLE` 4-bit tags, low-to-high.
pub fn parse_preamble(bytes: &[u8], offset: usize) -> Result<[u8; TAGS_PER_PREAMBLE]> {
    if offset + PREAMBLE_BYTES > bytes.len() {
        return Err(CodecError::Truncation {
            offset,
            needed: PREAMBLE_BYTES,
            available: bytes.len().saturating_sub(offset),
        });
    }

    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[offset..offset + PREAMBLE_BYTES]);
    let word = u64::from_le_bytes(buf);

    let mut tags = [0u8; TAGS_PER_PREAMBLE];
    for (i, tag) in tags.iter_mut().enumerate() {
        *tag = ((word >> (i as u32 * TAG_BITS)) & 0xF) as u8;
    }
    Ok(tags)
}

/// Packs `tags` (low-to-high) back into a preamble word, for round-trip
/// tests and for encoders that build payloads in the harness.
pub fn encode_preamble(tags: &[u8; TAGS_PER_PREAMBLE]) -> [u8; PREAMBLE_BYTES] {
    let mut word: u64 = 0;
    for (i, &tag) in tags.iter().enumerate() {
        word |= ((tag & 0xF) as u64) << (i as u32 * TAG_BITS);
    }
    word.to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_preamble_is_sixteen_tag_zeros() {
        let bytes = [0u8; 8];
        let tags = parse_preamble(&bytes, 0).unwrap();
        assert_eq!(tags, [0u8; 16]);
    }

    #[test]
    fn tags_unpack_low_to_high() {
        // tag 0 = 3, tag 1 = 5, rest = 0.
        let bytes = [0x53, 0, 0, 0, 0, 0, 0, 0];
        let tags = parse_preamble(&bytes, 0).unwrap();
        assert_eq!(tags[0], 3);
        assert_eq!(tags[1], 5);
        assert!(tags[2..].iter().all(|&t| t == 0));
    }

    #[test]
    fn round_trips_through_encode() {
        let mut tags = [0u8; 16];
        for (i, t) in tags.iter_mut().enumerate() {
            *t = (i as u8 * 3) & 0xF;
        }
        let encoded = encode_preamble(&tags);
        assert_eq!(parse_preamble(&encoded, 0).unwrap(), tags);
    }

    #[test]
    fn truncated_preamble_errors() {
        let bytes = [0u8; 4];
        assert!(matches!(
            parse_preamble(&bytes, 0),
            Err(CodecError::Truncation { .. })
        ));
    }
}
