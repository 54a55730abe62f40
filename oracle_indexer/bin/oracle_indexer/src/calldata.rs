//! Calldata framing (§6): extracts the oracle payload out of a full
//! on-chain call's raw calldata. Only used in `--mode calldata`; in the
//! default `--mode payload`, the input bytes *are* the payload.

/// Offset, in bytes, of the ABI dynamic-bytes length word: 4-byte selector
/// plus a 32-byte offset pointer.
const LENGTH_OFFSET: usize = 36;
const LENGTH_WIDTH: usize = 32;
/// Offset of the payload itself: the length word ends at 36 + 32 = 68.
const PAYLOAD_OFFSET: usize = 68;

pub fn extract_payload(calldata: &[u8]) -> anyhow::Result<Vec<u8>> {
    if calldata.len() < PAYLOAD_OFFSET {
        anyhow::bail!(
            "calldata too short to contain a length field: {} bytes, need at least {PAYLOAD_OFFSET}",
            calldata.len()
        );
    }

    let length_word = &calldata[LENGTH_OFFSET..LENGTH_OFFSET + LENGTH_WIDTH];
    let mut length_bytes = [0u8; 8];
    length_bytes.copy_from_slice(&length_word[..8]);
    let length = u64::from_le_bytes(length_bytes) as usize;

    let end = PAYLOAD_OFFSET
        .checked_add(length)
        .ok_or_else(|| anyhow::anyhow!("declared payload length overflows"))?;
    if end > calldata.len() {
        anyhow::bail!(
            "calldata shorter than its declared payload length: need {end} bytes, have {}",
            calldata.len()
        );
    }

    Ok(calldata[PAYLOAD_OFFSET..end].to_vec())
}
