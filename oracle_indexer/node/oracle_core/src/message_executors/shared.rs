//! Decode logic shared by the two network-registration executors
//! (`RegisterNetworks`, `RegisterNetworksAndAliases`): both begin with the
//! same removal block (§4.5.4/§4.5.5).

use oracle_codec::{decode_u64, get_string};
use oracle_entities::{GlobalState, Network, OracleError};
use oracle_store::StoreCache;

use crate::network_list;

pub struct Removals {
    pub retained: Vec<Network>,
    pub removed: Vec<Network>,
    pub removed_ids: Vec<String>,
}

/// Decodes `removeCount` followed by that many `removeIndex` varints,
/// applying each removal against a single materialization of the active
/// list. Returns the decode cursor position after the removal block.
pub fn apply_removals(
    cache: &mut StoreCache,
    state: &GlobalState,
    data: &[u8],
    message_id: &str,
) -> Result<(Removals, usize), OracleError> {
    let mut cursor = 0usize;
    let (remove_count, consumed) = decode_u64(data, cursor)?;
    cursor += consumed as usize;

    let mut list = network_list::materialize(cache, state)?;
    let mut removed = Vec::new();
    let mut removed_ids = Vec::new();

    for _ in 0..remove_count {
        let (remove_index, consumed) = decode_u64(data, cursor)?;
        cursor += consumed as usize;

        let mut network = network_list::swap_and_pop(&mut list, remove_index as usize)?;
        removed_ids.push(network.chain_id.clone());
        network.removed_at = Some(message_id.to_string());
        removed.push(network);
    }

    Ok((
        Removals {
            retained: list,
            removed,
            removed_ids,
        },
        cursor,
    ))
}

/// Reads one length-prefixed string: a `u64` varint byte count followed by
/// that many bytes.
pub fn decode_length_prefixed_string(data: &[u8], offset: usize) -> Result<(String, usize), OracleError> {
    let (len, consumed) = decode_u64(data, offset)?;
    let mut cursor = offset + consumed as usize;
    let s = get_string(data, cursor, len as usize)?;
    cursor += len as usize;
    Ok((s, cursor - offset))
}
