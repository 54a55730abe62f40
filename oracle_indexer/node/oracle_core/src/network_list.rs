//! The linked-list-in-entities Network List Manager (§4.4). The active
//! network set is stored as a singly linked list threaded through
//! `Network.next_array_element`, anchored at `GlobalState.network_array_head`.
//! Executors never walk the list directly; they materialize it once per
//! invocation, mutate the in-memory `Vec`, and re-serialize on commit.

use oracle_entities::{Entity, GlobalState, Network, OracleError};
use oracle_store::StoreCache;

/// Walks the linked list starting at `state.network_array_head`, returning
/// the active networks in list order. Errors if the walk doesn't produce
/// exactly `state.active_network_count` entries, or if a `next_array_element`
/// points at a network the store doesn't have.
pub fn materialize(
    cache: &mut StoreCache,
    state: &GlobalState,
) -> Result<Vec<Network>, OracleError> {
    let mut list = Vec::with_capacity(state.active_network_count as usize);
    let mut cursor = state.network_array_head.clone();

    while let Some(id) = cursor {
        let network = cache.get::<Network>(&id)?.ok_or_else(|| {
            OracleError::InvariantViolation(format!("network list points at missing id {id}"))
        })?;
        cursor = network.next_array_element.clone();
        list.push(network);
    }

    if list.len() as u64 != state.active_network_count {
        return Err(OracleError::InvariantViolation(format!(
            "network list length {} does not match activeNetworkCount {}",
            list.len(),
            state.active_network_count
        )));
    }

    Ok(list)
}

/// Removes the network at `index`, preserving the relative order of every
/// other element: the element at `index` is swapped with the tail, then the
/// (former element, now at the tail) is popped off and returned.
pub fn swap_and_pop(list: &mut Vec<Network>, index: usize) -> Result<Network, OracleError> {
    if index >= list.len() {
        return Err(OracleError::InvariantViolation(format!(
            "swap_and_pop index {index} out of bounds for list of length {}",
            list.len()
        )));
    }
    let last = list.len() - 1;
    list.swap(index, last);
    Ok(list.pop().expect("just checked non-empty"))
}

/// Re-serializes `retained` as the new active list (re-linking
/// `next_array_element`/`array_index`/`state` for every surviving network),
/// stages the removed networks (already marked `removed_at` by the caller)
/// unlinked from the list, and updates `state`'s head/count fields.
pub fn commit(
    cache: &mut StoreCache,
    removed: Vec<Network>,
    mut retained: Vec<Network>,
    state: &mut GlobalState,
) -> Result<(), OracleError> {
    let canonical_id = state.id().to_string();

    for mut network in removed {
        network.next_array_element = None;
        network.array_index = None;
        network.state = None;
        cache.put(network)?;
    }

    let len = retained.len();
    for i in 0..len {
        retained[i].next_array_element = if i + 1 < len {
            Some(retained[i + 1].chain_id.clone())
        } else {
            None
        };
        retained[i].array_index = Some(i as u32);
        retained[i].state = Some(canonical_id.clone());
    }

    state.network_array_head = retained.first().map(|n| n.chain_id.clone());
    state.active_network_count = len as u64;

    for network in retained {
        cache.put(network)?;
    }

    Ok(())
}
