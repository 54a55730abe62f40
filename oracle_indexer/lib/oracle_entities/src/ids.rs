//! Key-formatting helpers. Entity ids are the stable external contract
//! (§6), so the formatting rules live in one place rather than being
//! inlined at every call site.

/// The canonical `GlobalState` id, committed to at the end of a successful
/// invocation.
pub const CANONICAL_GLOBAL_STATE_ID: &str = "0";
/// The auxiliary, per-invocation scratch `GlobalState` id.
pub const AUXILIARY_GLOBAL_STATE_ID: &str = "1";

pub fn epoch_id(epoch_number: u128) -> String {
    epoch_number.to_string()
}

pub fn nebn_id(epoch_number: u128, chain_id: &str) -> String {
    format!("{epoch_number}-{chain_id}")
}

pub fn message_block_id(tx_hash: &str, block_index: usize) -> String {
    format!("{tx_hash}-{block_index}")
}

pub fn message_id(block_id: &str, message_index: usize) -> String {
    format!("{block_id}-{message_index}")
}
