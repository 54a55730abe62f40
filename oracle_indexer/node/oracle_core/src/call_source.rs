//! The `CallSource` collaborator (§1, §6): the black-box feed of already
//! extracted `(tx_hash, submitter, payload, block_number)` calldata tuples
//! the invocation driver consumes one at a time.

/// One decoded on-chain call, ready for the invocation driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub tx_hash: String,
    pub submitter: String,
    pub payload: Vec<u8>,
    pub block_number: u64,
}

/// Yields calls in order. Out of scope for this system: how implementations
/// discover new calls (polling, subscriptions, a replay file) is entirely
/// up to them.
pub trait CallSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn next_call(&mut self) -> Result<Option<Call>, Self::Error>;
}
