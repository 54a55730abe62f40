use thiserror::Error;

/// Failure modes of the wire codec. `Truncation` is the only variant the
/// rest of the system treats as fatal to an invocation (see `oracle_core`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("truncated payload: needed {needed} bytes at offset {offset}, had {available}")]
    Truncation {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, CodecError>;
