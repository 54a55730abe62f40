use oracle_codec::CodecError;
use thiserror::Error;

/// The four error kinds the invocation driver recognizes (§7). `Truncation`
/// and `InvariantViolation` abort and roll back the current invocation;
/// `UnknownTag` only terminates the current message block; `EntityStoreFailure`
/// is fatal and abandons the invocation with no commit.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("truncated payload at offset {offset}")]
    Truncation { offset: usize },

    #[error("unknown message tag {tag} in preamble slot {slot}")]
    UnknownTag { tag: u8, slot: usize },

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("entity store failure: {0}")]
    EntityStoreFailure(String),

    #[error("{0}")]
    Other(String),
}

impl From<CodecError> for OracleError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Truncation { offset, .. } => OracleError::Truncation { offset },
        }
    }
}

pub type Result<T> = std::result::Result<T, OracleError>;
