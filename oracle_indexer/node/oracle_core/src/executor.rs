//! The common shape every message executor (§4.5) implements, and the
//! per-message context threaded through them.

use oracle_entities::{MessageBody, OracleError};
use oracle_store::StoreCache;

/// Whether a new network is keyed by the chain id string decoded off the
/// wire, or by a sequential counter assigned by the driver. Resolves an
/// Open Question left unspecified by the wire format (§3/§9): the schema
/// text implies chain-id keys, but older payloads pre-dating alias support
/// may have relied on positional counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkIdScheme {
    #[default]
    ChainId,
    LegacyCounter,
}

/// Everything a message executor needs besides the raw payload bytes: the
/// write-back cache it stages mutations into, the id of the `Message`
/// entity it's producing, and the configured network identity scheme.
pub struct ExecutionContext<'a, 'b> {
    pub cache: &'a mut StoreCache<'b>,
    pub message_id: String,
    pub network_id_scheme: NetworkIdScheme,
}

/// The result of one executor invocation: how many bytes of `data` it
/// consumed, and the decoded message body to record in the audit log.
#[derive(Debug, Clone)]
pub struct ExecutorOutcome {
    pub consumed: usize,
    pub body: MessageBody,
}

/// One message kind's decode-and-apply logic (§4.5). Implementations read a
/// prefix of `data`, mutate state through `ctx.cache`, and report how much
/// of `data` they consumed — never more than `data.len()`.
pub trait MessageExecutor {
    fn tag(&self) -> u8;
    fn execute(
        &self,
        ctx: &mut ExecutionContext,
        data: &[u8],
    ) -> Result<ExecutorOutcome, OracleError>;
}
