//! The Invocation Driver (§4.6): the top-level entry point that turns one
//! `Call` into a `Payload` plus its audit log, with commit/rollback
//! semantics around the `StoreCache` staging layer.
//!
//! The auxiliary (`"1"`) `GlobalState` entity from the original design note
//! is dropped per §9: `StoreCache` itself already gives executors a
//! discard-on-failure staging area over the canonical (`"0"`) entity, so a
//! second copy of the same state would only double-book the bookkeeping.

use std::collections::HashMap;
use std::sync::Arc;

use oracle_codec::parse_preamble;
use oracle_entities::{ids, Message, MessageBlock, Payload};
use oracle_store::{EntityStore, StoreCache};

use crate::call_source::Call;
use crate::executor::{ExecutionContext, MessageExecutor, NetworkIdScheme};
use crate::logger::{Logger, TracingLogger};
use crate::message_executors;
use crate::metrics::ORACLE_METRICS;

pub struct InvocationDriver {
    executors: HashMap<u8, Box<dyn MessageExecutor + Send + Sync>>,
    logger: Arc<dyn Logger>,
    network_id_scheme: NetworkIdScheme,
}

impl InvocationDriver {
    pub fn new(network_id_scheme: NetworkIdScheme) -> Self {
        Self {
            executors: message_executors::registry(),
            logger: Arc::new(TracingLogger),
            network_id_scheme,
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Decodes and applies `call` against `store`, returning the resulting
    /// `Payload` (always, unless the store itself is broken — see below).
    ///
    /// On success, every state mutation staged by the executors is
    /// committed and `Payload.valid` is `true`. On a `Truncation` or
    /// `InvariantViolation`, those mutations are discarded, leaving the
    /// canonical `GlobalState` (and every other entity touched this
    /// invocation) bit-identical to its pre-invocation value; the `Payload`
    /// is still recorded, with `valid = false` and an `errorMessage`. An
    /// `EntityStoreFailure` is fatal: the invocation is abandoned with no
    /// commit at all, not even of the `Payload`, and the error propagates
    /// to the caller.
    pub fn process_call(
        &self,
        store: &dyn EntityStore,
        call: &Call,
    ) -> Result<Payload, oracle_entities::OracleError> {
        ORACLE_METRICS.invocations_total.inc();

        let mut state_cache = StoreCache::new(store);
        let mut message_blocks = Vec::new();
        let mut messages = Vec::new();

        let outcome = self.run_message_blocks(
            &mut state_cache,
            call,
            &mut message_blocks,
            &mut messages,
        );

        let mut payload = Payload {
            tx_hash: call.tx_hash.clone(),
            data: call.payload.clone(),
            submitter: call.submitter.clone(),
            valid: false,
            created_at: call.block_number,
            error_message: None,
        };

        match outcome {
            Ok(()) => {
                state_cache.commit()?;
                payload.valid = true;
                self.logger
                    .info(&format!("invocation {} committed", call.tx_hash));
            }
            Err(oracle_entities::OracleError::EntityStoreFailure(message)) => {
                state_cache.discard();
                ORACLE_METRICS.invocations_fatal.inc();
                self.logger
                    .error(&format!("invocation {} abandoned: {message}", call.tx_hash));
                return Err(oracle_entities::OracleError::EntityStoreFailure(message));
            }
            Err(err) => {
                state_cache.discard();
                ORACLE_METRICS.invocations_rolled_back.inc();
                payload.error_message = Some(classify_error(&err));
                self.logger
                    .warn(&format!("invocation {} rolled back: {err}", call.tx_hash));
            }
        }

        let mut audit_cache = StoreCache::new(store);
        for block in message_blocks {
            audit_cache.put(block)?;
        }
        for message in messages {
            audit_cache.put(message)?;
        }
        audit_cache.put(payload.clone())?;
        audit_cache.commit()?;

        self.refresh_gauges(store)?;

        Ok(payload)
    }

    fn refresh_gauges(&self, store: &dyn EntityStore) -> Result<(), oracle_entities::OracleError> {
        let mut cache = StoreCache::new(store);
        let state: oracle_entities::GlobalState =
            cache.get_or_create(ids::CANONICAL_GLOBAL_STATE_ID)?;
        cache.discard();
        ORACLE_METRICS
            .active_network_count
            .set(state.active_network_count as i64);
        let epoch = state
            .latest_valid_epoch
            .as_deref()
            .and_then(|id| id.parse::<i64>().ok())
            .unwrap_or(-1);
        ORACLE_METRICS.latest_valid_epoch.set(epoch);
        Ok(())
    }

    /// Walks the payload one preamble-delimited `MessageBlock` at a time,
    /// dispatching each tag slot to its executor until the payload is
    /// exhausted, an unknown tag is hit (which only ends the current
    /// block), or an executor signals an error (which ends the invocation).
    fn run_message_blocks(
        &self,
        cache: &mut StoreCache,
        call: &Call,
        message_blocks: &mut Vec<MessageBlock>,
        messages: &mut Vec<Message>,
    ) -> Result<(), oracle_entities::OracleError> {
        let payload = &call.payload;
        let mut cursor = 0usize;
        let mut block_index = 0usize;

        while cursor < payload.len() {
            let block_start = cursor;
            let tags = parse_preamble(payload, cursor)?;
            cursor += oracle_codec::PREAMBLE_BYTES;

            let block_id = ids::message_block_id(&call.tx_hash, block_index);
            let mut message_index = 0usize;

            for &tag in tags.iter() {
                let Some(executor) = self.executors.get(&tag) else {
                    // Unknown tag: terminate this block only (§7).
                    break;
                };

                let message_id = ids::message_id(&block_id, message_index);
                let remaining = &payload[cursor..];
                let mut ctx = ExecutionContext {
                    cache: &mut *cache,
                    message_id: message_id.clone(),
                    network_id_scheme: self.network_id_scheme,
                };
                let outcome = match executor.execute(&mut ctx, remaining) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        // A message this block already recorded must not
                        // outlive the MessageBlock it points to: push the
                        // block as decoded so far before propagating.
                        message_blocks.push(MessageBlock {
                            id: block_id,
                            data: payload[block_start..cursor].to_vec(),
                            payload: call.tx_hash.clone(),
                        });
                        return Err(err);
                    }
                };

                let consumed_data = remaining[..outcome.consumed].to_vec();
                messages.push(Message {
                    id: message_id,
                    block: block_id.clone(),
                    data: consumed_data,
                    body: outcome.body,
                });

                cursor += outcome.consumed;
                message_index += 1;

                if cursor >= payload.len() {
                    break;
                }
            }

            message_blocks.push(MessageBlock {
                id: block_id,
                data: payload[block_start..cursor].to_vec(),
                payload: call.tx_hash.clone(),
            });
            block_index += 1;
        }

        Ok(())
    }
}

/// Short, stable labels for `Payload.errorMessage` (§7/§8): callers match
/// on these rather than parsing a full `Display` string.
fn classify_error(err: &oracle_entities::OracleError) -> String {
    use oracle_entities::OracleError::*;
    match err {
        Truncation { .. } => "truncation".to_string(),
        UnknownTag { .. } => "unknown_tag".to_string(),
        InvariantViolation(message) => format!("invariant_violation: {message}"),
        EntityStoreFailure(message) => format!("entity_store_failure: {message}"),
        Other(message) => format!("other: {message}"),
    }
}
