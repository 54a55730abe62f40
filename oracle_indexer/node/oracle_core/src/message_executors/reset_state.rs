//! Tag 6: `ResetState` (§4.5.7). Clears the permission list and restores
//! the encoding version to its initial value. Network and epoch data is
//! left untouched — this is a permissions/versioning reset, not a wipe.

use oracle_entities::{ids, GlobalState, MessageBody, OracleError};

use crate::executor::{ExecutionContext, ExecutorOutcome, MessageExecutor};

/// The `encodingVersion` a freshly initialized `GlobalState` carries.
pub const INITIAL_ENCODING_VERSION: u32 = 0;

pub struct ResetState;

impl MessageExecutor for ResetState {
    fn tag(&self) -> u8 {
        6
    }

    fn execute(
        &self,
        ctx: &mut ExecutionContext,
        _data: &[u8],
    ) -> Result<ExecutorOutcome, OracleError> {
        let mut state: GlobalState = ctx.cache.get_or_create(ids::CANONICAL_GLOBAL_STATE_ID)?;
        state.permission_list.clear();
        state.encoding_version = INITIAL_ENCODING_VERSION;
        ctx.cache.put(state)?;

        Ok(ExecutorOutcome {
            consumed: 0,
            body: MessageBody::ResetState,
        })
    }
}
