//! Tag 2: `UpdateVersions` (§4.5.3). Bumps `GlobalState.encodingVersion`.
//! The new version must be strictly greater than the current one; a
//! same-or-lower value is an invariant violation, not a silent no-op.

use oracle_codec::decode_u64;
use oracle_entities::{ids, GlobalState, MessageBody, OracleError};

use crate::executor::{ExecutionContext, ExecutorOutcome, MessageExecutor};

pub struct UpdateVersions;

impl MessageExecutor for UpdateVersions {
    fn tag(&self) -> u8 {
        2
    }

    fn execute(
        &self,
        ctx: &mut ExecutionContext,
        data: &[u8],
    ) -> Result<ExecutorOutcome, OracleError> {
        let mut state: GlobalState = ctx.cache.get_or_create(ids::CANONICAL_GLOBAL_STATE_ID)?;

        let (new_version, consumed) = decode_u64(data, 0)?;
        let new_version = new_version as u32;
        let old_version = state.encoding_version;

        if new_version <= old_version {
            return Err(OracleError::InvariantViolation(format!(
                "encodingVersion must strictly increase: {old_version} -> {new_version}"
            )));
        }

        state.encoding_version = new_version;
        ctx.cache.put(state)?;

        Ok(ExecutorOutcome {
            consumed: consumed as usize,
            body: MessageBody::UpdateVersions {
                old_version,
                new_version,
            },
        })
    }
}
