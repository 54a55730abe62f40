//! Tag 1: `CorrectEpochs` (§4.5.2). Reserved for a future retroactive
//! correction mechanism; the current wire format carries no body for it.
//! Consumes nothing and records an empty message.

use oracle_entities::{MessageBody, OracleError};

use crate::executor::{ExecutionContext, ExecutorOutcome, MessageExecutor};

pub struct CorrectEpochs;

impl MessageExecutor for CorrectEpochs {
    fn tag(&self) -> u8 {
        1
    }

    fn execute(
        &self,
        _ctx: &mut ExecutionContext,
        _data: &[u8],
    ) -> Result<ExecutorOutcome, OracleError> {
        Ok(ExecutorOutcome {
            consumed: 0,
            body: MessageBody::CorrectEpochs,
        })
    }
}
