//! Tag 0: `SetBlockNumbersForEpoch` (§4.5.1). Advances `latestValidEpoch`
//! by one and, for every currently active network (in list order), decodes
//! a signed acceleration and derives the new cumulative delta and block
//! number from the previous epoch's NEBN.

use oracle_codec::decode_i64;
use oracle_entities::{ids, Epoch, GlobalState, MessageBody, Nebn, Network, OracleError};

use crate::executor::{ExecutionContext, ExecutorOutcome, MessageExecutor};
use crate::network_list;

pub struct SetBlockNumbersForEpoch;

impl MessageExecutor for SetBlockNumbersForEpoch {
    fn tag(&self) -> u8 {
        0
    }

    fn execute(
        &self,
        ctx: &mut ExecutionContext,
        data: &[u8],
    ) -> Result<ExecutorOutcome, OracleError> {
        let mut state: GlobalState = ctx.cache.get_or_create(ids::CANONICAL_GLOBAL_STATE_ID)?;

        if state.active_network_count == 0 {
            return Ok(ExecutorOutcome {
                consumed: 0,
                body: MessageBody::SetBlockNumbersForEpoch {
                    epoch: None,
                    merkle_root: None,
                    accelerations: Vec::new(),
                },
            });
        }

        let mut cursor = 0usize;
        if data.len() < cursor + 32 {
            return Err(OracleError::Truncation { offset: cursor });
        }
        let mut merkle_root = [0u8; 32];
        merkle_root.copy_from_slice(&data[cursor..cursor + 32]);
        cursor += 32;

        let next_epoch_number = state
            .latest_valid_epoch
            .as_deref()
            .map(|id| id.parse::<u128>().unwrap_or(0))
            .unwrap_or(0)
            + 1;
        let epoch_id = ids::epoch_id(next_epoch_number);

        let list = network_list::materialize(ctx.cache, &state)?;
        let mut accelerations = Vec::with_capacity(list.len());

        for network in &list {
            let (acceleration, consumed) = decode_i64(data, cursor)?;
            cursor += consumed as usize;
            accelerations.push(acceleration);

            let previous_id = if next_epoch_number > 1 {
                Some(ids::nebn_id(next_epoch_number - 1, &network.chain_id))
            } else {
                None
            };
            let previous = match &previous_id {
                Some(id) => ctx.cache.get::<Nebn>(id)?,
                None => None,
            };

            let (delta, block_number) = match &previous {
                Some(prev) => {
                    let delta = prev.delta + acceleration as i128;
                    (delta, prev.block_number + delta)
                }
                None => {
                    let delta = acceleration as i128;
                    (delta, delta)
                }
            };

            let nebn_id = ids::nebn_id(next_epoch_number, &network.chain_id);
            let nebn = Nebn {
                id: nebn_id.clone(),
                acceleration: acceleration as i128,
                delta,
                block_number,
                epoch_number: next_epoch_number,
                network: network.chain_id.clone(),
                epoch: epoch_id.clone(),
                previous_block_number: previous_id,
            };
            ctx.cache.put(nebn)?;

            let mut updated_network: Network = network.clone();
            updated_network.latest_valid_block_number = Some(nebn_id);
            ctx.cache.put(updated_network)?;
        }

        let epoch: Epoch = ctx.cache.get_or_create(&epoch_id)?;
        ctx.cache.put(epoch)?;

        state.latest_valid_epoch = Some(epoch_id.clone());
        ctx.cache.put(state)?;

        Ok(ExecutorOutcome {
            consumed: cursor,
            body: MessageBody::SetBlockNumbersForEpoch {
                epoch: Some(epoch_id),
                merkle_root: Some(merkle_root),
                accelerations,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use oracle_codec::encode_i64;
    use oracle_entities::Entity;
    use oracle_store::{InMemoryEntityStore, StoreCache};

    use super::*;
    use crate::executor::NetworkIdScheme;

    fn ctx<'a, 'b>(cache: &'a mut StoreCache<'b>) -> ExecutionContext<'a, 'b> {
        ExecutionContext {
            cache,
            message_id: "msg-0".to_string(),
            network_id_scheme: NetworkIdScheme::ChainId,
        }
    }

    #[test]
    fn empty_network_set_consumes_nothing() {
        let store = InMemoryEntityStore::new();
        let mut cache = StoreCache::new(&store);
        let outcome = SetBlockNumbersForEpoch.execute(&mut ctx(&mut cache), &[]).unwrap();
        assert_eq!(outcome.consumed, 0);
        assert!(matches!(
            outcome.body,
            MessageBody::SetBlockNumbersForEpoch { epoch: None, .. }
        ));
    }

    #[test]
    fn first_epoch_has_no_previous_nebn() {
        let store = InMemoryEntityStore::new();
        let mut cache = StoreCache::new(&store);
        let mut state: GlobalState = cache.get_or_create(ids::CANONICAL_GLOBAL_STATE_ID).unwrap();
        network_list::commit(
            &mut cache,
            Vec::new(),
            vec![Network::new_with_id("eth")],
            &mut state,
        )
        .unwrap();
        cache.put(state).unwrap();

        let mut data = vec![0u8; 32];
        data.extend(encode_i64(5));
        let outcome = SetBlockNumbersForEpoch.execute(&mut ctx(&mut cache), &data).unwrap();
        assert_eq!(outcome.consumed, 33);

        let nebn: Nebn = cache.get(&ids::nebn_id(1, "eth")).unwrap().unwrap();
        assert_eq!(nebn.delta, 5);
        assert_eq!(nebn.block_number, 5);

        let eth: Network = cache.get("eth").unwrap().unwrap();
        assert_eq!(eth.latest_valid_block_number.as_deref(), Some(nebn.id.as_str()));
    }
}
