//! Tag 3: `RegisterNetworks` (§4.5.4). Removes networks by index out of
//! the active list, then appends newly registered ones keyed by chain id
//! (or a legacy sequential counter, per `NetworkIdScheme`).

use oracle_codec::decode_u64;
use oracle_entities::{ids, Entity, GlobalState, MessageBody, Network, OracleError};

use crate::executor::{ExecutionContext, ExecutorOutcome, MessageExecutor, NetworkIdScheme};
use crate::message_executors::shared::{self, Removals};
use crate::network_list;

pub struct RegisterNetworks;

impl MessageExecutor for RegisterNetworks {
    fn tag(&self) -> u8 {
        3
    }

    fn execute(
        &self,
        ctx: &mut ExecutionContext,
        data: &[u8],
    ) -> Result<ExecutorOutcome, OracleError> {
        let mut state: GlobalState = ctx.cache.get_or_create(ids::CANONICAL_GLOBAL_STATE_ID)?;

        let (Removals {
            mut retained,
            removed,
            removed_ids,
        }, mut cursor) = shared::apply_removals(ctx.cache, &state, data, &ctx.message_id)?;

        let (add_count, consumed) = decode_u64(data, cursor)?;
        cursor += consumed as usize;

        let mut added_ids = Vec::with_capacity(add_count as usize);
        for i in 0..add_count {
            let (chain_id_str, consumed) = shared::decode_length_prefixed_string(data, cursor)?;
            cursor += consumed;

            let id = match ctx.network_id_scheme {
                NetworkIdScheme::ChainId => chain_id_str.clone(),
                NetworkIdScheme::LegacyCounter => (state.network_count + i).to_string(),
            };

            let mut network = Network::new_with_id(&id);
            network.alias = match ctx.network_id_scheme {
                NetworkIdScheme::LegacyCounter => Some(chain_id_str),
                NetworkIdScheme::ChainId => None,
            };
            network.added_at = ctx.message_id.clone();
            network.last_updated_at = ctx.message_id.clone();

            added_ids.push(id);
            retained.push(network);
        }

        state.network_count += add_count;
        network_list::commit(ctx.cache, removed, retained, &mut state)?;
        ctx.cache.put(state)?;

        Ok(ExecutorOutcome {
            consumed: cursor,
            body: MessageBody::RegisterNetworks {
                removed: removed_ids,
                added: added_ids,
            },
        })
    }
}
