//! Tag 4: `RegisterNetworksAndAliases` (§4.5.5). Identical removal
//! semantics to `RegisterNetworks`, but each addition also carries an
//! explicit human-readable alias string.

use oracle_codec::decode_u64;
use oracle_entities::{ids, Entity, GlobalState, MessageBody, Network, OracleError};

use crate::executor::{ExecutionContext, ExecutorOutcome, MessageExecutor, NetworkIdScheme};
use crate::message_executors::shared::{self, Removals};
use crate::network_list;

pub struct RegisterNetworksAndAliases;

impl MessageExecutor for RegisterNetworksAndAliases {
    fn tag(&self) -> u8 {
        4
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

        let mut added = Vec::with_capacity(add_count as usize);
        for i in 0..add_count {
            let (chain_id_str, consumed) = shared::decode_length_prefixed_string(data, cursor)?;
            cursor += consumed;
            let (alias, consumed) = shared::decode_length_prefixed_string(data, cursor)?;
            cursor += consumed;

            let id = match ctx.network_id_scheme {
                NetworkIdScheme::ChainId => chain_id_str.clone(),
                NetworkIdScheme::LegacyCounter => (state.network_count + i).to_string(),
            };

            let mut network = Network::new_with_id(&id);
            network.alias = Some(alias.clone());
            network.added_at = ctx.message_id.clone();
            network.last_updated_at = ctx.message_id.clone();

            added.push((id.clone(), alias));
            retained.push(network);
        }

        state.network_count += add_count;
        network_list::commit(ctx.cache, removed, retained, &mut state)?;
        ctx.cache.put(state)?;

        Ok(ExecutorOutcome {
            consumed: cursor,
            body: MessageBody::RegisterNetworksAndAliases {
                removed: removed_ids,
                added,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use oracle_codec::encode_u64;
    use oracle_store::{InMemoryEntityStore, StoreCache};

    use super::*;

    fn encode_str(s: &str) -> Vec<u8> {
        let mut out = encode_u64(s.len() as u64);
        out.extend_from_slice(s.as_bytes());
        out
    }

    fn ctx<'a, 'b>(cache: &'a mut StoreCache<'b>) -> ExecutionContext<'a, 'b> {
        ExecutionContext {
            cache,
            message_id: "msg-0".to_string(),
            network_id_scheme: NetworkIdScheme::ChainId,
        }
    }

    #[test]
    fn registers_network_with_alias() {
        let store = InMemoryEntityStore::new();
        let mut cache = StoreCache::new(&store);

        let mut data = encode_u64(0);
        data.extend(encode_u64(1));
        data.extend(encode_str("eth"));
        data.extend(encode_str("Ethereum Mainnet"));

        let outcome = RegisterNetworksAndAliases
            .execute(&mut ctx(&mut cache), &data)
            .unwrap();
        assert!(matches!(
            outcome.body,
            MessageBody::RegisterNetworksAndAliases { added, .. }
                if added == vec![("eth".to_string(), "Ethereum Mainnet".to_string())]
        ));

        let network: Network = cache.get("eth").unwrap().unwrap();
        assert_eq!(network.alias.as_deref(), Some("Ethereum Mainnet"));
    }
}
