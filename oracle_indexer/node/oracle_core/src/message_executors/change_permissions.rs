//! Tag 5: `ChangePermissions` (§4.5.6). Records a permission change for an
//! address: a validity deadline plus the old and new permission-string
//! sets. The entities table has no standalone permission-entry kind, so
//! the produced `Message` itself is the permission-list entry; its id is
//! appended to `GlobalState.permissionList`.

use oracle_codec::decode_u64;
use oracle_entities::{ids, GlobalState, MessageBody, OracleError};

use crate::executor::{ExecutionContext, ExecutorOutcome, MessageExecutor};
use crate::message_executors::shared::decode_length_prefixed_string;

pub struct ChangePermissions;

impl MessageExecutor for ChangePermissions {
    fn tag(&self) -> u8 {
        5
    }

    fn execute(
        &self,
        ctx: &mut ExecutionContext,
        data: &[u8],
    ) -> Result<ExecutorOutcome, OracleError> {
        let mut state: GlobalState = ctx.cache.get_or_create(ids::CANONICAL_GLOBAL_STATE_ID)?;

        let mut cursor = 0usize;
        if data.len() < cursor + 20 {
            return Err(OracleError::Truncation { offset: cursor });
        }
        let mut address = [0u8; 20];
        address.copy_from_slice(&data[cursor..cursor + 20]);
        cursor += 20;

        let (valid_through, consumed) = decode_u64(data, cursor)?;
        cursor += consumed as usize;

        let (old_count, consumed) = decode_u64(data, cursor)?;
        cursor += consumed as usize;
        let mut old_permissions = Vec::with_capacity(old_count as usize);
        for _ in 0..old_count {
            let (s, consumed) = decode_length_prefixed_string(data, cursor)?;
            cursor += consumed;
            old_permissions.push(s);
        }

        let (new_count, consumed) = decode_u64(data, cursor)?;
        cursor += consumed as usize;
        let mut new_permissions = Vec::with_capacity(new_count as usize);
        for _ in 0..new_count {
            let (s, consumed) = decode_length_prefixed_string(data, cursor)?;
            cursor += consumed;
            new_permissions.push(s);
        }

        state.permission_list.push(ctx.message_id.clone());
        ctx.cache.put(state)?;

        Ok(ExecutorOutcome {
            consumed: cursor,
            body: MessageBody::ChangePermissions {
                address,
                valid_through,
                old_permissions,
                new_permissions,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use oracle_codec::encode_u64;
    use oracle_store::{InMemoryEntityStore, StoreCache};

    use super::*;
    use crate::executor::NetworkIdScheme;

    fn encode_str(s: &str) -> Vec<u8> {
        let mut out = encode_u64(s.len() as u64);
        out.extend_from_slice(s.as_bytes());
        out
    }

    #[test]
    fn records_permission_change() {
        let store = InMemoryEntityStore::new();
        let mut cache = StoreCache::new(&store);
        let mut ctx = ExecutionContext {
            cache: &mut cache,
            message_id: "msg-0".to_string(),
            network_id_scheme: NetworkIdScheme::ChainId,
        };

        let mut data = vec![0x11u8; 20];
        data.extend(encode_u64(1_000));
        data.extend(encode_u64(1));
        data.extend(encode_str("read"));
        data.extend(encode_u64(2));
        data.extend(encode_str("read"));
        data.extend(encode_str("write"));

        let outcome = ChangePermissions.execute(&mut ctx, &data).unwrap();
        assert_eq!(outcome.consumed, data.len());
        assert!(matches!(
            outcome.body,
            MessageBody::ChangePermissions { valid_through: 1_000, .. }
        ));

        let state: GlobalState = cache.get(ids::CANONICAL_GLOBAL_STATE_ID).unwrap().unwrap();
        assert_eq!(state.permission_list, vec!["msg-0".to_string()]);
    }
}
