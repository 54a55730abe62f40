use std::collections::HashMap;

use oracle_entities::{Entity, EntityKind, OracleError};
use serde_json::Value;

use crate::entity_store::EntityStore;

#[derive(Debug, Clone)]
enum Slot {
    Loaded { value: Value, dirty: bool },
    /// The store was queried once and had nothing for this id; memoized so
    /// repeated `has`/`get` calls within the invocation don't re-query.
    Absent,
}

/// A per-invocation write-back cache over an `EntityStore` (§4.3). Every
/// executor mutation is funnelled through this type; nothing in
/// `oracle_core` talks to the `EntityStore` directly.
pub struct StoreCache<'s> {
    store: &'s dyn EntityStore,
    entries: HashMap<(EntityKind, String), Slot>,
}

impl<'s> StoreCache<'s> {
    pub fn new(store: &'s dyn EntityStore) -> Self {
        Self {
            store,
            entries: HashMap::new(),
        }
    }

    fn key(kind: EntityKind, id: &str) -> (EntityKind, String) {
        (kind, id.to_string())
    }

    /// Loads and decodes the entity at `(T::KIND, id)`, querying the
    /// backing store at most once per id per invocation.
    pub fn get<T: Entity>(&mut self, id: &str) -> Result<Option<T>, OracleError> {
        let key = Self::key(T::KIND, id);
        if !self.entries.contains_key(&key) {
            let loaded = self.store.load(T::KIND, id)?;
            let slot = match loaded {
                Some(value) => Slot::Loaded {
                    value,
                    dirty: false,
                },
                None => Slot::Absent,
            };
            self.entries.insert(key.clone(), slot);
        }

        match self.entries.get(&key).expect("just inserted") {
            Slot::Absent => Ok(None),
            Slot::Loaded { value, .. } => {
                let entity: T = serde_json::from_value(value.clone()).map_err(|err| {
                    OracleError::EntityStoreFailure(format!(
                        "corrupt {} entity {id}: {err}",
                        T::KIND.as_str()
                    ))
                })?;
                Ok(Some(entity))
            }
        }
    }

    /// Returns the cached/stored entity at `id`, or a freshly constructed
    /// default marked dirty (§4.3).
    pub fn get_or_create<T: Entity>(&mut self, id: &str) -> Result<T, OracleError> {
        if let Some(existing) = self.get::<T>(id)? {
            return Ok(existing);
        }
        let fresh = T::new_with_id(id);
        self.put(fresh.clone())?;
        Ok(fresh)
    }

    /// `true` iff the cache or the backing store has an entry for `(kind,
    /// id)`. A store miss is memoized so subsequent calls don't re-query.
    pub fn has(&mut self, kind: EntityKind, id: &str) -> Result<bool, OracleError> {
        let key = Self::key(kind, id);
        if let Some(slot) = self.entries.get(&key) {
            return Ok(matches!(slot, Slot::Loaded { .. }));
        }
        let loaded = self.store.load(kind, id)?;
        let present = loaded.is_some();
        let slot = match loaded {
            Some(value) => Slot::Loaded {
                value,
                dirty: false,
            },
            None => Slot::Absent,
        };
        self.entries.insert(key, slot);
        Ok(present)
    }

    /// Writes `entity` into the cache and marks it dirty, staging it for
    /// the next `commit()`.
    pub fn put<T: Entity>(&mut self, entity: T) -> Result<(), OracleError> {
        let key = Self::key(T::KIND, entity.id());
        let value = serde_json::to_value(&entity).map_err(|err| {
            OracleError::EntityStoreFailure(format!("cannot serialize entity: {err}"))
        })?;
        self.entries
            .insert(key, Slot::Loaded { value, dirty: true });
        Ok(())
    }

    /// Writes every dirty entry to the backing store, in arbitrary order
    /// (§4.3). Returns the number of entities written.
    pub fn commit(mut self) -> Result<usize, OracleError> {
        let mut written = 0;
        for ((kind, id), slot) in self.entries.drain() {
            if let Slot::Loaded { value, dirty: true } = slot {
                self.store.save(kind, &id, value)?;
                written += 1;
            }
        }
        Ok(written)
    }

    /// Discards every staged mutation without touching the backing store
    /// (the rollback path of §4.6/§7).
    pub fn discard(self) {
        tracing::debug!(entries = self.entries.len(), "discarding store cache");
    }
}

#[cfg(test)]
mod tests {
    use oracle_entities::GlobalState;

    use super::*;
    use crate::entity_store::InMemoryEntityStore;

    #[test]
    fn get_or_create_returns_default_and_marks_dirty() {
        let store = InMemoryEntityStore::new();
        let mut cache = StoreCache::new(&store);

        let state: GlobalState = cache.get_or_create("0").unwrap();
        assert_eq!(state.id, "0");
        assert_eq!(state.network_count, 0);

        // Not yet committed: the backing store has nothing.
        assert!(store.load(EntityKind::GlobalState, "0").unwrap().is_none());

        cache.commit().unwrap();
        assert!(store.load(EntityKind::GlobalState, "0").unwrap().is_some());
    }

    #[test]
    fn has_memoizes_absence() {
        let store = InMemoryEntityStore::new();
        let mut cache = StoreCache::new(&store);
        assert!(!cache.has(EntityKind::GlobalState, "missing").unwrap());
        assert!(!cache.has(EntityKind::GlobalState, "missing").unwrap());
    }

    #[test]
    fn discard_never_reaches_the_store() {
        let store = InMemoryEntityStore::new();
        let mut cache = StoreCache::new(&store);
        let mut state: GlobalState = cache.get_or_create("0").unwrap();
        state.network_count = 5;
        cache.put(state).unwrap();
        cache.discard();
        assert!(store.load(EntityKind::GlobalState, "0").unwrap().is_none());
    }

    #[test]
    fn get_reflects_uncommitted_put() {
        let store = InMemoryEntityStore::new();
        let mut cache = StoreCache::new(&store);
        let mut state: GlobalState = cache.get_or_create("0").unwrap();
        state.network_count = 7;
        cache.put(state).unwrap();

        let reread: GlobalState = cache.get("0").unwrap().unwrap();
        assert_eq!(reread.network_count, 7);
    }
}
