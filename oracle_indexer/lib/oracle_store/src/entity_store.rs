use oracle_entities::{EntityKind, OracleError};
use serde_json::Value;

/// The persistence collaborator (§1, §6): load/save by `(kind, id)`.
/// Out of scope for this system: the actual storage engine behind it is a
/// black box — implementations may be backed by a database, a file, or (as
/// here, for tests and the local harness) plain memory.
pub trait EntityStore {
    fn load(&self, kind: EntityKind, id: &str) -> Result<Option<Value>, OracleError>;
    fn save(&self, kind: EntityKind, id: &str, value: Value) -> Result<(), OracleError>;
}

/// An in-memory `EntityStore`, standing in for the content-addressed
/// entity store the production system runs against. Suitable for the CLI
/// harness and for tests; not a recommendation for production persistence
/// (see DESIGN.md).
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    rows: std::sync::Mutex<std::collections::HashMap<(EntityKind, String), Value>>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntityStore for InMemoryEntityStore {
    fn load(&self, kind: EntityKind, id: &str) -> Result<Option<Value>, OracleError> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| OracleError::EntityStoreFailure("poisoned lock".into()))?;
        Ok(rows.get(&(kind, id.to_string())).cloned())
    }

    fn save(&self, kind: EntityKind, id: &str, value: Value) -> Result<(), OracleError> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| OracleError::EntityStoreFailure("poisoned lock".into()))?;
        rows.insert((kind, id.to_string()), value);
        Ok(())
    }
}
