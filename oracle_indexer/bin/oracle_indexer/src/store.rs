//! A small JSON-file-backed `EntityStore`, standing in for the excluded
//! production storage engine (§1) so the CLI harness can retain state
//! across separate invocations. Loads the whole file into memory on open
//! and rewrites it on every `save`; fine for a local harness, not a
//! recommendation for production use (see DESIGN.md).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use oracle_entities::{EntityKind, OracleError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Serialize, Deserialize)]
struct FileContents {
    rows: HashMap<String, Value>,
}

fn row_key(kind: EntityKind, id: &str) -> String {
    format!("{}:{id}", kind.as_str())
}

pub struct JsonFileEntityStore {
    path: PathBuf,
    contents: Mutex<FileContents>,
}

impl JsonFileEntityStore {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            FileContents::default()
        };
        Ok(Self {
            path,
            contents: Mutex::new(contents),
        })
    }

    pub fn flush(&self) -> anyhow::Result<()> {
        let contents = self
            .contents
            .lock()
            .map_err(|_| anyhow::anyhow!("poisoned lock"))?;
        let raw = serde_json::to_string_pretty(&*contents)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl oracle_store::EntityStore for JsonFileEntityStore {
    fn load(&self, kind: EntityKind, id: &str) -> Result<Option<Value>, OracleError> {
        let contents = self
            .contents
            .lock()
            .map_err(|_| OracleError::EntityStoreFailure("poisoned lock".into()))?;
        Ok(contents.rows.get(&row_key(kind, id)).cloned())
    }

    fn save(&self, kind: EntityKind, id: &str, value: Value) -> Result<(), OracleError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| OracleError::EntityStoreFailure("poisoned lock".into()))?;
        contents.rows.insert(row_key(kind, id), value);
        Ok(())
    }
}
