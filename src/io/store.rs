use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{domain::FormSchema, error::StoreError};

/// Minimal string key-value persistence, in the spirit of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                path,
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.root)
            .and_then(|_| fs::write(&path, value))
            .map_err(|source| StoreError::Io {
                key: key.to_string(),
                path,
                source,
            })
    }
}

/// Saved schema snapshots, kept as a JSON list under one store key.
#[derive(Debug)]
pub struct SchemaLibrary<S> {
    store: S,
    key: String,
    schemas: Vec<FormSchema>,
}

impl<S: KeyValueStore> SchemaLibrary<S> {
    /// Load the saved list. Missing or unreadable data yields an empty library.
    pub fn load(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let schemas = match store.get(&key) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<FormSchema>>(&raw).unwrap_or_else(|err| {
                warn!(key = %key, error = %err, "discarding unreadable saved schemas");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(key = %key, error = %err, "failed to read saved schemas");
                Vec::new()
            }
        };
        Self {
            store,
            key,
            schemas,
        }
    }

    pub fn schemas(&self) -> &[FormSchema] {
        &self.schemas
    }

    pub fn find(&self, id: &str) -> Option<&FormSchema> {
        self.schemas.iter().find(|schema| schema.id == id)
    }

    /// Insert or replace by schema id, then persist the whole list.
    /// The in-memory list only changes when persisting succeeds.
    pub fn upsert(&mut self, schema: FormSchema) -> Result<(), StoreError> {
        let mut next = self.schemas.clone();
        match next.iter_mut().find(|saved| saved.id == schema.id) {
            Some(saved) => *saved = schema,
            None => next.push(schema),
        }
        let payload = serde_json::to_string(&next)?;
        self.store.set(&self.key, payload)?;
        debug!(key = %self.key, count = next.len(), "persisted saved schemas");
        self.schemas = next;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
