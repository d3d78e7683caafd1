//! Persisted key-value storage.
//!
//! Holds client-side state that outlives a single call, chiefly the session
//! token under [`TOKEN_KEY`]. Values are JSON; strings round-trip unchanged.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Key under which the session token is stored.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Key-value storage backend.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Typed helpers over any [`KeyValueStore`].
pub trait KeyValueStoreExt: KeyValueStore {
    /// A string value; non-string JSON is not coerced.
    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| serde_json::from_value(v).ok())
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        self.set(key, serde_json::to_value(value)?)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

/// Process-local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.inner.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.inner.clear();
        Ok(())
    }
}

/// Storage persisted to a JSON file, rewritten on every mutation.
///
/// A mutation is written to disk first and applied to memory only once the
/// write succeeds, so a failed write leaves both unchanged.
#[derive(Debug, Clone)]
pub struct FileStore {
    memory: MemoryStore,
    path: PathBuf,
    writer: Arc<Mutex<()>>,
}

impl FileStore {
    /// Open the store, loading existing contents if the file exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let memory = MemoryStore::new();
        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let map: BTreeMap<String, Value> = serde_json::from_reader(reader)?;
            for (k, v) in map {
                memory.inner.insert(k, v);
            }
            tracing::debug!(path = %path.display(), entries = memory.len(), "Loaded key-value store");
        }
        Ok(Self {
            memory,
            path,
            writer: Arc::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn snapshot(&self) -> BTreeMap<String, Value> {
        self.memory
            .inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }

    fn write(&self, map: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(writer, map)?;
        Ok(())
    }

    /// Write the staged contents, then apply `commit` to memory.
    fn stage<S, C>(&self, change: S, commit: C) -> Result<(), StorageError>
    where
        S: FnOnce(&mut BTreeMap<String, Value>),
        C: FnOnce(&MemoryStore) -> Result<(), StorageError>,
    {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut staged = self.snapshot();
        change(&mut staged);
        self.write(&staged).inspect_err(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "Key-value store write failed");
        })?;
        commit(&self.memory)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.memory.get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let staged_value = value.clone();
        self.stage(
            move |staged| {
                staged.insert(key.to_string(), staged_value);
            },
            |memory| memory.set(key, value),
        )
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.stage(
            |staged| {
                staged.remove(key);
            },
            |memory| memory.remove(key),
        )
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.stage(|staged| staged.clear(), |memory| memory.clear())
    }
}
