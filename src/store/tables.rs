//! File-backed record tables.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the given id in the table.
    #[error("no record with id {id} in table {table}")]
    NotFound { table: String, id: String },

    /// Reading or writing the data file failed.
    #[error("data file access failed: {0}")]
    Io(#[from] std::io::Error),

    /// The data file or a record could not be (de)serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

type Tables = BTreeMap<String, Vec<Value>>;

/// Named tables of JSON records, mirrored wholesale to a single file.
///
/// Records keep insertion order. Every record is expected to carry a string
/// `id` field; `update` and `delete` address records by it.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    tables: Mutex<Tables>,
}

impl Store {
    /// Open a store backed by `path`, loading existing tables if the file
    /// exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tables = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Tables::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            tables: Mutex::new(tables),
        })
    }

    /// Append a record to a table and persist.
    pub fn insert(&self, table: &str, record: Value) -> Result<(), StoreError> {
        let mut tables = self.lock();
        tables.entry(table.to_string()).or_default().push(record);
        self.persist(&tables)
    }

    /// Return records matching all field equalities in `filter`, in
    /// insertion order. No filter returns the whole table.
    pub fn select(&self, table: &str, filter: Option<&Map<String, Value>>) -> Vec<Value> {
        let tables = self.lock();
        let Some(records) = tables.get(table) else {
            return Vec::new();
        };

        records
            .iter()
            .filter(|record| match filter {
                Some(fields) => fields.iter().all(|(key, value)| record.get(key) == Some(value)),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Replace all non-id fields of the record with `id` and persist.
    ///
    /// The `id` field of the stored record is kept as-is even if `fields`
    /// carries one.
    pub fn update(&self, table: &str, id: &str, fields: Map<String, Value>) -> Result<(), StoreError> {
        let mut tables = self.lock();
        let record = tables
            .get_mut(table)
            .and_then(|records| records.iter_mut().find(|record| has_id(record, id)))
            .ok_or_else(|| StoreError::NotFound {
                table: table.to_string(),
                id: id.to_string(),
            })?;

        let mut replacement = fields;
        replacement.insert("id".to_string(), Value::String(id.to_string()));
        *record = Value::Object(replacement);

        self.persist(&tables)
    }

    /// Remove the record with `id` and persist.
    pub fn delete(&self, table: &str, id: &str) -> Result<(), StoreError> {
        let mut tables = self.lock();
        let not_found = || StoreError::NotFound {
            table: table.to_string(),
            id: id.to_string(),
        };

        let records = tables.get_mut(table).ok_or_else(not_found)?;
        let position = records
            .iter()
            .position(|record| has_id(record, id))
            .ok_or_else(not_found)?;
        records.remove(position);

        self.persist(&tables)
    }

    /// Rewrite the whole file from the in-memory tables.
    fn persist(&self, tables: &Tables) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(tables)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // A poisoned lock only means another request panicked mid-operation;
        // the tables themselves are still a consistent snapshot.
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn has_id(record: &Value, id: &str) -> bool {
    record.get("id").and_then(Value::as_str) == Some(id)
}
