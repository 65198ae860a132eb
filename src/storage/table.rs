//! In-memory table backed by one JSON file
//!
//! Rows are kept in insertion order behind an `RwLock`. Tables with
//! sequential keys persist their key counter alongside the rows so keys are
//! never reused, even after deletions.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

use super::file_io::{read_json, write_json_atomic};

/// A row stored in a `Table`
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Key: Copy + PartialEq;

    fn key(&self) -> Self::Key;
}

/// On-disk layout of a table
#[derive(Debug, Serialize, Deserialize)]
struct TableFile<R> {
    #[serde(default)]
    last_key: u64,
    #[serde(default = "Vec::new")]
    rows: Vec<R>,
}

impl<R> Default for TableFile<R> {
    fn default() -> Self {
        Self {
            last_key: 0,
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct TableState<R> {
    last_key: u64,
    rows: Vec<R>,
}

/// Copy of a table's contents used to roll back a failed transaction
#[derive(Debug, Clone)]
pub struct TableCheckpoint<R>(TableState<R>);

pub struct Table<R: Record> {
    path: PathBuf,
    state: RwLock<TableState<R>>,
}

impl<R: Record> Table<R> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(TableState {
                last_key: 0,
                rows: Vec::new(),
            }),
        }
    }

    pub fn load(&self) -> Result<(), TrackerError> {
        let file: TableFile<R> = read_json(&self.path)?;
        let mut state = self.write()?;
        state.last_key = file.last_key;
        state.rows = file.rows;
        Ok(())
    }

    pub fn save(&self) -> Result<(), TrackerError> {
        let state = self.read()?;
        let file = TableFile {
            last_key: state.last_key,
            rows: state.rows.clone(),
        };
        write_json_atomic(&self.path, &file)
    }

    /// Reserve the next sequential key
    pub fn allocate_key(&self) -> Result<u64, TrackerError> {
        let mut state = self.write()?;
        state.last_key += 1;
        Ok(state.last_key)
    }

    pub fn get(&self, key: R::Key) -> Result<Option<R>, TrackerError> {
        Ok(self.read()?.rows.iter().find(|r| r.key() == key).cloned())
    }

    /// All rows in insertion order
    pub fn all(&self) -> Result<Vec<R>, TrackerError> {
        Ok(self.read()?.rows.clone())
    }

    pub fn filter(&self, predicate: impl Fn(&R) -> bool) -> Result<Vec<R>, TrackerError> {
        Ok(self
            .read()?
            .rows
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect())
    }

    pub fn any(&self, predicate: impl Fn(&R) -> bool) -> Result<bool, TrackerError> {
        Ok(self.read()?.rows.iter().any(predicate))
    }

    pub fn last(&self) -> Result<Option<R>, TrackerError> {
        Ok(self.read()?.rows.last().cloned())
    }

    pub fn push(&self, row: R) -> Result<(), TrackerError> {
        self.write()?.rows.push(row);
        Ok(())
    }

    /// Replace the row with the same key; returns false if none exists
    pub fn replace(&self, row: R) -> Result<bool, TrackerError> {
        let mut state = self.write()?;
        match state.rows.iter_mut().find(|r| r.key() == row.key()) {
            Some(slot) => {
                *slot = row;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove(&self, key: R::Key) -> Result<Option<R>, TrackerError> {
        let mut state = self.write()?;
        let position = state.rows.iter().position(|r| r.key() == key);
        Ok(position.map(|index| state.rows.remove(index)))
    }

    /// Remove every matching row, returning how many were removed
    pub fn remove_where(&self, predicate: impl Fn(&R) -> bool) -> Result<usize, TrackerError> {
        let mut state = self.write()?;
        let before = state.rows.len();
        state.rows.retain(|r| !predicate(r));
        Ok(before - state.rows.len())
    }

    /// Apply `edit` to every row; returns how many rows it reported as changed
    pub fn update_each(&self, edit: impl Fn(&mut R) -> bool) -> Result<usize, TrackerError> {
        let mut state = self.write()?;
        Ok(state.rows.iter_mut().map(|r| edit(r)).filter(|c| *c).count())
    }

    pub fn len(&self) -> Result<usize, TrackerError> {
        Ok(self.read()?.rows.len())
    }

    pub fn checkpoint(&self) -> Result<TableCheckpoint<R>, TrackerError> {
        Ok(TableCheckpoint(self.read()?.clone()))
    }

    pub fn restore(&self, checkpoint: TableCheckpoint<R>) -> Result<(), TrackerError> {
        *self.write()? = checkpoint.0;
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TableState<R>>, TrackerError> {
        self.state.read().map_err(|e| {
            TrackerError::StoreUnavailable(format!("Failed to acquire read lock: {}", e))
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TableState<R>>, TrackerError> {
        self.state.write().map_err(|e| {
            TrackerError::StoreUnavailable(format!("Failed to acquire write lock: {}", e))
        })
    }
}
