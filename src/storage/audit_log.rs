//! Audit log repository for JSON storage
//!
//! Append-only from the application's point of view: entries are never
//! edited except to clear a reference to a removed equipment or user.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::audit::AuditLogEntry;
use crate::error::TrackerError;
use crate::models::{AuditEntryId, EquipmentId, UserId};

use super::table::{Record, Table, TableCheckpoint};

impl Record for AuditLogEntry {
    type Key = AuditEntryId;

    fn key(&self) -> AuditEntryId {
        self.id
    }
}

/// Repository for audit log persistence
pub struct AuditLogRepository {
    table: Table<AuditLogEntry>,
}

impl AuditLogRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: Table::new(path),
        }
    }

    pub fn load(&self) -> Result<(), TrackerError> {
        self.table.load()
    }

    pub fn save(&self) -> Result<(), TrackerError> {
        self.table.save()
    }

    pub fn append(&self, entry: AuditLogEntry) -> Result<(), TrackerError> {
        self.table.push(entry)
    }

    /// Timestamp for a new entry: `now`, but never earlier than the last entry
    pub fn next_timestamp(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, TrackerError> {
        Ok(match self.table.last()? {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        })
    }

    /// All entries, newest first
    pub fn get_all(&self) -> Result<Vec<AuditLogEntry>, TrackerError> {
        let mut entries = self.table.all()?;
        entries.reverse();
        Ok(entries)
    }

    /// Entries still attached to a piece of equipment, newest first
    pub fn get_by_subject(&self, id: EquipmentId) -> Result<Vec<AuditLogEntry>, TrackerError> {
        let mut entries = self.table.filter(|e| e.subject == Some(id))?;
        entries.reverse();
        Ok(entries)
    }

    /// Clear the subject of every entry about a removed piece of equipment
    pub(super) fn detach_subject(&self, id: EquipmentId) -> Result<usize, TrackerError> {
        self.table.update_each(|entry| {
            if entry.subject == Some(id) {
                entry.subject = None;
                true
            } else {
                false
            }
        })
    }

    /// Clear the actor of every entry written by a removed user
    pub(super) fn detach_actor(&self, id: UserId) -> Result<usize, TrackerError> {
        self.table.update_each(|entry| {
            if entry.actor == Some(id) {
                entry.actor = None;
                true
            } else {
                false
            }
        })
    }

    pub fn count(&self) -> Result<usize, TrackerError> {
        self.table.len()
    }

    pub(super) fn checkpoint(&self) -> Result<TableCheckpoint<AuditLogEntry>, TrackerError> {
        self.table.checkpoint()
    }

    pub(super) fn restore(
        &self,
        checkpoint: TableCheckpoint<AuditLogEntry>,
    ) -> Result<(), TrackerError> {
        self.table.restore(checkpoint)
    }
}
