//! Stock transfer repository for JSON storage

use std::path::PathBuf;

use crate::audit::StockTransferRecord;
use crate::error::TrackerError;
use crate::models::{EquipmentId, TransferId, UserId};

use super::table::{Record, Table, TableCheckpoint};

impl Record for StockTransferRecord {
    type Key = TransferId;

    fn key(&self) -> TransferId {
        self.id
    }
}

/// Repository for stock transfer history
pub struct TransferRepository {
    table: Table<StockTransferRecord>,
}

impl TransferRepository {
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

    pub fn append(&self, record: StockTransferRecord) -> Result<(), TrackerError> {
        self.table.push(record)
    }

    /// All transfers, newest first
    pub fn get_all(&self) -> Result<Vec<StockTransferRecord>, TrackerError> {
        let mut records = self.table.all()?;
        records.reverse();
        Ok(records)
    }

    /// Transfers of one piece of equipment, newest first
    pub fn get_by_subject(&self, id: EquipmentId) -> Result<Vec<StockTransferRecord>, TrackerError> {
        let mut records = self.table.filter(|r| r.subject == id)?;
        records.reverse();
        Ok(records)
    }

    /// Remove the transfers owned by a removed piece of equipment
    pub(super) fn remove_by_subject(&self, id: EquipmentId) -> Result<usize, TrackerError> {
        self.table.remove_where(|r| r.subject == id)
    }

    pub(super) fn detach_actor(&self, id: UserId) -> Result<usize, TrackerError> {
        self.table.update_each(|record| {
            if record.actor == Some(id) {
                record.actor = None;
                true
            } else {
                false
            }
        })
    }

    pub fn count(&self) -> Result<usize, TrackerError> {
        self.table.len()
    }

    pub(super) fn checkpoint(&self) -> Result<TableCheckpoint<StockTransferRecord>, TrackerError> {
        self.table.checkpoint()
    }

    pub(super) fn restore(
        &self,
        checkpoint: TableCheckpoint<StockTransferRecord>,
    ) -> Result<(), TrackerError> {
        self.table.restore(checkpoint)
    }
}
