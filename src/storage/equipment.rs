//! Equipment repository for JSON storage
//!
//! Manages equipment.json and enforces asset tag and serial number
//! uniqueness.

use std::path::PathBuf;

use crate::error::TrackerError;
use crate::models::{Equipment, EquipmentId, StockId};

use super::table::{Record, Table, TableCheckpoint};

impl Record for Equipment {
    type Key = EquipmentId;

    fn key(&self) -> EquipmentId {
        self.id
    }
}

/// Repository for equipment persistence
pub struct EquipmentRepository {
    table: Table<Equipment>,
}

impl EquipmentRepository {
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

    /// Reserve the key for a new record
    pub fn next_id(&self) -> Result<EquipmentId, TrackerError> {
        Ok(EquipmentId::new(self.table.allocate_key()?))
    }

    pub fn get(&self, id: EquipmentId) -> Result<Option<Equipment>, TrackerError> {
        self.table.get(id)
    }

    /// All equipment, newest first
    pub fn get_all(&self) -> Result<Vec<Equipment>, TrackerError> {
        let mut equipment = self.table.all()?;
        equipment.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(equipment)
    }

    /// Equipment assigned to a stock, newest first
    pub fn get_by_stock(&self, stock_id: StockId) -> Result<Vec<Equipment>, TrackerError> {
        let mut equipment = self.table.filter(|e| e.stock_id == Some(stock_id))?;
        equipment.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(equipment)
    }

    /// Insert a new record, rejecting duplicate asset tags and serial numbers
    pub fn insert(&self, equipment: Equipment) -> Result<(), TrackerError> {
        if self.table.get(equipment.id)?.is_some() {
            return Err(TrackerError::Conflict {
                field: "equipment id",
                value: equipment.id.to_string(),
            });
        }
        self.check_unique(&equipment)?;
        self.table.push(equipment)
    }

    /// Replace an existing record, rejecting collisions with other records
    pub fn update(&self, equipment: Equipment) -> Result<(), TrackerError> {
        self.check_unique(&equipment)?;
        let id = equipment.id;
        if !self.table.replace(equipment)? {
            return Err(TrackerError::equipment_not_found(id.to_string()));
        }
        Ok(())
    }

    /// Remove a record. Callers go through `Storage::delete_equipment` so
    /// dependent history is handled too.
    pub(super) fn remove(&self, id: EquipmentId) -> Result<Option<Equipment>, TrackerError> {
        self.table.remove(id)
    }

    pub fn count(&self) -> Result<usize, TrackerError> {
        self.table.len()
    }

    fn check_unique(&self, candidate: &Equipment) -> Result<(), TrackerError> {
        if self
            .table
            .any(|e| e.id != candidate.id && e.asset_tag == candidate.asset_tag)?
        {
            return Err(TrackerError::Conflict {
                field: "asset tag",
                value: candidate.asset_tag.to_string(),
            });
        }

        if self
            .table
            .any(|e| e.id != candidate.id && e.serial_number == candidate.serial_number)?
        {
            return Err(TrackerError::Conflict {
                field: "serial number",
                value: candidate.serial_number.clone(),
            });
        }

        Ok(())
    }

    pub(super) fn checkpoint(&self) -> Result<TableCheckpoint<Equipment>, TrackerError> {
        self.table.checkpoint()
    }

    pub(super) fn restore(&self, checkpoint: TableCheckpoint<Equipment>) -> Result<(), TrackerError> {
        self.table.restore(checkpoint)
    }
}
