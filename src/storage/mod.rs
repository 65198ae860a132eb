//! Storage layer for equiptrack
//!
//! One JSON file per table with atomic writes. `Storage` coordinates the
//! repositories: it owns the reference rules between tables and wraps
//! mutations in a unit of work that either persists every table or rolls all
//! of them back.

pub mod audit_log;
pub mod equipment;
pub mod file_io;
pub mod stocks;
pub mod table;
pub mod transfers;
pub mod users;

pub use audit_log::AuditLogRepository;
pub use equipment::EquipmentRepository;
pub use file_io::{read_json, write_json_atomic};
pub use stocks::StockRepository;
pub use transfers::TransferRepository;
pub use users::UserRepository;

use std::sync::Mutex;

use tracing::{debug, warn};

use crate::config::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::audit::{AuditLogEntry, StockTransferRecord};
use crate::models::{Equipment, EquipmentId, Stock, StockId, User, UserId};

use self::table::TableCheckpoint;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TrackerPaths,
    pub equipment: EquipmentRepository,
    pub stocks: StockRepository,
    pub users: UserRepository,
    pub audit_log: AuditLogRepository,
    pub transfers: TransferRepository,
    /// Serializes units of work
    commit_lock: Mutex<()>,
}

struct Checkpoint {
    equipment: TableCheckpoint<Equipment>,
    stocks: TableCheckpoint<Stock>,
    users: TableCheckpoint<User>,
    audit_log: TableCheckpoint<AuditLogEntry>,
    transfers: TableCheckpoint<StockTransferRecord>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            equipment: EquipmentRepository::new(paths.equipment_file()),
            stocks: StockRepository::new(paths.stocks_file()),
            users: UserRepository::new(paths.users_file()),
            audit_log: AuditLogRepository::new(paths.audit_log_file()),
            transfers: TransferRepository::new(paths.transfers_file()),
            commit_lock: Mutex::new(()),
            paths,
        })
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Load all tables from disk
    pub fn load_all(&self) -> Result<(), TrackerError> {
        self.equipment.load()?;
        self.stocks.load()?;
        self.users.load()?;
        self.audit_log.load()?;
        self.transfers.load()?;
        Ok(())
    }

    /// Save all tables to disk, history first
    pub fn save_all(&self) -> Result<(), TrackerError> {
        self.audit_log.save()?;
        self.transfers.save()?;
        self.equipment.save()?;
        self.stocks.save()?;
        self.users.save()?;
        Ok(())
    }

    /// Run `work` as one unit of work
    ///
    /// On success every table is persisted. If `work` or the persist step
    /// fails, all tables are restored to their state before the call and the
    /// error is returned.
    pub fn transaction<T, F>(&self, work: F) -> TrackerResult<T>
    where
        F: FnOnce(&Storage) -> TrackerResult<T>,
    {
        let _guard = self.commit_lock.lock().map_err(|e| {
            TrackerError::StoreUnavailable(format!("Failed to acquire commit lock: {}", e))
        })?;

        let checkpoint = self.checkpoint()?;

        let value = match work(self) {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "unit of work failed, rolling back");
                self.restore(checkpoint)?;
                return Err(err);
            }
        };

        if let Err(err) = self.save_all() {
            warn!(error = %err, "commit failed, rolling back");
            self.restore(checkpoint)?;
            // Tables written before the failure must be put back as well
            if let Err(restore_err) = self.save_all() {
                warn!(error = %restore_err, "could not rewrite tables after failed commit");
            }
            return Err(err);
        }

        Ok(value)
    }

    /// Remove a piece of equipment with the reference rules applied
    ///
    /// Its transfer records are removed with it; audit entries about it are
    /// kept with their subject cleared.
    pub fn delete_equipment(&self, id: EquipmentId) -> Result<Equipment, TrackerError> {
        let equipment = self
            .equipment
            .remove(id)?
            .ok_or_else(|| TrackerError::equipment_not_found(id.to_string()))?;

        let transfers = self.transfers.remove_by_subject(id)?;
        let detached = self.audit_log.detach_subject(id)?;
        debug!(equipment = %id, transfers, detached, "equipment removed");

        Ok(equipment)
    }

    /// Remove a user, clearing the actor on every record attributed to them
    pub fn delete_user(&self, id: UserId) -> Result<User, TrackerError> {
        let user = self
            .users
            .remove(id)?
            .ok_or_else(|| TrackerError::user_not_found(id.to_string()))?;

        let entries = self.audit_log.detach_actor(id)?;
        let transfers = self.transfers.detach_actor(id)?;
        debug!(user = %id, entries, transfers, "user removed");

        Ok(user)
    }

    /// Remove a stock; the caller is responsible for its equipment first
    pub fn delete_stock(&self, id: StockId) -> Result<Stock, TrackerError> {
        if !self.equipment.get_by_stock(id)?.is_empty() {
            return Err(TrackerError::Validation(format!(
                "Stock {} still has equipment assigned",
                id
            )));
        }

        self.stocks
            .remove(id)?
            .ok_or_else(|| TrackerError::stock_not_found(id.to_string()))
    }

    fn checkpoint(&self) -> Result<Checkpoint, TrackerError> {
        Ok(Checkpoint {
            equipment: self.equipment.checkpoint()?,
            stocks: self.stocks.checkpoint()?,
            users: self.users.checkpoint()?,
            audit_log: self.audit_log.checkpoint()?,
            transfers: self.transfers.checkpoint()?,
        })
    }

    fn restore(&self, checkpoint: Checkpoint) -> Result<(), TrackerError> {
        self.equipment.restore(checkpoint.equipment)?;
        self.stocks.restore(checkpoint.stocks)?;
        self.users.restore(checkpoint.users)?;
        self.audit_log.restore(checkpoint.audit_log)?;
        self.transfers.restore(checkpoint.transfers)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tempfile::TempDir;

    /// Fresh storage rooted in a temporary directory
    pub fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }
}
