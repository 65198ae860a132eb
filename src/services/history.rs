//! History service
//!
//! Read-only, newest-first views of the audit log and the stock transfer
//! history. Each row carries the display labels for its subject and actor,
//! with fallbacks for records whose equipment or user is gone.

use std::collections::HashMap;

use crate::audit::{render, ActorContext, AuditLogEntry, StockTransferRecord};
use crate::config::Settings;
use crate::error::TrackerResult;
use crate::models::{EquipmentId, UserId};
use crate::storage::Storage;

use super::permissions::{authorize, Access};

/// An audit entry with resolved labels
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRow {
    pub entry: AuditLogEntry,
    /// Equipment name, or "deleted equipment"
    pub subject: String,
    /// Username, or "unknown"
    pub actor: String,
}

/// A transfer record with resolved labels
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRow {
    pub record: StockTransferRecord,
    pub subject: String,
    pub actor: String,
}

/// Service for browsing history. Restricted to administrators.
pub struct HistoryService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> HistoryService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Most recent audit entries; `None` uses the configured default limit
    pub fn audit_log(
        &self,
        actor: &ActorContext,
        limit: Option<usize>,
    ) -> TrackerResult<Vec<AuditRow>> {
        authorize(actor, Access::Manage, self.settings)?;

        let entries = self.storage.audit_log.get_all()?;
        self.audit_rows(entries, limit)
    }

    /// Most recent audit entries about one piece of equipment
    pub fn audit_log_for(
        &self,
        actor: &ActorContext,
        equipment: EquipmentId,
        limit: Option<usize>,
    ) -> TrackerResult<Vec<AuditRow>> {
        authorize(actor, Access::Manage, self.settings)?;

        let entries = self.storage.audit_log.get_by_subject(equipment)?;
        self.audit_rows(entries, limit)
    }

    /// Every transfer of one piece of equipment
    pub fn transfers_for(
        &self,
        actor: &ActorContext,
        equipment: EquipmentId,
    ) -> TrackerResult<Vec<TransferRow>> {
        authorize(actor, Access::Manage, self.settings)?;

        let records = self.storage.transfers.get_by_subject(equipment)?;
        self.transfer_rows(records)
    }

    /// Every transfer, newest first
    pub fn transfers(&self, actor: &ActorContext) -> TrackerResult<Vec<TransferRow>> {
        authorize(actor, Access::Manage, self.settings)?;

        let records = self.storage.transfers.get_all()?;
        self.transfer_rows(records)
    }

    fn transfer_rows(&self, records: Vec<StockTransferRecord>) -> TrackerResult<Vec<TransferRow>> {
        let mut labels = Labels::new(self.storage);

        records
            .into_iter()
            .map(|record| -> TrackerResult<TransferRow> {
                Ok(TransferRow {
                    subject: labels.subject(Some(record.subject))?,
                    actor: labels.actor(record.actor)?,
                    record,
                })
            })
            .collect()
    }

    fn audit_rows(
        &self,
        entries: Vec<AuditLogEntry>,
        limit: Option<usize>,
    ) -> TrackerResult<Vec<AuditRow>> {
        let limit = limit.unwrap_or(self.settings.history_limit);
        let mut labels = Labels::new(self.storage);

        entries
            .into_iter()
            .take(limit)
            .map(|entry| -> TrackerResult<AuditRow> {
                Ok(AuditRow {
                    subject: labels.subject(entry.subject)?,
                    actor: labels.actor(entry.actor)?,
                    entry,
                })
            })
            .collect()
    }
}

/// Memoized label lookups for one listing
struct Labels<'a> {
    storage: &'a Storage,
    subjects: HashMap<EquipmentId, String>,
    actors: HashMap<UserId, String>,
}

impl<'a> Labels<'a> {
    fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            subjects: HashMap::new(),
            actors: HashMap::new(),
        }
    }

    fn subject(&mut self, id: Option<EquipmentId>) -> TrackerResult<String> {
        let Some(id) = id else {
            return Ok(render::DELETED_EQUIPMENT.to_string());
        };
        if let Some(label) = self.subjects.get(&id) {
            return Ok(label.clone());
        }

        let label = match self.storage.equipment.get(id)? {
            Some(equipment) => equipment.name,
            None => render::DELETED_EQUIPMENT.to_string(),
        };
        self.subjects.insert(id, label.clone());
        Ok(label)
    }

    fn actor(&mut self, id: Option<UserId>) -> TrackerResult<String> {
        let Some(id) = id else {
            return Ok(render::UNKNOWN_ACTOR.to_string());
        };
        if let Some(label) = self.actors.get(&id) {
            return Ok(label.clone());
        }

        let label = match self.storage.users.get(id)? {
            Some(user) => user.username,
            None => render::UNKNOWN_ACTOR.to_string(),
        };
        self.actors.insert(id, label.clone());
        Ok(label)
    }
}
