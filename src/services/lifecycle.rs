//! Equipment lifecycle hooks
//!
//! Called explicitly by the equipment and stock services inside their unit
//! of work: `after_create` and `after_update` once the row is written,
//! `before_delete` while the row is still readable.

use crate::audit::{
    render, AuditAction, AuditLogEntry, AuditLogWriter, ActorContext, ChangeSet, StockNames,
};
use crate::config::StockLabelPolicy;
use crate::error::TrackerResult;
use crate::models::{Equipment, StockId};
use crate::storage::Storage;

/// Writes the audit entry for each equipment lifecycle event
pub struct EquipmentHooks<'a> {
    storage: &'a Storage,
    stock_labels: StockLabelPolicy,
}

impl<'a> EquipmentHooks<'a> {
    pub fn new(storage: &'a Storage, stock_labels: StockLabelPolicy) -> Self {
        Self {
            storage,
            stock_labels,
        }
    }

    /// CREATED entry with the full field dump
    pub fn after_create(
        &self,
        actor: &ActorContext,
        equipment: &Equipment,
    ) -> TrackerResult<AuditLogEntry> {
        let detail = self.summary(equipment)?;
        self.writer()
            .record(AuditAction::Created, Some(equipment.id), actor, detail)
    }

    /// UPDATED entry listing the tracked fields that changed
    pub fn after_update(
        &self,
        actor: &ActorContext,
        equipment: &Equipment,
        changes: &ChangeSet,
    ) -> TrackerResult<AuditLogEntry> {
        let detail = render::describe_changes(changes, &self.storage.stocks, self.stock_labels)?;
        self.writer()
            .record(AuditAction::Updated, Some(equipment.id), actor, detail)
    }

    /// DELETED entry with the field dump as it was before removal
    ///
    /// The entry is written without a subject, since the row is about to go.
    pub fn before_delete(
        &self,
        actor: &ActorContext,
        equipment: &Equipment,
    ) -> TrackerResult<AuditLogEntry> {
        let detail = self.summary(equipment)?;
        self.writer()
            .record(AuditAction::Deleted, None, actor, detail)
    }

    fn writer(&self) -> AuditLogWriter<'_> {
        AuditLogWriter::new(&self.storage.audit_log)
    }

    fn summary(&self, equipment: &Equipment) -> TrackerResult<String> {
        let stock_name = self.stock_name(equipment.stock_id)?;
        Ok(render::summarize(equipment, stock_name.as_deref()))
    }

    fn stock_name(&self, stock_id: Option<StockId>) -> TrackerResult<Option<String>> {
        match stock_id {
            Some(id) => Ok(Some(
                self.storage
                    .stocks
                    .stock_name(id)?
                    .unwrap_or_else(|| format!("Stock ID {}", id)),
            )),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::FieldSnapshot;
    use crate::models::equipment::fixtures::new_equipment;
    use crate::models::Stock;
    use crate::storage::testing::create_test_storage;

    #[test]
    fn test_after_create_resolves_stock_name() {
        let (_temp_dir, storage) = create_test_storage();
        let stock_id = storage.stocks.next_id().unwrap();
        storage.stocks.upsert(Stock::new(stock_id, "Annex", "")).unwrap();

        let mut equipment = new_equipment(1001, "SN-1").into_equipment(storage.equipment.next_id().unwrap());
        equipment.stock_id = Some(stock_id);

        let hooks = EquipmentHooks::new(&storage, StockLabelPolicy::Legacy);
        let entry = hooks.after_create(&ActorContext::Anonymous, &equipment).unwrap();

        assert_eq!(entry.action, AuditAction::Created);
        assert!(entry.detail.ends_with("Stock: Annex"));
    }

    #[test]
    fn test_after_update_without_changes() {
        let (_temp_dir, storage) = create_test_storage();
        let equipment = new_equipment(1001, "SN-1").into_equipment(storage.equipment.next_id().unwrap());
        let snapshot = FieldSnapshot::capture(&equipment);

        let hooks = EquipmentHooks::new(&storage, StockLabelPolicy::Legacy);
        let entry = hooks
            .after_update(
                &ActorContext::Anonymous,
                &equipment,
                &ChangeSet::between(&snapshot, &snapshot),
            )
            .unwrap();

        assert_eq!(entry.detail, render::NO_CHANGES);
    }

    #[test]
    fn test_before_delete_has_no_subject() {
        let (_temp_dir, storage) = create_test_storage();
        let equipment = new_equipment(1001, "SN-1").into_equipment(storage.equipment.next_id().unwrap());

        let hooks = EquipmentHooks::new(&storage, StockLabelPolicy::Legacy);
        let entry = hooks.before_delete(&ActorContext::Anonymous, &equipment).unwrap();

        assert_eq!(entry.action, AuditAction::Deleted);
        assert_eq!(entry.subject, None);
        assert!(entry.detail.contains("Stock: No stock"));
    }
}
