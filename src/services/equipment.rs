//! Equipment service
//!
//! Create, update and delete of equipment records. Each mutation runs in one
//! unit of work that writes the row, its audit entry and, on a stock move,
//! its transfer record. A failure anywhere rolls all of them back.

use tracing::info;

use crate::audit::{ActorContext, ChangeSet, FieldSnapshot};
use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Equipment, EquipmentId, EquipmentPatch, NewEquipment, Role, StockId};
use crate::storage::Storage;

use super::lifecycle::EquipmentHooks;
use super::permissions::{authorize, Access};
use super::transfer::StockTransferRecorder;

/// Service for equipment management
pub struct EquipmentService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> EquipmentService<'a> {
    /// Create a new equipment service
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Register a new piece of equipment
    ///
    /// A duplicate asset tag or serial number is rejected with
    /// `TrackerError::Conflict` before any audit entry is written.
    pub fn create(&self, actor: &ActorContext, new: NewEquipment) -> TrackerResult<Equipment> {
        authorize(actor, Access::Edit, self.settings)?;

        let equipment = self.storage.transaction(|storage| {
            let equipment = new.into_equipment(storage.equipment.next_id()?);
            equipment
                .validate()
                .map_err(|e| TrackerError::Validation(e.to_string()))?;
            ensure_stock(storage, equipment.stock_id)?;

            storage.equipment.insert(equipment.clone())?;
            self.hooks(storage).after_create(actor, &equipment)?;

            Ok(equipment)
        })?;

        info!(equipment = %equipment.id, actor = actor.label(), "equipment created");
        Ok(equipment)
    }

    /// Apply a patch to an existing piece of equipment
    ///
    /// Asset tag and serial number are only changed for administrators;
    /// other roles have those fields dropped from the patch.
    pub fn update(
        &self,
        actor: &ActorContext,
        id: EquipmentId,
        patch: EquipmentPatch,
    ) -> TrackerResult<Equipment> {
        let role = authorize(actor, Access::Edit, self.settings)?;
        let patch = if role == Role::Admin {
            patch
        } else {
            patch.without_identity_fields()
        };

        let equipment = self.storage.transaction(|storage| {
            let mut equipment = storage
                .equipment
                .get(id)?
                .ok_or_else(|| TrackerError::equipment_not_found(id.to_string()))?;

            let before = FieldSnapshot::capture(&equipment);
            patch.apply_to(&mut equipment);
            equipment
                .validate()
                .map_err(|e| TrackerError::Validation(e.to_string()))?;
            ensure_stock(storage, equipment.stock_id)?;

            storage.equipment.update(equipment.clone())?;

            let changes = ChangeSet::since(Some(&before), &FieldSnapshot::capture(&equipment));
            self.hooks(storage).after_update(actor, &equipment, &changes)?;
            StockTransferRecorder::new(&storage.transfers).record(&changes, equipment.id, actor)?;

            Ok(equipment)
        })?;

        info!(equipment = %equipment.id, actor = actor.label(), "equipment updated");
        Ok(equipment)
    }

    /// Delete a piece of equipment
    ///
    /// The DELETED entry is written while the row still exists. The row's
    /// transfer records go with it; earlier audit entries stay.
    pub fn delete(&self, actor: &ActorContext, id: EquipmentId) -> TrackerResult<Equipment> {
        authorize(actor, Access::Delete, self.settings)?;

        let equipment = self.storage.transaction(|storage| {
            let equipment = storage
                .equipment
                .get(id)?
                .ok_or_else(|| TrackerError::equipment_not_found(id.to_string()))?;

            self.hooks(storage).before_delete(actor, &equipment)?;
            storage.delete_equipment(id)
        })?;

        info!(equipment = %equipment.id, actor = actor.label(), "equipment deleted");
        Ok(equipment)
    }

    /// Get a piece of equipment by ID
    pub fn get(&self, actor: &ActorContext, id: EquipmentId) -> TrackerResult<Option<Equipment>> {
        authorize(actor, Access::Read, self.settings)?;
        self.storage.equipment.get(id)
    }

    /// List equipment, newest first, optionally restricted to one stock
    pub fn list(
        &self,
        actor: &ActorContext,
        stock: Option<StockId>,
    ) -> TrackerResult<Vec<Equipment>> {
        authorize(actor, Access::Read, self.settings)?;
        match stock {
            Some(stock_id) => {
                if !self.storage.stocks.exists(stock_id)? {
                    return Err(TrackerError::stock_not_found(stock_id.to_string()));
                }
                self.storage.equipment.get_by_stock(stock_id)
            }
            None => self.storage.equipment.get_all(),
        }
    }

    fn hooks<'s>(&self, storage: &'s Storage) -> EquipmentHooks<'s> {
        EquipmentHooks::new(storage, self.settings.stock_label_policy)
    }
}

fn ensure_stock(storage: &Storage, stock_id: Option<StockId>) -> TrackerResult<()> {
    match stock_id {
        Some(id) if !storage.stocks.exists(id)? => Err(TrackerError::stock_not_found(id.to_string())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{render, AuditAction};
    use crate::config::{StockLabelPolicy, TrackerPaths};
    use crate::models::equipment::fixtures::new_equipment;
    use crate::models::{Stock, User, UserId};
    use crate::storage::testing::create_test_storage;
    use std::fs;

    fn add_stock(storage: &Storage, name: &str) -> StockId {
        let id = storage.stocks.next_id().unwrap();
        storage.stocks.upsert(Stock::new(id, name, "")).unwrap();
        id
    }

    fn admin(storage: &Storage) -> ActorContext {
        let user = User {
            id: storage.users.next_id().unwrap(),
            username: "ana".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            role: Role::Admin,
        };
        storage.users.insert(user.clone()).unwrap();
        ActorContext::for_user(&user)
    }

    fn status_patch(status: &str) -> EquipmentPatch {
        EquipmentPatch {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_logs_full_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        let stock = add_stock(&storage, "Main");

        let mut new = new_equipment(1001, "SN-1");
        new.stock_id = Some(stock);
        let equipment = service.create(&ActorContext::Anonymous, new).unwrap();

        let entries = storage.audit_log.get_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Created);
        assert_eq!(entries[0].subject, Some(equipment.id));
        assert_eq!(entries[0].actor, None);
        assert_eq!(
            entries[0].detail,
            "Name: Laptop, Model: T14, Brand: Lenovo, Category: Computers, Status: active, \
             AssetTag: 1001, Serial: SN-1, Stock: Main"
        );
    }

    #[test]
    fn test_noop_update_logs_no_changes() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        let equipment = service
            .create(&ActorContext::Anonymous, new_equipment(1001, "SN-1"))
            .unwrap();

        service
            .update(&ActorContext::Anonymous, equipment.id, status_patch("active"))
            .unwrap();

        let entries = storage.audit_log.get_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, AuditAction::Updated);
        assert_eq!(entries[0].detail, "No changes detected.");
        assert_eq!(storage.transfers.count().unwrap(), 0);
    }

    #[test]
    fn test_status_change_is_described() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        let actor = admin(&storage);
        let equipment = service.create(&actor, new_equipment(1001, "SN-1")).unwrap();

        service
            .update(&actor, equipment.id, status_patch("retired"))
            .unwrap();

        let latest = &storage.audit_log.get_all().unwrap()[0];
        assert!(latest.detail.contains("status: active → retired"));
        assert_eq!(latest.actor, actor.actor_ref());
    }

    #[test]
    fn test_second_update_diffs_against_saved_state() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        let equipment = service
            .create(&ActorContext::Anonymous, new_equipment(1001, "SN-1"))
            .unwrap();

        service
            .update(&ActorContext::Anonymous, equipment.id, status_patch("repair"))
            .unwrap();
        service
            .update(&ActorContext::Anonymous, equipment.id, status_patch("retired"))
            .unwrap();

        let latest = &storage.audit_log.get_all().unwrap()[0];
        assert_eq!(latest.detail, "status: repair → retired");
    }

    #[test]
    fn test_stock_move_logs_and_records_transfer() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        let main = add_stock(&storage, "Main");
        let annex = add_stock(&storage, "Annex");
        assert_eq!((main.value(), annex.value()), (1, 2));

        let mut new = new_equipment(1001, "SN-1");
        new.stock_id = Some(main);
        let equipment = service.create(&ActorContext::Anonymous, new).unwrap();

        let patch = EquipmentPatch {
            stock_id: Some(Some(annex)),
            ..Default::default()
        };
        service
            .update(&ActorContext::Anonymous, equipment.id, patch)
            .unwrap();

        let latest = &storage.audit_log.get_all().unwrap()[0];
        assert!(latest.detail.contains("Stock ID 1"));
        assert!(latest.detail.contains("→ Annex"));

        let transfers = storage.transfers.get_by_subject(equipment.id).unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].description, "Moved from stock 1 to stock 2");
    }

    #[test]
    fn test_stock_move_with_names_policy() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings {
            stock_label_policy: StockLabelPolicy::Names,
            ..Settings::default()
        };
        let service = EquipmentService::new(&storage, &settings);
        let main = add_stock(&storage, "Main");
        let annex = add_stock(&storage, "Annex");

        let mut new = new_equipment(1001, "SN-1");
        new.stock_id = Some(main);
        let equipment = service.create(&ActorContext::Anonymous, new).unwrap();
        let patch = EquipmentPatch {
            stock_id: Some(Some(annex)),
            ..Default::default()
        };
        service
            .update(&ActorContext::Anonymous, equipment.id, patch)
            .unwrap();

        let latest = &storage.audit_log.get_all().unwrap()[0];
        assert_eq!(latest.detail, "stock: Main → Annex");
        let transfers = storage.transfers.get_all().unwrap();
        assert_eq!(transfers[0].description, "Moved from stock 1 to stock 2");
    }

    #[test]
    fn test_delete_logs_before_removal() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        let equipment = service
            .create(&ActorContext::Anonymous, new_equipment(1001, "SN-1"))
            .unwrap();

        service.delete(&ActorContext::Anonymous, equipment.id).unwrap();

        let entries = storage.audit_log.get_all().unwrap();
        assert_eq!(entries.len(), 2);
        let deleted = &entries[0];
        assert_eq!(deleted.action, AuditAction::Deleted);
        assert_eq!(deleted.subject, None);
        assert_eq!(deleted.detail, render::summarize(&equipment, None));
        assert!(service
            .get(&ActorContext::Anonymous, equipment.id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_duplicate_asset_tag_writes_no_entry() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        service
            .create(&ActorContext::Anonymous, new_equipment(1001, "SN-1"))
            .unwrap();

        let err = service
            .create(&ActorContext::Anonymous, new_equipment(1001, "SN-2"))
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(err.to_string(), "asset tag already registered: 1001");
        assert_eq!(storage.audit_log.count().unwrap(), 1);
        assert_eq!(storage.equipment.count().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_serial_on_update_is_rolled_back() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        service
            .create(&ActorContext::Anonymous, new_equipment(1001, "SN-1"))
            .unwrap();
        let second = service
            .create(&ActorContext::Anonymous, new_equipment(1002, "SN-2"))
            .unwrap();

        let patch = EquipmentPatch {
            serial_number: Some("SN-1".into()),
            ..Default::default()
        };
        let err = service
            .update(&ActorContext::Anonymous, second.id, patch)
            .unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(storage.audit_log.count().unwrap(), 2);
        let stored = service
            .get(&ActorContext::Anonymous, second.id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.serial_number, "SN-2");
    }

    #[test]
    fn test_removed_user_detaches_but_keeps_history() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        let actor = admin(&storage);
        let main = add_stock(&storage, "Main");
        let annex = add_stock(&storage, "Annex");

        let mut new = new_equipment(1001, "SN-1");
        new.stock_id = Some(main);
        let equipment = service.create(&actor, new).unwrap();
        let patch = EquipmentPatch {
            stock_id: Some(Some(annex)),
            ..Default::default()
        };
        service.update(&actor, equipment.id, patch).unwrap();

        let user_id = actor.actor_ref().unwrap();
        storage
            .transaction(|s| s.delete_user(user_id))
            .unwrap();

        let entries = storage.audit_log.get_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.actor.is_none()));
        assert_eq!(storage.transfers.get_all().unwrap()[0].actor, None);

        service.delete(&ActorContext::Anonymous, equipment.id).unwrap();
        assert_eq!(storage.audit_log.count().unwrap(), 3);
        assert_eq!(storage.transfers.count().unwrap(), 0);
    }

    #[test]
    fn test_history_failure_rolls_back_mutation() {
        let (temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        fs::create_dir_all(temp_dir.path().join("data/audit_log.json/blocked")).unwrap();

        let err = service
            .create(&ActorContext::Anonymous, new_equipment(1001, "SN-1"))
            .unwrap_err();

        assert!(err.is_store_unavailable());
        assert_eq!(storage.equipment.count().unwrap(), 0);
        assert_eq!(storage.audit_log.count().unwrap(), 0);
    }

    #[test]
    fn test_transfer_failure_rolls_back_stock_move() {
        let (temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        let main = add_stock(&storage, "Main");
        let annex = add_stock(&storage, "Annex");
        let mut new = new_equipment(1001, "SN-1");
        new.stock_id = Some(main);
        let equipment = service.create(&ActorContext::Anonymous, new).unwrap();

        let transfers_path = temp_dir.path().join("data/transfers.json");
        fs::remove_file(&transfers_path).unwrap();
        fs::create_dir_all(transfers_path.join("blocked")).unwrap();

        let patch = EquipmentPatch {
            stock_id: Some(Some(annex)),
            ..Default::default()
        };
        let err = service
            .update(&ActorContext::Anonymous, equipment.id, patch)
            .unwrap_err();

        assert!(err.is_store_unavailable());
        let current = storage.equipment.get(equipment.id).unwrap().unwrap();
        assert_eq!(current.stock_id, Some(main));
        assert_eq!(storage.transfers.count().unwrap(), 0);
        assert_eq!(storage.audit_log.count().unwrap(), 1);

        fs::remove_dir_all(&transfers_path).unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        let on_disk = reopened.equipment.get(equipment.id).unwrap().unwrap();
        assert_eq!(on_disk.stock_id, Some(main));
        assert_eq!(reopened.audit_log.count().unwrap(), 1);
        assert_eq!(reopened.transfers.count().unwrap(), 0);
    }

    #[test]
    fn test_reader_may_list_and_show_but_not_edit() {
        let (_temp_dir, storage) = create_test_storage();
        let mut settings = Settings::default();
        let equipment = EquipmentService::new(&storage, &settings)
            .create(&ActorContext::Anonymous, new_equipment(1001, "SN-1"))
            .unwrap();

        settings.allow_anonymous = false;
        let service = EquipmentService::new(&storage, &settings);
        let reader = ActorContext::User {
            id: UserId::new(7),
            username: "viewer".into(),
            role: Role::Reader,
        };

        assert_eq!(service.list(&reader, None).unwrap().len(), 1);
        assert!(service.get(&reader, equipment.id).unwrap().is_some());
        assert!(service.get(&ActorContext::Anonymous, equipment.id).is_ok());

        let err = service
            .create(&reader, new_equipment(1002, "SN-2"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::PermissionDenied(_)));
    }

    #[test]
    fn test_serials_differing_only_in_case_are_accepted() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);

        service
            .create(&ActorContext::Anonymous, new_equipment(1001, "SN-A"))
            .unwrap();
        service
            .create(&ActorContext::Anonymous, new_equipment(1002, "sn-a"))
            .unwrap();

        assert_eq!(storage.equipment.count().unwrap(), 2);
        let err = service
            .create(&ActorContext::Anonymous, new_equipment(1003, "SN-A"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::Conflict { field: "serial number", .. }));
    }

    #[test]
    fn test_standard_user_cannot_change_identity_or_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        let equipment = service
            .create(&ActorContext::Anonymous, new_equipment(1001, "SN-1"))
            .unwrap();
        let clerk = ActorContext::User {
            id: UserId::new(42),
            username: "clerk".into(),
            role: Role::Standard,
        };

        let patch = EquipmentPatch {
            asset_tag: Some(2002),
            serial_number: Some("SN-X".into()),
            status: Some("repair".into()),
            ..Default::default()
        };
        let updated = service.update(&clerk, equipment.id, patch).unwrap();
        assert_eq!(updated.asset_tag, 1001);
        assert_eq!(updated.serial_number, "SN-1");
        assert_eq!(updated.status, "repair");

        let err = service.delete(&clerk, equipment.id).unwrap_err();
        assert!(matches!(err, TrackerError::PermissionDenied(_)));
        assert_eq!(storage.audit_log.count().unwrap(), 2);
    }

    #[test]
    fn test_unknown_stock_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);

        let mut new = new_equipment(1001, "SN-1");
        new.stock_id = Some(StockId::new(9));
        let err = service.create(&ActorContext::Anonymous, new).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(storage.audit_log.count().unwrap(), 0);
    }

    #[test]
    fn test_list_newest_first_with_stock_filter() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = EquipmentService::new(&storage, &settings);
        let main = add_stock(&storage, "Main");

        let first = service
            .create(&ActorContext::Anonymous, new_equipment(1001, "SN-1"))
            .unwrap();
        let mut new = new_equipment(1002, "SN-2");
        new.stock_id = Some(main);
        let second = service.create(&ActorContext::Anonymous, new).unwrap();

        let all: Vec<_> = service
            .list(&ActorContext::Anonymous, None)
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(all, vec![second.id, first.id]);

        let in_main = service.list(&ActorContext::Anonymous, Some(main)).unwrap();
        assert_eq!(in_main.len(), 1);
        assert_eq!(in_main[0].id, second.id);
    }
}
