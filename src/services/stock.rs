//! Stock service
//!
//! Stock management. Removing a stock removes the equipment assigned to it,
//! each through the regular delete hook.

use tracing::info;

use crate::audit::ActorContext;
use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Equipment, Stock, StockId};
use crate::storage::Storage;

use super::lifecycle::EquipmentHooks;
use super::permissions::{authorize, Access};

/// Result of removing a stock
#[derive(Debug, Clone)]
pub struct StockRemoval {
    pub stock: Stock,
    /// Equipment that was removed along with the stock
    pub equipment: Vec<Equipment>,
}

/// Service for stock management
pub struct StockService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> StockService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Create a new stock
    pub fn create(
        &self,
        actor: &ActorContext,
        name: &str,
        description: &str,
    ) -> TrackerResult<Stock> {
        authorize(actor, Access::Manage, self.settings)?;

        let stock = self.storage.transaction(|storage| {
            let stock = Stock::new(storage.stocks.next_id()?, name, description);
            stock.validate().map_err(TrackerError::Validation)?;
            ensure_unique_name(storage, &stock)?;

            storage.stocks.upsert(stock.clone())?;
            Ok(stock)
        })?;

        info!(stock = %stock.id, name = %stock.name, "stock created");
        Ok(stock)
    }

    /// List all stocks
    pub fn list(&self, actor: &ActorContext) -> TrackerResult<Vec<Stock>> {
        authorize(actor, Access::Read, self.settings)?;
        self.storage.stocks.get_all()
    }

    /// Find a stock by name or ID
    pub fn find(&self, identifier: &str) -> TrackerResult<Option<Stock>> {
        if let Some(stock) = self.storage.stocks.get_by_name(identifier)? {
            return Ok(Some(stock));
        }

        if let Ok(id) = identifier.parse::<StockId>() {
            return self.storage.stocks.get(id);
        }

        Ok(None)
    }

    /// Rename a stock
    pub fn rename(&self, actor: &ActorContext, id: StockId, name: &str) -> TrackerResult<Stock> {
        authorize(actor, Access::Manage, self.settings)?;

        self.storage.transaction(|storage| {
            let mut stock = storage
                .stocks
                .get(id)?
                .ok_or_else(|| TrackerError::stock_not_found(id.to_string()))?;

            stock.name = name.trim().to_string();
            stock.validate().map_err(TrackerError::Validation)?;
            ensure_unique_name(storage, &stock)?;

            storage.stocks.upsert(stock.clone())?;
            Ok(stock)
        })
    }

    /// Delete a stock and everything assigned to it
    ///
    /// Each removed piece of equipment gets its own DELETED entry. Nothing is
    /// removed if any step fails.
    pub fn delete(&self, actor: &ActorContext, id: StockId) -> TrackerResult<StockRemoval> {
        authorize(actor, Access::Manage, self.settings)?;

        let removal = self.storage.transaction(|storage| {
            if !storage.stocks.exists(id)? {
                return Err(TrackerError::stock_not_found(id.to_string()));
            }

            let hooks = EquipmentHooks::new(storage, self.settings.stock_label_policy);
            let assigned = storage.equipment.get_by_stock(id)?;
            for equipment in &assigned {
                hooks.before_delete(actor, equipment)?;
                storage.delete_equipment(equipment.id)?;
            }

            let stock = storage.delete_stock(id)?;
            Ok(StockRemoval {
                stock,
                equipment: assigned,
            })
        })?;

        info!(
            stock = %removal.stock.id,
            equipment = removal.equipment.len(),
            "stock deleted"
        );
        Ok(removal)
    }
}

/// Stock names are looked up by name from the CLI, so no two stocks may share
/// one, ignoring case
fn ensure_unique_name(storage: &Storage, stock: &Stock) -> TrackerResult<()> {
    match storage.stocks.get_by_name(&stock.name)? {
        Some(existing) if existing.id != stock.id => Err(TrackerError::Conflict {
            field: "stock name",
            value: stock.name.clone(),
        }),
        _ => Ok(()),
    }
}
