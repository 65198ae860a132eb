//! Stock repository for JSON storage
//!
//! Manages stocks.json and resolves stock names for audit rendering.

use std::path::PathBuf;

use crate::audit::StockNames;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Stock, StockId};

use super::table::{Record, Table, TableCheckpoint};

impl Record for Stock {
    type Key = StockId;

    fn key(&self) -> StockId {
        self.id
    }
}

/// Repository for stock persistence
pub struct StockRepository {
    table: Table<Stock>,
}

impl StockRepository {
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

    pub fn next_id(&self) -> Result<StockId, TrackerError> {
        Ok(StockId::new(self.table.allocate_key()?))
    }

    pub fn get(&self, id: StockId) -> Result<Option<Stock>, TrackerError> {
        self.table.get(id)
    }

    /// All stocks ordered by id
    pub fn get_all(&self) -> Result<Vec<Stock>, TrackerError> {
        let mut stocks = self.table.all()?;
        stocks.sort_by_key(|s| s.id);
        Ok(stocks)
    }

    /// Find a stock by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Stock>, TrackerError> {
        let name_lower = name.trim().to_lowercase();
        Ok(self
            .table
            .filter(|s| s.name.to_lowercase() == name_lower)?
            .into_iter()
            .next())
    }

    pub fn exists(&self, id: StockId) -> Result<bool, TrackerError> {
        Ok(self.table.get(id)?.is_some())
    }

    pub fn upsert(&self, stock: Stock) -> Result<(), TrackerError> {
        if !self.table.replace(stock.clone())? {
            self.table.push(stock)?;
        }
        Ok(())
    }

    pub(super) fn remove(&self, id: StockId) -> Result<Option<Stock>, TrackerError> {
        self.table.remove(id)
    }

    pub(super) fn checkpoint(&self) -> Result<TableCheckpoint<Stock>, TrackerError> {
        self.table.checkpoint()
    }

    pub(super) fn restore(&self, checkpoint: TableCheckpoint<Stock>) -> Result<(), TrackerError> {
        self.table.restore(checkpoint)
    }
}

impl StockNames for StockRepository {
    fn stock_name(&self, id: StockId) -> TrackerResult<Option<String>> {
        Ok(self.get(id)?.map(|s| s.name))
    }
}
