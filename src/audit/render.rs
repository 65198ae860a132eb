//! Detail text rendering for audit entries
//!
//! Produces the human-readable `detail` stored on each audit log entry and
//! the description stored on stock transfer records.

use crate::config::StockLabelPolicy;
use crate::error::TrackerResult;
use crate::models::{Equipment, StockId};

use super::tracker::{ChangeSet, FieldValue, TrackedField};

/// Detail text of an update that changed no tracked field
pub const NO_CHANGES: &str = "No changes detected.";

/// Label for an unassigned stock
pub const NO_STOCK: &str = "No stock";

/// Label for the subject of an entry whose equipment no longer exists
pub const DELETED_EQUIPMENT: &str = "deleted equipment";

/// Label for an entry with no attributable actor
pub const UNKNOWN_ACTOR: &str = "unknown";

/// Resolves stock identifiers to display names
pub trait StockNames {
    /// Display name of the stock, or `None` if it does not exist
    fn stock_name(&self, id: StockId) -> TrackerResult<Option<String>>;
}

/// Fixed-order dump of every field, used for creation and deletion
pub fn summarize(equipment: &Equipment, stock_name: Option<&str>) -> String {
    format!(
        "Name: {}, Model: {}, Brand: {}, Category: {}, Status: {}, AssetTag: {}, Serial: {}, Stock: {}",
        equipment.name,
        equipment.model,
        equipment.brand,
        equipment.category,
        equipment.status,
        equipment.asset_tag,
        equipment.serial_number,
        stock_name.unwrap_or(NO_STOCK)
    )
}

/// Render `field: old → new` for every change, or `NO_CHANGES`
pub fn describe_changes(
    changes: &ChangeSet,
    stocks: &dyn StockNames,
    policy: StockLabelPolicy,
) -> TrackerResult<String> {
    if changes.is_empty() {
        return Ok(NO_CHANGES.to_string());
    }

    let mut parts = Vec::with_capacity(changes.len());
    for change in changes.iter() {
        let line = match (change.field, &change.old, &change.new) {
            (TrackedField::Stock, FieldValue::Reference(old), FieldValue::Reference(new)) => {
                format!(
                    "{}: {} → {}",
                    change.field,
                    previous_stock_label(*old, stocks, policy)?,
                    current_stock_label(*new, stocks)?
                )
            }
            _ => format!("{}: {} → {}", change.field, change.old, change.new),
        };
        parts.push(line);
    }

    Ok(parts.join(", "))
}

/// Description of a stock reassignment, using raw identifiers
pub fn describe_transfer(from: Option<StockId>, to: Option<StockId>) -> String {
    format!(
        "Moved from stock {} to stock {}",
        FieldValue::Reference(from),
        FieldValue::Reference(to)
    )
}

fn previous_stock_label(
    id: Option<StockId>,
    stocks: &dyn StockNames,
    policy: StockLabelPolicy,
) -> TrackerResult<String> {
    let Some(id) = id else {
        return Ok(NO_STOCK.to_string());
    };

    let resolved = match policy {
        StockLabelPolicy::Legacy => None,
        StockLabelPolicy::Names => stocks.stock_name(id)?,
    };

    Ok(resolved.unwrap_or_else(|| format!("Stock ID {}", id)))
}

fn current_stock_label(id: Option<StockId>, stocks: &dyn StockNames) -> TrackerResult<String> {
    let Some(id) = id else {
        return Ok(NO_STOCK.to_string());
    };

    Ok(stocks
        .stock_name(id)?
        .unwrap_or_else(|| format!("Stock ID {}", id)))
}
