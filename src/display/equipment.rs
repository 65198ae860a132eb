//! Equipment display formatting
//!
//! Formats equipment and stocks for terminal output in table and detail views.

use std::collections::HashMap;

use crate::audit::render::NO_STOCK;
use crate::models::{Equipment, Stock, StockId};

/// Format a list of equipment as a table
pub fn format_equipment_list(equipment: &[Equipment], stocks: &[Stock]) -> String {
    if equipment.is_empty() {
        return "No equipment found.".to_string();
    }

    let stock_names: HashMap<StockId, &str> =
        stocks.iter().map(|s| (s.id, s.name.as_str())).collect();
    let stock_label = |item: &Equipment| -> String {
        match item.stock_id {
            Some(id) => stock_names
                .get(&id)
                .map(|name| name.to_string())
                .unwrap_or_else(|| format!("Stock ID {}", id)),
            None => NO_STOCK.to_string(),
        }
    };

    let name_width = equipment
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let serial_width = equipment
        .iter()
        .map(|e| e.serial_number.len())
        .max()
        .unwrap_or(6)
        .max(6);
    let status_width = equipment
        .iter()
        .map(|e| e.status.len())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5}  {:<name_width$}  {:>9}  {:<serial_width$}  {:<status_width$}  {}\n",
        "ID",
        "Name",
        "Asset Tag",
        "Serial",
        "Status",
        "Stock",
        name_width = name_width,
        serial_width = serial_width,
        status_width = status_width,
    ));
    output.push_str(&format!(
        "{:->5}  {:-<name_width$}  {:->9}  {:-<serial_width$}  {:-<status_width$}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        serial_width = serial_width,
        status_width = status_width,
    ));

    for item in equipment {
        output.push_str(&format!(
            "{:>5}  {:<name_width$}  {:>9}  {:<serial_width$}  {:<status_width$}  {}\n",
            item.id,
            item.name,
            item.asset_tag,
            item.serial_number,
            item.status,
            stock_label(item),
            name_width = name_width,
            serial_width = serial_width,
            status_width = status_width,
        ));
    }

    output.push_str(&format!("\n{} item(s)\n", equipment.len()));
    output
}

/// Format a single piece of equipment's details
pub fn format_equipment_details(equipment: &Equipment, stock: Option<&Stock>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Equipment: {}\n", equipment.name));
    output.push_str(&format!("  ID:        {}\n", equipment.id));
    output.push_str(&format!("  Model:     {}\n", equipment.model));
    output.push_str(&format!("  Brand:     {}\n", equipment.brand));
    output.push_str(&format!("  Category:  {}\n", equipment.category));
    output.push_str(&format!("  Asset Tag: {}\n", equipment.asset_tag));
    output.push_str(&format!("  Serial:    {}\n", equipment.serial_number));
    output.push_str(&format!("  Status:    {}\n", equipment.status));

    let stock_label = match (equipment.stock_id, stock) {
        (_, Some(stock)) => stock.name.clone(),
        (Some(id), None) => format!("Stock ID {}", id),
        (None, None) => NO_STOCK.to_string(),
    };
    output.push_str(&format!("  Stock:     {}\n", stock_label));

    if !equipment.description.is_empty() {
        output.push('\n');
        output.push_str(&format!("  {}\n", equipment.description));
    }

    output
}

/// Format stocks as a simple list
pub fn format_stock_list(stocks: &[Stock]) -> String {
    if stocks.is_empty() {
        return "No stocks found.".to_string();
    }

    let mut output = String::new();
    for stock in stocks {
        if stock.description.is_empty() {
            output.push_str(&format!("  {:>3}  {}\n", stock.id, stock.name));
        } else {
            output.push_str(&format!(
                "  {:>3}  {} - {}\n",
                stock.id, stock.name, stock.description
            ));
        }
    }
    output
}
