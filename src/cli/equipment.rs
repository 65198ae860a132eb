//! Equipment CLI commands
//!
//! Implements CLI commands for equipment management.

use clap::Subcommand;

use crate::audit::ActorContext;
use crate::config::Settings;
use crate::display::equipment::{format_equipment_details, format_equipment_list};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{EquipmentId, EquipmentPatch, NewEquipment, StockId};
use crate::services::{EquipmentService, StockService};
use crate::storage::Storage;

/// Equipment subcommands
#[derive(Subcommand)]
pub enum EquipmentCommands {
    /// Register a new piece of equipment
    Add {
        /// Equipment name
        name: String,
        #[arg(short, long)]
        model: String,
        #[arg(short, long)]
        brand: String,
        #[arg(short, long)]
        category: String,
        /// Asset tag (unique)
        #[arg(short, long)]
        asset_tag: i64,
        /// Serial number (unique)
        #[arg(short, long)]
        serial: String,
        #[arg(long, default_value = "active")]
        status: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Stock name or ID
        #[arg(long)]
        stock: Option<String>,
    },
    /// List equipment, newest first
    List {
        /// Only equipment in this stock (name or ID)
        #[arg(long)]
        stock: Option<String>,
    },
    /// Show equipment details
    Show {
        /// Equipment ID
        id: EquipmentId,
    },
    /// Edit a piece of equipment
    Edit {
        /// Equipment ID
        id: EquipmentId,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        model: Option<String>,
        #[arg(short, long)]
        brand: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        asset_tag: Option<i64>,
        #[arg(short, long)]
        serial: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Move to this stock (name or ID)
        #[arg(long, conflicts_with = "no_stock")]
        stock: Option<String>,
        /// Remove the stock assignment
        #[arg(long)]
        no_stock: bool,
    },
    /// Delete a piece of equipment
    Delete {
        /// Equipment ID
        id: EquipmentId,
    },
}

/// Handle an equipment command
pub fn handle_equipment_command(
    storage: &Storage,
    settings: &Settings,
    actor: &ActorContext,
    cmd: EquipmentCommands,
) -> TrackerResult<()> {
    let service = EquipmentService::new(storage, settings);
    let stocks = StockService::new(storage, settings);

    match cmd {
        EquipmentCommands::Add {
            name,
            model,
            brand,
            category,
            asset_tag,
            serial,
            status,
            description,
            stock,
        } => {
            let stock_id = stock
                .as_deref()
                .map(|s| resolve_stock(&stocks, s))
                .transpose()?;

            let equipment = service.create(
                actor,
                NewEquipment {
                    name,
                    model,
                    brand,
                    category,
                    asset_tag,
                    status,
                    description,
                    serial_number: serial,
                    stock_id,
                },
            )?;

            println!("Registered equipment: {}", equipment.name);
            println!("  Asset Tag: {}", equipment.asset_tag);
            println!("  Serial: {}", equipment.serial_number);
            println!("  ID: {}", equipment.id);
        }

        EquipmentCommands::List { stock } => {
            let stock_id = stock
                .as_deref()
                .map(|s| resolve_stock(&stocks, s))
                .transpose()?;
            let equipment = service.list(actor, stock_id)?;
            print!("{}", format_equipment_list(&equipment, &stocks.list(actor)?));
        }

        EquipmentCommands::Show { id } => {
            let equipment = service
                .get(actor, id)?
                .ok_or_else(|| TrackerError::equipment_not_found(id.to_string()))?;
            let stock = match equipment.stock_id {
                Some(stock_id) => storage.stocks.get(stock_id)?,
                None => None,
            };
            print!("{}", format_equipment_details(&equipment, stock.as_ref()));
        }

        EquipmentCommands::Edit {
            id,
            name,
            model,
            brand,
            category,
            asset_tag,
            serial,
            status,
            description,
            stock,
            no_stock,
        } => {
            let stock_id = if no_stock {
                Some(None)
            } else {
                stock
                    .as_deref()
                    .map(|s| resolve_stock(&stocks, s).map(Some))
                    .transpose()?
            };

            let patch = EquipmentPatch {
                name,
                model,
                brand,
                category,
                asset_tag,
                status,
                description,
                serial_number: serial,
                stock_id,
            };
            if patch.is_empty() {
                println!("No changes specified. Use --help to see editable fields.");
                return Ok(());
            }

            let updated = service.update(actor, id, patch)?;
            println!("Updated equipment: {} ({})", updated.name, updated.id);
        }

        EquipmentCommands::Delete { id } => {
            let deleted = service.delete(actor, id)?;
            println!("Deleted equipment: {} ({})", deleted.name, deleted.id);
        }
    }

    Ok(())
}

fn resolve_stock(stocks: &StockService<'_>, identifier: &str) -> TrackerResult<StockId> {
    stocks
        .find(identifier)?
        .map(|s| s.id)
        .ok_or_else(|| TrackerError::stock_not_found(identifier))
}
