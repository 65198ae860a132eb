//! Stock CLI commands

use clap::Subcommand;

use crate::audit::ActorContext;
use crate::config::Settings;
use crate::display::equipment::format_stock_list;
use crate::error::{TrackerError, TrackerResult};
use crate::services::StockService;
use crate::storage::Storage;

/// Stock subcommands
#[derive(Subcommand)]
pub enum StockCommands {
    /// Create a new stock
    Add {
        /// Stock name
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List all stocks
    List,
    /// Rename a stock
    Rename {
        /// Stock name or ID
        stock: String,
        /// New name
        name: String,
    },
    /// Delete a stock and all equipment assigned to it
    Delete {
        /// Stock name or ID
        stock: String,
    },
}

/// Handle a stock command
pub fn handle_stock_command(
    storage: &Storage,
    settings: &Settings,
    actor: &ActorContext,
    cmd: StockCommands,
) -> TrackerResult<()> {
    let service = StockService::new(storage, settings);

    match cmd {
        StockCommands::Add { name, description } => {
            let stock = service.create(actor, &name, &description)?;
            println!("Created stock: {} (ID {})", stock.name, stock.id);
        }

        StockCommands::List => {
            print!("{}", format_stock_list(&service.list(actor)?));
        }

        StockCommands::Rename { stock, name } => {
            let found = service
                .find(&stock)?
                .ok_or_else(|| TrackerError::stock_not_found(&stock))?;
            let renamed = service.rename(actor, found.id, &name)?;
            println!("Renamed stock: {} -> {}", found.name, renamed.name);
        }

        StockCommands::Delete { stock } => {
            let found = service
                .find(&stock)?
                .ok_or_else(|| TrackerError::stock_not_found(&stock))?;
            let removal = service.delete(actor, found.id)?;
            println!("Deleted stock: {}", removal.stock.name);
            for equipment in &removal.equipment {
                println!("  removed equipment: {} ({})", equipment.name, equipment.id);
            }
        }
    }

    Ok(())
}
