//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod equipment;
pub mod export;
pub mod history;
pub mod stock;
pub mod user;

pub use equipment::{handle_equipment_command, EquipmentCommands};
pub use export::{handle_export_command, ExportCommands};
pub use history::{handle_history_command, HistoryCommands};
pub use stock::{handle_stock_command, StockCommands};
pub use user::{handle_user_command, UserCommands};
