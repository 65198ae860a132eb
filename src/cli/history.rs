//! History CLI commands

use clap::Subcommand;

use crate::audit::ActorContext;
use crate::config::Settings;
use crate::display::history::{format_audit_rows, format_transfer_rows};
use crate::error::TrackerResult;
use crate::models::EquipmentId;
use crate::services::HistoryService;
use crate::storage::Storage;

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Show the audit log, newest first
    Log {
        /// Number of entries to show (default from settings)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the audit log of one piece of equipment
    Equipment {
        id: EquipmentId,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show stock transfers, optionally of one piece of equipment
    Transfers { id: Option<EquipmentId> },
}

/// Handle a history command
pub fn handle_history_command(
    storage: &Storage,
    settings: &Settings,
    actor: &ActorContext,
    cmd: HistoryCommands,
) -> TrackerResult<()> {
    let service = HistoryService::new(storage, settings);

    match cmd {
        HistoryCommands::Log { limit } => {
            let rows = service.audit_log(actor, limit)?;
            print!("{}", format_audit_rows(&rows, &settings.date_format));
        }
        HistoryCommands::Equipment { id, limit } => {
            let rows = service.audit_log_for(actor, id, limit)?;
            print!("{}", format_audit_rows(&rows, &settings.date_format));
        }
        HistoryCommands::Transfers { id } => {
            let rows = match id {
                Some(id) => service.transfers_for(actor, id)?,
                None => service.transfers(actor)?,
            };
            print!("{}", format_transfer_rows(&rows, &settings.date_format));
        }
    }

    Ok(())
}
