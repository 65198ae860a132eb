//! CLI commands for history export

use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::audit::ActorContext;
use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_audit_csv, export_audit_json, export_transfers_csv};
use crate::services::HistoryService;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the full audit log
    Audit {
        /// Output file path (default: exports/audit_log.<format>)
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
    },

    /// Export the stock transfer history to CSV
    Transfers {
        /// Output file path (default: exports/transfers.csv)
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    actor: &ActorContext,
    cmd: ExportCommands,
) -> TrackerResult<()> {
    let history = HistoryService::new(storage, settings);

    match cmd {
        ExportCommands::Audit { output, format } => {
            let rows = history.audit_log(actor, Some(usize::MAX))?;
            let output = match (output, format) {
                (Some(path), _) => path,
                (None, ExportFormat::Csv) => storage.paths().export_dir().join("audit_log.csv"),
                (None, ExportFormat::Json) => storage.paths().export_dir().join("audit_log.json"),
            };

            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Csv => export_audit_csv(&rows, &mut writer)?,
                ExportFormat::Json => export_audit_json(&rows, &mut writer)?,
            }
            println!("Exported {} audit entries to: {}", rows.len(), output.display());
        }

        ExportCommands::Transfers { output } => {
            let rows = history.transfers(actor)?;
            let output =
                output.unwrap_or_else(|| storage.paths().export_dir().join("transfers.csv"));

            let mut writer = create_output(&output)?;
            export_transfers_csv(&rows, &mut writer)?;
            println!("Exported {} transfers to: {}", rows.len(), output.display());
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> TrackerResult<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Export(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let file = File::create(path).map_err(|e| {
        TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
