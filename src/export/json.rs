//! JSON export of the audit log

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::AuditLogEntry;
use crate::error::{TrackerError, TrackerResult};
use crate::services::AuditRow;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Audit log export document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub entries: Vec<ExportedEntry>,
}

/// One audit entry with its display labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedEntry {
    #[serde(flatten)]
    pub entry: AuditLogEntry,
    pub subject_label: String,
    pub actor_label: String,
}

impl AuditExport {
    pub fn from_rows(rows: &[AuditRow]) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            entries: rows
                .iter()
                .map(|row| ExportedEntry {
                    entry: row.entry.clone(),
                    subject_label: row.subject.clone(),
                    actor_label: row.actor.clone(),
                })
                .collect(),
        }
    }
}

/// Write audit rows as a pretty-printed JSON document
pub fn export_audit_json<W: Write>(rows: &[AuditRow], writer: &mut W) -> TrackerResult<()> {
    let export = AuditExport::from_rows(rows);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TrackerError::Export(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))
}
