//! CSV export of the audit log and the transfer history

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::services::{AuditRow, TransferRow};

/// Write audit rows as CSV
pub fn export_audit_csv<W: Write>(rows: &[AuditRow], writer: W) -> TrackerResult<()> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record([
        "ID", "Timestamp", "Action", "Equipment ID", "Equipment", "Actor", "Detail",
    ])
    .map_err(export_error)?;

    for row in rows {
        let subject_id = row
            .entry
            .subject
            .map(|id| id.to_string())
            .unwrap_or_default();
        out.write_record([
            row.entry.id.as_uuid().to_string(),
            row.entry.timestamp.to_rfc3339(),
            row.entry.action.to_string(),
            subject_id,
            row.subject.clone(),
            row.actor.clone(),
            row.entry.detail.clone(),
        ])
        .map_err(export_error)?;
    }

    out.flush()
        .map_err(|e| TrackerError::Export(e.to_string()))
}

/// Write transfer rows as CSV
pub fn export_transfers_csv<W: Write>(rows: &[TransferRow], writer: W) -> TrackerResult<()> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record(["ID", "Timestamp", "Equipment ID", "Equipment", "Actor", "Description"])
        .map_err(export_error)?;

    for row in rows {
        out.write_record([
            row.record.id.as_uuid().to_string(),
            row.record.timestamp.to_rfc3339(),
            row.record.subject.to_string(),
            row.subject.clone(),
            row.actor.clone(),
            row.record.description.clone(),
        ])
        .map_err(export_error)?;
    }

    out.flush()
        .map_err(|e| TrackerError::Export(e.to_string()))
}

fn export_error(e: csv::Error) -> TrackerError {
    TrackerError::Export(e.to_string())
}
