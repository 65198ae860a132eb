//! History display formatting

use crate::services::{AuditRow, TransferRow};

/// Format audit rows as a table, newest first
pub fn format_audit_rows(rows: &[AuditRow], date_format: &str) -> String {
    if rows.is_empty() {
        return "No audit entries found.".to_string();
    }

    let subject_width = rows
        .iter()
        .map(|r| r.subject.len())
        .max()
        .unwrap_or(7)
        .max(7);
    let actor_width = rows.iter().map(|r| r.actor.len()).max().unwrap_or(5).max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<19}  {:<7}  {:<subject_width$}  {:<actor_width$}  {}\n",
        "Time",
        "Action",
        "Subject",
        "Actor",
        "Detail",
        subject_width = subject_width,
        actor_width = actor_width,
    ));
    output.push_str(&format!(
        "{:-<19}  {:-<7}  {:-<subject_width$}  {:-<actor_width$}  {:-<20}\n",
        "",
        "",
        "",
        "",
        "",
        subject_width = subject_width,
        actor_width = actor_width,
    ));

    for row in rows {
        output.push_str(&format!(
            "{:<19}  {:<7}  {:<subject_width$}  {:<actor_width$}  {}\n",
            row.entry.timestamp.format(date_format).to_string(),
            row.entry.action.to_string(),
            row.subject,
            row.actor,
            row.entry.detail,
            subject_width = subject_width,
            actor_width = actor_width,
        ));
    }

    output
}

/// Format transfer rows, newest first
pub fn format_transfer_rows(rows: &[TransferRow], date_format: &str) -> String {
    if rows.is_empty() {
        return "No stock transfers found.".to_string();
    }

    let mut output = String::new();
    for row in rows {
        output.push_str(&format!(
            "  {}  {} ({}): {} [by {}]\n",
            row.record.timestamp.format(date_format),
            row.subject,
            row.record.subject,
            row.record.description,
            row.actor
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditAction, AuditLogEntry, StockTransferRecord};
    use crate::models::EquipmentId;
    use chrono::Utc;

    #[test]
    fn test_format_audit_rows() {
        let rows = vec![AuditRow {
            entry: AuditLogEntry::new(
                AuditAction::Deleted,
                Utc::now(),
                None,
                None,
                "Name: Laptop, Model: T14",
            ),
            subject: "deleted equipment".into(),
            actor: "unknown".into(),
        }];

        let output = format_audit_rows(&rows, "%Y-%m-%d %H:%M:%S");
        assert!(output.contains("DELETED"));
        assert!(output.contains("deleted equipment"));
        assert!(output.contains("Name: Laptop, Model: T14"));
    }

    #[test]
    fn test_format_transfer_rows() {
        let rows = vec![TransferRow {
            record: StockTransferRecord::new(
                EquipmentId::new(3),
                None,
                Utc::now(),
                "Moved from stock 1 to stock 2",
            ),
            subject: "Laptop".into(),
            actor: "unknown".into(),
        }];

        let output = format_transfer_rows(&rows, "%Y-%m-%d");
        assert!(output.contains("Laptop (3): Moved from stock 1 to stock 2 [by unknown]"));
        assert_eq!(format_transfer_rows(&[], "%Y"), "No stock transfers found.");
    }
}
