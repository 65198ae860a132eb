//! Export of history data
//!
//! - CSV: audit log and transfer history (spreadsheet-compatible)
//! - JSON: audit log with schema versioning

pub mod csv;
pub mod json;

pub use self::csv::{export_audit_csv, export_transfers_csv};
pub use self::json::{export_audit_json, AuditExport, EXPORT_SCHEMA_VERSION};
