//! Audit trail for equipment changes
//!
//! Every create, update and delete of an equipment record leaves exactly one
//! entry in the audit log, and every stock reassignment leaves a transfer
//! record.
//!
//! # Architecture
//!
//! - `FieldSnapshot` / `ChangeSet`: immutable snapshots of the tracked fields
//!   and the pure diff between two of them.
//! - `ActorContext`: the acting user, resolved once at the request boundary.
//! - `render`: the human-readable detail text of each entry.
//! - `AuditLogWriter`: stamps and persists entries.
//!
//! # Example
//!
//! ```rust,ignore
//! use equiptrack::audit::{AuditAction, AuditLogWriter, ChangeSet, FieldSnapshot};
//!
//! let before = FieldSnapshot::capture(&equipment);
//! patch.apply_to(&mut equipment);
//! storage.equipment.update(equipment.clone())?;
//! let changes = ChangeSet::between(&before, &FieldSnapshot::capture(&equipment));
//!
//! let detail = render::describe_changes(&changes, &storage.stocks, policy)?;
//! AuditLogWriter::new(&storage.audit_log).record(
//!     AuditAction::Updated,
//!     Some(equipment.id),
//!     &actor,
//!     detail,
//! )?;
//! ```

mod actor;
mod entry;
pub mod render;
mod tracker;
mod writer;

pub use actor::ActorContext;
pub use entry::{AuditAction, AuditLogEntry, StockTransferRecord};
pub use render::StockNames;
pub use tracker::{ChangeSet, FieldChange, FieldSnapshot, FieldValue, TrackedField};
pub use writer::AuditLogWriter;
